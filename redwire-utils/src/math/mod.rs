//! Small math helpers shared by the workspace.

pub mod vector3;

pub use vector3::Vector3;
