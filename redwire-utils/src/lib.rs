//! # Redwire Utils
//!
//! Shared position, direction and flag types for the redwire workspace.
#![allow(missing_docs)]

pub mod direction;
pub mod math;
pub mod types;

pub use direction::Direction;
pub use types::{BlockPos, UpdateFlags};
