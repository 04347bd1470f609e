//! # Redwire Registry
//!
//! Immutable per-tile facts: how a tile is drawn, whether it is opaque,
//! whether wire connects to it, what it rests on and which textures it uses.
//!
//! A [`TileRegistry`] is built once and passed by reference into the world,
//! so tests can swap in a small synthetic one.

pub mod registry;
pub mod tile;
pub mod vanilla;

pub use registry::{TileBuilder, TileRegistry};
pub use tile::{RenderType, Support, Texture, TileInfo, uv};
pub use vanilla::tile_ids;
