//! # Redwire Core
//!
//! A bounded voxel world and the redstone simulation running on it.
//!
//! - [`storage`] - Block ids and metadata for every cell
//! - [`ticks`] - Deferred block updates keyed to a world tick
//! - [`level`] - The world: mutation, neighbour reactions and the tick loop
//! - [`redstone`] - Power predicates, wire propagation and torches
//! - [`listener`] - Observers for changed cells
//! - [`replication`] - Server and client sides of world mirroring
//! - [`clock`] - Wall-clock to tick conversion
//! - [`config`] - World configuration file
//! - [`demo`] - The start-up showcase scene

pub mod clock;
pub mod config;
pub mod demo;
pub mod level;
pub mod listener;
pub mod redstone;
pub mod replication;
pub mod storage;
pub mod ticks;

pub use clock::TickClock;
pub use config::{ConfigError, WorldConfig};
pub use level::{Level, LevelSettings};
pub use listener::{BlockChangeListener, ChangeLog, NoopListener};
pub use replication::BlockUpdate;
pub use storage::{VoxelStore, WORLD_HEIGHT};
