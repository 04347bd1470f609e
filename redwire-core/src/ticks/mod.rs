//! Scheduled tick system.
//!
//! Blocks schedule a re-evaluation of themselves a few ticks in the future.
//! Each entry is guarded by the block id it was scheduled for and silently
//! expires if the cell changed before it fires.
//!
//! - [`ScheduledTick`] - A single scheduled tick entry
//! - [`TickKey`] - Deduplication key, position plus expected id
//! - [`ScheduledUpdateQueue`] - The time ordered queue itself

mod scheduled_tick;
mod update_queue;

pub use scheduled_tick::{ScheduledTick, TickKey};
pub use update_queue::ScheduledUpdateQueue;

/// Hard cap on how many scheduled ticks may fire in a single world tick.
/// Anything beyond it is deferred to the next tick, never dropped.
pub const MAX_SCHEDULED_PER_TICK: usize = 1000;

/// Default delay before a redstone torch re-evaluates its input.
pub const TORCH_UPDATE_DELAY: u64 = 2;
