//! Time ordered, deduplicated queue of pending re-evaluations.

use std::collections::BinaryHeap;

use redwire_utils::BlockPos;
use rustc_hash::FxHashSet;

use super::{ScheduledTick, TickKey};
use crate::storage::VoxelStore;

/// Storage for scheduled ticks, providing:
/// - A priority queue ordered by `(trigger_tick, sub_tick_order)`
/// - Deduplication to prevent scheduling the same `(pos, expected_id)` twice
///
/// When a tick is scheduled for a cell that already has a pending tick with
/// the same expected id, the new tick is ignored and the existing one keeps
/// its timing.
#[derive(Debug, Default)]
pub struct ScheduledUpdateQueue {
    /// Priority queue of scheduled ticks, ordered by trigger time.
    tick_queue: BinaryHeap<ScheduledTick>,
    /// Set of (pos, expected id) pairs currently queued.
    ticks_per_position: FxHashSet<TickKey>,
    /// Counter for generating unique sub-tick order values.
    sub_tick_counter: u64,
}

impl ScheduledUpdateQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a re-evaluation of `pos` at `trigger_tick`, guarded by the
    /// id the cell holds right now.
    ///
    /// Returns `true` if the tick was queued, `false` if an identical one is
    /// already pending.
    pub fn schedule(&mut self, store: &VoxelStore, pos: BlockPos, trigger_tick: u64) -> bool {
        let expected_id = store.get_id(pos);
        let key = TickKey { pos, expected_id };
        if !self.ticks_per_position.insert(key) {
            return false;
        }

        let sub_tick_order = self.sub_tick_counter;
        self.sub_tick_counter += 1;
        self.tick_queue.push(ScheduledTick::new(
            pos,
            expected_id,
            trigger_tick,
            sub_tick_order,
        ));
        log::trace!("Scheduled {pos} (id {expected_id}) for tick {trigger_tick}");
        true
    }

    /// Returns a reference to the next tick to fire, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&ScheduledTick> {
        self.tick_queue.peek()
    }

    /// Removes and returns the earliest tick if it is due at `current_tick`.
    ///
    /// Also removes it from the deduplication set, so the cell can be
    /// scheduled again while the popped tick is being processed.
    pub fn poll_due(&mut self, current_tick: u64) -> Option<ScheduledTick> {
        if self.tick_queue.peek()?.trigger_tick > current_tick {
            return None;
        }
        let tick = self.tick_queue.pop()?;
        self.ticks_per_position.remove(&TickKey::from(&tick));
        Some(tick)
    }

    /// Checks if a tick guarded by `expected_id` is pending for `pos`.
    #[must_use]
    pub fn has_scheduled(&self, pos: BlockPos, expected_id: u8) -> bool {
        self.ticks_per_position
            .contains(&TickKey { pos, expected_id })
    }

    /// Returns the number of pending ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tick_queue.len()
    }

    /// Returns `true` if there are no pending ticks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tick_queue.is_empty()
    }

    /// Drops every pending tick.
    pub fn clear(&mut self) {
        self.tick_queue.clear();
        self.ticks_per_position.clear();
    }

    /// Returns an iterator over all pending ticks.
    ///
    /// Note: The order is not guaranteed to match trigger order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledTick> {
        self.tick_queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(pos: BlockPos, id: u8) -> VoxelStore {
        let mut store = VoxelStore::new(16, 16);
        store.set(pos, id, 0);
        store
    }

    #[test]
    fn test_schedule_and_poll() {
        let pos = BlockPos::new(10, 64, 12);
        let mut store = store_with(pos, 76);
        let mut queue = ScheduledUpdateQueue::new();

        assert!(queue.schedule(&store, pos, 100));
        assert_eq!(queue.len(), 1);
        assert!(queue.has_scheduled(pos, 76));

        // Same pos and id again - ignored, keeps the earlier timing
        assert!(!queue.schedule(&store, pos, 50));
        assert_eq!(queue.len(), 1);

        // Once the block changed the guard differs, so a second entry is added
        store.set(pos, 75, 0);
        assert!(queue.schedule(&store, pos, 100));
        assert_eq!(queue.len(), 2);

        assert!(queue.poll_due(99).is_none());
        let first = queue.poll_due(100).expect("due");
        assert_eq!(first.expected_id, 76);
        assert_eq!(first.trigger_tick, 100);
        assert!(!queue.has_scheduled(pos, 76));

        // Now it can be scheduled again
        store.set(pos, 76, 0);
        assert!(queue.schedule(&store, pos, 300));
    }

    #[test]
    fn test_ordering() {
        let store = VoxelStore::new(16, 16);
        let mut queue = ScheduledUpdateQueue::new();

        queue.schedule(&store, BlockPos::new(0, 0, 0), 200);
        queue.schedule(&store, BlockPos::new(1, 0, 0), 100);
        queue.schedule(&store, BlockPos::new(2, 0, 0), 150);
        queue.schedule(&store, BlockPos::new(3, 0, 0), 100);

        let order: Vec<_> = std::iter::from_fn(|| queue.poll_due(1000))
            .map(|tick| tick.pos.x())
            .collect();
        // Tick order first, insertion order within a tick
        assert_eq!(order, vec![1, 3, 2, 0]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_out_of_world_is_inert() {
        let store = VoxelStore::new(16, 16);
        let mut queue = ScheduledUpdateQueue::new();
        let outside = BlockPos::new(-5, 0, 0);

        assert!(queue.schedule(&store, outside, 1));
        assert!(queue.has_scheduled(outside, 0));

        queue.clear();
        assert!(queue.is_empty());
        assert!(!queue.has_scheduled(outside, 0));
        assert_eq!(queue.iter().count(), 0);
    }
}
