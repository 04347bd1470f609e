//! Scheduled tick types.

use std::cmp::Ordering;

use redwire_utils::BlockPos;

/// A deferred re-evaluation of one cell.
///
/// The entry only fires if the cell still holds `expected_id` when it is
/// processed.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledTick {
    /// The cell to re-evaluate.
    pub pos: BlockPos,
    /// The block id the cell held when the tick was scheduled.
    pub expected_id: u8,
    /// The absolute world tick when this should fire.
    pub trigger_tick: u64,
    /// Insertion counter, orders ticks sharing a `trigger_tick`.
    /// Lower values run first.
    pub sub_tick_order: u64,
}

impl ScheduledTick {
    /// Creates a new scheduled tick.
    #[must_use]
    pub const fn new(pos: BlockPos, expected_id: u8, trigger_tick: u64, sub_tick_order: u64) -> Self {
        Self {
            pos,
            expected_id,
            trigger_tick,
            sub_tick_order,
        }
    }
}

impl PartialEq for ScheduledTick {
    fn eq(&self, other: &Self) -> bool {
        self.trigger_tick == other.trigger_tick && self.sub_tick_order == other.sub_tick_order
    }
}

impl Eq for ScheduledTick {}

impl PartialOrd for ScheduledTick {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTick {
    /// Ordering for the priority queue.
    ///
    /// `BinaryHeap` is a max-heap, so the comparison is reversed to pop the
    /// earliest tick first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .trigger_tick
            .cmp(&self.trigger_tick)
            .then_with(|| other.sub_tick_order.cmp(&self.sub_tick_order))
    }
}

/// Key for deduplication in the tick set.
///
/// Only considers position and expected id, never timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickKey {
    /// The cell to re-evaluate.
    pub pos: BlockPos,
    /// The id the cell must still hold.
    pub expected_id: u8,
}

impl From<&ScheduledTick> for TickKey {
    fn from(tick: &ScheduledTick) -> Self {
        Self {
            pos: tick.pos,
            expected_id: tick.expected_id,
        }
    }
}
