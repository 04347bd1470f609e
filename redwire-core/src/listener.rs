//! Observers for cells whose visible state changed.

use std::mem;

use redwire_utils::BlockPos;
use rustc_hash::FxHashSet;

/// Receives every cell the world rewrites with [`UpdateFlags::MARK_DIRTY`].
///
/// A renderer uses it to rebuild the mesh of the containing region, a server
/// to collect the cells it has to send to clients.
///
/// [`UpdateFlags::MARK_DIRTY`]: redwire_utils::UpdateFlags::MARK_DIRTY
pub trait BlockChangeListener {
    /// Called once per changed cell, after the new state has been written.
    fn mark_dirty(&mut self, pos: BlockPos);
}

/// Listener that ignores every change.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl BlockChangeListener for NoopListener {
    fn mark_dirty(&mut self, _pos: BlockPos) {}
}

impl<F: FnMut(BlockPos)> BlockChangeListener for F {
    fn mark_dirty(&mut self, pos: BlockPos) {
        self(pos);
    }
}

/// Cells changed since the last flush, in first-change order without
/// duplicates.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    order: Vec<BlockPos>,
    seen: FxHashSet<BlockPos>,
}

impl ChangeLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the cell changed since the last flush.
    #[must_use]
    pub fn contains(&self, pos: BlockPos) -> bool {
        self.seen.contains(&pos)
    }

    /// Number of distinct changed cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing changed since the last flush.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Changed cells in first-change order.
    pub fn iter(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.order.iter().copied()
    }

    /// Empties the log, returning its contents.
    pub fn take(&mut self) -> Vec<BlockPos> {
        self.seen.clear();
        mem::take(&mut self.order)
    }
}

impl BlockChangeListener for ChangeLog {
    fn mark_dirty(&mut self, pos: BlockPos) {
        if self.seen.insert(pos) {
            self.order.push(pos);
        }
    }
}
