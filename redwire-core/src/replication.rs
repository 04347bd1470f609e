//! Hooks for mirroring a world to remote clients.
//!
//! A server sends the whole grid with [`VoxelStore::as_bytes`] when a client
//! joins, then flushes [`Level::take_block_updates`] every tick. Clients edit
//! through [`Level::apply_remote_change`] on the server and replay server
//! updates with [`Level::apply_block_updates`].
//!
//! [`VoxelStore::as_bytes`]: crate::storage::VoxelStore::as_bytes

use redwire_utils::UpdateFlags;

use crate::level::Level;
use crate::listener::{BlockChangeListener, ChangeLog};

/// The current state of one changed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockUpdate {
    /// Packed cell index, see [`VoxelStore::pos_to_index`].
    ///
    /// [`VoxelStore::pos_to_index`]: crate::storage::VoxelStore::pos_to_index
    pub index: u32,
    /// Block id.
    pub id: u8,
    /// Block metadata.
    pub meta: u8,
}

impl Level<ChangeLog> {
    /// Drains the change log into updates carrying each cell's state as it
    /// is now, in first-change order.
    pub fn take_block_updates(&mut self) -> Vec<BlockUpdate> {
        let changed = self.listener.take();
        changed
            .into_iter()
            .filter_map(|pos| {
                let index = self.store.pos_to_index(pos)?;
                let (id, meta) = self.store.get(pos);
                Some(BlockUpdate { index, id, meta })
            })
            .collect()
    }
}

impl<L: BlockChangeListener> Level<L> {
    /// Applies a client's edit if the cell still holds what the client saw.
    ///
    /// Returns false if the index is outside the world or the cell changed
    /// in the meantime; the edit is then dropped.
    pub fn apply_remote_change(
        &mut self,
        index: u32,
        old_id: u8,
        old_meta: u8,
        new_id: u8,
        new_meta: u8,
    ) -> bool {
        let Some(pos) = self.store.index_to_pos(index) else {
            log::debug!("Rejected remote change: index {index} is outside the world");
            return false;
        };
        let current = self.store.get(pos);
        if current != (old_id, old_meta) {
            log::debug!(
                "Rejected remote change at {pos}: expected {old_id}:{old_meta}, found {}:{}",
                current.0,
                current.1
            );
            return false;
        }
        self.set_block(pos, new_id, new_meta & 0x0f, UpdateFlags::UPDATE_ALL)
    }

    /// Replays updates received from a server. Cells are written and marked
    /// dirty, the simulation does not run.
    pub fn apply_block_updates(&mut self, updates: &[BlockUpdate]) {
        for update in updates {
            match self.store.index_to_pos(update.index) {
                Some(pos) => {
                    self.set_block(pos, update.id, update.meta, UpdateFlags::MARK_DIRTY);
                }
                None => log::warn!("Ignored block update for index {}", update.index),
            }
        }
    }
}
