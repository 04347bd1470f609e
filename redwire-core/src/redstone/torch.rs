//! Redstone torch inversion.

use redwire_registry::tile_ids;
use redwire_utils::{BlockPos, Direction, UpdateFlags};

use crate::level::Level;
use crate::listener::BlockChangeListener;

/// Side a torch rests against, decoded from its metadata.
///
/// `1`..=`4` hang on the west, east, north and south neighbour, anything
/// else stands on the block below.
#[must_use]
pub const fn torch_attachment(meta: u8) -> Direction {
    match meta {
        1 => Direction::West,
        2 => Direction::East,
        3 => Direction::North,
        4 => Direction::South,
        _ => Direction::Down,
    }
}

impl<L: BlockChangeListener> Level<L> {
    /// Returns true if the block a torch at `pos` rests on is powered.
    #[must_use]
    pub fn torch_input_powered(&self, pos: BlockPos) -> bool {
        let attach = torch_attachment(self.store.get_meta(pos));
        self.powered_strongly_from(attach.relative(pos), attach)
    }

    /// Scheduled re-evaluation of a redstone torch holding `id`.
    ///
    /// An emitting torch whose support became powered turns off, a blocked
    /// torch whose support lost power turns back on. The swap is a regular
    /// replace, so the old id runs its removal and the new id its placement.
    pub(crate) fn update_torch(&mut self, pos: BlockPos, id: u8) {
        let powered = self.torch_input_powered(pos);
        let next = match (id, powered) {
            (tile_ids::REDSTONE_TORCH_ON, true) => tile_ids::REDSTONE_TORCH_OFF,
            (tile_ids::REDSTONE_TORCH_OFF, false) => tile_ids::REDSTONE_TORCH_ON,
            _ => return,
        };
        log::debug!(
            "Torch at {pos} turned {}",
            if next == tile_ids::REDSTONE_TORCH_ON { "on" } else { "off" }
        );
        let meta = self.store.get_meta(pos);
        self.set_block(pos, next, meta, UpdateFlags::UPDATE_ALL);
    }
}
