//! Power predicates.
//!
//! In every `powers_*(pos, face)` query, `face` points from the cell asking
//! towards `pos`. The asking cell is therefore `pos.relative(face.opposite())`.

use std::cell::Cell;

use redwire_registry::tile_ids;
use redwire_utils::{BlockPos, Direction};

use super::torch_attachment;
use crate::level::Level;
use crate::listener::BlockChangeListener;

/// Stops wire from providing power until dropped.
///
/// Raised while a wire checks whether something other than wire feeds it.
pub(crate) struct WirePowerSuppressed<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> WirePowerSuppressed<'a> {
    pub(crate) fn new(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(false);
        Self { flag, previous }
    }
}

impl Drop for WirePowerSuppressed<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

impl<L: BlockChangeListener> Level<L> {
    /// Returns true if wire routes towards blocks of this id.
    #[must_use]
    #[inline]
    pub fn is_power_source(&self, id: u8) -> bool {
        self.tiles.is_power_source(id)
    }

    /// Returns true if the block at `pos` delivers power out of `face`.
    ///
    /// An emitting torch powers every side but the block it hangs on. Wire
    /// powers the cell below it and the cells it points at.
    #[must_use]
    pub fn powers_weakly(&self, pos: BlockPos, face: Direction) -> bool {
        match self.store.get_id(pos) {
            tile_ids::REDSTONE_TORCH_ON => {
                face != torch_attachment(self.store.get_meta(pos)).opposite()
            }
            tile_ids::REDSTONE_WIRE => self.wire_powers(pos, face),
            _ => false,
        }
    }

    /// Returns true if the block at `pos` powers the cell on `face` strongly
    /// enough to pass through it.
    ///
    /// An emitting torch only strongly powers the block above it.
    #[must_use]
    pub fn powers_strongly(&self, pos: BlockPos, face: Direction) -> bool {
        match self.store.get_id(pos) {
            tile_ids::REDSTONE_TORCH_ON => face == Direction::Down,
            tile_ids::REDSTONE_WIRE => self.wire_powers(pos, face),
            _ => false,
        }
    }

    /// Returns true if any neighbour strongly powers `pos`.
    #[must_use]
    pub fn powered_strongly(&self, pos: BlockPos) -> bool {
        Direction::ALL
            .into_iter()
            .any(|dir| self.powers_strongly(dir.relative(pos), dir))
    }

    /// Returns true if the cell at `pos` delivers power towards `face`.
    ///
    /// An opaque block passes on strong power it receives from any side,
    /// anything else has to emit the power itself.
    #[must_use]
    pub fn powered_strongly_from(&self, pos: BlockPos, face: Direction) -> bool {
        if self.is_opaque(pos) {
            self.powered_strongly(pos)
        } else {
            self.powers_weakly(pos, face)
        }
    }

    /// Returns true if power reaches `pos` from any side, directly or
    /// through one solid block.
    #[must_use]
    pub fn powered_weakly(&self, pos: BlockPos) -> bool {
        Direction::ALL
            .into_iter()
            .any(|dir| self.powered_strongly_from(dir.relative(pos), dir))
    }

    fn wire_powers(&self, pos: BlockPos, face: Direction) -> bool {
        if !self.wires_provide_power.get() || self.store.get_meta(pos) == 0 {
            return false;
        }
        match face {
            Direction::Up => true,
            Direction::Down => false,
            _ => {
                // A lone dot powers all four sides, a line only its two ends.
                let towards = face.opposite();
                !Direction::HORIZONTAL
                    .into_iter()
                    .filter(|dir| !dir.same_axis(towards))
                    .any(|dir| self.wire_connects(pos, dir))
            }
        }
    }

    /// Returns true if the wire at `pos` visually runs towards `dir`, either
    /// on the same level or one step up or down.
    pub(crate) fn wire_connects(&self, pos: BlockPos, dir: Direction) -> bool {
        let side = dir.relative(pos);
        if self.is_power_source(self.store.get_id(side)) {
            return true;
        }
        if self.is_opaque(side) {
            !self.is_opaque(pos.above()) && self.is_wire(side.above())
        } else {
            self.is_wire(side.below())
        }
    }

    #[inline]
    pub(crate) fn is_wire(&self, pos: BlockPos) -> bool {
        self.store.get_id(pos) == tile_ids::REDSTONE_WIRE
    }
}
