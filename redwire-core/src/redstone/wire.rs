//! Wire signal propagation.
//!
//! A wire cell stores its strength (0-15) in its metadata. A wire fed by
//! anything other than wire is at 15; otherwise it is one less than the
//! strongest wire it is linked to. A pass re-evaluates cells from an explicit
//! worklist until every touched cell agrees with its links.

use std::mem;

use redwire_utils::{BlockPos, Direction};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::power::WirePowerSuppressed;
use crate::level::Level;
use crate::listener::BlockChangeListener;

/// Strength of a wire fed directly by a power source.
pub const MAX_WIRE_STRENGTH: u8 = 15;

/// Cells to notify once a propagation pass has settled, in insertion order
/// and without duplicates.
#[derive(Debug, Default)]
pub(crate) struct PendingUpdates {
    order: Vec<BlockPos>,
    seen: FxHashSet<BlockPos>,
}

impl PendingUpdates {
    fn insert(&mut self, pos: BlockPos) {
        if self.seen.insert(pos) {
            self.order.push(pos);
        }
    }

    fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<L: BlockChangeListener> Level<L> {
    /// Cells a wire at `pos` exchanges signal with: the four lateral cells,
    /// plus the cell above an opaque lateral (if nothing covers `pos`) or the
    /// cell below a non-opaque one.
    pub(crate) fn wire_links(&self, pos: BlockPos) -> SmallVec<[BlockPos; 8]> {
        let covered = self.is_opaque(pos.above());
        let mut links = SmallVec::new();
        for dir in Direction::HORIZONTAL {
            let side = dir.relative(pos);
            links.push(side);
            if self.is_opaque(side) {
                if !covered {
                    links.push(side.above());
                }
            } else {
                links.push(side.below());
            }
        }
        links
    }

    /// Strength the wire at `pos` should have given its current surroundings.
    fn wire_strength(&self, pos: BlockPos) -> u8 {
        let fed = {
            let _guard = WirePowerSuppressed::new(&self.wires_provide_power);
            self.powered_weakly(pos)
        };
        if fed {
            return MAX_WIRE_STRENGTH;
        }
        self.wire_links(pos)
            .into_iter()
            .filter(|link| self.is_wire(*link))
            .map(|link| self.store.get_meta(link))
            .max()
            .unwrap_or(0)
            .saturating_sub(1)
    }

    /// Runs one propagation pass starting at the wire at `pos`, then notifies
    /// the blocks around every cell that switched on or off.
    pub fn wire_propagation_start(&mut self, pos: BlockPos) {
        self.propagate_wires(&[pos]);
    }

    /// Runs one propagation pass seeded from several cells. Seeds that are
    /// not wire are ignored.
    pub(crate) fn propagate_wires(&mut self, seeds: &[BlockPos]) {
        self.pending.clear();

        let mut queued: FxHashSet<BlockPos> = FxHashSet::default();
        let mut stack: Vec<BlockPos> = Vec::with_capacity(seeds.len());
        for &seed in seeds {
            if queued.insert(seed) {
                stack.push(seed);
            }
        }

        let mut writes = 0usize;
        while let Some(pos) = stack.pop() {
            queued.remove(&pos);
            // Removed since it was queued
            if !self.is_wire(pos) {
                continue;
            }

            let old = self.store.get_meta(pos);
            let new = self.wire_strength(pos);
            if new == old {
                continue;
            }
            self.store.set_meta(pos, new);
            self.listener.mark_dirty(pos);
            writes += 1;

            for link in self.wire_links(pos) {
                if !self.is_wire(link) {
                    continue;
                }
                let strength = self.store.get_meta(link);
                let can_raise = strength + 1 < new;
                let was_fed = new < old && strength + 1 == old;
                if (can_raise || was_fed) && queued.insert(link) {
                    stack.push(link);
                }
            }

            if old == 0 || new == 0 {
                self.pending.insert(pos);
                for dir in Direction::ALL {
                    self.pending.insert(dir.relative(pos));
                }
            }
        }

        let pending = mem::take(&mut self.pending);
        log::trace!(
            "Wire pass from {} seed(s): {writes} write(s), {} cell(s) to notify",
            seeds.len(),
            pending.order.len()
        );
        for pos in pending.order {
            self.update_neighbors(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use redwire_registry::TileRegistry;
    use redwire_registry::tile_ids::{REDSTONE_TORCH_ON, REDSTONE_WIRE, STONE};
    use redwire_utils::UpdateFlags;

    use super::*;
    use crate::storage::VoxelStore;

    fn level() -> Level {
        Level::new(VoxelStore::new(32, 32), Arc::new(TileRegistry::vanilla()))
    }

    /// Stone floor at y = 0 from x = 0 to `len`, an emitting torch at x = 0
    /// and `len` wires after it.
    fn wire_run(level: &mut Level, len: i32) -> Vec<BlockPos> {
        for x in 0..=len {
            level.set_block(BlockPos::new(x, 0, 0), STONE, 0, UpdateFlags::empty());
        }
        level.place(BlockPos::new(0, 1, 0), REDSTONE_TORCH_ON, 5);
        (1..=len)
            .map(|x| {
                let pos = BlockPos::new(x, 1, 0);
                level.place(pos, REDSTONE_WIRE, 0);
                pos
            })
            .collect()
    }

    fn strengths(level: &Level, wires: &[BlockPos]) -> Vec<u8> {
        wires.iter().map(|pos| level.get_meta(*pos)).collect()
    }

    #[test]
    fn test_six_wire_run() {
        let mut level = level();
        let wires = wire_run(&mut level, 6);
        assert_eq!(strengths(&level, &wires), vec![15, 14, 13, 12, 11, 10]);
    }

    #[test]
    fn test_long_run_decays_to_zero() {
        let mut level = level();
        let wires = wire_run(&mut level, 20);
        let expected: Vec<u8> = (0..20u8).map(|i| 15u8.saturating_sub(i)).collect();
        assert_eq!(strengths(&level, &wires), expected);
    }

    #[test]
    fn test_pass_is_idempotent() {
        let mut level = level();
        let wires = wire_run(&mut level, 8);
        level.listener_mut().take();

        for pos in &wires {
            level.wire_propagation_start(*pos);
        }
        assert!(level.listener().is_empty());
        assert!(level.pending.is_empty());
    }

    #[test]
    fn test_cutting_the_source() {
        let mut level = level();
        let wires = wire_run(&mut level, 6);

        level.remove(BlockPos::new(0, 1, 0));
        assert_eq!(strengths(&level, &wires), vec![0; 6]);

        level.place(BlockPos::new(0, 1, 0), REDSTONE_TORCH_ON, 5);
        assert_eq!(strengths(&level, &wires), vec![15, 14, 13, 12, 11, 10]);
    }

    #[test]
    fn test_removing_a_wire_splits_the_run() {
        let mut level = level();
        let wires = wire_run(&mut level, 6);

        level.remove(wires[2]);
        assert_eq!(strengths(&level, &wires[..2]), vec![15, 14]);
        assert_eq!(strengths(&level, &wires[3..]), vec![0, 0, 0]);

        level.place(wires[2], REDSTONE_WIRE, 0);
        assert_eq!(strengths(&level, &wires), vec![15, 14, 13, 12, 11, 10]);
    }

    #[test]
    fn test_loop_without_source_dies_out() {
        let mut level = level();
        let ring = [
            BlockPos::new(2, 1, 2),
            BlockPos::new(3, 1, 2),
            BlockPos::new(3, 1, 3),
            BlockPos::new(2, 1, 3),
        ];
        let torch = BlockPos::new(1, 1, 2);
        for x in 0..5 {
            for z in 0..5 {
                level.set_block(BlockPos::new(x, 0, z), STONE, 0, UpdateFlags::empty());
            }
        }
        level.place(torch, REDSTONE_TORCH_ON, 5);
        for pos in ring {
            level.place(pos, REDSTONE_WIRE, 0);
        }
        assert_eq!(strengths(&level, &ring), vec![15, 14, 13, 14]);

        level.remove(torch);
        assert_eq!(strengths(&level, &ring), vec![0; 4]);
    }

    #[test]
    fn test_wire_climbs_a_step() {
        let mut level = level();
        for x in 0..4 {
            level.set_block(BlockPos::new(x, 0, 0), STONE, 0, UpdateFlags::empty());
        }
        let step = BlockPos::new(3, 1, 0);
        level.set_block(step, STONE, 0, UpdateFlags::empty());
        level.place(BlockPos::new(0, 1, 0), REDSTONE_TORCH_ON, 5);

        let low = [BlockPos::new(1, 1, 0), BlockPos::new(2, 1, 0)];
        for pos in low {
            level.place(pos, REDSTONE_WIRE, 0);
        }
        let high = step.above();
        level.place(high, REDSTONE_WIRE, 0);

        assert_eq!(strengths(&level, &low), vec![15, 14]);
        // Reached over the step, one less than the wire below it
        assert_eq!(level.get_meta(high), 13);
    }

    #[test]
    fn test_links() {
        let mut level = level();
        let pos = BlockPos::new(5, 1, 5);
        level.set_block(pos.offset(1, 0, 0), STONE, 0, UpdateFlags::empty());

        let links = level.wire_links(pos);
        assert_eq!(links.len(), 8);
        assert!(links.contains(&BlockPos::new(6, 2, 5)));
        assert!(links.contains(&BlockPos::new(4, 0, 5)));
        assert!(!links.contains(&BlockPos::new(6, 0, 5)));

        level.set_block(pos.above(), STONE, 0, UpdateFlags::empty());
        assert_eq!(level.wire_links(pos).len(), 7);
    }
}
