//! The start-up showcase scene.

use redwire_registry::tile_ids;
use redwire_utils::{BlockPos, UpdateFlags};

use crate::level::Level;
use crate::listener::BlockChangeListener;

/// Single cells: the corner sampler, the tile column at `x = 10`, the
/// stacked column at `(5, 5)` and the plant row at `x = 7`.
const CELLS: &[(i32, i32, i32, u8)] = &[
    (0, 0, 0, tile_ids::AIR),
    (0, 0, 1, tile_ids::STONE),
    (1, 0, 1, tile_ids::GRASS),
    (1, 0, 0, tile_ids::DIRT),
    (0, 1, 0, tile_ids::COBBLESTONE),
    (0, 1, 1, tile_ids::PLANKS),
    (1, 1, 1, tile_ids::STONE),
    (1, 1, 0, tile_ids::STONE),
    (10, 0, 0, tile_ids::STONE),
    (10, 1, 0, tile_ids::GRASS),
    (10, 2, 0, tile_ids::DIRT),
    (10, 3, 0, tile_ids::COBBLESTONE),
    (10, 4, 0, tile_ids::PLANKS),
    (10, 5, 0, tile_ids::BEDROCK),
    (10, 6, 0, tile_ids::SAND),
    (10, 7, 0, tile_ids::GRAVEL),
    (10, 8, 0, tile_ids::GOLD_ORE),
    (10, 9, 0, tile_ids::IRON_ORE),
    (10, 10, 0, tile_ids::COAL_ORE),
    (10, 11, 0, tile_ids::LOG),
    (10, 12, 0, tile_ids::LEAVES),
    (10, 13, 0, tile_ids::SPONGE),
    (10, 14, 0, tile_ids::GLASS),
    (10, 15, 0, tile_ids::GOLD_BLOCK),
    (10, 16, 0, tile_ids::IRON_BLOCK),
    (10, 17, 0, tile_ids::DOUBLE_SLAB),
    (10, 18, 0, tile_ids::SLAB),
    (10, 19, 0, tile_ids::BRICKS),
    (10, 20, 0, tile_ids::TNT),
    (10, 21, 0, tile_ids::BOOKSHELF),
    (10, 22, 0, tile_ids::MOSSY_COBBLESTONE),
    (10, 23, 0, tile_ids::OBSIDIAN),
    (5, 0, 5, tile_ids::LOG),
    (5, 2, 5, tile_ids::GRASS),
    (5, 4, 5, tile_ids::DOUBLE_SLAB),
    (5, 6, 5, tile_ids::TNT),
    (5, 8, 5, tile_ids::BOOKSHELF),
    (5, 10, 5, tile_ids::SLAB),
    (7, 0, 0, tile_ids::DIRT),
    (7, 0, 1, tile_ids::DIRT),
    (7, 0, 2, tile_ids::DIRT),
    (7, 0, 3, tile_ids::DIRT),
    (7, 0, 4, tile_ids::DIRT),
    (7, 1, 0, tile_ids::SAPLING),
    (7, 1, 1, tile_ids::DANDELION),
    (7, 1, 2, tile_ids::ROSE),
    (7, 1, 3, tile_ids::BROWN_MUSHROOM),
    (7, 1, 4, tile_ids::RED_MUSHROOM),
];

/// Writes the showcase into `level` without running the simulation.
///
/// Cells outside the world are skipped. Returns the number of cells written.
pub fn populate_showcase<L: BlockChangeListener>(level: &mut Level<L>) -> usize {
    let mut written = 0;
    let mut put = |level: &mut Level<L>, pos: BlockPos, id: u8, meta: u8| {
        if level.set_block(pos, id, meta, UpdateFlags::empty()) {
            written += 1;
        }
    };

    for &(x, y, z, id) in CELLS {
        put(level, BlockPos::new(x, y, z), id, 0);
    }

    // Every cloth colour, stacked
    for meta in 0..16u8 {
        put(
            level,
            BlockPos::new(10, i32::from(meta), 10),
            tile_ids::CLOTH,
            meta,
        );
    }

    // A cloth strip carrying each torch in every orientation, then a wire
    for z in 0..16 {
        put(level, BlockPos::new(3, 0, z), tile_ids::CLOTH, 0);
    }
    let torches = [
        tile_ids::TORCH,
        tile_ids::REDSTONE_TORCH_OFF,
        tile_ids::REDSTONE_TORCH_ON,
    ];
    for (group, id) in (0i32..).zip(torches) {
        for meta in 0..5u8 {
            put(
                level,
                BlockPos::new(3, 1, group * 5 + i32::from(meta)),
                id,
                meta,
            );
        }
    }
    put(level, BlockPos::new(3, 1, 15), tile_ids::REDSTONE_WIRE, 0);

    log::debug!("Showcase wrote {written} cell(s)");
    written
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use redwire_registry::TileRegistry;
    use redwire_registry::tile_ids::{CLOTH, GRASS, REDSTONE_TORCH_ON, REDSTONE_WIRE, TORCH};

    use super::*;
    use crate::storage::VoxelStore;

    #[test]
    fn test_showcase_layout() {
        let mut level = Level::new(VoxelStore::new(16, 16), Arc::new(TileRegistry::vanilla()));
        let written = populate_showcase(&mut level);

        assert_eq!(written, CELLS.len() + 16 + 16 + 15 + 1);
        assert_eq!(level.get_id(BlockPos::new(1, 0, 1)), GRASS);
        assert_eq!(level.get_id(BlockPos::new(10, 23, 0)), tile_ids::OBSIDIAN);
        assert_eq!(level.get_id(BlockPos::new(10, 7, 10)), CLOTH);
        assert_eq!(level.get_meta(BlockPos::new(10, 7, 10)), 7);
        assert_eq!(level.get_id(BlockPos::new(3, 1, 4)), TORCH);
        assert_eq!(level.get_meta(BlockPos::new(3, 1, 4)), 4);
        assert_eq!(level.get_id(BlockPos::new(3, 1, 11)), REDSTONE_TORCH_ON);
        assert_eq!(level.get_meta(BlockPos::new(3, 1, 11)), 1);
        assert_eq!(level.get_id(BlockPos::new(3, 1, 15)), REDSTONE_WIRE);

        // Raw writes: nothing scheduled, nothing reported
        assert!(level.scheduled().is_empty());
        assert!(level.listener().is_empty());
    }

    #[test]
    fn test_showcase_is_clipped() {
        let mut level = Level::new(VoxelStore::new(4, 4), Arc::new(TileRegistry::vanilla()));
        let written = populate_showcase(&mut level);

        // The corner sampler plus the first four cells of the torch strip
        assert_eq!(written, 8 + 4 + 4);
        assert_eq!(level.get_id(BlockPos::new(10, 0, 0)), tile_ids::AIR);
        assert_eq!(level.get_id(BlockPos::new(0, 1, 1)), tile_ids::PLANKS);
    }
}
