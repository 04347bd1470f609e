//! The built-in tile set.

use crate::registry::TileRegistry;
use crate::tile::{RenderType, Support, uv};

/// Numeric ids of the built-in tiles.
#[allow(missing_docs)]
pub mod tile_ids {
    pub const AIR: u8 = 0;
    pub const STONE: u8 = 1;
    pub const GRASS: u8 = 2;
    pub const DIRT: u8 = 3;
    pub const COBBLESTONE: u8 = 4;
    pub const PLANKS: u8 = 5;
    pub const SAPLING: u8 = 6;
    pub const BEDROCK: u8 = 7;
    pub const SAND: u8 = 12;
    pub const GRAVEL: u8 = 13;
    pub const GOLD_ORE: u8 = 14;
    pub const IRON_ORE: u8 = 15;
    pub const COAL_ORE: u8 = 16;
    pub const LOG: u8 = 17;
    pub const LEAVES: u8 = 18;
    pub const SPONGE: u8 = 19;
    pub const GLASS: u8 = 20;
    pub const CLOTH: u8 = 35;
    pub const DANDELION: u8 = 37;
    pub const ROSE: u8 = 38;
    pub const BROWN_MUSHROOM: u8 = 39;
    pub const RED_MUSHROOM: u8 = 40;
    pub const GOLD_BLOCK: u8 = 41;
    pub const IRON_BLOCK: u8 = 42;
    pub const DOUBLE_SLAB: u8 = 43;
    pub const SLAB: u8 = 44;
    pub const BRICKS: u8 = 45;
    pub const TNT: u8 = 46;
    pub const BOOKSHELF: u8 = 47;
    pub const MOSSY_COBBLESTONE: u8 = 48;
    pub const OBSIDIAN: u8 = 49;
    pub const TORCH: u8 = 50;
    pub const REDSTONE_WIRE: u8 = 55;
    pub const REDSTONE_TORCH_OFF: u8 = 75;
    pub const REDSTONE_TORCH_ON: u8 = 76;
}

const CLOTH_TEX: [u8; 16] = [
    uv(0, 4),
    uv(2, 13),
    uv(2, 12),
    uv(2, 11),
    uv(2, 10),
    uv(2, 9),
    uv(2, 8),
    uv(2, 7),
    uv(1, 14),
    uv(1, 13),
    uv(1, 12),
    uv(1, 11),
    uv(1, 10),
    uv(1, 9),
    uv(1, 8),
    uv(1, 7),
];

impl TileRegistry {
    /// Builds the registry with every built-in tile.
    #[must_use]
    pub fn vanilla() -> Self {
        use tile_ids::*;

        let mut r = Self::empty();

        r.tile(STONE).tex(uv(1, 0));
        r.tile(GRASS).tex_sided(uv(3, 0), uv(0, 0), uv(2, 0));
        r.tile(DIRT).tex(uv(2, 0));
        r.tile(COBBLESTONE).tex(uv(0, 1));
        r.tile(PLANKS).tex(uv(4, 0));
        r.tile(BEDROCK).tex(uv(1, 1));
        r.tile(SAND).tex(uv(2, 1));
        r.tile(GRAVEL).tex(uv(3, 1));
        r.tile(GOLD_ORE).tex(uv(0, 2));
        r.tile(IRON_ORE).tex(uv(1, 2));
        r.tile(COAL_ORE).tex(uv(2, 2));
        r.tile(LOG).tex_sided(uv(4, 1), uv(5, 1), uv(5, 1));
        r.tile(LEAVES).transparent().tex(uv(4, 3));
        r.tile(SPONGE).tex(uv(0, 3));
        r.tile(GLASS).transparent().tex(uv(1, 3));
        r.tile(CLOTH).tex_per_meta(CLOTH_TEX);
        r.tile(GOLD_BLOCK).tex(uv(7, 1));
        r.tile(IRON_BLOCK).tex(uv(6, 1));
        r.tile(DOUBLE_SLAB).tex_sided(uv(5, 0), uv(6, 0), uv(6, 0));
        r.tile(BRICKS).tex(uv(7, 0));
        r.tile(TNT).tex_sided(uv(8, 0), uv(9, 0), uv(10, 0));
        r.tile(BOOKSHELF).tex_sided(uv(3, 2), uv(4, 0), uv(4, 0));
        r.tile(MOSSY_COBBLESTONE).tex(uv(4, 2));
        r.tile(OBSIDIAN).tex(uv(5, 2));

        for (id, tex) in [
            (SAPLING, uv(15, 0)),
            (DANDELION, uv(13, 0)),
            (ROSE, uv(12, 0)),
            (BROWN_MUSHROOM, uv(13, 1)),
            (RED_MUSHROOM, uv(12, 1)),
        ] {
            r.tile(id)
                .render_as(RenderType::Plant)
                .needs_support(Support::Below)
                .tex(tex);
        }

        r.tile(SLAB)
            .render_as(RenderType::Slab)
            .needs_support(Support::Below)
            .tex_sided(uv(5, 0), uv(6, 0), uv(6, 0));

        r.tile(TORCH)
            .render_as(RenderType::Torch)
            .needs_support(Support::Attachment)
            .tex(uv(0, 5));
        r.tile(REDSTONE_TORCH_OFF)
            .render_as(RenderType::Torch)
            .needs_support(Support::Attachment)
            .power_source()
            .tex(uv(3, 7));
        r.tile(REDSTONE_TORCH_ON)
            .render_as(RenderType::Torch)
            .needs_support(Support::Attachment)
            .power_source()
            .tex(uv(3, 6));
        r.tile(REDSTONE_WIRE)
            .render_as(RenderType::Wire)
            .needs_support(Support::Below)
            .power_source()
            .tex(uv(4, 10));

        log::debug!("Built vanilla tile registry");
        r
    }
}
