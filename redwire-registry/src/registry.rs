use std::collections::BTreeMap;

use redwire_utils::Direction;
use serde::Serialize;

use crate::tile::{RenderType, Support, Texture, TileInfo};

/// Immutable lookup table of tile facts, keyed by tile id.
///
/// Built once (see [`TileRegistry::vanilla`]) and then shared by reference.
/// Unregistered ids behave like air.
#[derive(Debug, Clone)]
pub struct TileRegistry {
    tiles: Box<[TileInfo; 256]>,
}

impl TileRegistry {
    /// Creates a registry where every id is air.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tiles: Box::new([TileInfo::AIR; 256]),
        }
    }

    /// Starts (re)defining the tile with the given id.
    ///
    /// The tile becomes an opaque cube; chain builder calls to change that.
    pub fn tile(&mut self, id: u8) -> TileBuilder<'_> {
        let info = &mut self.tiles[id as usize];
        *info = TileInfo {
            render_type: RenderType::Cube,
            opaque: true,
            ..TileInfo::AIR
        };
        TileBuilder { info }
    }

    /// Returns every fact about a tile id.
    #[must_use]
    #[inline]
    pub fn get(&self, id: u8) -> &TileInfo {
        &self.tiles[id as usize]
    }

    /// Returns true if the tile is a full opaque cube.
    #[must_use]
    #[inline]
    pub fn is_opaque(&self, id: u8) -> bool {
        self.tiles[id as usize].opaque
    }

    /// Returns true if wire routes towards this tile.
    #[must_use]
    #[inline]
    pub fn is_power_source(&self, id: u8) -> bool {
        self.tiles[id as usize].power_source
    }

    /// Returns the render type of a tile.
    #[must_use]
    #[inline]
    pub fn render_type(&self, id: u8) -> RenderType {
        self.tiles[id as usize].render_type
    }

    /// Returns what the tile needs to rest against.
    #[must_use]
    #[inline]
    pub fn support(&self, id: u8) -> Support {
        self.tiles[id as usize].support
    }

    /// Resolves the atlas index for one face of a tile.
    #[must_use]
    pub fn tex(&self, id: u8, face: Direction, meta: u8) -> u8 {
        self.tiles[id as usize].texture.resolve(face, meta)
    }

    /// Serializes every non-air tile as pretty printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn dump_json(&self) -> serde_json::Result<String> {
        let dump: BTreeMap<u8, TileDump<'_>> = self
            .tiles
            .iter()
            .enumerate()
            .filter(|(_, info)| info.render_type != RenderType::Air)
            .map(|(id, info)| {
                (
                    id as u8,
                    TileDump {
                        render_type: info.render_type,
                        is_opaque: info.opaque,
                        texture_data: info.texture.data(),
                    },
                )
            })
            .collect();
        serde_json::to_string_pretty(&dump)
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Serialize)]
struct TileDump<'a> {
    render_type: RenderType,
    is_opaque: bool,
    texture_data: &'a [u8],
}

/// Chained definition of a single tile.
pub struct TileBuilder<'a> {
    info: &'a mut TileInfo,
}

impl TileBuilder<'_> {
    /// Changes how the tile is drawn. Anything but a cube is not opaque.
    pub fn render_as(self, render_type: RenderType) -> Self {
        self.info.render_type = render_type;
        if render_type != RenderType::Cube {
            self.info.opaque = false;
        }
        self
    }

    /// Marks a cube as see-through.
    pub fn transparent(self) -> Self {
        self.info.opaque = false;
        self
    }

    /// Makes wire route towards this tile.
    pub fn power_source(self) -> Self {
        self.info.power_source = true;
        self
    }

    /// Sets what the tile has to rest against.
    pub fn needs_support(self, support: Support) -> Self {
        self.info.support = support;
        self
    }

    /// Uses one texture for every face.
    pub fn tex(self, tex: u8) -> Self {
        self.info.texture = Texture::Single(tex);
        self
    }

    /// Uses a side texture plus distinct top and bottom textures.
    pub fn tex_sided(self, side: u8, top: u8, bottom: u8) -> Self {
        self.info.texture = Texture::Sided([bottom, top, side, side, side, side]);
        self
    }

    /// Picks the texture from the metadata value.
    pub fn tex_per_meta(self, texs: [u8; 16]) -> Self {
        self.info.texture = Texture::PerMeta(texs);
        self
    }
}
