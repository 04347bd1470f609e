//! Static per-tile facts.

use std::slice;

use redwire_utils::Direction;
use serde::Serialize;

/// How a tile is drawn. The renderer owns the meaning; the world only uses it
/// to tell full cubes from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderType {
    /// Not drawn at all.
    #[default]
    Air,
    /// A full opaque (or transparent) cube.
    Cube,
    /// Two crossed quads.
    Plant,
    /// A half-height cube.
    Slab,
    /// A flat trace on the floor.
    Wire,
    /// A thin stick, standing or leaning against a wall.
    Torch,
}

/// What a tile has to rest against to stay in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Support {
    /// Free standing.
    #[default]
    None,
    /// Needs an opaque tile directly below.
    Below,
    /// Needs an opaque tile on the side its metadata points at.
    Attachment,
}

/// Texture indices into the terrain atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Texture {
    /// No texture, resolves to index 0.
    #[default]
    None,
    /// The same texture on every face.
    Single(u8),
    /// One texture per face, indexed by face number.
    Sided([u8; 6]),
    /// One texture per metadata value.
    PerMeta([u8; 16]),
}

impl Texture {
    /// Resolves the texture for a face and metadata value.
    #[must_use]
    pub fn resolve(&self, face: Direction, meta: u8) -> u8 {
        match self {
            Self::None => 0,
            Self::Single(tex) => *tex,
            Self::Sided(faces) => faces[face.face() as usize],
            Self::PerMeta(metas) => metas[(meta & 15) as usize],
        }
    }

    /// Returns the raw texture data, in the order it is indexed.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        match self {
            Self::None => &[],
            Self::Single(tex) => slice::from_ref(tex),
            Self::Sided(faces) => faces,
            Self::PerMeta(metas) => metas,
        }
    }
}

/// Everything the world knows about one tile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileInfo {
    /// How the tile is drawn.
    pub render_type: RenderType,
    /// Whether the tile is a full opaque cube.
    pub opaque: bool,
    /// Whether wire routes towards this tile.
    pub power_source: bool,
    /// What the tile needs to rest against.
    pub support: Support,
    /// Texture lookup data.
    pub texture: Texture,
}

impl TileInfo {
    /// The entry every unregistered id resolves to.
    pub const AIR: TileInfo = TileInfo {
        render_type: RenderType::Air,
        opaque: false,
        power_source: false,
        support: Support::None,
        texture: Texture::None,
    };
}

/// Packs an atlas cell coordinate into a texture index.
#[must_use]
pub const fn uv(x: u8, y: u8) -> u8 {
    y * 16 + x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(Texture::None.resolve(Direction::Up, 3), 0);
        assert_eq!(Texture::Single(7).resolve(Direction::East, 9), 7);

        let sided = Texture::Sided([1, 2, 3, 3, 3, 3]);
        assert_eq!(sided.resolve(Direction::Down, 0), 1);
        assert_eq!(sided.resolve(Direction::Up, 0), 2);
        assert_eq!(sided.resolve(Direction::West, 0), 3);

        let mut metas = [0; 16];
        metas[4] = 99;
        assert_eq!(Texture::PerMeta(metas).resolve(Direction::Up, 4), 99);
        // Only the low nibble selects the entry.
        assert_eq!(Texture::PerMeta(metas).resolve(Direction::Up, 0x14), 99);
    }

    #[test]
    fn test_uv() {
        assert_eq!(uv(0, 0), 0);
        assert_eq!(uv(3, 2), 35);
    }
}
