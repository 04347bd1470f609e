//! Cardinal direction enum, doubling as the face numbering of a cell.

use crate::BlockPos;

/// Six cardinal directions.
///
/// The ordinal values (0-5) are the face numbers used for texture lookup and
/// power queries, and match the faces reported by block picking.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Downward (-Y direction) - face 0
    Down = 0,
    /// Upward (+Y direction) - face 1
    Up = 1,
    /// North (-Z direction) - face 2
    North = 2,
    /// South (+Z direction) - face 3
    South = 3,
    /// West (-X direction) - face 4
    West = 4,
    /// East (+X direction) - face 5
    East = 5,
}

impl Direction {
    /// All six directions in face order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The four lateral directions, in the order wire scans its neighbours.
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Returns the direction with the given face number.
    #[must_use]
    pub const fn from_face(face: u8) -> Option<Self> {
        match face {
            0 => Some(Self::Down),
            1 => Some(Self::Up),
            2 => Some(Self::North),
            3 => Some(Self::South),
            4 => Some(Self::West),
            5 => Some(Self::East),
            _ => None,
        }
    }

    /// Returns the face number of this direction.
    #[must_use]
    pub const fn face(self) -> u8 {
        self as u8
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Returns true for the four lateral directions.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Self::Down | Self::Up)
    }

    /// Returns true if both directions lie on the same axis.
    #[must_use]
    pub const fn same_axis(self, other: Self) -> bool {
        (self as u8) >> 1 == (other as u8) >> 1
    }

    /// Gets the offset in the given direction.
    ///
    /// Returns (dx, dy, dz) for this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Self::Down => (0, -1, 0),
            Self::Up => (0, 1, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::West => (-1, 0, 0),
            Self::East => (1, 0, 0),
        }
    }

    /// Returns a new `BlockPos` relative to the given position in this direction.
    #[must_use]
    pub fn relative(self, pos: BlockPos) -> BlockPos {
        let (dx, dy, dz) = self.offset();
        pos.offset(dx, dy, dz)
    }
}
