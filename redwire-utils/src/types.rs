// Wrapper types making it harder to accidentaly use the wrong underlying type.

use std::fmt::{self, Display};

use bitflags::bitflags;

use crate::math::Vector3;

// A block position. Coordinates outside the world are valid values; the world treats them as air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.0.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.0.y
    }

    #[must_use]
    pub const fn z(&self) -> i32 {
        self.0.z
    }

    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.0.x + dx, self.0.y + dy, self.0.z + dz)
    }

    #[must_use]
    pub const fn above(&self) -> Self {
        self.offset(0, 1, 0)
    }

    #[must_use]
    pub const fn below(&self) -> Self {
        self.offset(0, -1, 0)
    }
}

impl Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

bitflags! {
    /// Side effects requested from a block write.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UpdateFlags: u8 {
        /// Run the add/remove reactions (neighbour notification, propagation, scheduling).
        const NOTIFY_NEIGHBORS = 1 << 0;
        /// Report the cell to the change listener.
        const MARK_DIRTY = 1 << 1;

        const UPDATE_ALL = Self::NOTIFY_NEIGHBORS.bits() | Self::MARK_DIRTY.bits();
    }
}
