//! Dense block grid: one id byte per cell plus packed 4-bit metadata.

use redwire_utils::BlockPos;

/// Number of cells in a column. Fixed for every world.
pub const WORLD_HEIGHT: i32 = 128;
const HEIGHT_BITS: u32 = 7;

/// Flat block storage for a `x_size * 128 * z_size` world.
///
/// The buffer holds every id first, followed by the metadata nibbles packed
/// two per byte (even `y` in the low nibble, odd `y` in the high one). Cells
/// are indexed as `x << (z_bits + 7) | z << 7 | y`, so a column is
/// contiguous.
///
/// Anything outside the world reads as air with metadata 0, and writes to it
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelStore {
    x_size: i32,
    z_size: i32,
    z_bits: u32,
    cells: usize,
    data: Box<[u8]>,
}

impl VoxelStore {
    /// Creates an all-air world.
    ///
    /// # Panics
    /// Panics if either size is not a power of two.
    #[must_use]
    pub fn new(x_size: u32, z_size: u32) -> Self {
        assert!(
            x_size.is_power_of_two() && z_size.is_power_of_two(),
            "world sizes must be powers of two, got {x_size}x{z_size}"
        );
        let cells = Self::cell_count(x_size, z_size);
        Self {
            x_size: x_size as i32,
            z_size: z_size as i32,
            z_bits: z_size.trailing_zeros(),
            cells,
            data: vec![0; Self::byte_len(cells)].into_boxed_slice(),
        }
    }

    /// Rebuilds a world from a buffer produced by [`VoxelStore::as_bytes`].
    ///
    /// Returns `None` if the sizes are not powers of two or the buffer does
    /// not have exactly the expected length.
    #[must_use]
    pub fn from_bytes(x_size: u32, z_size: u32, bytes: &[u8]) -> Option<Self> {
        if !x_size.is_power_of_two() || !z_size.is_power_of_two() {
            log::warn!("Rejected world buffer: size {x_size}x{z_size} is not a power of two");
            return None;
        }
        let cells = Self::cell_count(x_size, z_size);
        let expected = Self::byte_len(cells);
        if bytes.len() != expected {
            log::warn!(
                "Rejected world buffer: expected {expected} bytes for {x_size}x{z_size}, got {}",
                bytes.len()
            );
            return None;
        }
        Some(Self {
            x_size: x_size as i32,
            z_size: z_size as i32,
            z_bits: z_size.trailing_zeros(),
            cells,
            data: bytes.into(),
        })
    }

    fn cell_count(x_size: u32, z_size: u32) -> usize {
        x_size as usize * z_size as usize * WORLD_HEIGHT as usize
    }

    const fn byte_len(cells: usize) -> usize {
        cells + cells / 2
    }

    /// Width of the world along x.
    #[must_use]
    pub const fn x_size(&self) -> u32 {
        self.x_size as u32
    }

    /// Width of the world along z.
    #[must_use]
    pub const fn z_size(&self) -> u32 {
        self.z_size as u32
    }

    /// Returns true if the position lies inside the world.
    #[must_use]
    #[inline]
    pub const fn contains(&self, pos: BlockPos) -> bool {
        pos.x() >= 0
            && pos.x() < self.x_size
            && pos.y() >= 0
            && pos.y() < WORLD_HEIGHT
            && pos.z() >= 0
            && pos.z() < self.z_size
    }

    #[inline]
    fn index(&self, pos: BlockPos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let x = pos.x() as usize;
        let y = pos.y() as usize;
        let z = pos.z() as usize;
        Some(x << (self.z_bits + HEIGHT_BITS) | z << HEIGHT_BITS | y)
    }

    /// Encodes an in-world position as the packed cell index used on the wire.
    #[must_use]
    pub fn pos_to_index(&self, pos: BlockPos) -> Option<u32> {
        self.index(pos).map(|index| index as u32)
    }

    /// Decodes a packed cell index back into a position.
    #[must_use]
    pub fn index_to_pos(&self, index: u32) -> Option<BlockPos> {
        let index = index as usize;
        if index >= self.cells {
            return None;
        }
        let y = index & ((1 << HEIGHT_BITS) - 1);
        let z = (index >> HEIGHT_BITS) & ((1 << self.z_bits) - 1);
        let x = index >> (self.z_bits + HEIGHT_BITS);
        Some(BlockPos::new(x as i32, y as i32, z as i32))
    }

    /// Returns the block id at a position, or 0 outside the world.
    #[must_use]
    #[inline]
    pub fn get_id(&self, pos: BlockPos) -> u8 {
        self.index(pos).map_or(0, |index| self.data[index])
    }

    /// Returns the metadata at a position, or 0 outside the world.
    #[must_use]
    #[inline]
    pub fn get_meta(&self, pos: BlockPos) -> u8 {
        self.index(pos).map_or(0, |index| self.meta_at(index))
    }

    /// Returns both the id and the metadata at a position.
    #[must_use]
    #[inline]
    pub fn get(&self, pos: BlockPos) -> (u8, u8) {
        self.index(pos)
            .map_or((0, 0), |index| (self.data[index], self.meta_at(index)))
    }

    /// Writes the id and metadata of a cell together.
    ///
    /// Only the low 4 bits of `meta` are stored. Does nothing outside the world.
    #[inline]
    pub fn set(&mut self, pos: BlockPos, id: u8, meta: u8) {
        let Some(index) = self.index(pos) else {
            return;
        };
        self.data[index] = id;
        self.set_meta_at(index, meta);
    }

    /// Rewrites only the metadata of a cell. Does nothing outside the world.
    #[inline]
    pub fn set_meta(&mut self, pos: BlockPos, meta: u8) {
        if let Some(index) = self.index(pos) {
            self.set_meta_at(index, meta);
        }
    }

    fn meta_at(&self, index: usize) -> u8 {
        let byte = self.data[self.cells + (index >> 1)];
        if index & 1 == 0 { byte & 0x0f } else { byte >> 4 }
    }

    fn set_meta_at(&mut self, index: usize, meta: u8) {
        let byte = &mut self.data[self.cells + (index >> 1)];
        let meta = meta & 0x0f;
        *byte = if index & 1 == 0 {
            (*byte & 0xf0) | meta
        } else {
            (*byte & 0x0f) | (meta << 4)
        };
    }

    /// The whole grid buffer, for bulk transfer to a client.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
