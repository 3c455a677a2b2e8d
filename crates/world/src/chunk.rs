use std::fmt;

/// Chunk width (X axis) in voxels.
pub const CHUNK_SIZE_X: usize = 16;
/// Chunk height (Y axis) in voxels.
pub const CHUNK_SIZE_Y: usize = 256;
/// Chunk depth (Z axis) in voxels.
pub const CHUNK_SIZE_Z: usize = 16;
/// Total voxel count per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;

/// Block identifier referencing the registry.
pub type BlockId = u16;
/// Block state metadata bits.
pub type BlockState = u16;

/// Reserved ID for air.
pub const BLOCK_AIR: BlockId = 0;

/// ID for stone block.
pub const BLOCK_STONE: BlockId = 1;

/// ID for dirt block.
pub const BLOCK_DIRT: BlockId = 2;

/// ID for soul sand.
pub const BLOCK_SOUL_SAND: BlockId = 102;

/// Chunk-local position (X, Y, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl LocalPos {
    /// Linear index into the chunk voxel buffer (Y-major, then Z, then X).
    pub fn index(self) -> usize {
        debug_assert!(self.x < CHUNK_SIZE_X);
        debug_assert!(self.y < CHUNK_SIZE_Y);
        debug_assert!(self.z < CHUNK_SIZE_Z);
        (self.y * CHUNK_SIZE_Z + self.z) * CHUNK_SIZE_X + self.x
    }
}

/// Chunk coordinate (X,Z) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then z).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Absolute block position in world space.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The block directly above this one.
    pub fn above(self) -> Self {
        Self {
            y: self.y + 1,
            ..self
        }
    }

    /// Chunk (and scheduling region) containing this position.
    pub fn chunk(self) -> ChunkPos {
        ChunkPos::new(
            self.x.div_euclid(CHUNK_SIZE_X as i32),
            self.z.div_euclid(CHUNK_SIZE_Z as i32),
        )
    }

    /// Chunk-local coordinates, or `None` when `y` is outside the column.
    pub fn local(self) -> Option<LocalPos> {
        if self.y < 0 || self.y >= CHUNK_SIZE_Y as i32 {
            return None;
        }
        Some(LocalPos {
            x: self.x.rem_euclid(CHUNK_SIZE_X as i32) as usize,
            y: self.y as usize,
            z: self.z.rem_euclid(CHUNK_SIZE_Z as i32) as usize,
        })
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Per-voxel data: block, state bits and light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Voxel {
    pub id: BlockId,
    pub state: BlockState,
    pub light_sky: u8,
    pub light_block: u8,
}

impl Default for Voxel {
    fn default() -> Self {
        Self {
            id: BLOCK_AIR,
            state: 0,
            light_sky: 0,
            light_block: 0,
        }
    }
}

impl Voxel {
    /// Voxel of the given block with no state and no light.
    pub const fn of(id: BlockId) -> Self {
        Self {
            id,
            state: 0,
            light_sky: 0,
            light_block: 0,
        }
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.id == BLOCK_AIR
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Dirty flags set whenever chunk data changes.
    pub struct DirtyFlags: u8 {
        const BLOCKS = 0b0000_0001;
        const LIGHT = 0b0000_0010;
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        DirtyFlags::empty()
    }
}

/// A 16x256x16 column of voxels plus dirty flags.
pub struct Chunk {
    voxels: Vec<Voxel>,
    dirty: DirtyFlags,
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunk {
    /// Allocate a fresh chunk filled with air.
    pub fn new() -> Self {
        Self {
            voxels: vec![Voxel::default(); CHUNK_VOLUME],
            dirty: DirtyFlags::all(),
        }
    }

    /// Fetch a voxel copy.
    pub fn voxel(&self, local: LocalPos) -> Voxel {
        self.voxels[local.index()]
    }

    /// Set a voxel and mark the relevant dirty flags.
    pub fn set_voxel(&mut self, local: LocalPos, voxel: Voxel) {
        let idx = local.index();
        if self.voxels[idx] != voxel {
            self.voxels[idx] = voxel;
            self.dirty.insert(DirtyFlags::BLOCKS | DirtyFlags::LIGHT);
        }
    }

    /// Consume and return the current dirty flags.
    pub fn take_dirty_flags(&mut self) -> DirtyFlags {
        let flags = self.dirty;
        self.dirty = DirtyFlags::empty();
        flags
    }
}
