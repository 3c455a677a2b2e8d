//! Loaded block storage addressed by world position.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::chunk::{BlockPos, Chunk, ChunkPos, DirtyFlags, Voxel};

/// Failure to write a block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("chunk {0} is not loaded")]
    ChunkNotLoaded(ChunkPos),
    #[error("y={y} is outside the world column")]
    OutOfBounds { y: i32 },
}

/// Chunks resident in memory.
/// Uses BTreeMap for deterministic iteration order.
#[derive(Default)]
pub struct BlockWorld {
    chunks: BTreeMap<ChunkPos, Chunk>,
}

impl BlockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtain mutable access to a chunk, creating it if necessary.
    pub fn ensure_chunk(&mut self, pos: ChunkPos) -> &mut Chunk {
        self.chunks.entry(pos).or_insert_with(Chunk::new)
    }

    /// Number of resident chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Read a block. `None` when the chunk is unloaded or `y` is out of range.
    pub fn block(&self, pos: BlockPos) -> Option<Voxel> {
        let local = pos.local()?;
        self.chunks.get(&pos.chunk()).map(|chunk| chunk.voxel(local))
    }

    /// Write a block into an already loaded chunk.
    pub fn set_block(&mut self, pos: BlockPos, voxel: Voxel) -> Result<(), WorldError> {
        let local = pos.local().ok_or(WorldError::OutOfBounds { y: pos.y })?;
        let chunk_pos = pos.chunk();
        let chunk = self
            .chunks
            .get_mut(&chunk_pos)
            .ok_or(WorldError::ChunkNotLoaded(chunk_pos))?;
        chunk.set_voxel(local, voxel);
        Ok(())
    }

    /// Collect chunks whose blocks changed since the last call, clearing their flags.
    pub fn take_dirty_chunks(&mut self) -> Vec<ChunkPos> {
        self.chunks
            .iter_mut()
            .filter_map(|(pos, chunk)| {
                chunk
                    .take_dirty_flags()
                    .contains(DirtyFlags::BLOCKS)
                    .then_some(*pos)
            })
            .collect()
    }
}
