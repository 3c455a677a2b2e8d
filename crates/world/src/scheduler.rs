//! Deferred block mutations, applied once per tick.
//!
//! Handlers decide a mutation while an event is still being processed and
//! queue it here. The host drains the queue at the next tick, after the event
//! has settled, so the handler never writes to a block the event is still
//! looking at.

use std::collections::{BTreeMap, VecDeque};

use tracing::{trace, warn};

use crate::chunk::{BlockId, BlockPos, ChunkPos, Voxel};
use crate::farming::CropType;
use crate::world::{BlockWorld, WorldError};

/// A queued world change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMutation {
    /// Replace the block at `pos`.
    SetBlock { pos: BlockPos, block: BlockId },
    /// Put `crop` back at `pos` at growth stage zero.
    Regrow { pos: BlockPos, crop: CropType },
}

impl BlockMutation {
    pub fn pos(&self) -> BlockPos {
        match *self {
            BlockMutation::SetBlock { pos, .. } | BlockMutation::Regrow { pos, .. } => pos,
        }
    }

    fn target_block(&self) -> BlockId {
        match *self {
            BlockMutation::SetBlock { block, .. } => block,
            BlockMutation::Regrow { crop, .. } => crop.block_id_at_stage(0),
        }
    }

    fn apply(&self, world: &mut BlockWorld) -> Result<(), WorldError> {
        let pos = self.pos();
        // Keep the light already computed for the cell
        let current = world.block(pos).unwrap_or_default();
        world.set_block(
            pos,
            Voxel {
                id: self.target_block(),
                state: 0,
                ..current
            },
        )
    }
}

/// Outcome of one drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub applied: usize,
    pub failed: usize,
}

/// Mutation queue bucketed by region (chunk).
///
/// Regions drain in sorted order and each region drains first-in first-out,
/// so a replay produces the same world. Queued work is never cancelled or
/// retried.
#[derive(Debug, Default)]
pub struct RegionTaskQueue {
    regions: BTreeMap<ChunkPos, VecDeque<BlockMutation>>,
}

impl RegionTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `mutation` on the region that owns its position.
    pub fn run_at(&mut self, mutation: BlockMutation) {
        let region = mutation.pos().chunk();
        trace!(%region, ?mutation, "queued block mutation");
        self.regions.entry(region).or_default().push_back(mutation);
    }

    /// Total queued mutations.
    pub fn len(&self) -> usize {
        self.regions.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Mutations queued for one region, in the order they will run.
    pub fn pending_in(&self, region: ChunkPos) -> impl Iterator<Item = &BlockMutation> + '_ {
        self.regions.get(&region).into_iter().flatten()
    }

    /// Apply every queued mutation. Failures are logged and dropped.
    pub fn drain(&mut self, world: &mut BlockWorld) -> DrainReport {
        let mut report = DrainReport::default();
        for (region, tasks) in std::mem::take(&mut self.regions) {
            for mutation in tasks {
                match mutation.apply(world) {
                    Ok(()) => report.applied += 1,
                    Err(err) => {
                        warn!(%region, ?mutation, %err, "dropping block mutation");
                        report.failed += 1;
                    }
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{BLOCK_AIR, BLOCK_STONE};
    use crate::farming::farming_blocks;

    #[test]
    fn nothing_changes_until_drain() {
        let mut world = BlockWorld::new();
        world.ensure_chunk(ChunkPos::new(0, 0));
        let mut queue = RegionTaskQueue::new();
        let pos = BlockPos::new(1, 65, 1);

        queue.run_at(BlockMutation::SetBlock {
            pos,
            block: BLOCK_STONE,
        });
        assert_eq!(world.block(pos).unwrap().id, BLOCK_AIR);
        assert_eq!(queue.len(), 1);

        let report = queue.drain(&mut world);
        assert_eq!(
            report,
            DrainReport {
                applied: 1,
                failed: 0
            }
        );
        assert_eq!(world.block(pos).unwrap().id, BLOCK_STONE);
        assert!(queue.is_empty());
    }

    #[test]
    fn regrow_sets_stage_zero_and_keeps_light() {
        let mut world = BlockWorld::new();
        world.ensure_chunk(ChunkPos::new(0, 0));
        let pos = BlockPos::new(2, 65, 2);
        world
            .set_block(
                pos,
                Voxel {
                    id: BLOCK_AIR,
                    state: 3,
                    light_sky: 15,
                    light_block: 4,
                },
            )
            .unwrap();

        let mut queue = RegionTaskQueue::new();
        queue.run_at(BlockMutation::Regrow {
            pos,
            crop: CropType::Carrots,
        });
        queue.drain(&mut world);

        let voxel = world.block(pos).unwrap();
        assert_eq!(voxel.id, farming_blocks::CARROTS_0);
        assert_eq!(voxel.state, 0);
        assert_eq!(voxel.light_sky, 15);
        assert_eq!(voxel.light_block, 4);
    }

    #[test]
    fn failed_mutations_are_dropped_not_retried() {
        let mut world = BlockWorld::new();
        let mut queue = RegionTaskQueue::new();
        queue.run_at(BlockMutation::SetBlock {
            pos: BlockPos::new(100, 65, 100),
            block: BLOCK_STONE,
        });

        assert_eq!(queue.drain(&mut world).failed, 1);
        assert!(queue.is_empty());
        assert_eq!(queue.drain(&mut world), DrainReport::default());
    }

    #[test]
    fn regions_are_bucketed_and_fifo() {
        let mut queue = RegionTaskQueue::new();
        let a = BlockPos::new(1, 65, 1);
        let b = BlockPos::new(2, 65, 1);
        let far = BlockPos::new(-20, 65, 1);
        queue.run_at(BlockMutation::SetBlock {
            pos: a,
            block: BLOCK_STONE,
        });
        queue.run_at(BlockMutation::SetBlock {
            pos: far,
            block: BLOCK_STONE,
        });
        queue.run_at(BlockMutation::SetBlock {
            pos: b,
            block: BLOCK_STONE,
        });

        let local: Vec<BlockPos> = queue
            .pending_in(ChunkPos::new(0, 0))
            .map(BlockMutation::pos)
            .collect();
        assert_eq!(local, vec![a, b]);
        assert_eq!(queue.pending_in(ChunkPos::new(-2, 0)).count(), 1);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn later_mutation_in_region_wins() {
        let mut world = BlockWorld::new();
        world.ensure_chunk(ChunkPos::new(0, 0));
        let mut queue = RegionTaskQueue::new();
        let pos = BlockPos::new(0, 65, 0);
        queue.run_at(BlockMutation::SetBlock {
            pos,
            block: BLOCK_STONE,
        });
        queue.run_at(BlockMutation::Regrow {
            pos,
            crop: CropType::Wheat,
        });
        queue.drain(&mut world);
        assert_eq!(world.block(pos).unwrap().id, farming_blocks::WHEAT_0);
    }
}
