//! Host-side simulation: events in, deferred mutations out, one drain per tick.

use std::sync::Arc;

use replanter_core::{ItemStack, ItemType, SimTick};
use tracing::{debug, info};

use crate::agent::Agent;
use crate::chunk::{BlockPos, Voxel, BLOCK_AIR};
use crate::dispatch::{EnchantDispatcher, HandlerContext};
use crate::events::{Action, BreakEvent, Hand, InteractEvent};
use crate::farming::CropRegistry;
use crate::feedback::Feedback;
use crate::replant::{register_replanter, ReplantToggles};
use crate::scheduler::{DrainReport, RegionTaskQueue};
use crate::world::BlockWorld;

/// Item held in `hand`, or a zero-count stack when that hand is empty.
fn hand_item(agent: &Agent, hand: Hand) -> ItemStack {
    let held = match hand {
        Hand::Main => agent.inventory.main_hand(),
        Hand::Off => agent.inventory.off_hand(),
    };
    held.cloned().unwrap_or_else(|| ItemStack::new(ItemType::Item(0), 0))
}

/// A world plus the replanter wired into its event pipeline.
pub struct ReplantSession {
    world: BlockWorld,
    queue: RegionTaskQueue,
    dispatcher: EnchantDispatcher,
    tick: SimTick,
}

impl ReplantSession {
    /// Session with the standard registry and both replant paths registered.
    pub fn new(world: BlockWorld, toggles: ReplantToggles) -> Self {
        let mut dispatcher = EnchantDispatcher::new();
        register_replanter(
            &mut dispatcher,
            Arc::new(CropRegistry::standard()),
            toggles,
        );
        info!(?toggles, "replanter registered");
        Self {
            world,
            queue: RegionTaskQueue::new(),
            dispatcher,
            tick: SimTick::ZERO,
        }
    }

    pub fn world(&self) -> &BlockWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut BlockWorld {
        &mut self.world
    }

    pub fn pending_mutations(&self) -> usize {
        self.queue.len()
    }

    pub fn current_tick(&self) -> SimTick {
        self.tick
    }

    /// Fire an interact event carrying the item in `hand`. Returns whether it was handled.
    pub fn interact(
        &mut self,
        agent: &mut Agent,
        hand: Hand,
        action: Action,
        clicked: Option<BlockPos>,
        feedback: &mut dyn Feedback,
    ) -> bool {
        let event = InteractEvent {
            hand,
            action,
            clicked,
            item: hand_item(agent, hand),
        };
        self.dispatch_interact(&event, agent, feedback)
    }

    pub fn dispatch_interact(
        &mut self,
        event: &InteractEvent,
        agent: &mut Agent,
        feedback: &mut dyn Feedback,
    ) -> bool {
        let mut ctx = HandlerContext {
            world: &self.world,
            mutations: &mut self.queue,
            feedback,
        };
        let handled = self.dispatcher.dispatch_interact(event, agent, &mut ctx);
        debug!(agent = %agent.id, handled, "interact dispatched");
        handled
    }

    /// Break the block at `pos` with the agent's main-hand item.
    ///
    /// Handlers see the block as it was; the host then clears it to air.
    /// Returns `None` when there is no block to break.
    pub fn break_block(
        &mut self,
        agent: &mut Agent,
        pos: BlockPos,
        feedback: &mut dyn Feedback,
    ) -> Option<bool> {
        let block = self.world.block(pos).filter(|voxel| !voxel.is_air())?;
        let event = BreakEvent {
            pos,
            block,
            item: hand_item(agent, Hand::Main),
        };

        let mut ctx = HandlerContext {
            world: &self.world,
            mutations: &mut self.queue,
            feedback,
        };
        let handled = self.dispatcher.dispatch_break(&event, agent, &mut ctx);
        debug!(agent = %agent.id, %pos, handled, "break dispatched");

        // Default break outcome
        let cleared = Voxel {
            id: BLOCK_AIR,
            state: 0,
            ..block
        };
        if let Err(err) = self.world.set_block(pos, cleared) {
            debug!(%pos, %err, "break target vanished");
        }
        Some(handled)
    }

    /// Advance one tick and apply everything queued during the previous one.
    pub fn tick(&mut self) -> DrainReport {
        self.tick = self.tick.advance(1);
        let report = self.queue.drain(&mut self.world);
        if report.applied > 0 || report.failed > 0 {
            debug!(tick = self.tick.0, ?report, "applied deferred mutations");
        }
        report
    }
}
