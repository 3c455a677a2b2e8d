//! Replanter enchantment: plant seeds on right-clicked ground and replant
//! harvested crops from the holder's own seed stock.

use std::sync::Arc;

use replanter_core::{EnchantPriority, EnchantmentType};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agent::Agent;
use crate::dispatch::{EnchantDispatcher, HandlerContext, InteractEnchant, MiningEnchant};
use crate::events::{Action, BreakEvent, Hand, InteractEvent};
use crate::farming::{CropRegistry, GroundSurface, PlantState};
use crate::feedback::SoundId;
use crate::scheduler::BlockMutation;
use crate::seeds::consume_one;

/// Per-path switches, read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplantToggles {
    /// Plant when right-clicking farmland or soul sand.
    pub on_right_click: bool,
    /// Replant when a crop is broken.
    pub on_plant_break: bool,
}

impl Default for ReplantToggles {
    fn default() -> Self {
        Self {
            on_right_click: true,
            on_plant_break: true,
        }
    }
}

/// Plants the first compatible carried seed on right-clicked ground.
pub struct InteractReplantHandler {
    registry: Arc<CropRegistry>,
    enabled: bool,
}

impl InteractReplantHandler {
    pub fn new(registry: Arc<CropRegistry>, toggles: ReplantToggles) -> Self {
        Self {
            registry,
            enabled: toggles.on_right_click,
        }
    }
}

impl InteractEnchant for InteractReplantHandler {
    fn enchantment(&self) -> EnchantmentType {
        EnchantmentType::Replanter
    }

    fn interact_priority(&self) -> EnchantPriority {
        EnchantPriority::Highest
    }

    fn on_interact(
        &self,
        event: &InteractEvent,
        agent: &mut Agent,
        _level: u8,
        ctx: &mut HandlerContext<'_>,
    ) -> bool {
        if !agent.is_player() || !self.enabled {
            return false;
        }
        // The host fires once per hand; only react to the main hand.
        if event.hand != Hand::Main || event.action != Action::RightClickBlock {
            return false;
        }

        // Seeds in the off hand are planted by the host itself.
        if agent
            .inventory
            .off_hand()
            .is_some_and(|off| !off.is_empty() && self.registry.is_plantable(off.item_type))
        {
            debug!(agent = %agent.id, "off hand holds seeds, leaving planting to host");
            return false;
        }

        let Some(ground_pos) = event.clicked else {
            return false;
        };
        let Some(surface) = ctx
            .world
            .block(ground_pos)
            .and_then(|ground| GroundSurface::from_block_id(ground.id))
        else {
            debug!(agent = %agent.id, pos = %ground_pos, "clicked block is not plantable ground");
            return false;
        };

        let plant_pos = ground_pos.above();
        if !ctx.world.block(plant_pos).is_some_and(|v| v.is_air()) {
            debug!(agent = %agent.id, pos = %plant_pos, "space above ground is occupied");
            return false;
        }

        for pair in self.registry.pairs() {
            if self.registry.ground_for(pair.seed) != surface {
                continue;
            }
            if !consume_one(&mut agent.inventory, pair.seed) {
                continue;
            }

            let sound = if self.registry.is_wart_family(pair.seed) {
                SoundId::NetherWartPlant
            } else {
                SoundId::CropPlant
            };
            ctx.feedback.play_sound(agent.id, sound, plant_pos);
            ctx.feedback.swing_main_hand(agent.id);
            ctx.mutations.run_at(BlockMutation::SetBlock {
                pos: plant_pos,
                block: pair.plant.base_block_id(),
            });
            debug!(
                agent = %agent.id,
                pos = %plant_pos,
                seed = pair.seed.key(),
                crop = ?pair.plant,
                "planted from inventory"
            );
            return true;
        }

        debug!(
            agent = %agent.id,
            pos = %ground_pos,
            ground = ?surface,
            "no carried seed suits this ground"
        );
        true
    }
}

/// Replants a broken crop at stage zero when the breaker carries its seed.
pub struct BreakReplantHandler {
    registry: Arc<CropRegistry>,
    enabled: bool,
}

impl BreakReplantHandler {
    pub fn new(registry: Arc<CropRegistry>, toggles: ReplantToggles) -> Self {
        Self {
            registry,
            enabled: toggles.on_plant_break,
        }
    }
}

impl MiningEnchant for BreakReplantHandler {
    fn enchantment(&self) -> EnchantmentType {
        EnchantmentType::Replanter
    }

    fn break_priority(&self) -> EnchantPriority {
        EnchantPriority::Normal
    }

    fn on_break(
        &self,
        event: &BreakEvent,
        agent: &mut Agent,
        _level: u8,
        ctx: &mut HandlerContext<'_>,
    ) -> bool {
        if !agent.is_player() || !self.enabled {
            return false;
        }

        let Some(seed) = self.registry.seed_of(event.block.id) else {
            return false;
        };
        let PlantState::Ageable { crop, .. } = PlantState::of(event.block) else {
            return false;
        };

        if consume_one(&mut agent.inventory, seed) {
            ctx.mutations.run_at(BlockMutation::Regrow {
                pos: event.pos,
                crop,
            });
            debug!(
                agent = %agent.id,
                pos = %event.pos,
                seed = seed.key(),
                crop = ?crop,
                "replanting broken crop"
            );
        } else {
            debug!(agent = %agent.id, seed = seed.key(), "no seed to replant with");
        }
        true
    }
}

/// Register both replant paths on `dispatcher`.
pub fn register_replanter(
    dispatcher: &mut EnchantDispatcher,
    registry: Arc<CropRegistry>,
    toggles: ReplantToggles,
) {
    dispatcher.register_interact(Box::new(InteractReplantHandler::new(
        Arc::clone(&registry),
        toggles,
    )));
    dispatcher.register_mining(Box::new(BreakReplantHandler::new(registry, toggles)));
}
