//! Enchantment hooks and priority-ordered dispatch.

use std::cmp::Reverse;

use replanter_core::{EnchantPriority, EnchantmentType};

use crate::agent::Agent;
use crate::events::{BreakEvent, InteractEvent};
use crate::feedback::Feedback;
use crate::scheduler::RegionTaskQueue;
use crate::world::BlockWorld;

/// What a handler may touch while an event is in flight.
///
/// The world is read-only here; writes go through `mutations` and land on the
/// next tick.
pub struct HandlerContext<'a> {
    pub world: &'a BlockWorld,
    pub mutations: &'a mut RegionTaskQueue,
    pub feedback: &'a mut dyn Feedback,
}

/// Enchantment reacting to interact events.
pub trait InteractEnchant {
    fn enchantment(&self) -> EnchantmentType;

    fn interact_priority(&self) -> EnchantPriority;

    /// Returns true when the handler claims the event.
    fn on_interact(
        &self,
        event: &InteractEvent,
        agent: &mut Agent,
        level: u8,
        ctx: &mut HandlerContext<'_>,
    ) -> bool;
}

/// Enchantment reacting to block breaks.
pub trait MiningEnchant {
    fn enchantment(&self) -> EnchantmentType;

    fn break_priority(&self) -> EnchantPriority;

    /// Returns true when the handler claims the event.
    fn on_break(
        &self,
        event: &BreakEvent,
        agent: &mut Agent,
        level: u8,
        ctx: &mut HandlerContext<'_>,
    ) -> bool;
}

/// Routes events to the enchantments present on the event's item.
///
/// Handlers are kept sorted by priority, highest first; equal priorities keep
/// registration order. Every handler whose enchantment is on the item runs,
/// and the event counts as handled if any of them claims it.
#[derive(Default)]
pub struct EnchantDispatcher {
    interact: Vec<Box<dyn InteractEnchant>>,
    mining: Vec<Box<dyn MiningEnchant>>,
}

impl EnchantDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_interact(&mut self, handler: Box<dyn InteractEnchant>) {
        self.interact.push(handler);
        self.interact
            .sort_by_key(|handler| Reverse(handler.interact_priority()));
    }

    pub fn register_mining(&mut self, handler: Box<dyn MiningEnchant>) {
        self.mining.push(handler);
        self.mining.sort_by_key(|handler| Reverse(handler.break_priority()));
    }

    pub fn interact_handlers(&self) -> usize {
        self.interact.len()
    }

    pub fn mining_handlers(&self) -> usize {
        self.mining.len()
    }

    pub fn dispatch_interact(
        &self,
        event: &InteractEvent,
        agent: &mut Agent,
        ctx: &mut HandlerContext<'_>,
    ) -> bool {
        let mut handled = false;
        for handler in &self.interact {
            let level = event.item.enchantment_level(handler.enchantment());
            if level == 0 {
                continue;
            }
            handled |= handler.on_interact(event, agent, level, ctx);
        }
        handled
    }

    pub fn dispatch_break(
        &self,
        event: &BreakEvent,
        agent: &mut Agent,
        ctx: &mut HandlerContext<'_>,
    ) -> bool {
        let mut handled = false;
        for handler in &self.mining {
            let level = event.item.enchantment_level(handler.enchantment());
            if level == 0 {
                continue;
            }
            handled |= handler.on_break(event, agent, level, ctx);
        }
        handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::BlockPos;
    use crate::events::{Action, Hand};
    use crate::feedback::{FeedbackLog, SoundId};
    use replanter_core::{Enchantment, ItemStack, ItemType, ToolMaterial, ToolType};

    /// Emits a sound tagged with its priority so ordering is observable.
    struct Probe {
        priority: EnchantPriority,
        enchantment: EnchantmentType,
        claims: bool,
    }

    impl InteractEnchant for Probe {
        fn enchantment(&self) -> EnchantmentType {
            self.enchantment
        }

        fn interact_priority(&self) -> EnchantPriority {
            self.priority
        }

        fn on_interact(
            &self,
            _event: &InteractEvent,
            agent: &mut Agent,
            _level: u8,
            ctx: &mut HandlerContext<'_>,
        ) -> bool {
            let y = self.priority as i32;
            ctx.feedback
                .play_sound(agent.id, SoundId::CropPlant, BlockPos::new(0, y, 0));
            self.claims
        }
    }

    fn probe(priority: EnchantPriority, enchantment: EnchantmentType, claims: bool) -> Box<Probe> {
        Box::new(Probe {
            priority,
            enchantment,
            claims,
        })
    }

    fn event(item: ItemStack) -> InteractEvent {
        InteractEvent {
            hand: Hand::Main,
            action: Action::RightClickBlock,
            clicked: None,
            item,
        }
    }

    fn recorded_priorities(log: &FeedbackLog) -> Vec<i32> {
        log.events()
            .iter()
            .filter_map(|e| match e {
                crate::feedback::FeedbackEvent::Sound { pos, .. } => Some(pos.y),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn higher_priority_runs_first() {
        let mut dispatcher = EnchantDispatcher::new();
        dispatcher.register_interact(probe(
            EnchantPriority::Normal,
            EnchantmentType::Replanter,
            false,
        ));
        dispatcher.register_interact(probe(
            EnchantPriority::Highest,
            EnchantmentType::Replanter,
            false,
        ));
        dispatcher.register_interact(probe(
            EnchantPriority::Low,
            EnchantmentType::Replanter,
            true,
        ));

        let world = BlockWorld::new();
        let mut queue = RegionTaskQueue::new();
        let mut log = FeedbackLog::new();
        let mut ctx = HandlerContext {
            world: &world,
            mutations: &mut queue,
            feedback: &mut log,
        };
        let hoe = ItemStack::new(ItemType::Tool(ToolType::Hoe, ToolMaterial::Iron), 1)
            .with_enchantment(Enchantment::new(EnchantmentType::Replanter, 1));
        let mut agent = Agent::player(1);

        assert!(dispatcher.dispatch_interact(&event(hoe), &mut agent, &mut ctx));
        assert_eq!(
            recorded_priorities(&log),
            vec![
                EnchantPriority::Highest as i32,
                EnchantPriority::Normal as i32,
                EnchantPriority::Low as i32
            ]
        );
    }

    #[test]
    fn handlers_without_enchantment_on_item_are_skipped() {
        let mut dispatcher = EnchantDispatcher::new();
        dispatcher.register_interact(probe(
            EnchantPriority::Normal,
            EnchantmentType::Replanter,
            true,
        ));
        dispatcher.register_interact(probe(
            EnchantPriority::Normal,
            EnchantmentType::Efficiency,
            true,
        ));
        assert_eq!(dispatcher.interact_handlers(), 2);

        let world = BlockWorld::new();
        let mut queue = RegionTaskQueue::new();
        let mut log = FeedbackLog::new();
        let mut ctx = HandlerContext {
            world: &world,
            mutations: &mut queue,
            feedback: &mut log,
        };
        let plain = ItemStack::new(ItemType::Tool(ToolType::Hoe, ToolMaterial::Iron), 1);
        let mut agent = Agent::player(1);

        assert!(!dispatcher.dispatch_interact(&event(plain), &mut agent, &mut ctx));
        assert!(log.events().is_empty());
    }
}
