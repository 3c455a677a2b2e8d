//! Player inventory: 36 storage slots, an off-hand slot and a selected hotbar slot.

use replanter_core::{ItemStack, ItemType};
use serde::{Deserialize, Serialize};

/// Number of storage slots in player inventory.
pub const INVENTORY_SIZE: usize = 36;

/// Number of hotbar slots (the first slots of storage).
pub const HOTBAR_SIZE: usize = 9;

/// Player inventory.
///
/// Storage slots hold `None` or a stack; a stack whose count reached zero is
/// cleared by the operations that shrink it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInventory {
    slots: Vec<Option<ItemStack>>,
    off_hand: Option<ItemStack>,
    selected: usize,
}

impl PlayerInventory {
    /// Create a new empty inventory.
    pub fn new() -> Self {
        Self {
            slots: vec![None; INVENTORY_SIZE],
            off_hand: None,
            selected: 0,
        }
    }

    /// Get an item stack from a slot.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)?.as_ref()
    }

    /// Get a mutable reference to an item stack in a slot.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Set an item stack in a slot.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = stack;
                true
            }
            None => false,
        }
    }

    /// Drop the stack in `slot` if it no longer holds any item.
    pub fn clear_if_empty(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            if entry.as_ref().is_some_and(ItemStack::is_empty) {
                *entry = None;
            }
        }
    }

    /// Try to add an item stack to the inventory, merging with existing stacks if possible.
    /// Returns the remaining items that couldn't fit (if any).
    pub fn add_item(&mut self, mut stack: ItemStack) -> Option<ItemStack> {
        // First pass: try to merge with existing stacks.
        for existing in self.slots.iter_mut().flatten() {
            if existing.item_type == stack.item_type
                && existing.enchantments == stack.enchantments
            {
                let space = existing.max_stack_size().saturating_sub(existing.count);
                let moved = space.min(stack.count);
                existing.count += moved;
                stack.count -= moved;
                if stack.count == 0 {
                    return None;
                }
            }
        }

        // Second pass: find empty slot for remainder.
        for slot in &mut self.slots {
            if slot.is_none() {
                *slot = Some(stack);
                return None;
            }
        }

        Some(stack)
    }

    /// First storage slot holding `item_type`, regardless of its count.
    pub fn first(&self, item_type: ItemType) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|s| s.item_type == item_type))
    }

    /// Count the total number of a specific item in storage, saturating at `u32::MAX`.
    pub fn count_item(&self, item_type: ItemType) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.item_type == item_type)
            .fold(0u32, |total, stack| total.saturating_add(stack.count))
    }

    /// Select the hotbar slot used as the main hand.
    pub fn select_hotbar(&mut self, slot: usize) -> bool {
        if slot >= HOTBAR_SIZE {
            return false;
        }
        self.selected = slot;
        true
    }

    /// Stack in the selected hotbar slot.
    pub fn main_hand(&self) -> Option<&ItemStack> {
        self.get(self.selected)
    }

    pub fn off_hand(&self) -> Option<&ItemStack> {
        self.off_hand.as_ref()
    }

    pub fn set_off_hand(&mut self, stack: Option<ItemStack>) {
        self.off_hand = stack;
    }
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}
