//! Seed consumption against an agent's inventory.

use replanter_core::{ItemType, SeedKind};

use crate::inventory::PlayerInventory;

/// Remove exactly one `seed` from the first storage slot holding it.
///
/// Only the first matching slot is considered: if that stack is empty the call
/// fails even when a later slot still has seeds. Returns whether a seed was taken.
pub fn consume_one(inventory: &mut PlayerInventory, seed: SeedKind) -> bool {
    let Some(slot) = inventory.first(ItemType::Seed(seed)) else {
        return false;
    };
    let Some(stack) = inventory.get_mut(slot) else {
        return false;
    };
    if stack.is_empty() {
        return false;
    }

    stack.decrement(1);
    inventory.clear_if_empty(slot);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use replanter_core::ItemStack;

    #[test]
    fn consumes_exactly_one() {
        let mut inv = PlayerInventory::new();
        inv.add_item(ItemStack::new(ItemType::Seed(SeedKind::WheatSeeds), 3));

        assert!(consume_one(&mut inv, SeedKind::WheatSeeds));
        assert_eq!(inv.count_item(ItemType::Seed(SeedKind::WheatSeeds)), 2);
    }

    #[test]
    fn fails_without_seed() {
        let mut inv = PlayerInventory::new();
        inv.add_item(ItemStack::new(ItemType::Seed(SeedKind::Carrot), 3));

        assert!(!consume_one(&mut inv, SeedKind::Potato));
        assert_eq!(inv.count_item(ItemType::Seed(SeedKind::Carrot)), 3);
    }

    #[test]
    fn last_seed_clears_the_slot() {
        let mut inv = PlayerInventory::new();
        inv.set(2, Some(ItemStack::new(ItemType::Seed(SeedKind::Potato), 1)));

        assert!(consume_one(&mut inv, SeedKind::Potato));
        assert!(inv.get(2).is_none());
        assert!(!consume_one(&mut inv, SeedKind::Potato));
    }

    #[test]
    fn empty_first_stack_counts_as_missing() {
        let mut inv = PlayerInventory::new();
        inv.set(0, Some(ItemStack::new(ItemType::Seed(SeedKind::Carrot), 0)));
        inv.set(1, Some(ItemStack::new(ItemType::Seed(SeedKind::Carrot), 5)));

        assert!(!consume_one(&mut inv, SeedKind::Carrot));
        assert_eq!(inv.get(1).map(|s| s.count), Some(5));
    }

    #[test]
    fn draws_from_first_slot() {
        let mut inv = PlayerInventory::new();
        inv.set(3, Some(ItemStack::new(ItemType::Seed(SeedKind::NetherWart), 2)));
        inv.set(8, Some(ItemStack::new(ItemType::Seed(SeedKind::NetherWart), 2)));

        assert!(consume_one(&mut inv, SeedKind::NetherWart));
        assert_eq!(inv.get(3).map(|s| s.count), Some(1));
        assert_eq!(inv.get(8).map(|s| s.count), Some(2));
    }
}
