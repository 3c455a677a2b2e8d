//! Item system - Tools, seeds, blocks, and other inventory items

use crate::enchantment::{Enchantment, EnchantmentType};
use serde::{Deserialize, Serialize};

/// Item type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// A tool (hoe, pickaxe, etc.)
    Tool(ToolType, ToolMaterial),
    /// A plantable seed or crop item
    Seed(SeedKind),
    /// Generic item
    Item(u16),
}

/// Tool types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    /// Pickaxe - mines stone, ores
    Pickaxe,
    /// Axe - chops wood
    Axe,
    /// Shovel - digs dirt, sand, gravel
    Shovel,
    /// Sword - combat weapon
    Sword,
    /// Hoe - tills farmland
    Hoe,
}

/// Tool material tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolMaterial {
    /// Wooden tools (tier 0)
    Wood = 0,
    /// Stone tools (tier 1)
    Stone = 1,
    /// Iron tools (tier 2)
    Iron = 2,
    /// Diamond tools (tier 3)
    Diamond = 3,
    /// Gold tools
    Gold = 4,
}

/// Consumable items that can be planted.
///
/// Potatoes, carrots and nether wart are planted as-is; the rest are seeds
/// harvested from the grown plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedKind {
    /// Wheat seeds
    WheatSeeds,
    /// Beetroot seeds
    BeetrootSeeds,
    /// Melon seeds
    MelonSeeds,
    /// Pumpkin seeds
    PumpkinSeeds,
    /// Potato
    Potato,
    /// Carrot
    Carrot,
    /// Nether wart
    NetherWart,
}

impl SeedKind {
    /// Stable string key (`wheat_seeds`, `nether_wart`, ...).
    pub fn key(self) -> &'static str {
        match self {
            SeedKind::WheatSeeds => "wheat_seeds",
            SeedKind::BeetrootSeeds => "beetroot_seeds",
            SeedKind::MelonSeeds => "melon_seeds",
            SeedKind::PumpkinSeeds => "pumpkin_seeds",
            SeedKind::Potato => "potato",
            SeedKind::Carrot => "carrot",
            SeedKind::NetherWart => "nether_wart",
        }
    }

    /// Parse a key produced by [`SeedKind::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "wheat_seeds" => Some(SeedKind::WheatSeeds),
            "beetroot_seeds" => Some(SeedKind::BeetrootSeeds),
            "melon_seeds" => Some(SeedKind::MelonSeeds),
            "pumpkin_seeds" => Some(SeedKind::PumpkinSeeds),
            "potato" => Some(SeedKind::Potato),
            "carrot" => Some(SeedKind::Carrot),
            "nether_wart" => Some(SeedKind::NetherWart),
            _ => None,
        }
    }
}

impl ToolMaterial {
    /// Parse a material prefix such as `iron` or `diamond`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "wooden" | "wood" => Some(ToolMaterial::Wood),
            "stone" => Some(ToolMaterial::Stone),
            "iron" => Some(ToolMaterial::Iron),
            "diamond" => Some(ToolMaterial::Diamond),
            "golden" | "gold" => Some(ToolMaterial::Gold),
            _ => None,
        }
    }
}

impl ToolType {
    /// Parse a tool suffix such as `hoe` or `pickaxe`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "pickaxe" => Some(ToolType::Pickaxe),
            "axe" => Some(ToolType::Axe),
            "shovel" => Some(ToolType::Shovel),
            "sword" => Some(ToolType::Sword),
            "hoe" => Some(ToolType::Hoe),
            _ => None,
        }
    }
}

impl ItemType {
    /// Parse an item key: a seed key (`carrot`) or a tool key (`iron_hoe`).
    pub fn from_key(key: &str) -> Option<Self> {
        if let Some(seed) = SeedKind::from_key(key) {
            return Some(ItemType::Seed(seed));
        }
        let (material, tool) = key.rsplit_once('_')?;
        Some(ItemType::Tool(
            ToolType::from_key(tool)?,
            ToolMaterial::from_key(material)?,
        ))
    }

    /// Seed kind carried by this item type, if any.
    pub fn seed(self) -> Option<SeedKind> {
        match self {
            ItemType::Seed(seed) => Some(seed),
            _ => None,
        }
    }
}

/// An item stack in inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item
    pub item_type: ItemType,
    /// Quantity in stack. Zero means the stack holds no item.
    pub count: u32,
    /// Enchantments applied to this item (None for non-enchantable items)
    pub enchantments: Option<Vec<Enchantment>>,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_type: ItemType, count: u32) -> Self {
        Self {
            item_type,
            count,
            enchantments: None,
        }
    }

    /// Maximum stack size for this item type
    pub fn max_stack_size(&self) -> u32 {
        match self.item_type {
            ItemType::Tool(_, _) => 1, // Tools don't stack
            ItemType::Seed(_) => 64,
            ItemType::Item(_) => 64,
        }
    }

    /// True when the stack represents "no item".
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove up to `amount` items in place, returning how many were removed.
    pub fn decrement(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.count);
        self.count -= removed;
        removed
    }

    /// Check if this item can be enchanted
    pub fn is_enchantable(&self) -> bool {
        matches!(self.item_type, ItemType::Tool(_, _))
    }

    /// Add an enchantment to this item
    /// Returns true if the enchantment was added successfully
    pub fn add_enchantment(&mut self, enchantment: Enchantment) -> bool {
        if !self.is_enchantable() {
            return false;
        }

        let enchants = self.enchantments.get_or_insert_with(Vec::new);
        for existing in enchants.iter() {
            if !existing
                .enchantment_type
                .is_compatible_with(&enchantment.enchantment_type)
            {
                return false;
            }
        }

        // Upgrade in place when the type is already present
        if let Some(existing) = enchants
            .iter_mut()
            .find(|e| e.enchantment_type == enchantment.enchantment_type)
        {
            existing.level = existing.level.max(enchantment.level);
            return true;
        }

        enchants.push(enchantment);
        true
    }

    /// Builder form of [`ItemStack::add_enchantment`].
    pub fn with_enchantment(mut self, enchantment: Enchantment) -> Self {
        self.add_enchantment(enchantment);
        self
    }

    /// Get all enchantments on this item
    pub fn get_enchantments(&self) -> &[Enchantment] {
        self.enchantments.as_deref().unwrap_or(&[])
    }

    /// Check if this item has a specific enchantment type
    pub fn has_enchantment(&self, enchant_type: EnchantmentType) -> bool {
        self.get_enchantments()
            .iter()
            .any(|e| e.enchantment_type == enchant_type)
    }

    /// Get the level of a specific enchantment, or 0 if not present
    pub fn enchantment_level(&self, enchant_type: EnchantmentType) -> u8 {
        self.get_enchantments()
            .iter()
            .find(|e| e.enchantment_type == enchant_type)
            .map(|e| e.level)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_material_ordering() {
        assert!(ToolMaterial::Diamond > ToolMaterial::Iron);
        assert!(ToolMaterial::Iron > ToolMaterial::Stone);
        assert!(ToolMaterial::Stone > ToolMaterial::Wood);
    }

    #[test]
    fn test_seed_keys_roundtrip() {
        for seed in [
            SeedKind::WheatSeeds,
            SeedKind::BeetrootSeeds,
            SeedKind::MelonSeeds,
            SeedKind::PumpkinSeeds,
            SeedKind::Potato,
            SeedKind::Carrot,
            SeedKind::NetherWart,
        ] {
            assert_eq!(SeedKind::from_key(seed.key()), Some(seed));
        }
        assert_eq!(SeedKind::from_key("sugar_cane"), None);
    }

    #[test]
    fn test_item_type_from_key() {
        assert_eq!(
            ItemType::from_key("carrot"),
            Some(ItemType::Seed(SeedKind::Carrot))
        );
        assert_eq!(
            ItemType::from_key("iron_hoe"),
            Some(ItemType::Tool(ToolType::Hoe, ToolMaterial::Iron))
        );
        assert_eq!(
            ItemType::from_key("golden_hoe"),
            Some(ItemType::Tool(ToolType::Hoe, ToolMaterial::Gold))
        );
        assert_eq!(ItemType::from_key("iron_spoon"), None);
        assert_eq!(ItemType::from_key("stick"), None);
    }

    #[test]
    fn test_seed_stack() {
        let stack = ItemStack::new(ItemType::Seed(SeedKind::WheatSeeds), 64);
        assert_eq!(stack.max_stack_size(), 64);
        assert!(!stack.is_enchantable());
    }

    #[test]
    fn test_decrement_stops_at_zero() {
        let mut stack = ItemStack::new(ItemType::Seed(SeedKind::Carrot), 2);
        assert_eq!(stack.decrement(1), 1);
        assert_eq!(stack.count, 1);
        assert_eq!(stack.decrement(5), 1);
        assert!(stack.is_empty());
        assert_eq!(stack.decrement(1), 0);
    }

    #[test]
    fn test_enchantment_application() {
        let mut hoe = ItemStack::new(ItemType::Tool(ToolType::Hoe, ToolMaterial::Diamond), 1);

        assert!(hoe.get_enchantments().is_empty());
        assert!(!hoe.has_enchantment(EnchantmentType::Replanter));

        assert!(hoe.add_enchantment(Enchantment::new(EnchantmentType::Replanter, 1)));
        assert!(hoe.has_enchantment(EnchantmentType::Replanter));
        assert_eq!(hoe.enchantment_level(EnchantmentType::Replanter), 1);

        assert!(hoe.add_enchantment(Enchantment::new(EnchantmentType::Unbreaking, 2)));
        assert_eq!(hoe.get_enchantments().len(), 2);
    }

    #[test]
    fn test_enchantment_upgrade() {
        let hoe = ItemStack::new(ItemType::Tool(ToolType::Hoe, ToolMaterial::Iron), 1)
            .with_enchantment(Enchantment::new(EnchantmentType::Unbreaking, 1))
            .with_enchantment(Enchantment::new(EnchantmentType::Unbreaking, 3));

        assert_eq!(hoe.enchantment_level(EnchantmentType::Unbreaking), 3);
        assert_eq!(hoe.get_enchantments().len(), 1);
    }

    #[test]
    fn test_enchantment_incompatibility() {
        let mut hoe = ItemStack::new(ItemType::Tool(ToolType::Hoe, ToolMaterial::Diamond), 1)
            .with_enchantment(Enchantment::new(EnchantmentType::SilkTouch, 1));

        assert!(!hoe.add_enchantment(Enchantment::new(EnchantmentType::Fortune, 3)));
        assert!(!hoe.has_enchantment(EnchantmentType::Fortune));

        // Replanter stacks with either harvesting enchantment
        assert!(hoe.add_enchantment(Enchantment::new(EnchantmentType::Replanter, 1)));
    }

    #[test]
    fn test_non_tool_not_enchantable() {
        let mut seeds = ItemStack::new(ItemType::Seed(SeedKind::WheatSeeds), 8);
        assert!(!seeds.add_enchantment(Enchantment::new(EnchantmentType::Replanter, 1)));
        assert_eq!(seeds.enchantment_level(EnchantmentType::Replanter), 0);
    }
}
