//! Enchantment model and handler priorities.

use serde::{Deserialize, Serialize};

/// Types of enchantments that can be applied to items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnchantmentType {
    /// Replants crops from the holder's seed stock
    Replanter,
    /// Increases mining speed
    Efficiency,
    /// Allows silk touch harvesting of blocks
    SilkTouch,
    /// Increases block drop amounts
    Fortune,
    /// Reduces durability loss
    Unbreaking,
}

impl EnchantmentType {
    /// Get the maximum level for this enchantment
    pub fn max_level(&self) -> u8 {
        match self {
            EnchantmentType::Replanter => 1,
            EnchantmentType::Efficiency => 5,
            EnchantmentType::SilkTouch => 1,
            EnchantmentType::Fortune => 3,
            EnchantmentType::Unbreaking => 3,
        }
    }

    /// Check if this enchantment is compatible with another
    /// (some enchantments are mutually exclusive)
    pub fn is_compatible_with(&self, other: &EnchantmentType) -> bool {
        !matches!(
            (self, other),
            (EnchantmentType::SilkTouch, EnchantmentType::Fortune)
                | (EnchantmentType::Fortune, EnchantmentType::SilkTouch)
        )
    }
}

/// An enchantment with a specific level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchantment {
    /// The type of enchantment
    pub enchantment_type: EnchantmentType,
    /// The level of the enchantment (1 to max_level)
    pub level: u8,
}

impl Enchantment {
    /// Create a new enchantment
    pub fn new(enchantment_type: EnchantmentType, level: u8) -> Self {
        let max_level = enchantment_type.max_level();
        let level = level.min(max_level); // Clamp to max level
        Self {
            enchantment_type,
            level,
        }
    }
}

/// Order in which enchantment handlers see an event.
///
/// Handlers with a higher priority see the event first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum EnchantPriority {
    /// Runs last
    Lowest,
    /// Below normal
    Low,
    /// Default priority
    #[default]
    Normal,
    /// Above normal
    High,
    /// Runs before all other handlers
    Highest,
}
