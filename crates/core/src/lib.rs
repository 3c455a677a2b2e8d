#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod enchantment;
pub mod item;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use enchantment::{EnchantPriority, Enchantment, EnchantmentType};
pub use item::{ItemStack, ItemType, SeedKind, ToolMaterial, ToolType};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_tick_advances() {
        assert_eq!(SimTick::ZERO.advance(3), SimTick(3));
        assert!(SimTick(1) < SimTick(2));
    }
}
