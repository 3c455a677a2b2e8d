//! Trigger events delivered to enchantment handlers.

use replanter_core::ItemStack;
use serde::{Deserialize, Serialize};

use crate::chunk::{BlockPos, Voxel};

/// Hand slot an interaction fired for. Hosts fire one interact event per hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    #[default]
    Main,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    LeftClickBlock,
    #[default]
    RightClickBlock,
    LeftClickAir,
    RightClickAir,
    /// Stepping on a pressure plate, trampling farmland, ...
    Physical,
}

/// A player clicked (or stepped on) something.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractEvent {
    pub hand: Hand,
    pub action: Action,
    /// Clicked block, `None` for air clicks or unloaded targets.
    pub clicked: Option<BlockPos>,
    /// Item used for the interaction.
    pub item: ItemStack,
}

/// A block is about to be broken.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakEvent {
    pub pos: BlockPos,
    /// Block as it was when the break started.
    pub block: Voxel,
    /// Tool used to break the block.
    pub item: ItemStack,
}
