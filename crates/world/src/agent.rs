//! Acting entities.

use serde::{Deserialize, Serialize};

use crate::inventory::PlayerInventory;

/// Stable identifier of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    Player,
    /// Any non-player living entity.
    Mob,
}

/// An entity that can trigger interact and break events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub kind: AgentKind,
    pub inventory: PlayerInventory,
}

impl Agent {
    pub fn player(id: u64) -> Self {
        Self {
            id: AgentId(id),
            kind: AgentKind::Player,
            inventory: PlayerInventory::new(),
        }
    }

    pub fn mob(id: u64) -> Self {
        Self {
            id: AgentId(id),
            kind: AgentKind::Mob,
            inventory: PlayerInventory::new(),
        }
    }

    pub fn is_player(&self) -> bool {
        self.kind == AgentKind::Player
    }
}
