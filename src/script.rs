use anyhow::{bail, Context, Result};
use replanter_core::{Enchantment, ItemStack, ItemType, SimTick};
use replanter_world::{Action, BlockPos, Hand};
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

/// Script played when no `--script` is given: plant a field, then harvest it.
pub const DEMO_SCRIPT: &str = r#"{
    "steps": [
        {"tick": 0, "action": {"kind": "give", "item": "diamond_hoe", "count": 1,
            "enchantments": [{"enchantment_type": "Replanter", "level": 1}]}},
        {"tick": 0, "action": {"kind": "give", "item": "wheat_seeds", "count": 3}},
        {"tick": 0, "action": {"kind": "give", "item": "nether_wart", "count": 1}},
        {"tick": 1, "action": {"kind": "interact", "x": 0, "y": 64, "z": 0}},
        {"tick": 1, "action": {"kind": "interact", "x": 1, "y": 64, "z": 0}},
        {"tick": 1, "action": {"kind": "interact", "x": 2, "y": 64, "z": 0}},
        {"tick": 1, "action": {"kind": "interact", "x": 3, "y": 64, "z": 0}},
        {"tick": 2, "action": {"kind": "interact", "x": 0, "y": 64, "z": 2}},
        {"tick": 2, "action": {"kind": "interact", "x": 1, "y": 64, "z": 2}},
        {"tick": 3, "action": {"kind": "offhand", "item": "carrot", "count": 4}},
        {"tick": 3, "action": {"kind": "interact", "x": 3, "y": 64, "z": 0}},
        {"tick": 4, "action": {"kind": "offhand"}},
        {"tick": 4, "action": {"kind": "give", "item": "carrot", "count": 1}},
        {"tick": 5, "action": {"kind": "break", "x": 0, "y": 65, "z": 4}},
        {"tick": 5, "action": {"kind": "break", "x": 1, "y": 65, "z": 4}},
        {"tick": 6, "action": {"kind": "break", "x": 0, "y": 65, "z": 0}}
    ]
}"#;

#[derive(Debug, Deserialize)]
struct ScriptFile {
    steps: Vec<ScriptStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptStepDef {
    tick: u64,
    action: ActionDef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ActionDef {
    Interact {
        x: i32,
        y: i32,
        z: i32,
        #[serde(default)]
        hand: Hand,
        #[serde(default)]
        action: Action,
    },
    Break {
        x: i32,
        y: i32,
        z: i32,
    },
    Give {
        item: String,
        count: u32,
        #[serde(default)]
        enchantments: Vec<Enchantment>,
    },
    Offhand {
        #[serde(default)]
        item: Option<String>,
        #[serde(default)]
        count: Option<u32>,
    },
}

/// A validated script action.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptAction {
    Interact {
        pos: BlockPos,
        hand: Hand,
        action: Action,
    },
    Break {
        pos: BlockPos,
    },
    Give {
        stack: ItemStack,
    },
    /// Replace the off-hand slot; `None` empties it.
    Offhand {
        stack: Option<ItemStack>,
    },
}

impl ScriptAction {
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptAction::Interact { .. } => "interact",
            ScriptAction::Break { .. } => "break",
            ScriptAction::Give { .. } => "give",
            ScriptAction::Offhand { .. } => "offhand",
        }
    }
}

fn parse_item(key: &str) -> Result<ItemType> {
    ItemType::from_key(key.trim()).with_context(|| format!("unknown item `{key}`"))
}

impl TryFrom<ActionDef> for ScriptAction {
    type Error = anyhow::Error;

    fn try_from(def: ActionDef) -> Result<Self> {
        Ok(match def {
            ActionDef::Interact {
                x,
                y,
                z,
                hand,
                action,
            } => ScriptAction::Interact {
                pos: BlockPos::new(x, y, z),
                hand,
                action,
            },
            ActionDef::Break { x, y, z } => ScriptAction::Break {
                pos: BlockPos::new(x, y, z),
            },
            ActionDef::Give {
                item,
                count,
                enchantments,
            } => {
                let mut stack = ItemStack::new(parse_item(&item)?, count);
                if count == 0 || count > stack.max_stack_size() {
                    bail!(
                        "give `{item}` count {count} outside 1..={}",
                        stack.max_stack_size()
                    );
                }
                for enchantment in enchantments {
                    let enchantment =
                        Enchantment::new(enchantment.enchantment_type, enchantment.level);
                    if !stack.add_enchantment(enchantment) {
                        bail!(
                            "cannot apply {:?} to `{item}`",
                            enchantment.enchantment_type
                        );
                    }
                }
                ScriptAction::Give { stack }
            }
            ActionDef::Offhand { item: None, .. } => ScriptAction::Offhand { stack: None },
            ActionDef::Offhand {
                item: Some(item),
                count,
            } => {
                let count = count.unwrap_or(1);
                let stack = ItemStack::new(parse_item(&item)?, count);
                if count == 0 || count > stack.max_stack_size() {
                    bail!(
                        "offhand `{item}` count {count} outside 1..={}",
                        stack.max_stack_size()
                    );
                }
                ScriptAction::Offhand { stack: Some(stack) }
            }
        })
    }
}

#[derive(Debug, Clone)]
struct ScriptStep {
    tick: SimTick,
    action: ScriptAction,
}

/// Deterministic action script runner.
///
/// Steps are `{tick, action}` pairs executed in file order.
#[derive(Debug)]
pub struct ActionScript {
    pending: VecDeque<ScriptStep>,
}

impl ActionScript {
    /// Load a script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_str(&contents).with_context(|| format!("invalid script {}", path.display()))
    }

    /// The built-in demo script.
    pub fn demo() -> Result<Self> {
        Self::from_str(DEMO_SCRIPT)
    }

    /// Load a script from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: ScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            bail!("action script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut last_tick: Option<u64> = None;
        for (idx, step) in file.steps.into_iter().enumerate() {
            if let Some(prev) = last_tick {
                if step.tick < prev {
                    bail!("action script steps must be sorted by tick");
                }
            }
            last_tick = Some(step.tick);

            let action = ScriptAction::try_from(step.action)
                .with_context(|| format!("step {idx} (tick {})", step.tick))?;
            pending.push_back(ScriptStep {
                tick: SimTick(step.tick),
                action,
            });
        }

        Ok(Self { pending })
    }

    /// Drain and return all actions scheduled for ticks `<= tick`.
    pub fn drain_ready(&mut self, tick: SimTick) -> Vec<ScriptAction> {
        let mut actions = Vec::new();
        while self.pending.front().is_some_and(|step| step.tick <= tick) {
            if let Some(step) = self.pending.pop_front() {
                actions.push(step.action);
            }
        }
        actions
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Tick of the last scheduled step.
    pub fn last_tick(&self) -> Option<SimTick> {
        self.pending.back().map(|step| step.tick)
    }
}
