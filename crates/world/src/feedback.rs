//! Sound and animation side effects.

use serde::{Deserialize, Serialize};

use crate::agent::AgentId;
use crate::chunk::BlockPos;

/// Identifiers for planting sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundId {
    /// Nether wart pushed into soul sand
    NetherWartPlant,
    /// Any other crop planted in farmland
    CropPlant,
}

/// Side effect emitted by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedbackEvent {
    Sound {
        agent: AgentId,
        sound: SoundId,
        pos: BlockPos,
    },
    SwingMainHand {
        agent: AgentId,
    },
}

/// Receiver for player feedback. Calls return nothing the caller depends on.
pub trait Feedback {
    fn play_sound(&mut self, agent: AgentId, sound: SoundId, pos: BlockPos);
    fn swing_main_hand(&mut self, agent: AgentId);
}

/// Records feedback in emission order.
#[derive(Debug, Default)]
pub struct FeedbackLog {
    events: Vec<FeedbackEvent>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[FeedbackEvent] {
        &self.events
    }

    /// Take the recorded events (clears internal state)
    pub fn take(&mut self) -> Vec<FeedbackEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn sounds(&self) -> impl Iterator<Item = SoundId> + '_ {
        self.events.iter().filter_map(|event| match event {
            FeedbackEvent::Sound { sound, .. } => Some(*sound),
            FeedbackEvent::SwingMainHand { .. } => None,
        })
    }
}

impl Feedback for FeedbackLog {
    fn play_sound(&mut self, agent: AgentId, sound: SoundId, pos: BlockPos) {
        self.events.push(FeedbackEvent::Sound { agent, sound, pos });
    }

    fn swing_main_hand(&mut self, agent: AgentId) {
        self.events.push(FeedbackEvent::SwingMainHand { agent });
    }
}

/// Discards all feedback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback;

impl Feedback for NullFeedback {
    fn play_sound(&mut self, _agent: AgentId, _sound: SoundId, _pos: BlockPos) {}

    fn swing_main_hand(&mut self, _agent: AgentId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_emission_order() {
        let mut log = FeedbackLog::new();
        let agent = AgentId(1);
        log.play_sound(agent, SoundId::CropPlant, BlockPos::new(0, 65, 0));
        log.swing_main_hand(agent);

        assert_eq!(log.sounds().collect::<Vec<_>>(), vec![SoundId::CropPlant]);
        assert!(matches!(
            log.events()[1],
            FeedbackEvent::SwingMainHand { agent: AgentId(1) }
        ));
        assert_eq!(log.take().len(), 2);
        assert!(log.events().is_empty());
    }

    #[test]
    fn feedback_event_serializes_with_kind_tag() {
        let event = FeedbackEvent::SwingMainHand { agent: AgentId(7) };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"kind":"swing_main_hand","agent":7}"#);
    }
}
