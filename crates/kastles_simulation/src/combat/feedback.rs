//! Battle feedback texts (damage numbers, "Critical hit!", "Perfect!", "Victory!").
//!
//! Только данные: где и каким цветом рисовать, решает presentation.

use bevy::prelude::*;
use std::time::Duration;

use super::resolver::StrikeFeedback;

/// Which combatant a feedback entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Damage(i32),
    Heal(i32),
    CriticalHit,
    Perfect,
    Victory,
}

/// One feedback entry. The newest entry's `shown_at` drives the tally dwell.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackText {
    /// Side the text is drawn next to.
    pub side: Side,
    pub kind: FeedbackKind,
    pub shown_at: Duration,
}

impl FeedbackText {
    pub fn new(side: Side, kind: FeedbackKind, shown_at: Duration) -> Self {
        Self { side, kind, shown_at }
    }

    /// Label for a strike classification, if it has one.
    pub fn for_strike(side: Side, feedback: StrikeFeedback, shown_at: Duration) -> Option<Self> {
        let kind = match feedback {
            StrikeFeedback::Normal => return None,
            StrikeFeedback::Critical => FeedbackKind::CriticalHit,
            StrikeFeedback::Perfect => FeedbackKind::Perfect,
        };
        Some(Self::new(side, kind, shown_at))
    }

    pub fn label(&self) -> String {
        match self.kind {
            FeedbackKind::Damage(amount) | FeedbackKind::Heal(amount) => amount.to_string(),
            FeedbackKind::CriticalHit => "Critical hit!".to_string(),
            FeedbackKind::Perfect => "Perfect!".to_string(),
            FeedbackKind::Victory => "Victory!".to_string(),
        }
    }
}
