//! Battle events (ECS → presentation / session).

use bevy::prelude::*;

use super::controller::BattleOutcome;
use crate::combat::FeedbackText;

/// Новый feedback текст (урон, лечение, "Critical hit!", "Victory!").
#[derive(Event, Debug, Clone, PartialEq)]
pub struct FeedbackShown(pub FeedbackText);

/// Бой завершён: victory (враг уходит из overworld) или game over.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleEnded {
    pub enemy: Entity,
    pub outcome: BattleOutcome,
}
