//! Combat rules (pure): health, damage formulas, feedback.
//!
//! Никаких систем здесь нет — battle controller вызывает resolver после
//! завершения анимации действия. Единственный writer `CombatantStatus`.

pub mod feedback;
pub mod resolver;
pub mod status;


pub use feedback::{FeedbackKind, FeedbackText, Side};
pub use resolver::{
    enemy_strike, player_strike, resolve_enemy_attack, resolve_player_attack, resolve_potion, Resolution,
    Strike, StrikeFeedback, POTION_HEAL,
};
pub use status::{CombatantStatus, PLAYER_MAX_HEALTH};
