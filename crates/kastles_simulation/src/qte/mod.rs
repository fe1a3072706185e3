//! Quick-time events: target combo + positional scoring.
//!
//! Каждое действие в бою (light/heavy attack, defense) сопровождается QTE.
//! Результат — `HitRatio`, который потом уходит в combat resolver.

pub mod combo;
pub mod engine;

#[cfg(test)]
mod engine_tests;

pub use combo::{ComboSequence, QteKind};
pub use engine::{ComboProgress, HitRatio, KeyFeedback, QteEngine, Scored};
