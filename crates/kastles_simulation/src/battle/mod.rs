//! Turn-based battle: phase loop, menu, QTE routing, outcome.
//!
//! Один активный бой = один `BattleController` resource.
//! Overworld на время боя заморожен (`SessionMode::Battle`).

use bevy::prelude::*;

pub mod controller;
pub mod events;
pub mod menu;
pub mod phase;
pub mod systems;

#[cfg(test)]
mod controller_tests;

pub use controller::{BattleController, BattleOutcome, BattleStep};
pub use events::{BattleEnded, FeedbackShown};
pub use menu::{BattleMenu, MenuAction};
pub use phase::BattlePhase;
pub use systems::{advance_battle, handle_battle_input, start_battle_on_contact};

/// Battle Plugin
///
/// Порядок выполнения (внутри `TickSet::Battle`):
/// 1. start_battle_on_contact — EnemyContact → BattleController
/// 2. handle_battle_input — InputPressed → menu / QTE
/// 3. advance_battle — анимации, resolver, фазы, исход
pub struct BattlePlugin;

impl Plugin for BattlePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FeedbackShown>().add_event::<BattleEnded>();

        app.add_systems(
            FixedUpdate,
            (start_battle_on_contact, handle_battle_input, advance_battle)
                .chain()
                .in_set(crate::TickSet::Battle),
        );
    }
}
