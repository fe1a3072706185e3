//! Overworld: player movement, enemy AI FSM, contact → battle handoff.
//!
//! Walker идёт прямо на player'а, Charger делает telegraph + рывок.
//! Архитектура: AI state в компоненте, варианты через `EnemyCapability`.

use bevy::prelude::*;

pub mod ai;
pub mod components;
pub mod spawn;
pub mod systems;


pub use ai::{
    pick_wander_target, slide, step_toward, AiContext, AiStep, ChargerCapability, EnemyAiConfig, EnemyAiState,
    EnemyCapability, EnemyMode, StepResult, WalkerCapability,
};
pub use components::{
    ContactLatch, Defeated, Enemy, EnemyBehavior, EnemyKind, Facing, InBattle, OverworldBody, Player, WalkCycle,
};
pub use spawn::{parse_room, spawn_room, EnemySpawn};
pub use systems::{detect_enemy_contact, enemy_ai_tick, move_player, reap_defeated_enemies, update_walk_cycles};

/// Overworld Plugin
///
/// Порядок выполнения (`TickSet::Overworld`):
/// 1. move_player — held directions → позиция
/// 2. enemy_ai_tick — FSM + движение врагов
/// 3. detect_enemy_contact — пересечение footprint'ов → EnemyContact
/// 4. update_walk_cycles — кадры ходьбы
///
/// `reap_defeated_enemies` — в `TickSet::Reap`, в самом конце tick'а.
pub struct OverworldPlugin;

impl Plugin for OverworldPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<crate::session::EnemyContact>();

        app.add_systems(
            FixedUpdate,
            (move_player, enemy_ai_tick, detect_enemy_contact, update_walk_cycles)
                .chain()
                .in_set(crate::TickSet::Overworld),
        );

        app.add_systems(FixedUpdate, reap_defeated_enemies.in_set(crate::TickSet::Reap));
    }
}
