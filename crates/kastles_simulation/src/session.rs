//! Game session: which mode the tick runs in + state carried between battles.

use bevy::prelude::*;

use crate::config::PlayerConfig;
use crate::overworld::{spawn_room, EnemySpawn};

/// Current top-level mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SessionMode {
    /// Overworld: player moves, enemy AI ticks.
    #[default]
    Roaming,
    /// Battle against the given enemy; overworld frozen.
    Battle(Entity),
    /// Player died. Terminal.
    GameOver,
    /// Every enemy defeated. Terminal.
    Victory,
}

/// Session resource.
///
/// `player_health` переживает бой (следующий бой стартует с ним).
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct GameSession {
    pub mode: SessionMode,
    pub player_health: i32,
    pub enemies_remaining: usize,
}

impl GameSession {
    pub fn new(player_health: i32, enemies_remaining: usize) -> Self {
        Self {
            mode: SessionMode::Roaming,
            player_health,
            enemies_remaining,
        }
    }

    pub fn is_roaming(&self) -> bool {
        self.mode == SessionMode::Roaming
    }

    pub fn is_over(&self) -> bool {
        matches!(self.mode, SessionMode::GameOver | SessionMode::Victory)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(crate::combat::PLAYER_MAX_HEALTH, 0)
    }
}

/// Player footprint started touching an enemy (rising edge only).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyContact {
    pub enemy: Entity,
}

/// Spawns the room and (re)starts the session with the configured starting health.
pub fn start_session(world: &mut World, spawns: &[EnemySpawn]) {
    let enemies = spawn_room(world, spawns);
    let health = world
        .get_resource::<PlayerConfig>()
        .map(|config| config.starting_health)
        .unwrap_or(crate::combat::PLAYER_MAX_HEALTH);

    world.insert_resource(GameSession::new(health, enemies));
    crate::logger::log_info(&format!("🏰 Session started: {} enemies, player {} HP", enemies, health));
}
