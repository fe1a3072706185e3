//! Spawn records handed over by the map collaborator.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::ai::{EnemyAiConfig, EnemyAiState};
use super::components::{ContactLatch, Enemy, EnemyBehavior, EnemyKind, OverworldBody, Player, WalkCycle};
use crate::config::PlayerConfig;

/// One enemy object from a room map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "enemy_sprite")]
    pub kind: EnemyKind,
    #[serde(rename = "enemy_type")]
    pub behavior: EnemyBehavior,
    pub movement_range: f32,
    pub movement_speed: f32,
    pub map_id: u32,
}

impl EnemySpawn {
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn bundle(&self) -> impl Bundle {
        let config = EnemyAiConfig {
            movement_speed: self.movement_speed,
            ..default()
        };
        (
            Enemy {
                kind: self.kind,
                behavior: self.behavior,
                map_id: self.map_id,
            },
            OverworldBody::new(self.anchor(), self.behavior.footprint()),
            EnemyAiState::new(self.anchor(), self.movement_range),
            config,
            ContactLatch::default(),
            WalkCycle::new(self.behavior.frames_per_side()),
        )
    }
}

/// Parses a room's enemy list (JSON array of [`EnemySpawn`]).
pub fn parse_room(json: &str) -> Result<Vec<EnemySpawn>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Spawns the player and every enemy record. Returns the number of enemies.
pub fn spawn_room(world: &mut World, spawns: &[EnemySpawn]) -> usize {
    let player_config = world
        .get_resource::<PlayerConfig>()
        .copied()
        .unwrap_or_default();

    world.spawn((
        Player,
        OverworldBody::new(player_config.spawn, player_config.footprint),
        WalkCycle::new(player_config.frames_per_side),
    ));

    for spawn in spawns {
        let entity = world.spawn(spawn.bundle()).id();
        crate::logger::log(&format!(
            "👾 Spawned {:?} {:?} (map id {}) at ({:.0}, {:.0}) as {:?}",
            spawn.kind, spawn.behavior, spawn.map_id, spawn.x, spawn.y, entity
        ));
    }

    spawns.len()
}
