//! Design constants grouped into config resources.
//!
//! Все числа фиксированные (баланс не настраивается), но живут в `Default`
//! impl'ах, чтобы тесты и headless бинарь могли их переопределить.

use bevy::prelude::*;
use std::time::Duration;

use crate::animation::ActorKind;
use crate::overworld::EnemyKind;

/// Overworld room size.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 960.0,
        }
    }
}

impl WorldBounds {
    /// Largest top-left coordinate that keeps a footprint of `size` inside.
    pub fn max_position(&self, size: Vec2) -> Vec2 {
        Vec2::new((self.width - size.x).max(0.0), (self.height - size.y).max(0.0))
    }

    pub fn clamp(&self, position: Vec2, size: Vec2) -> Vec2 {
        position.clamp(Vec2::ZERO, self.max_position(size))
    }
}

/// Player overworld parameters.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct PlayerConfig {
    pub spawn: Vec2,
    /// px per 1/60 s
    pub speed: f32,
    /// 48×48 sprite × 3
    pub footprint: Vec2,
    pub frames_per_side: usize,
    pub starting_health: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(624.0, 600.0),
            speed: 3.0,
            footprint: Vec2::splat(48.0 * 3.0),
            frames_per_side: 4,
            starting_health: 100,
        }
    }
}

/// Enemy's side of a battle, derived from its sprite kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleProfile {
    pub actor: ActorKind,
    pub anchor_x: i32,
    pub health: i32,
}

/// Battle screen constants.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct BattleConfig {
    pub player_anchor_x: f32,
    pub ground_y: f32,
    /// Feedback dwell measured from the last feedback entry.
    pub tally_dwell: Duration,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            player_anchor_x: 100.0,
            ground_y: 800.0,
            tally_dwell: Duration::from_millis(1500),
        }
    }
}

impl BattleConfig {
    /// Unknown sprite kinds fight as a goblin placed further left.
    pub fn profile(&self, kind: EnemyKind) -> BattleProfile {
        match kind {
            EnemyKind::Goblin => BattleProfile {
                actor: ActorKind::Goblin,
                anchor_x: 1150,
                health: 125,
            },
            EnemyKind::Skeleton => BattleProfile {
                actor: ActorKind::Skeleton,
                anchor_x: 1240,
                health: 175,
            },
            EnemyKind::FireWorm => BattleProfile {
                actor: ActorKind::FireWorm,
                anchor_x: 1300,
                health: 250,
            },
            EnemyKind::Other => BattleProfile {
                actor: ActorKind::Goblin,
                anchor_x: 1000,
                health: 125,
            },
        }
    }
}
