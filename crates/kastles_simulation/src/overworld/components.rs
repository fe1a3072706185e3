//! Overworld ECS components.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::geometry::footprint;

/// Sprite kind of an overworld enemy. Decides its battle profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Goblin,
    Skeleton,
    FireWorm,
    /// Any other sprite sheet (fights as a goblin).
    #[serde(other)]
    Other,
}

/// Overworld movement variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyBehavior {
    /// Follows the player in a straight line.
    Walker,
    /// Telegraphs, then dashes at a captured player position.
    Charger,
}

impl EnemyBehavior {
    /// 48×48 × 3 for walkers, 64×64 × 4 for chargers.
    pub fn footprint(&self) -> Vec2 {
        match self {
            EnemyBehavior::Walker => Vec2::splat(48.0 * 3.0),
            EnemyBehavior::Charger => Vec2::splat(64.0 * 4.0),
        }
    }

    pub fn frames_per_side(&self) -> usize {
        match self {
            EnemyBehavior::Walker => 4,
            EnemyBehavior::Charger => 8,
        }
    }
}

/// Marker: the controllable knight.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub behavior: EnemyBehavior,
    /// Map-assigned id (stable across the session).
    pub map_id: u32,
}

/// Position (top-left) + footprint size in overworld pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct OverworldBody {
    pub position: Vec2,
    pub size: Vec2,
    /// Per-axis direction of the last movement step (−1/0/1).
    pub direction: IVec2,
}

impl OverworldBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            direction: IVec2::ZERO,
        }
    }

    pub fn rect(&self) -> Rect {
        footprint(self.position, self.size)
    }
}

/// Marker: enemy is fighting; its AI is suspended.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct InBattle;

/// Marker: enemy lost its battle. Reaped at the end of the tick.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Defeated;

/// Rising-edge latch for contact: set while footprints overlap.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ContactLatch {
    pub touching: bool,
}

/// Facing for the four-direction walk strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum Facing {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl Facing {
    /// X wins over Y. `None` for no movement.
    pub fn from_direction(direction: IVec2) -> Option<Self> {
        if direction.x > 0 {
            Some(Facing::Right)
        } else if direction.x < 0 {
            Some(Facing::Left)
        } else if direction.y > 0 {
            Some(Facing::Down)
        } else if direction.y < 0 {
            Some(Facing::Up)
        } else {
            None
        }
    }
}

/// Overworld walk animation: frame 0 while still, cycles every 200 ms while moving.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WalkCycle {
    pub facing: Facing,
    pub frame: usize,
    pub frame_timer: Duration,
    pub frames_per_side: usize,
}

/// Walk frame interval.
pub const WALK_FRAME_DELAY: Duration = Duration::from_millis(200);
/// Frame shown while a charger telegraphs.
pub const TELEGRAPH_FRAME: usize = 3;

impl WalkCycle {
    pub fn new(frames_per_side: usize) -> Self {
        Self {
            facing: Facing::Down,
            frame: 0,
            frame_timer: Duration::ZERO,
            frames_per_side: frames_per_side.max(1),
        }
    }

    pub fn advance(&mut self, direction: IVec2, now: Duration) {
        let Some(facing) = Facing::from_direction(direction) else {
            self.frame = 0;
            return;
        };

        if now.saturating_sub(self.frame_timer) > WALK_FRAME_DELAY {
            self.frame_timer = now;
            self.frame = (self.frame + 1) % self.frames_per_side;
        }
        self.facing = facing;
    }

    /// Charger wind-up: fixed frame, facing the player horizontally.
    pub fn telegraph(&mut self, toward_player: f32) {
        self.facing = if toward_player < 0.0 { Facing::Left } else { Facing::Right };
        self.frame = TELEGRAPH_FRAME.min(self.frames_per_side - 1);
    }
}
