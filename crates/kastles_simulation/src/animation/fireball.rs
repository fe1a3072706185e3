//! Fire worm projectile (purely visual).

use bevy::prelude::*;
use std::time::Duration;

use super::frames::{ActionKind, ActorKind, AnimationFrames, FrameHandle};
use super::tables::IDLE_FRAME_DELAY_MS;
use crate::clock::TickClock;

pub const FIREBALL_LAUNCH_X: f32 = 900.0;
pub const FIREBALL_PARKED_X: f32 = -200.0;
pub const FIREBALL_Y: f32 = 675.0;
/// px per 1/60 s, leftwards.
pub const FIREBALL_SPEED: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct Fireball {
    x: f32,
    frames: Vec<FrameHandle>,
    frame_index: usize,
    frame_timer: Duration,
}

impl Fireball {
    pub fn new(frames: &impl AnimationFrames) -> Self {
        Self {
            x: FIREBALL_PARKED_X,
            frames: frames.frames_for(ActorKind::Fireball, ActionKind::Idle, 0),
            frame_index: 0,
            frame_timer: Duration::ZERO,
        }
    }

    pub fn launch(&mut self) {
        self.x = FIREBALL_LAUNCH_X;
        crate::logger::log("🔥 Fireball launched");
    }

    /// In flight until it passes the parking line.
    pub fn is_active(&self) -> bool {
        self.x > FIREBALL_PARKED_X
    }

    pub fn tick(&mut self, clock: &TickClock) {
        if !self.is_active() {
            return;
        }
        self.x = (self.x - FIREBALL_SPEED * clock.frame_scale()).max(FIREBALL_PARKED_X);

        if clock.now.saturating_sub(self.frame_timer) >= Duration::from_millis(IDLE_FRAME_DELAY_MS) {
            self.frame_timer = clock.now;
            self.frame_index = (self.frame_index + 1) % self.frames.len().max(1);
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, FIREBALL_Y)
    }

    pub fn current_frame(&self) -> Option<FrameHandle> {
        self.frames.get(self.frame_index).copied()
    }
}
