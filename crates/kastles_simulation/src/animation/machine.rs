//! Actor animation state machine.
//!
//! Один `ActorAnimation` на бойца. Каждый tick:
//! 1. правило сегмента (sentinel / travel / drift) — может перейти к следующему сегменту
//! 2. продвижение кадров по таймеру (`now − frame_timer ≥ frame_delay`)
//! 3. clamp `frame_index` к длине strip'а
//!
//! Порядок важен: sentinel кадр успевает показаться один tick.

use bevy::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use super::frames::{ActionKind, ActorKind, AnimationFrames, FrameHandle};
use super::segment::{ActionTable, Completion, Cue, Segment, SegmentRule, TravelTarget};
use super::tables::{action_table, actions_of, IDLE_FRAME_DELAY_MS};
use crate::clock::TickClock;

/// Playback cursor.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct AnimationState {
    pub action: ActionKind,
    pub segment_index: usize,
    pub frame_index: usize,
    pub frame_timer: Duration,
    pub frame_delay: Duration,
}

/// What one tick produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationStep {
    /// Set on the tick the action's last segment ended.
    pub completed: Option<Completion>,
    pub cues: Vec<Cue>,
}

#[derive(Debug, Clone)]
pub struct ActorAnimation {
    actor: ActorKind,
    state: AnimationState,
    x: f32,
    ground_y: f32,
    anchor_x: f32,
    strips: HashMap<(ActionKind, usize), Vec<FrameHandle>>,
    pending_cues: Vec<Cue>,
}

impl ActorAnimation {
    /// Builds the machine at its anchor, idle, resolving every strip once.
    pub fn new(actor: ActorKind, anchor_x: f32, ground_y: f32, frames: &impl AnimationFrames) -> Self {
        let mut strips = HashMap::new();
        for &action in actions_of(actor) {
            let Some(table) = action_table(actor, action) else {
                continue;
            };
            for segment in 0..table.segments.len() {
                strips.insert((action, segment), frames.frames_for(actor, action, segment));
            }
        }

        Self {
            actor,
            state: AnimationState {
                action: ActionKind::Idle,
                segment_index: 0,
                frame_index: 0,
                frame_timer: Duration::ZERO,
                frame_delay: Duration::from_millis(IDLE_FRAME_DELAY_MS),
            },
            x: anchor_x,
            ground_y,
            anchor_x,
            strips,
            pending_cues: Vec::new(),
        }
    }

    /// Starts `action` from segment 0, replacing whatever was playing.
    ///
    /// Returns `false` (and changes nothing) if the actor has no such action.
    pub fn start(&mut self, action: ActionKind, now: Duration) -> bool {
        let Some(table) = action_table(self.actor, action) else {
            crate::logger::log_warning(&format!(
                "⚠️ Animation: {:?} has no {:?} action, ignored",
                self.actor, action
            ));
            return false;
        };

        self.state.action = action;
        self.state.segment_index = 0;
        self.state.frame_index = 0;
        self.state.frame_timer = now;
        self.pending_cues.clear();
        self.enter_segment(&table.segments[0]);
        true
    }

    /// Resets to the idle loop.
    pub fn reset_to_idle(&mut self, now: Duration) {
        self.start(ActionKind::Idle, now);
    }

    pub fn tick(&mut self, clock: &TickClock) -> AnimationStep {
        let mut step = AnimationStep {
            completed: None,
            cues: std::mem::take(&mut self.pending_cues),
        };

        let Some(table) = action_table(self.actor, self.state.action) else {
            return step;
        };
        let Some(segment) = table.segments.get(self.state.segment_index).copied() else {
            return step;
        };
        let scale = clock.frame_scale();

        // 1. segment rule
        self.x += segment.drift * scale;
        let segment_done = match segment.rule {
            SegmentRule::Loop | SegmentRule::HoldLast => false,
            SegmentRule::Frames { last_frame } => self.state.frame_index == last_frame,
            SegmentRule::Travel { target, velocity } => {
                let target_x = self.resolve_target(target);
                let crossed = if velocity >= 0.0 {
                    self.x > target_x
                } else {
                    self.x < target_x
                };
                if crossed {
                    self.x = target_x;
                } else {
                    self.x += velocity * scale;
                }
                crossed
            }
        };

        if segment_done {
            if let Some(completion) = self.advance_segment(table, &mut step.cues, clock.now) {
                step.completed = Some(completion);
                return step;
            }
        }

        // 2. frames
        self.advance_frame(&mut step.cues, clock.now);

        // 3. clamp
        if self.state.frame_index >= self.strip_len() {
            self.state.frame_index = 0;
        }

        step
    }

    /// Moves to the next segment. Returns the completion hook if the action ended.
    fn advance_segment(&mut self, table: &ActionTable, cues: &mut Vec<Cue>, now: Duration) -> Option<Completion> {
        self.state.segment_index += 1;
        self.state.frame_index = 0;

        let Some(next) = table.segments.get(self.state.segment_index) else {
            let finished = self.state.action;
            self.reset_to_idle(now);
            crate::logger::log(&format!("🎬 Animation: {:?} finished {:?}", self.actor, finished));
            return Some(table.completion);
        };

        self.enter_segment(next);
        cues.append(&mut self.pending_cues);
        None
    }

    fn enter_segment(&mut self, segment: &Segment) {
        self.state.frame_delay = Duration::from_millis(segment.frame_delay_ms);
        self.pending_cues.extend_from_slice(segment.on_enter);
    }

    fn advance_frame(&mut self, cues: &mut Vec<Cue>, now: Duration) {
        let len = self.strip_len();
        let hold = matches!(self.current_segment().map(|s| s.rule), Some(SegmentRule::HoldLast));
        if hold && self.state.frame_index + 1 >= len {
            return;
        }

        if now.saturating_sub(self.state.frame_timer) < self.state.frame_delay {
            return;
        }

        self.state.frame_timer = now;
        self.state.frame_index = (self.state.frame_index + 1) % len.max(1);

        let Some(segment) = self.current_segment() else {
            return;
        };
        if let Some(delay) = segment.delay_override(self.state.frame_index) {
            self.state.frame_delay = Duration::from_millis(delay);
        }
        cues.extend(segment.cues_at(self.state.frame_index));
    }

    fn resolve_target(&self, target: TravelTarget) -> f32 {
        match target {
            TravelTarget::Fixed(x) => x,
            TravelTarget::Anchor => self.anchor_x,
        }
    }

    fn current_segment(&self) -> Option<&'static Segment> {
        action_table(self.actor, self.state.action)?
            .segments
            .get(self.state.segment_index)
    }

    fn strip(&self) -> &[FrameHandle] {
        self.strips
            .get(&(self.state.action, self.state.segment_index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn strip_len(&self) -> usize {
        self.strip().len()
    }

    pub fn current_frame(&self) -> Option<FrameHandle> {
        self.strip().get(self.state.frame_index).copied()
    }

    pub fn actor(&self) -> ActorKind {
        self.actor
    }

    pub fn action(&self) -> ActionKind {
        self.state.action
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.action == ActionKind::Idle
    }

    /// Death reached its final frame.
    pub fn is_death_finished(&self) -> bool {
        self.state.action == ActionKind::Death && self.state.frame_index + 1 >= self.strip_len()
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.ground_y)
    }

    pub fn anchor_x(&self) -> f32 {
        self.anchor_x
    }

    #[cfg(test)]
    pub(crate) fn set_frame_index(&mut self, frame: usize) {
        self.state.frame_index = frame;
    }
}
