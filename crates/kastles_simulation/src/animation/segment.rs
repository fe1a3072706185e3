//! Animation segment description (static data).

use super::frames::{ActionKind, Clip};

/// Where a travel segment ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TravelTarget {
    Fixed(f32),
    /// The actor's own battle anchor.
    Anchor,
}

/// How a segment decides it is done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentRule {
    /// Never ends (idle).
    Loop,
    /// Ends when `frame_index` reaches `last_frame`.
    Frames { last_frame: usize },
    /// Ends when x crosses `target`. `velocity` is px per 1/60 s, signed.
    Travel { target: TravelTarget, velocity: f32 },
    /// Plays once, then holds the final frame (death).
    HoldLast,
}

/// Side effect raised when a segment is entered or a frame is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Start a reaction on the opposing actor (`Idle` resets it).
    Opponent(ActionKind),
    LaunchFireball,
}

/// What happens when the action's last segment ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    None,
    /// Resolve the player's attack against the enemy with this max damage.
    StrikeEnemy(i32),
    /// Resolve the enemy's attack against the player with this max damage.
    StrikePlayer(i32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub clip: Clip,
    pub rule: SegmentRule,
    /// Frame delay set on entry (ms).
    pub frame_delay_ms: u64,
    /// x movement per 1/60 s while the segment runs.
    pub drift: f32,
    /// `(frame, delay_ms)`: delay switches when the frame is reached.
    pub delay_overrides: &'static [(usize, u64)],
    pub on_enter: &'static [Cue],
    pub frame_cues: &'static [(usize, Cue)],
}

impl Segment {
    pub const fn new(clip: Clip, rule: SegmentRule, frame_delay_ms: u64) -> Self {
        Self {
            clip,
            rule,
            frame_delay_ms,
            drift: 0.0,
            delay_overrides: &[],
            on_enter: &[],
            frame_cues: &[],
        }
    }

    pub const fn frames(clip: Clip, last_frame: usize, frame_delay_ms: u64) -> Self {
        Self::new(clip, SegmentRule::Frames { last_frame }, frame_delay_ms)
    }

    pub const fn travel(clip: Clip, target: TravelTarget, velocity: f32, frame_delay_ms: u64) -> Self {
        Self::new(clip, SegmentRule::Travel { target, velocity }, frame_delay_ms)
    }

    pub const fn with_drift(mut self, drift: f32) -> Self {
        self.drift = drift;
        self
    }

    pub const fn with_overrides(mut self, overrides: &'static [(usize, u64)]) -> Self {
        self.delay_overrides = overrides;
        self
    }

    pub const fn on_enter(mut self, cues: &'static [Cue]) -> Self {
        self.on_enter = cues;
        self
    }

    pub const fn with_frame_cues(mut self, cues: &'static [(usize, Cue)]) -> Self {
        self.frame_cues = cues;
        self
    }

    pub fn delay_override(&self, frame: usize) -> Option<u64> {
        self.delay_overrides
            .iter()
            .find(|(at, _)| *at == frame)
            .map(|(_, delay)| *delay)
    }

    pub fn cues_at(&self, frame: usize) -> impl Iterator<Item = Cue> + '_ {
        self.frame_cues
            .iter()
            .filter(move |(at, _)| *at == frame)
            .map(|(_, cue)| *cue)
    }
}

/// Ordered segments of one action plus its completion hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionTable {
    pub segments: &'static [Segment],
    pub completion: Completion,
}
