//! Clock collaborator: one sample per tick.
//!
//! Movement uses `delta` (seconds since the previous tick) so it stays
//! frame-rate independent; animation timers compare absolute `now` against
//! per-segment delays. Both values come from the same sample.

use bevy::prelude::*;
use std::time::Duration;

/// Source of simulation time.
pub trait ClockSource {
    /// Monotonic timestamp of the current tick.
    fn now(&self) -> Duration;
    /// Seconds elapsed since the previous tick.
    fn delta_secs(&self) -> f32;
}

impl<T: Default> ClockSource for Time<T> {
    fn now(&self) -> Duration {
        self.elapsed()
    }

    fn delta_secs(&self) -> f32 {
        Time::<T>::delta_secs(self)
    }
}

/// Snapshot of the clock taken once at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickClock {
    pub now: Duration,
    pub delta: f32,
}

impl TickClock {
    pub fn sample(source: &impl ClockSource) -> Self {
        Self {
            now: source.now(),
            delta: source.delta_secs(),
        }
    }

    /// Clock at `now_ms` with a given tick delta (seconds).
    pub fn at_millis(now_ms: u64, delta: f32) -> Self {
        Self {
            now: Duration::from_millis(now_ms),
            delta,
        }
    }

    /// Scale factor for speeds expressed in pixels per 1/60 s.
    pub fn frame_scale(&self) -> f32 {
        self.delta * 60.0
    }
}

/// Manually advanced clock (headless runs, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Duration,
    delta: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances by `step` and returns the sample for the new tick.
    pub fn advance(&mut self, step: Duration) -> TickClock {
        self.now += step;
        self.delta = step.as_secs_f32();
        TickClock::sample(self)
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn delta_secs(&self) -> f32 {
        self.delta
    }
}
