//! Enemy AI FSM (overworld).
//!
//! Приоритет каждый tick:
//! 1. player в detection range → chase (Walker) / telegraph + charge (Charger)
//! 2. вне [anchor ± range] → Returning к anchor
//! 3. иначе wander: случайная цель по одной оси, после прибытия 1s idle (Home)
//!
//! Вариантная часть (chase и скорость) — через `EnemyCapability`.

use bevy::prelude::*;
use rand::{Rng, RngCore};

use super::components::{EnemyBehavior, OverworldBody};
use crate::clock::TickClock;
use crate::config::WorldBounds;
use crate::geometry::{Axis, GeometryOracle};

/// AI FSM состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum EnemyMode {
    /// Стоит у цели (idle hold после прибытия)
    #[default]
    Home,
    /// Идёт к случайной точке рядом с anchor
    Wandering,
    /// Walker: преследует player'а
    Chasing,
    /// Ушёл слишком далеко, возвращается к anchor
    Returning,
    /// Charger: стоит лицом к player'у, копит telegraph_timer
    ChargeTelegraph,
    /// Charger: рывок к захваченной позиции
    Charging,
}

/// Per-enemy AI state.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnemyAiState {
    pub mode: EnemyMode,
    pub anchor: Vec2,
    /// Detection radius; also bounds the wander area around `anchor`.
    pub detection_range: f32,
    pub target_position: Option<Vec2>,
    /// Seconds spent in the idle hold.
    pub wander_timer: f32,
    pub holding: bool,
    /// Seconds spent telegraphing.
    pub telegraph_timer: f32,
}

impl EnemyAiState {
    pub fn new(anchor: Vec2, detection_range: f32) -> Self {
        Self {
            mode: EnemyMode::Home,
            anchor,
            detection_range,
            target_position: None,
            wander_timer: 0.0,
            holding: false,
            telegraph_timer: 0.0,
        }
    }

    /// Inside `anchor ± range` on both axes.
    pub fn is_at_home(&self, position: Vec2) -> bool {
        let offset = (position - self.anchor).abs();
        offset.x <= self.detection_range && offset.y <= self.detection_range
    }

    pub fn reset_wander(&mut self) {
        self.holding = false;
        self.wander_timer = 0.0;
    }

    /// Charger back to telegraph-ready.
    pub fn reset_charge(&mut self) {
        self.telegraph_timer = 0.0;
        if self.mode == EnemyMode::Charging {
            self.target_position = None;
        }
    }

    fn start_hold(&mut self) {
        self.mode = EnemyMode::Home;
        self.holding = true;
        self.wander_timer = 0.0;
        self.target_position = None;
    }
}

/// Параметры AI
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct EnemyAiConfig {
    /// px per 1/60 s
    pub movement_speed: f32,
    /// Arrival band around a target (px, per axis)
    pub arrival_tolerance: f32,
    /// Idle hold after reaching a wander target (секунды)
    pub idle_hold: f32,
    /// Charger wind-up before a dash (секунды)
    pub telegraph_duration: f32,
    /// Charger dash speed multiplier
    pub charge_multiplier: f32,
}

impl Default for EnemyAiConfig {
    fn default() -> Self {
        Self {
            movement_speed: 2.0,
            arrival_tolerance: 2.0,
            idle_hold: 1.0,
            telegraph_duration: 1.5,
            charge_multiplier: 2.5,
        }
    }
}

/// World access for one AI tick.
pub struct AiContext<'a> {
    pub clock: &'a TickClock,
    pub bounds: &'a WorldBounds,
    pub geometry: &'a dyn GeometryOracle,
}

/// Result of one movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    pub arrived: bool,
    /// A wall pushed the body back on some axis.
    pub blocked: bool,
}

/// Variant-specific behaviour.
pub trait EnemyCapability {
    /// Player is detected: update mode, return the movement target (`None` = hold still).
    fn advance_action(&self, ai: &mut EnemyAiState, player: Vec2, config: &EnemyAiConfig, dt: f32) -> Option<Vec2>;

    /// Moves `body` toward `target` at the variant's speed for the current mode.
    fn advance_movement(
        &self,
        ai: &mut EnemyAiState,
        body: &mut OverworldBody,
        target: Vec2,
        config: &EnemyAiConfig,
        ctx: &AiContext,
    ) -> StepResult;
}

pub struct WalkerCapability;
pub struct ChargerCapability;

impl EnemyCapability for WalkerCapability {
    fn advance_action(&self, ai: &mut EnemyAiState, player: Vec2, _config: &EnemyAiConfig, _dt: f32) -> Option<Vec2> {
        ai.mode = EnemyMode::Chasing;
        ai.target_position = Some(player);
        Some(player)
    }

    fn advance_movement(
        &self,
        _ai: &mut EnemyAiState,
        body: &mut OverworldBody,
        target: Vec2,
        config: &EnemyAiConfig,
        ctx: &AiContext,
    ) -> StepResult {
        step_toward(body, target, config.movement_speed, config.arrival_tolerance, ctx)
    }
}

impl EnemyCapability for ChargerCapability {
    fn advance_action(&self, ai: &mut EnemyAiState, player: Vec2, config: &EnemyAiConfig, dt: f32) -> Option<Vec2> {
        if ai.mode == EnemyMode::Charging {
            // рывок не прерывается, цель захвачена при commit
            return ai.target_position;
        }

        if ai.mode != EnemyMode::ChargeTelegraph {
            ai.mode = EnemyMode::ChargeTelegraph;
            ai.telegraph_timer = 0.0;
            ai.target_position = None;
        }

        ai.telegraph_timer += dt;
        if ai.telegraph_timer > config.telegraph_duration {
            ai.telegraph_timer = 0.0;
            ai.mode = EnemyMode::Charging;
            ai.target_position = Some(player);
        }
        None
    }

    fn advance_movement(
        &self,
        ai: &mut EnemyAiState,
        body: &mut OverworldBody,
        target: Vec2,
        config: &EnemyAiConfig,
        ctx: &AiContext,
    ) -> StepResult {
        let charging = ai.mode == EnemyMode::Charging;
        let speed = if charging {
            config.movement_speed * config.charge_multiplier
        } else {
            config.movement_speed
        };

        let step = step_toward(body, target, speed, config.arrival_tolerance, ctx);
        if charging && (step.arrived || step.blocked) {
            ai.reset_charge();
            ai.mode = EnemyMode::ChargeTelegraph;
        }
        step
    }
}

impl EnemyBehavior {
    pub fn capability(&self) -> &'static dyn EnemyCapability {
        match self {
            EnemyBehavior::Walker => &WalkerCapability,
            EnemyBehavior::Charger => &ChargerCapability,
        }
    }
}

/// sign(delta), zeroed inside the arrival band.
fn axis_direction(delta: f32, tolerance: f32) -> i32 {
    if delta.abs() <= tolerance {
        0
    } else if delta > 0.0 {
        1
    } else {
        -1
    }
}

/// Straight-line step with per-axis wall sliding.
pub fn step_toward(body: &mut OverworldBody, target: Vec2, speed: f32, tolerance: f32, ctx: &AiContext) -> StepResult {
    let delta = target - body.position;
    let direction = IVec2::new(axis_direction(delta.x, tolerance), axis_direction(delta.y, tolerance));
    body.direction = direction;

    if direction == IVec2::ZERO {
        return StepResult {
            arrived: true,
            blocked: false,
        };
    }

    let blocked = slide(body, direction, speed * ctx.clock.frame_scale(), ctx.geometry, ctx.bounds);
    StepResult { arrived: false, blocked }
}

/// Moves `distance` px along each non-zero axis of `direction`: X first, then Y,
/// each resolved against walls, then clamped to the world. Returns `true` if
/// a wall or the world edge stopped the body.
pub fn slide(
    body: &mut OverworldBody,
    direction: IVec2,
    distance: f32,
    geometry: &dyn GeometryOracle,
    bounds: &WorldBounds,
) -> bool {
    let mut blocked = false;

    body.position.x += direction.x as f32 * distance;
    if let Some(x) = geometry.resolve_axis_collision(body.rect(), Axis::X, direction.x) {
        body.position.x = x;
        blocked |= direction.x != 0;
    }

    body.position.y += direction.y as f32 * distance;
    if let Some(y) = geometry.resolve_axis_collision(body.rect(), Axis::Y, direction.y) {
        body.position.y = y;
        blocked |= direction.y != 0;
    }

    let clamped = bounds.clamp(body.position, body.size);
    if clamped != body.position {
        body.position = clamped;
        blocked = true;
    }

    blocked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WanderDirection {
    Up,
    Down,
    Left,
    Right,
}

impl WanderDirection {
    const ALL: [WanderDirection; 4] = [
        WanderDirection::Up,
        WanderDirection::Down,
        WanderDirection::Left,
        WanderDirection::Right,
    ];
}

/// Random value between `current` and the range edge on one side.
fn sample_axis(current: f32, anchor: f32, range: f32, world_max: f32, toward_low: bool, rng: &mut dyn RngCore) -> f32 {
    let low = (anchor - range).max(0.0);
    let high = (anchor + range).min(world_max);
    if low >= high {
        return low.min(world_max);
    }

    let current = current.clamp(low, high);
    let (from, to) = if toward_low { (low, current) } else { (current, high) };
    if from >= to {
        from
    } else {
        rng.gen_range(from..=to)
    }
}

/// Picks a cardinal direction, then a point along it inside
/// `anchor ± range` and inside the world (minus footprint).
pub fn pick_wander_target(
    position: Vec2,
    footprint: Vec2,
    anchor: Vec2,
    range: f32,
    bounds: &WorldBounds,
    rng: &mut dyn RngCore,
) -> Vec2 {
    let world_max = bounds.max_position(footprint);
    let direction = WanderDirection::ALL[rng.gen_range(0..WanderDirection::ALL.len())];

    match direction {
        WanderDirection::Up => Vec2::new(position.x, sample_axis(position.y, anchor.y, range, world_max.y, true, rng)),
        WanderDirection::Down => Vec2::new(position.x, sample_axis(position.y, anchor.y, range, world_max.y, false, rng)),
        WanderDirection::Left => Vec2::new(sample_axis(position.x, anchor.x, range, world_max.x, true, rng), position.y),
        WanderDirection::Right => Vec2::new(sample_axis(position.x, anchor.x, range, world_max.x, false, rng), position.y),
    }
}

/// Mode transition produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AiStep {
    pub transition: Option<(EnemyMode, EnemyMode)>,
}

impl EnemyAiState {
    /// One AI tick: decide, then move.
    pub fn tick(
        &mut self,
        behavior: EnemyBehavior,
        body: &mut OverworldBody,
        player_position: Vec2,
        config: &EnemyAiConfig,
        ctx: &AiContext,
        rng: &mut dyn RngCore,
    ) -> AiStep {
        let before = self.mode;
        let capability = behavior.capability();
        let dt = ctx.clock.delta;

        let spotted = ctx.geometry.distance(body.position, player_position) <= self.detection_range;

        let target = if spotted {
            self.reset_wander();
            capability.advance_action(self, player_position, config, dt)
        } else {
            if matches!(self.mode, EnemyMode::ChargeTelegraph | EnemyMode::Charging) {
                // потеряли player'а — charger снова telegraph-ready
                self.reset_charge();
                self.target_position = None;
            }

            if !self.is_at_home(body.position) {
                self.mode = EnemyMode::Returning;
                self.target_position = Some(self.anchor);
                self.target_position
            } else {
                self.advance_wander(body, config, ctx, rng)
            }
        };

        match target {
            Some(target) => {
                let step = capability.advance_movement(self, body, target, config, ctx);
                if step.arrived && matches!(self.mode, EnemyMode::Wandering | EnemyMode::Returning) {
                    self.start_hold();
                }
            }
            None => body.direction = IVec2::ZERO,
        }

        AiStep {
            transition: (before != self.mode).then_some((before, self.mode)),
        }
    }

    fn advance_wander(
        &mut self,
        body: &OverworldBody,
        config: &EnemyAiConfig,
        ctx: &AiContext,
        rng: &mut dyn RngCore,
    ) -> Option<Vec2> {
        if self.holding {
            self.mode = EnemyMode::Home;
            self.wander_timer += ctx.clock.delta;
            if self.wander_timer > config.idle_hold {
                self.reset_wander();
            }
            return None;
        }

        // Returning, который уже внутри range, доходит до anchor как обычный wander
        let keep_target = matches!(self.mode, EnemyMode::Wandering | EnemyMode::Returning);
        let target = match (keep_target, self.target_position) {
            (true, Some(target)) => target,
            _ => pick_wander_target(body.position, body.size, self.anchor, self.detection_range, ctx.bounds, rng),
        };

        self.mode = EnemyMode::Wandering;
        self.target_position = Some(target);
        Some(target)
    }
}
