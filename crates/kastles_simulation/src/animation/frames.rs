//! Animation asset collaborator: frame strips per actor/action/segment.
//!
//! Симуляция не грузит спрайты. Она работает с непрозрачными `FrameHandle`,
//! которые presentation layer сопоставляет с реальными кадрами.

use bevy::prelude::*;

use super::tables::action_table;

/// Battle-screen actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ActorKind {
    Knight,
    Goblin,
    Skeleton,
    FireWorm,
    Fireball,
}

/// What an actor is doing. Each (actor, action) pair maps to a segment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ActionKind {
    Idle,
    LightAttack,
    HeavyAttack,
    /// Enemy's only attack.
    Attack,
    Duck,
    Roll,
    Counterattack,
    Death,
}

/// Sprite strip a segment draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Clip {
    Idle,
    MoveLeft,
    MoveRight,
    AttackA,
    AttackB,
    AttackC,
    Roll,
    Duck,
    Death,
}

/// Opaque reference to one frame of one strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct FrameHandle {
    pub actor: ActorKind,
    pub clip: Clip,
    pub index: usize,
}

/// Resolves frame strips. Called once per actor construction.
pub trait AnimationFrames {
    fn frames_for(&self, actor: ActorKind, action: ActionKind, segment: usize) -> Vec<FrameHandle>;
}

/// Built-in strip lengths for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFrames;

impl BuiltinFrames {
    pub fn strip_len(actor: ActorKind, clip: Clip) -> usize {
        use ActorKind::*;
        use Clip::*;

        match (actor, clip) {
            (Knight, Idle) => 4,
            (Knight, MoveLeft | MoveRight) => 8,
            (Knight, AttackA) => 6,
            (Knight, AttackB) => 6,
            (Knight, AttackC) => 10,
            (Knight, Roll) => 12,
            (Knight, Duck) => 3,
            (Knight, Death) => 9,

            (Goblin, Idle) => 4,
            (Goblin, MoveLeft | MoveRight) => 8,
            (Goblin, AttackA) => 9,
            (Goblin, AttackB) => 10,
            (Goblin, Death) => 4,

            (Skeleton, Idle) => 4,
            (Skeleton, MoveLeft | MoveRight) => 4,
            (Skeleton, AttackA) => 8,
            (Skeleton, AttackB) => 10,
            (Skeleton, Death) => 4,

            (FireWorm, Idle) => 9,
            (FireWorm, AttackA) => 16,
            (FireWorm, Death) => 8,

            (Fireball, _) => 6,

            // клипы, которых у актёра нет — одиночный кадр
            _ => 1,
        }
    }
}

impl AnimationFrames for BuiltinFrames {
    fn frames_for(&self, actor: ActorKind, action: ActionKind, segment: usize) -> Vec<FrameHandle> {
        let clip = match action_table(actor, action).and_then(|table| table.segments.get(segment)) {
            Some(segment) => segment.clip,
            None => Clip::Idle,
        };

        (0..Self::strip_len(actor, clip))
            .map(|index| FrameHandle { actor, clip, index })
            .collect()
    }
}
