//! Per-actor animation tables (design constants).
//!
//! Скорости travel — px за 1/60 s, задержки — ms. Sentinel frame у
//! frame-gated сегментов: сегмент заканчивается, когда кадр его достиг.

use super::frames::{ActionKind, ActorKind, Clip};
use super::segment::{ActionTable, Completion, Cue, Segment, SegmentRule, TravelTarget};

/// Frame delay of idle loops and the default after an action ends.
pub const IDLE_FRAME_DELAY_MS: u64 = 200;
pub const DEATH_FRAME_DELAY_MS: u64 = 500;
pub const WORM_DEATH_FRAME_DELAY_MS: u64 = 100;

pub const KNIGHT_LIGHT_DAMAGE: i32 = 50;
pub const KNIGHT_HEAVY_DAMAGE: i32 = 150;
pub const GOBLIN_DAMAGE: i32 = 40;
pub const SKELETON_DAMAGE: i32 = 40;
pub const FIRE_WORM_DAMAGE: i32 = 50;

const IDLE: ActionTable = ActionTable {
    segments: &[Segment::new(Clip::Idle, SegmentRule::Loop, IDLE_FRAME_DELAY_MS)],
    completion: Completion::None,
};

const DEATH: ActionTable = ActionTable {
    segments: &[Segment::new(Clip::Death, SegmentRule::HoldLast, DEATH_FRAME_DELAY_MS)],
    completion: Completion::None,
};

const WORM_DEATH: ActionTable = ActionTable {
    segments: &[Segment::new(Clip::Death, SegmentRule::HoldLast, WORM_DEATH_FRAME_DELAY_MS)],
    completion: Completion::None,
};

// ============================================================================
// Knight
// ============================================================================

const KNIGHT_LIGHT_ATTACK: ActionTable = ActionTable {
    segments: &[
        Segment::travel(Clip::MoveRight, TravelTarget::Fixed(750.0), 4.0, 150),
        Segment::frames(Clip::AttackA, 3, 200),
        Segment::travel(Clip::MoveLeft, TravelTarget::Fixed(100.0), -4.0, 150),
    ],
    completion: Completion::StrikeEnemy(KNIGHT_LIGHT_DAMAGE),
};

const KNIGHT_HEAVY_ATTACK: ActionTable = ActionTable {
    segments: &[
        Segment::travel(Clip::MoveRight, TravelTarget::Fixed(200.0), 4.0, IDLE_FRAME_DELAY_MS),
        Segment::frames(Clip::Roll, 11, 65).with_drift(4.0),
        Segment::travel(Clip::MoveRight, TravelTarget::Fixed(750.0), 4.0, 200),
        Segment::frames(Clip::AttackC, 9, 100),
        Segment::travel(Clip::MoveLeft, TravelTarget::Fixed(100.0), -4.0, 200),
    ],
    completion: Completion::StrikeEnemy(KNIGHT_HEAVY_DAMAGE),
};

const KNIGHT_DUCK: ActionTable = ActionTable {
    segments: &[Segment::frames(Clip::Duck, 2, IDLE_FRAME_DELAY_MS).with_overrides(&[(1, 1500)])],
    completion: Completion::None,
};

const KNIGHT_ROLL: ActionTable = ActionTable {
    segments: &[Segment::frames(Clip::Roll, 11, 125)],
    completion: Completion::None,
};

const KNIGHT_COUNTERATTACK: ActionTable = ActionTable {
    segments: &[Segment::frames(Clip::AttackA, 3, 1800).with_overrides(&[(1, 200)])],
    completion: Completion::None,
};

// ============================================================================
// Enemies
// ============================================================================

const GOBLIN_ATTACK: ActionTable = ActionTable {
    segments: &[
        Segment::travel(Clip::MoveLeft, TravelTarget::Fixed(500.0), -5.0, IDLE_FRAME_DELAY_MS),
        Segment::frames(Clip::AttackA, 8, 50).on_enter(&[Cue::Opponent(ActionKind::Duck)]),
        Segment::frames(Clip::AttackB, 9, 500)
            .with_overrides(&[(1, 100), (8, 400)])
            .on_enter(&[Cue::Opponent(ActionKind::Roll)]),
        Segment::travel(Clip::MoveRight, TravelTarget::Anchor, 5.0, 200),
    ],
    completion: Completion::StrikePlayer(GOBLIN_DAMAGE),
};

const SKELETON_ATTACK: ActionTable = ActionTable {
    segments: &[
        Segment::travel(Clip::MoveLeft, TravelTarget::Fixed(680.0), -4.0, IDLE_FRAME_DELAY_MS),
        Segment::frames(Clip::AttackA, 7, 100).on_enter(&[Cue::Opponent(ActionKind::Duck)]),
        Segment::frames(Clip::AttackB, 9, 700)
            .with_overrides(&[(1, 100), (8, 600)])
            .on_enter(&[Cue::Opponent(ActionKind::Counterattack)]),
        Segment::travel(Clip::MoveRight, TravelTarget::Anchor, 4.0, 200)
            .on_enter(&[Cue::Opponent(ActionKind::Idle)]),
    ],
    completion: Completion::StrikePlayer(SKELETON_DAMAGE),
};

const FIRE_WORM_ATTACK: ActionTable = ActionTable {
    segments: &[Segment::frames(Clip::AttackA, 15, IDLE_FRAME_DELAY_MS).with_frame_cues(&[
        (8, Cue::Opponent(ActionKind::Duck)),
        (10, Cue::LaunchFireball),
    ])],
    completion: Completion::StrikePlayer(FIRE_WORM_DAMAGE),
};

/// Segment table for `action` on `actor`, `None` if the actor has no such action.
pub fn action_table(actor: ActorKind, action: ActionKind) -> Option<&'static ActionTable> {
    use ActionKind::*;
    use ActorKind::*;

    let table: &'static ActionTable = match (actor, action) {
        (_, Idle) => &IDLE,
        (FireWorm, Death) => &WORM_DEATH,
        (Fireball, Death) => return None,
        (_, Death) => &DEATH,

        (Knight, LightAttack) => &KNIGHT_LIGHT_ATTACK,
        (Knight, HeavyAttack) => &KNIGHT_HEAVY_ATTACK,
        (Knight, Duck) => &KNIGHT_DUCK,
        (Knight, Roll) => &KNIGHT_ROLL,
        (Knight, Counterattack) => &KNIGHT_COUNTERATTACK,

        (Goblin, Attack) => &GOBLIN_ATTACK,
        (Skeleton, Attack) => &SKELETON_ATTACK,
        (FireWorm, Attack) => &FIRE_WORM_ATTACK,

        _ => return None,
    };
    Some(table)
}

/// Every action the actor can play (used to resolve strips up front).
pub fn actions_of(actor: ActorKind) -> &'static [ActionKind] {
    use ActionKind::*;

    match actor {
        ActorKind::Knight => &[Idle, LightAttack, HeavyAttack, Duck, Roll, Counterattack, Death],
        ActorKind::Goblin | ActorKind::Skeleton | ActorKind::FireWorm => &[Idle, Attack, Death],
        ActorKind::Fireball => &[Idle],
    }
}
