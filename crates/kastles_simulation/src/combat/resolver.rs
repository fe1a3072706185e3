//! Combat resolver: QTE outcome → damage + feedback.
//!
//! Формулы:
//! - player → enemy: `floor(max × ratio × (1.5 if perfect else 1.0))`
//! - enemy → player: `floor(max × (1 − ratio))` (линейный falloff)
//! - potion: +30 HP, clamp 100
//!
//! Всё считаем в целых (`hits`, `total`), float в пороги не попадает.

use super::status::CombatantStatus;
use crate::qte::HitRatio;

/// Potion heal amount.
pub const POTION_HEAL: i32 = 30;

/// Classification attached to a resolved strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeFeedback {
    Normal,
    /// Player landed every input, or the player failed every defense input.
    Critical,
    /// Player defended every input.
    Perfect,
}

impl StrikeFeedback {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            StrikeFeedback::Normal => None,
            StrikeFeedback::Critical => Some("Critical hit!"),
            StrikeFeedback::Perfect => Some("Perfect!"),
        }
    }
}

/// Damage before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub damage: i32,
    pub feedback: StrikeFeedback,
}

/// Damage after it is applied to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub strike: Strike,
    pub target_died: bool,
}

/// Player attacking the enemy.
pub fn player_strike(max_damage: i32, ratio: HitRatio) -> Strike {
    let hits = ratio.hits as i64;
    let total = ratio.total as i64;
    let max = max_damage as i64;

    if ratio.is_perfect() {
        // max × 1 × 1.5
        Strike {
            damage: (max * 3 / 2) as i32,
            feedback: StrikeFeedback::Critical,
        }
    } else {
        Strike {
            damage: (max * hits / total) as i32,
            feedback: StrikeFeedback::Normal,
        }
    }
}

/// Enemy attacking the player.
pub fn enemy_strike(max_damage: i32, ratio: HitRatio) -> Strike {
    let misses = (ratio.total - ratio.hits) as i64;
    let damage = (max_damage as i64 * misses / ratio.total as i64) as i32;

    let feedback = if ratio.is_perfect() {
        StrikeFeedback::Perfect
    } else if ratio.is_zero() {
        StrikeFeedback::Critical
    } else {
        StrikeFeedback::Normal
    };

    Strike { damage, feedback }
}

/// Computes and applies the player's strike to `enemy`.
pub fn resolve_player_attack(enemy: &mut CombatantStatus, max_damage: i32, ratio: HitRatio) -> Resolution {
    let strike = player_strike(max_damage, ratio);
    let target_died = enemy.take_damage(strike.damage);
    Resolution { strike, target_died }
}

/// Computes and applies the enemy's strike to `player`.
pub fn resolve_enemy_attack(player: &mut CombatantStatus, max_damage: i32, ratio: HitRatio) -> Resolution {
    let strike = enemy_strike(max_damage, ratio);
    let target_died = player.take_damage(strike.damage);
    Resolution { strike, target_died }
}

/// Potion: always heals [`POTION_HEAL`], clamped by the status ceiling.
/// Returns the nominal heal amount (what the feedback shows).
pub fn resolve_potion(player: &mut CombatantStatus) -> i32 {
    player.heal(POTION_HEAL);
    POTION_HEAL
}
