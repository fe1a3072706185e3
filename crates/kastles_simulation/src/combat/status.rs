//! CombatantStatus: health + alive flag.

use bevy::prelude::*;

/// Player health ceiling (potion heal clamps here).
pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Health of one combatant.
///
/// `health` может уйти в минус (overkill) — наружу отдаём `displayed_health`.
/// Только battle controller пишет сюда, и только через resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct CombatantStatus {
    pub health: i32,
    pub alive: bool,
    /// Upper clamp applied on heal. `None` — unbounded (enemies).
    pub ceiling: Option<i32>,
}

impl CombatantStatus {
    pub fn enemy(health: i32) -> Self {
        Self {
            health,
            alive: health > 0,
            ceiling: None,
        }
    }

    pub fn player(health: i32) -> Self {
        Self {
            health: health.min(PLAYER_MAX_HEALTH),
            alive: health > 0,
            ceiling: Some(PLAYER_MAX_HEALTH),
        }
    }

    /// Subtracts `amount` and re-runs the death check.
    /// Returns `true` if this call killed the combatant.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.alive;
        self.health -= amount;
        self.refresh_alive();
        was_alive && !self.alive
    }

    /// Adds `amount`, clamped to the ceiling. Returns the health actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health += amount;
        if let Some(ceiling) = self.ceiling {
            self.health = self.health.min(ceiling);
        }
        self.refresh_alive();
        self.health - before
    }

    pub fn refresh_alive(&mut self) {
        self.alive = self.health > 0;
    }

    /// Health floored at 0 for display.
    pub fn displayed_health(&self) -> i32 {
        self.health.max(0)
    }
}
