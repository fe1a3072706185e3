//! Five-phase battle cycle.

use bevy::prelude::*;

/// Battle loop phase. Cycles 1 → 2 → 3 → 4 → 5 → 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum BattlePhase {
    /// 1: player picks an action from the menu.
    #[default]
    Select,
    /// 2: player's action animation + attack QTE.
    PlayerAct,
    /// 3: feedback dwell after the player's action.
    TallyPlayer,
    /// 4: enemy's attack animation + defense QTE.
    EnemyAct,
    /// 5: feedback dwell after the enemy's attack.
    TallyEnemy,
}

impl BattlePhase {
    pub fn ordinal(self) -> u8 {
        match self {
            BattlePhase::Select => 1,
            BattlePhase::PlayerAct => 2,
            BattlePhase::TallyPlayer => 3,
            BattlePhase::EnemyAct => 4,
            BattlePhase::TallyEnemy => 5,
        }
    }

    pub fn next(self) -> Self {
        match self {
            BattlePhase::Select => BattlePhase::PlayerAct,
            BattlePhase::PlayerAct => BattlePhase::TallyPlayer,
            BattlePhase::TallyPlayer => BattlePhase::EnemyAct,
            BattlePhase::EnemyAct => BattlePhase::TallyEnemy,
            BattlePhase::TallyEnemy => BattlePhase::Select,
        }
    }

    pub fn is_tally(self) -> bool {
        matches!(self, BattlePhase::TallyPlayer | BattlePhase::TallyEnemy)
    }
}
