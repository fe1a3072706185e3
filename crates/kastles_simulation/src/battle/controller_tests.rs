//! Tests for the battle loop controller.

use super::*;
use crate::animation::{ActionKind, BuiltinFrames};
use crate::clock::{ClockSource, ManualClock};
use crate::combat::{FeedbackKind, FeedbackText, Side};
use crate::config::BattleConfig;
use crate::input::InputSymbol;
use crate::overworld::EnemyKind;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

const TICK: Duration = Duration::from_nanos(16_666_667);
const MAX_TICKS: usize = 20_000;

struct Harness {
    battle: BattleController,
    clock: ManualClock,
    rng: ChaCha8Rng,
    phases: Vec<u8>,
    steps: Vec<BattleStep>,
}

impl Harness {
    fn new(kind: EnemyKind, player_health: i32) -> Self {
        let battle = BattleController::new(
            Entity::from_raw(7),
            kind,
            player_health,
            &BattleConfig::default(),
            &BuiltinFrames,
        );
        Self {
            phases: vec![battle.phase().ordinal()],
            battle,
            clock: ManualClock::new(),
            rng: ChaCha8Rng::seed_from_u64(42),
            steps: Vec::new(),
        }
    }

    fn record_phase(&mut self) {
        let ordinal = self.battle.phase().ordinal();
        if self.phases.last() != Some(&ordinal) {
            self.phases.push(ordinal);
        }
    }

    fn press(&mut self, symbol: InputSymbol) {
        let now = self.clock.now();
        self.battle.press(symbol, now, &mut self.rng);
        self.record_phase();
    }

    /// Presses the whole target combo of the running QTE.
    fn press_perfect_combo(&mut self) {
        let symbols = self
            .battle
            .qte()
            .expect("no QTE running")
            .sequence()
            .symbols();
        for &symbol in symbols {
            self.press(symbol);
        }
    }

    fn tick(&mut self) -> BattleStep {
        let clock = self.clock.advance(TICK);
        let step = self.battle.tick(&clock, &mut self.rng);
        self.record_phase();
        self.steps.push(step.clone());
        step
    }

    fn run_until(&mut self, what: &str, done: impl Fn(&BattleController) -> bool) {
        for _ in 0..MAX_TICKS {
            if done(&self.battle) {
                return;
            }
            self.tick();
        }
        panic!("battle never reached: {}", what);
    }

    fn all_feedback(&self) -> Vec<FeedbackText> {
        self.steps.iter().flat_map(|s| s.feedback.iter().cloned()).collect()
    }
}

#[test]
fn test_new_battle_uses_enemy_profile() {
    let harness = Harness::new(EnemyKind::Skeleton, 100);
    let battle = &harness.battle;

    assert_eq!(battle.phase(), BattlePhase::Select);
    assert_eq!(battle.enemy_status().health, 175);
    assert_eq!(battle.player_status().health, 100);
    assert_eq!(battle.enemy_animation().position().x, 1240.0);
    assert_eq!(battle.player_animation().position().x, 100.0);
    assert!(battle.qte().is_none());
    assert_eq!(battle.outcome(), None);
}

#[test]
fn test_full_phase_cycle() {
    let mut harness = Harness::new(EnemyKind::Goblin, 100);

    harness.press(InputSymbol::Confirm);
    assert_eq!(harness.battle.phase(), BattlePhase::PlayerAct);
    assert!(harness.battle.qte().is_some());
    assert_eq!(harness.battle.player_animation().action(), ActionKind::LightAttack);

    // без QTE ввода: 0 урона, враг жив → фаза 4
    harness.run_until("enemy turn", |b| b.phase() == BattlePhase::EnemyAct);
    assert_eq!(harness.battle.enemy_status().health, 125);
    assert_eq!(harness.battle.enemy_animation().action(), ActionKind::Attack);

    harness.run_until("next round", |b| b.phase() == BattlePhase::Select);
    assert_eq!(harness.phases, vec![1, 2, 3, 4, 5, 1]);

    // defense QTE без ввода: полный урон гоблина
    assert_eq!(harness.battle.player_status().health, 60);
    assert!(harness.battle.player_animation().is_idle());
    assert_eq!(harness.battle.outcome(), None);
}

#[test]
fn test_perfect_light_attack_is_critical() {
    let mut harness = Harness::new(EnemyKind::Goblin, 100);

    harness.press(InputSymbol::Confirm);
    harness.press_perfect_combo();
    assert!(harness.battle.qte().is_some_and(|q| q.hit_ratio().is_perfect()));

    harness.run_until("tally", |b| b.phase() == BattlePhase::TallyPlayer);

    assert_eq!(harness.battle.enemy_status().health, 50);
    assert!(harness.battle.qte().is_none());

    let kinds: Vec<(Side, FeedbackKind)> = harness.all_feedback().iter().map(|f| (f.side, f.kind)).collect();
    assert_eq!(
        kinds,
        vec![(Side::Enemy, FeedbackKind::CriticalHit), (Side::Enemy, FeedbackKind::Damage(75))]
    );
    assert_eq!(harness.battle.feedback().len(), 2);
}

#[test]
fn test_tally_dwell_waits_from_last_feedback() {
    let mut harness = Harness::new(EnemyKind::Goblin, 100);

    harness.press(InputSymbol::Confirm);
    harness.run_until("tally", |b| b.phase() == BattlePhase::TallyPlayer);
    let shown_at = harness.battle.feedback().last().map(|f| f.shown_at).expect("no feedback");

    harness.run_until("enemy turn", |b| b.phase() == BattlePhase::EnemyAct);
    let waited = harness.clock.now() - shown_at;
    assert!(waited >= Duration::from_millis(1500), "waited {:?}", waited);
    assert!(waited < Duration::from_millis(1500) + TICK * 2, "waited {:?}", waited);
    assert!(harness.battle.feedback().is_empty());
}

#[test]
fn test_killing_blow_collapses_to_select() {
    let mut harness = Harness::new(EnemyKind::Goblin, 100);

    harness.press(InputSymbol::Right);
    harness.press(InputSymbol::Confirm);
    assert_eq!(harness.battle.player_animation().action(), ActionKind::HeavyAttack);
    harness.press_perfect_combo();

    harness.run_until("tally", |b| b.phase() == BattlePhase::TallyPlayer);
    assert!(!harness.battle.enemy_status().alive);
    assert_eq!(harness.battle.enemy_status().displayed_health(), 0);
    assert_eq!(harness.battle.enemy_animation().action(), ActionKind::Death);
    assert!(harness
        .battle
        .feedback()
        .iter()
        .any(|f| f.kind == FeedbackKind::Victory && f.label() == "Victory!"));

    harness.run_until("victory", |b| b.outcome().is_some());
    assert_eq!(harness.battle.outcome(), Some(BattleOutcome::Victory));
    assert_eq!(harness.battle.phase(), BattlePhase::Select);
    // 3 → 1, враг не ходит
    assert_eq!(harness.phases, vec![1, 2, 3, 1]);

    let reported = harness.steps.iter().filter(|s| s.outcome.is_some()).count();
    assert_eq!(reported, 1);
    harness.tick();
    assert_eq!(harness.steps.iter().filter(|s| s.outcome.is_some()).count(), 1);
}

#[test]
fn test_potion_skips_player_action() {
    let mut harness = Harness::new(EnemyKind::Goblin, 50);

    harness.press(InputSymbol::Left);
    assert_eq!(harness.battle.menu().selected(), super::menu::MenuAction::Potion);
    harness.press(InputSymbol::Confirm);

    assert_eq!(harness.battle.phase(), BattlePhase::TallyPlayer);
    assert_eq!(harness.battle.player_status().health, 80);
    assert!(harness.battle.qte().is_none());
    assert!(harness.battle.player_animation().is_idle());

    let step = harness.tick();
    assert_eq!(step.feedback.len(), 1);
    assert_eq!(step.feedback[0].kind, FeedbackKind::Heal(30));
    assert_eq!(step.feedback[0].side, Side::Player);

    harness.run_until("enemy turn", |b| b.phase() == BattlePhase::EnemyAct);
    assert_eq!(harness.phases, vec![1, 3, 4]);
}

#[test]
fn test_potion_clamps_at_max_health() {
    let mut harness = Harness::new(EnemyKind::Goblin, 90);

    harness.press(InputSymbol::Left);
    harness.press(InputSymbol::Confirm);
    assert_eq!(harness.battle.player_status().health, 100);
    // feedback показывает номинальные 30
    assert_eq!(harness.battle.feedback()[0].kind, FeedbackKind::Heal(30));
}

#[test]
fn test_input_ignored_outside_select_and_qte_phases() {
    let mut harness = Harness::new(EnemyKind::Goblin, 100);

    harness.press(InputSymbol::Left);
    harness.press(InputSymbol::Confirm);
    assert_eq!(harness.battle.phase(), BattlePhase::TallyPlayer);

    // tally: ничего не принимаем
    harness.press(InputSymbol::Confirm);
    harness.press(InputSymbol::Right);
    assert_eq!(harness.battle.phase(), BattlePhase::TallyPlayer);
    assert!(harness.battle.qte().is_none());
    assert_eq!(harness.battle.menu().selected(), super::menu::MenuAction::Potion);
}

#[test]
fn test_perfect_defense_takes_no_damage() {
    let mut harness = Harness::new(EnemyKind::Goblin, 100);

    harness.press(InputSymbol::Left);
    harness.press(InputSymbol::Confirm);
    harness.run_until("enemy turn", |b| b.phase() == BattlePhase::EnemyAct);
    harness.press_perfect_combo();

    harness.run_until("enemy tally", |b| b.phase() == BattlePhase::TallyEnemy);
    assert_eq!(harness.battle.player_status().health, 100);

    let last_two: Vec<FeedbackKind> = harness.battle.feedback().iter().map(|f| f.kind).collect();
    assert_eq!(last_two, vec![FeedbackKind::Perfect, FeedbackKind::Damage(0)]);
    assert!(harness.battle.feedback().iter().all(|f| f.side == Side::Player));
}

#[test]
fn test_goblin_attack_makes_player_duck_and_roll() {
    let mut harness = Harness::new(EnemyKind::Goblin, 100);

    harness.press(InputSymbol::Left);
    harness.press(InputSymbol::Confirm);
    harness.run_until("enemy turn", |b| b.phase() == BattlePhase::EnemyAct);

    let mut reactions = Vec::new();
    for _ in 0..MAX_TICKS {
        let action = harness.battle.player_animation().action();
        if reactions.last() != Some(&action) {
            reactions.push(action);
        }
        if harness.battle.phase() != BattlePhase::EnemyAct {
            break;
        }
        harness.tick();
    }
    assert_eq!(
        reactions,
        vec![ActionKind::Idle, ActionKind::Duck, ActionKind::Roll, ActionKind::Idle]
    );
}

#[test]
fn test_fire_worm_launches_fireball() {
    let mut harness = Harness::new(EnemyKind::FireWorm, 100);

    harness.press(InputSymbol::Left);
    harness.press(InputSymbol::Confirm);
    harness.run_until("enemy turn", |b| b.phase() == BattlePhase::EnemyAct);
    assert!(!harness.battle.fireball().is_active());

    harness.run_until("fireball", |b| b.fireball().is_active());
    assert_eq!(harness.battle.phase(), BattlePhase::EnemyAct);
    assert_eq!(harness.battle.player_animation().action(), ActionKind::Duck);
}

#[test]
fn test_player_death_is_game_over() {
    let mut harness = Harness::new(EnemyKind::Goblin, 10);

    harness.press(InputSymbol::Left);
    harness.press(InputSymbol::Confirm);
    assert_eq!(harness.battle.player_status().health, 40);

    harness.run_until("enemy turn", |b| b.phase() == BattlePhase::EnemyAct);
    // defense без ввода: critical 40 → ровно 0
    harness.run_until("game over", |b| b.outcome().is_some());

    assert_eq!(harness.battle.outcome(), Some(BattleOutcome::GameOver));
    assert!(!harness.battle.player_status().alive);
    assert_eq!(harness.battle.player_animation().action(), ActionKind::Death);
    assert!(harness
        .all_feedback()
        .iter()
        .any(|f| f.side == Side::Player && f.kind == FeedbackKind::CriticalHit));
    assert!(harness
        .steps
        .iter()
        .any(|s| s.outcome == Some(BattleOutcome::GameOver)));

    // терминально: ввод игнорируется, фаза не двигается
    let phase = harness.battle.phase();
    harness.press(InputSymbol::Right);
    harness.press(InputSymbol::Confirm);
    for _ in 0..600 {
        let step = harness.tick();
        assert_eq!(step.outcome, None);
    }
    assert_eq!(harness.battle.phase(), phase);
    assert!(harness.battle.qte().is_none());
    assert!(harness.battle.player_animation().is_death_finished());
}
