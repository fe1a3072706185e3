//! Battle loop controller.
//!
//! Владеет обоими `ActorAnimation`, QTE и обоими `CombatantStatus`.
//! Фазы:
//! 1. Select — меню (Left/Right/Confirm)
//! 2. PlayerAct — анимация атаки + QTE; на завершении анимации считаем урон
//! 3. TallyPlayer — dwell 1.5s от последнего feedback (и пока player не idle)
//! 4. EnemyAct — атака врага + defense QTE
//! 5. TallyEnemy — dwell, потом снова 1
//!
//! Смерть player'а проверяется каждый tick: GameOver терминален.

use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

use super::menu::{BattleMenu, MenuAction};
use super::phase::BattlePhase;
use crate::animation::{ActionKind, ActorAnimation, AnimationFrames, Completion, Cue, Fireball};
use crate::clock::TickClock;
use crate::combat::{
    resolve_enemy_attack, resolve_player_attack, resolve_potion, CombatantStatus, FeedbackKind, FeedbackText,
    Resolution, Side,
};
use crate::config::BattleConfig;
use crate::input::InputSymbol;
use crate::overworld::EnemyKind;
use crate::qte::{HitRatio, QteEngine, QteKind};

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum BattleOutcome {
    /// Enemy died; it leaves the overworld.
    Victory,
    /// Player died; the session is over.
    GameOver,
}

/// What one tick produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BattleStep {
    /// Feedback entries added since the previous tick.
    pub feedback: Vec<FeedbackText>,
    /// Set once, on the tick the battle resolved.
    pub outcome: Option<BattleOutcome>,
}

/// One encounter. Created on contact, dropped when the enemy dies.
#[derive(Resource, Debug, Clone)]
pub struct BattleController {
    enemy: Entity,
    enemy_kind: EnemyKind,
    phase: BattlePhase,
    menu: BattleMenu,
    player: CombatantStatus,
    enemy_status: CombatantStatus,
    player_anim: ActorAnimation,
    enemy_anim: ActorAnimation,
    fireball: Fireball,
    qte: Option<QteEngine>,
    feedback: Vec<FeedbackText>,
    new_feedback: Vec<FeedbackText>,
    outcome: Option<BattleOutcome>,
    tally_dwell: Duration,
}

impl BattleController {
    pub fn new(
        enemy: Entity,
        enemy_kind: EnemyKind,
        player_health: i32,
        config: &BattleConfig,
        frames: &impl AnimationFrames,
    ) -> Self {
        let profile = config.profile(enemy_kind);

        Self {
            enemy,
            enemy_kind,
            phase: BattlePhase::Select,
            menu: BattleMenu::default(),
            player: CombatantStatus::player(player_health),
            enemy_status: CombatantStatus::enemy(profile.health),
            player_anim: ActorAnimation::new(
                crate::animation::ActorKind::Knight,
                config.player_anchor_x,
                config.ground_y,
                frames,
            ),
            enemy_anim: ActorAnimation::new(profile.actor, profile.anchor_x as f32, config.ground_y, frames),
            fireball: Fireball::new(frames),
            qte: None,
            feedback: Vec::new(),
            new_feedback: Vec::new(),
            outcome: None,
            tally_dwell: config.tally_dwell,
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Routes one key press. Input in the wrong phase (or after the battle
    /// resolved) is ignored.
    pub fn press(&mut self, symbol: InputSymbol, now: Duration, rng: &mut impl Rng) {
        if self.outcome.is_some() {
            return;
        }

        match self.phase {
            BattlePhase::Select => {
                if let Some(action) = self.menu.press(symbol) {
                    self.choose(action, now, rng);
                }
            }
            BattlePhase::PlayerAct | BattlePhase::EnemyAct => {
                let Some(qte) = self.qte.as_mut() else {
                    return;
                };
                if let Some(scored) = qte.submit(symbol) {
                    crate::logger::log(&format!(
                        "🎯 QTE {:?}: position {} {:?} → {}",
                        qte.kind(),
                        scored.position,
                        symbol,
                        if scored.hit { "hit" } else { "miss" }
                    ));
                }
            }
            BattlePhase::TallyPlayer | BattlePhase::TallyEnemy => {}
        }
    }

    fn choose(&mut self, action: MenuAction, now: Duration, rng: &mut impl Rng) {
        crate::logger::log_info(&format!("📜 Battle: player chose {:?}", action));

        match action {
            MenuAction::Attack | MenuAction::HeavyAttack => {
                let (animation, kind) = if action == MenuAction::Attack {
                    (ActionKind::LightAttack, QteKind::LightAttack)
                } else {
                    (ActionKind::HeavyAttack, QteKind::HeavyAttack)
                };
                self.player_anim.start(animation, now);
                self.qte = Some(QteEngine::begin(kind, rng));
                self.set_phase(BattlePhase::PlayerAct);
            }
            MenuAction::Potion => {
                // без анимации и QTE: лечение сразу, фаза 2 пропускается
                let healed = resolve_potion(&mut self.player);
                self.push_feedback(Side::Player, FeedbackKind::Heal(healed), now);
                crate::logger::log_info(&format!(
                    "🧪 Battle: potion, player HP {}",
                    self.player.displayed_health()
                ));
                self.set_phase(BattlePhase::TallyPlayer);
            }
        }
    }

    // ========================================================================
    // Tick
    // ========================================================================

    pub fn tick(&mut self, clock: &TickClock, rng: &mut impl Rng) -> BattleStep {
        let now = clock.now;
        let mut step = BattleStep::default();

        match self.outcome {
            Some(BattleOutcome::GameOver) => {
                // terminal: только анимация смерти
                self.player_anim.tick(clock);
                return step;
            }
            Some(BattleOutcome::Victory) => return step,
            None => {}
        }

        if !self.player.alive {
            self.outcome = Some(BattleOutcome::GameOver);
            self.qte = None;
            self.player_anim.tick(clock);
            crate::logger::log_warning("💀 Battle: player died, GAME OVER");
            step.feedback = std::mem::take(&mut self.new_feedback);
            step.outcome = self.outcome;
            return step;
        }

        // 1. animations
        let player_step = self.player_anim.tick(clock);
        let enemy_step = self.enemy_anim.tick(clock);
        self.fireball.tick(clock);

        self.apply_cues(&enemy_step.cues, Side::Player, now);
        self.apply_cues(&player_step.cues, Side::Enemy, now);

        if let Some(completion) = player_step.completed {
            self.complete(completion, now);
        }
        if let Some(completion) = enemy_step.completed {
            self.complete(completion, now);
        }

        // 2. phase
        if self.phase.is_tally() && self.dwell_expired(now) {
            self.finish_tally(now, rng);
        }

        step.feedback = std::mem::take(&mut self.new_feedback);
        if self.outcome == Some(BattleOutcome::Victory) {
            step.outcome = self.outcome;
        }
        step
    }

    /// Reaction cues raised by one actor land on the other.
    fn apply_cues(&mut self, cues: &[Cue], target: Side, now: Duration) {
        for cue in cues {
            match *cue {
                Cue::Opponent(action) => {
                    let (anim, status) = match target {
                        Side::Player => (&mut self.player_anim, &self.player),
                        Side::Enemy => (&mut self.enemy_anim, &self.enemy_status),
                    };
                    if status.alive {
                        anim.start(action, now);
                    }
                }
                Cue::LaunchFireball => self.fireball.launch(),
            }
        }
    }

    fn complete(&mut self, completion: Completion, now: Duration) {
        let ratio = self.qte.as_ref().map(QteEngine::hit_ratio).unwrap_or_else(HitRatio::zero);

        match (completion, self.phase) {
            (Completion::None, _) => {}
            (Completion::StrikeEnemy(max_damage), BattlePhase::PlayerAct) => {
                let resolution = resolve_player_attack(&mut self.enemy_status, max_damage, ratio);
                self.report(Side::Enemy, resolution, now);
                self.qte = None;

                if resolution.target_died {
                    self.push_feedback(Side::Enemy, FeedbackKind::Victory, now);
                    self.enemy_anim.start(ActionKind::Death, now);
                }
                self.set_phase(BattlePhase::TallyPlayer);
            }
            (Completion::StrikePlayer(max_damage), BattlePhase::EnemyAct) => {
                let resolution = resolve_enemy_attack(&mut self.player, max_damage, ratio);
                self.report(Side::Player, resolution, now);
                self.qte = None;

                if resolution.target_died {
                    self.player_anim.start(ActionKind::Death, now);
                }
                self.set_phase(BattlePhase::TallyEnemy);
            }
            (completion, phase) => {
                crate::logger::log_warning(&format!(
                    "⚠️ Battle: {:?} completed in phase {:?}, ignored",
                    completion, phase
                ));
            }
        }
    }

    fn report(&mut self, target: Side, resolution: Resolution, now: Duration) {
        if let Some(label) = FeedbackText::for_strike(target, resolution.strike.feedback, now) {
            self.push_feedback(label.side, label.kind, now);
        }
        self.push_feedback(target, FeedbackKind::Damage(resolution.strike.damage), now);

        let status = match target {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy_status,
        };
        crate::logger::log_info(&format!(
            "💥 Battle: {:?} takes {} ({:?}), HP {}",
            target,
            resolution.strike.damage,
            resolution.strike.feedback,
            status.displayed_health()
        ));
    }

    fn finish_tally(&mut self, now: Duration, rng: &mut impl Rng) {
        self.feedback.clear();

        if !self.enemy_status.alive {
            self.set_phase(BattlePhase::Select);
            self.outcome = Some(BattleOutcome::Victory);
            crate::logger::log_info(&format!("🏆 Battle: {:?} defeated", self.enemy_kind));
            return;
        }

        match self.phase {
            BattlePhase::TallyPlayer => {
                self.set_phase(BattlePhase::EnemyAct);
                self.enemy_anim.start(ActionKind::Attack, now);
                self.qte = Some(QteEngine::begin(QteKind::Defense, rng));
            }
            _ => self.set_phase(BattlePhase::Select),
        }
    }

    fn dwell_expired(&self, now: Duration) -> bool {
        let last = self.feedback.last().map(|f| f.shown_at).unwrap_or(Duration::ZERO);
        self.player_anim.is_idle() && now.saturating_sub(last) >= self.tally_dwell
    }

    fn push_feedback(&mut self, side: Side, kind: FeedbackKind, now: Duration) {
        let entry = FeedbackText::new(side, kind, now);
        self.feedback.push(entry.clone());
        self.new_feedback.push(entry);
    }

    fn set_phase(&mut self, phase: BattlePhase) {
        if self.phase != phase {
            crate::logger::log(&format!(
                "⚔️ Battle: phase {} → {} ({:?})",
                self.phase.ordinal(),
                phase.ordinal(),
                phase
            ));
        }
        self.phase = phase;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn enemy(&self) -> Entity {
        self.enemy
    }

    pub fn enemy_kind(&self) -> EnemyKind {
        self.enemy_kind
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn menu(&self) -> &BattleMenu {
        &self.menu
    }

    pub fn player_status(&self) -> &CombatantStatus {
        &self.player
    }

    pub fn enemy_status(&self) -> &CombatantStatus {
        &self.enemy_status
    }

    pub fn player_animation(&self) -> &ActorAnimation {
        &self.player_anim
    }

    pub fn enemy_animation(&self) -> &ActorAnimation {
        &self.enemy_anim
    }

    pub fn fireball(&self) -> &Fireball {
        &self.fireball
    }

    pub fn qte(&self) -> Option<&QteEngine> {
        self.qte.as_ref()
    }

    /// Feedback currently on screen.
    pub fn feedback(&self) -> &[FeedbackText] {
        &self.feedback
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }
}
