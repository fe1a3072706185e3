//! Battle systems: contact → controller, input routing, per-tick advance.

use bevy::prelude::*;

use super::controller::{BattleController, BattleOutcome};
use super::events::{BattleEnded, FeedbackShown};
use crate::animation::BuiltinFrames;
use crate::clock::TickClock;
use crate::config::BattleConfig;
use crate::input::InputPressed;
use crate::overworld::{Defeated, Enemy, InBattle};
use crate::session::{EnemyContact, GameSession, SessionMode};
use crate::DeterministicRng;

/// Система: EnemyContact → новый BattleController.
///
/// Только из Roaming; второй contact в том же tick'е игнорируется
/// (mode уже Battle).
pub fn start_battle_on_contact(
    mut commands: Commands,
    mut contacts: EventReader<EnemyContact>,
    mut session: ResMut<GameSession>,
    enemies: Query<&Enemy, (Without<InBattle>, Without<Defeated>)>,
    config: Res<BattleConfig>,
) {
    for contact in contacts.read() {
        if !session.is_roaming() {
            continue;
        }
        let Ok(enemy) = enemies.get(contact.enemy) else {
            continue;
        };

        let battle = BattleController::new(contact.enemy, enemy.kind, session.player_health, &config, &BuiltinFrames);
        commands.insert_resource(battle);
        commands.entity(contact.enemy).insert(InBattle);
        session.mode = SessionMode::Battle(contact.enemy);

        crate::logger::log_info(&format!(
            "⚔️ Battle started: player ({} HP) vs {:?} {:?}",
            session.player_health, enemy.kind, contact.enemy
        ));
    }
}

/// Система: InputPressed → BattleController::press.
pub fn handle_battle_input(
    mut presses: EventReader<InputPressed>,
    battle: Option<ResMut<BattleController>>,
    time: Res<Time>,
    mut rng: ResMut<DeterministicRng>,
) {
    let Some(mut battle) = battle else {
        presses.clear();
        return;
    };

    let now = time.elapsed();
    for InputPressed(symbol) in presses.read() {
        battle.press(*symbol, now, &mut rng.rng);
    }
}

/// Система: tick контроллера, публикация feedback и исхода боя.
///
/// Victory: враг помечается `Defeated`, контроллер удаляется, session → Roaming.
/// GameOver: контроллер остаётся (доигрывает анимацию смерти), session → GameOver.
pub fn advance_battle(
    mut commands: Commands,
    battle: Option<ResMut<BattleController>>,
    mut session: ResMut<GameSession>,
    time: Res<Time>,
    mut rng: ResMut<DeterministicRng>,
    mut feedback_events: EventWriter<FeedbackShown>,
    mut ended_events: EventWriter<BattleEnded>,
    enemies: Query<(), With<Enemy>>,
) {
    let Some(mut battle) = battle else {
        return;
    };

    let clock = TickClock::sample(&*time);
    let step = battle.tick(&clock, &mut rng.rng);

    for text in step.feedback {
        feedback_events.write(FeedbackShown(text));
    }

    let Some(outcome) = step.outcome else {
        return;
    };
    let enemy = battle.enemy();
    ended_events.write(BattleEnded { enemy, outcome });

    match outcome {
        BattleOutcome::Victory => {
            session.player_health = battle.player_status().health;
            session.mode = SessionMode::Roaming;

            // enemy мог быть despawn'нут снаружи
            if enemies.contains(enemy) {
                commands.entity(enemy).remove::<InBattle>().insert(Defeated);
            }
            commands.remove_resource::<BattleController>();

            crate::logger::log_info(&format!(
                "🏆 Victory over {:?}, player keeps {} HP",
                enemy, session.player_health
            ));
        }
        BattleOutcome::GameOver => {
            session.player_health = battle.player_status().displayed_health();
            session.mode = SessionMode::GameOver;
            crate::logger::log_warning(&format!("💀 GAME OVER (killed by {:?})", battle.enemy_kind()));
        }
    }
}
