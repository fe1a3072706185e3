//! Overworld systems: player movement, enemy AI, contact, walk cycles, reaping.
//!
//! Всё кроме reap работает только в `SessionMode::Roaming`.

use bevy::prelude::*;

use super::ai::{slide, AiContext, EnemyAiConfig, EnemyAiState, EnemyMode};
use super::components::{ContactLatch, Defeated, Enemy, InBattle, OverworldBody, Player, WalkCycle};
use crate::clock::TickClock;
use crate::config::{PlayerConfig, WorldBounds};
use crate::geometry::{GeometryOracle, RoomWalls};
use crate::input::HeldDirections;
use crate::session::{EnemyContact, GameSession, SessionMode};
use crate::DeterministicRng;

/// Система: held directions → движение player'а (wall sliding по осям).
pub fn move_player(
    session: Res<GameSession>,
    held: Res<HeldDirections>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    bounds: Res<WorldBounds>,
    walls: Res<RoomWalls>,
    mut players: Query<&mut OverworldBody, With<Player>>,
) {
    if !session.is_roaming() {
        return;
    }

    let clock = TickClock::sample(&*time);
    let direction = held.axis();

    for mut body in players.iter_mut() {
        body.direction = direction;
        if direction == IVec2::ZERO {
            continue;
        }
        slide(&mut body, direction, config.speed * clock.frame_scale(), &*walls, &bounds);
    }
}

/// Система: AI FSM tick для каждого врага вне боя.
pub fn enemy_ai_tick(
    session: Res<GameSession>,
    time: Res<Time>,
    bounds: Res<WorldBounds>,
    walls: Res<RoomWalls>,
    mut rng: ResMut<DeterministicRng>,
    players: Query<&OverworldBody, With<Player>>,
    mut enemies: Query<
        (Entity, &Enemy, &mut EnemyAiState, &EnemyAiConfig, &mut OverworldBody),
        (Without<Player>, Without<InBattle>, Without<Defeated>),
    >,
) {
    if !session.is_roaming() {
        return;
    }
    let Ok(player) = players.single() else {
        return;
    };

    let clock = TickClock::sample(&*time);
    let ctx = AiContext {
        clock: &clock,
        bounds: &bounds,
        geometry: &*walls,
    };

    for (entity, enemy, mut ai, config, mut body) in enemies.iter_mut() {
        let step = ai.tick(enemy.behavior, &mut body, player.position, config, &ctx, &mut rng.rng);

        if let Some((from, to)) = step.transition {
            crate::logger::log(&format!(
                "🤖 AI {:?} ({:?}): {:?} → {:?} at ({:.0}, {:.0})",
                entity, enemy.kind, from, to, body.position.x, body.position.y
            ));
        }
    }
}

/// Система: пересечение footprint'ов player/enemy → EnemyContact.
///
/// Rising edge через `ContactLatch`. За tick поднимается максимум один
/// contact: остальные касающиеся враги не латчатся и сработают позже.
pub fn detect_enemy_contact(
    session: Res<GameSession>,
    walls: Res<RoomWalls>,
    players: Query<&OverworldBody, With<Player>>,
    mut enemies: Query<
        (Entity, &OverworldBody, &mut ContactLatch),
        (With<Enemy>, Without<Player>, Without<InBattle>, Without<Defeated>),
    >,
    mut contact_events: EventWriter<EnemyContact>,
) {
    if !session.is_roaming() {
        return;
    }
    let Ok(player) = players.single() else {
        return;
    };

    let mut raised = false;
    for (entity, body, mut latch) in enemies.iter_mut() {
        let touching = walls.intersects(player.rect(), body.rect());
        if !touching {
            latch.touching = false;
            continue;
        }
        if latch.touching || raised {
            continue;
        }

        latch.touching = true;
        raised = true;
        contact_events.write(EnemyContact { enemy: entity });
        crate::logger::log_info(&format!("💢 Contact: player touched {:?}", entity));
    }
}

/// Система: walk cycle кадры (charger в telegraph смотрит на player'а).
pub fn update_walk_cycles(
    session: Res<GameSession>,
    time: Res<Time>,
    players: Query<&OverworldBody, With<Player>>,
    mut walkers: Query<(&OverworldBody, &mut WalkCycle, Option<&EnemyAiState>), Without<Defeated>>,
) {
    if !session.is_roaming() {
        return;
    }

    let now = time.elapsed();
    let player_x = players.single().map(|p| p.position.x).ok();

    for (body, mut cycle, ai) in walkers.iter_mut() {
        let telegraphing = ai.is_some_and(|ai| ai.mode == EnemyMode::ChargeTelegraph);
        match (telegraphing, player_x) {
            (true, Some(player_x)) => cycle.telegraph(player_x - body.position.x),
            _ => cycle.advance(body.direction, now),
        }
    }
}

/// Система: despawn побеждённых врагов (конец tick'а).
///
/// Последний враг → `SessionMode::Victory`.
pub fn reap_defeated_enemies(
    mut commands: Commands,
    mut session: ResMut<GameSession>,
    defeated: Query<(Entity, &Enemy), With<Defeated>>,
) {
    for (entity, enemy) in defeated.iter() {
        commands.entity(entity).despawn();
        session.enemies_remaining = session.enemies_remaining.saturating_sub(1);

        crate::logger::log_info(&format!(
            "🪦 Reaped {:?} {:?} (map id {}), {} left",
            enemy.kind, entity, enemy.map_id, session.enemies_remaining
        ));

        if session.enemies_remaining == 0 && session.is_roaming() {
            session.mode = SessionMode::Victory;
            crate::logger::log_info("🎉 All enemies defeated: VICTORY");
        }
    }
}
