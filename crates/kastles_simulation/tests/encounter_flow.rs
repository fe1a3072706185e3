//! Encounter flow integration test
//!
//! Полный headless App: overworld → contact → бой → reap / game over.
//!
//! Проверяем:
//! - contact поднимается один раз на касание
//! - побеждённый враг despawn'ится, session возвращается в Roaming
//! - последний враг → Victory
//! - смерть player'а → GameOver, overworld заморожен

use bevy::prelude::*;
use kastles_simulation::battle::BattlePhase;
use kastles_simulation::presentation::{PresentedFrame, PresentedSubject};
use kastles_simulation::*;

const MAX_TICKS: usize = 6_000;

/// Все EnemyContact за прогон.
#[derive(Resource, Default)]
struct ContactLog(Vec<Entity>);

/// FramePresented последнего tick'а.
#[derive(Resource, Default)]
struct FrameLog(Vec<FramePresented>);

/// Все FeedbackShown за прогон.
#[derive(Resource, Default)]
struct FeedbackLog(Vec<FeedbackText>);

fn record_contacts(mut events: EventReader<EnemyContact>, mut log: ResMut<ContactLog>) {
    for contact in events.read() {
        log.0.push(contact.enemy);
    }
}

fn record_frames(mut events: EventReader<FramePresented>, mut log: ResMut<FrameLog>) {
    log.0 = events.read().copied().collect();
}

fn record_feedback(mut events: EventReader<FeedbackShown>, mut log: ResMut<FeedbackLog>) {
    for FeedbackShown(text) in events.read() {
        log.0.push(text.clone());
    }
}

/// Helper: headless App + recorders + комната.
fn create_encounter_app(spawns: &[EnemySpawn], starting_health: i32) -> App {
    let mut app = create_headless_app(42);

    app.init_resource::<ContactLog>()
        .init_resource::<FrameLog>()
        .init_resource::<FeedbackLog>()
        .add_systems(
            FixedUpdate,
            (
                record_contacts.after(TickSet::Overworld).before(TickSet::Battle),
                record_feedback.after(TickSet::Battle),
                record_frames.after(TickSet::Presentation),
            ),
        );

    app.insert_resource(PlayerConfig {
        starting_health,
        ..default()
    });
    start_session(app.world_mut(), spawns);
    app
}

fn spawn_record(x: f32, y: f32, kind: EnemyKind, behavior: EnemyBehavior, range: f32, map_id: u32) -> EnemySpawn {
    EnemySpawn {
        x,
        y,
        kind,
        behavior,
        movement_range: range,
        movement_speed: 2.0,
        map_id,
    }
}

/// Гоблин прямо на player'е (spawn 624, 600).
fn touching_goblin() -> EnemySpawn {
    spawn_record(680.0, 620.0, EnemyKind::Goblin, EnemyBehavior::Walker, 200.0, 1)
}

/// Далёкий враг, который не видит player'а.
fn distant_skeleton() -> EnemySpawn {
    spawn_record(1100.0, 40.0, EnemyKind::Skeleton, EnemyBehavior::Walker, 40.0, 2)
}

fn session(app: &App) -> GameSession {
    app.world().resource::<GameSession>().clone()
}

fn enemy_with_map_id(app: &mut App, map_id: u32) -> Option<Entity> {
    let mut query = app.world_mut().query::<(Entity, &Enemy)>();
    query
        .iter(app.world())
        .find(|(_, enemy)| enemy.map_id == map_id)
        .map(|(entity, _)| entity)
}

fn run_until(app: &mut App, what: &str, done: impl Fn(&mut App) -> bool) {
    for _ in 0..MAX_TICKS {
        if done(app) {
            return;
        }
        app.update();
    }
    panic!("never reached: {}", what);
}

fn press(app: &mut App, symbol: InputSymbol) {
    app.world_mut().send_event(InputPressed(symbol));
    app.update();
}

/// Набирает текущее комбо без ошибок.
fn press_current_combo(app: &mut App) {
    let symbols = app
        .world()
        .resource::<BattleController>()
        .qte()
        .expect("no QTE running")
        .sequence()
        .symbols();
    for &symbol in symbols {
        press(app, symbol);
    }
}

fn battle_phase(app: &App) -> Option<BattlePhase> {
    app.world().get_resource::<BattleController>().map(|b| b.phase())
}

#[test]
fn test_contact_starts_battle_once() {
    let mut app = create_encounter_app(&[touching_goblin(), distant_skeleton()], 100);
    let goblin = enemy_with_map_id(&mut app, 1).expect("goblin not spawned");

    run_until(&mut app, "battle", |app| !session(app).is_roaming());

    assert_eq!(session(&app).mode, SessionMode::Battle(goblin));
    assert!(app.world().get::<InBattle>(goblin).is_some());

    let battle = app.world().resource::<BattleController>();
    assert_eq!(battle.enemy(), goblin);
    assert_eq!(battle.enemy_kind(), EnemyKind::Goblin);
    assert_eq!(battle.phase(), BattlePhase::Select);
    assert_eq!(battle.enemy_status().health, 125);

    // бой без ввода: overworld заморожен, новых contact'ов нет
    let frozen_at = *app.world().get::<OverworldBody>(goblin).expect("goblin body");
    for _ in 0..120 {
        app.update();
    }
    assert_eq!(app.world().resource::<ContactLog>().0, vec![goblin]);
    assert_eq!(*app.world().get::<OverworldBody>(goblin).expect("goblin body"), frozen_at);
    assert_eq!(battle_phase(&app), Some(BattlePhase::Select));
}

#[test]
fn test_defeated_enemy_is_reaped_and_roaming_resumes() {
    let mut app = create_encounter_app(&[touching_goblin(), distant_skeleton()], 100);
    let goblin = enemy_with_map_id(&mut app, 1).expect("goblin not spawned");

    run_until(&mut app, "battle", |app| !session(app).is_roaming());

    // heavy attack + идеальное комбо: 225 урона, гоблин (125) умирает
    press(&mut app, InputSymbol::Right);
    press(&mut app, InputSymbol::Confirm);
    assert_eq!(battle_phase(&app), Some(BattlePhase::PlayerAct));
    press_current_combo(&mut app);

    run_until(&mut app, "back to roaming", |app| session(app).is_roaming());

    assert!(app.world().get_entity(goblin).is_err(), "defeated goblin still exists");
    assert!(app.world().get_resource::<BattleController>().is_none());

    let state = session(&app);
    assert_eq!(state.enemies_remaining, 1);
    assert_eq!(state.player_health, 100);
    assert!(enemy_with_map_id(&mut app, 2).is_some());

    let feedback = &app.world().resource::<FeedbackLog>().0;
    assert!(feedback.iter().any(|f| f.kind == FeedbackKind::CriticalHit));
    assert!(feedback.iter().any(|f| f.kind == FeedbackKind::Damage(225)));
    assert!(feedback.iter().any(|f| f.kind == FeedbackKind::Victory));

    // roaming продолжается: AI дальнего врага тикает, новых contact'ов нет
    for _ in 0..60 {
        app.update();
    }
    assert_eq!(app.world().resource::<ContactLog>().0, vec![goblin]);
    assert!(session(&app).is_roaming());
}

#[test]
fn test_last_defeat_is_victory() {
    let mut app = create_encounter_app(&[touching_goblin()], 100);

    run_until(&mut app, "battle", |app| !session(app).is_roaming());
    press(&mut app, InputSymbol::Right);
    press(&mut app, InputSymbol::Confirm);
    press_current_combo(&mut app);

    run_until(&mut app, "victory", |app| session(app).is_over());

    let state = session(&app);
    assert_eq!(state.mode, SessionMode::Victory);
    assert_eq!(state.enemies_remaining, 0);
    assert!(enemy_with_map_id(&mut app, 1).is_none());
}

#[test]
fn test_player_death_is_game_over() {
    let mut app = create_encounter_app(&[touching_goblin(), distant_skeleton()], 10);
    let skeleton = enemy_with_map_id(&mut app, 2).expect("skeleton not spawned");

    run_until(&mut app, "battle", |app| !session(app).is_roaming());
    assert_eq!(app.world().resource::<BattleController>().player_status().health, 10);

    // potion (10 → 40), потом defense без ввода: 40 critical
    press(&mut app, InputSymbol::Left);
    press(&mut app, InputSymbol::Confirm);
    assert_eq!(battle_phase(&app), Some(BattlePhase::TallyPlayer));

    run_until(&mut app, "game over", |app| session(app).is_over());

    assert_eq!(session(&app).mode, SessionMode::GameOver);
    assert_eq!(session(&app).player_health, 0);

    // terminal: ввод игнорируется, overworld стоит
    let skeleton_at = *app.world().get::<OverworldBody>(skeleton).expect("skeleton body");
    press(&mut app, InputSymbol::Confirm);
    for _ in 0..300 {
        app.update();
    }
    assert_eq!(session(&app).mode, SessionMode::GameOver);
    assert_eq!(*app.world().get::<OverworldBody>(skeleton).expect("skeleton body"), skeleton_at);

    let battle = app.world().resource::<BattleController>();
    assert_eq!(battle.outcome(), Some(BattleOutcome::GameOver));
    assert_eq!(battle.player_animation().action(), ActionKind::Death);
}

#[test]
fn test_held_directions_move_player() {
    let mut app = create_encounter_app(&[distant_skeleton()], 100);
    let start = PlayerConfig::default().spawn;

    app.world_mut().send_event(InputPressed(InputSymbol::Left));
    for _ in 0..30 {
        app.update();
    }
    app.world_mut().send_event(InputReleased(InputSymbol::Left));
    app.update();

    let mut players = app.world_mut().query_filtered::<&OverworldBody, With<Player>>();
    let player = *players.single(app.world()).expect("one player");
    assert!(player.position.x < start.x - 60.0, "player at {:?}", player.position);
    assert_eq!(player.position.y, start.y);

    // отпустили — стоим
    for _ in 0..10 {
        app.update();
    }
    let still = *players.single(app.world()).expect("one player");
    assert_eq!(still.position, player.position);
    assert_eq!(still.direction, IVec2::ZERO);
}

#[test]
fn test_frames_follow_session_mode() {
    let mut app = create_encounter_app(&[touching_goblin(), distant_skeleton()], 100);

    app.update();
    app.update();

    run_until(&mut app, "battle frames", |app| {
        let frames = &app.world().resource::<FrameLog>().0;
        frames
            .iter()
            .any(|f| matches!(f.subject, PresentedSubject::Battle(_)))
    });

    let frames = app.world().resource::<FrameLog>().0.clone();
    let actors: Vec<ActorKind> = frames
        .iter()
        .filter_map(|f| match f.subject {
            PresentedSubject::Battle(actor) => Some(actor),
            PresentedSubject::Overworld(_) => None,
        })
        .collect();
    assert_eq!(actors, vec![ActorKind::Knight, ActorKind::Goblin]);
    assert!(frames.iter().all(|f| matches!(f.frame, PresentedFrame::Battle(_))));
    assert_eq!(frames[0].position, Vec2::new(100.0, 800.0));
}

#[test]
fn test_roaming_presents_every_body() {
    let mut app = create_encounter_app(&[distant_skeleton()], 100);

    run_until(&mut app, "overworld frames", |app| {
        !app.world().resource::<FrameLog>().0.is_empty()
    });

    let frames = &app.world().resource::<FrameLog>().0;
    // player + скелет
    assert_eq!(frames.len(), 2);
    assert!(frames
        .iter()
        .all(|f| matches!(f.subject, PresentedSubject::Overworld(_)) && matches!(f.frame, PresentedFrame::Walk { .. })));
}
