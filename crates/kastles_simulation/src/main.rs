//! Headless симуляция Kastles and Krakens
//!
//! Скриптованный игрок: идёт к ближайшему врагу, в бою всегда выбирает
//! Attack и набирает комбо без ошибок. Печатает прогресс до конца сессии.

use bevy::prelude::*;
use kastles_simulation::battle::BattlePhase;
use kastles_simulation::*;

/// Комната демо: гоблин-walker рядом с player'ом, fire worm-charger подальше.
const DEMO_ROOM: &str = r#"[
    {
        "x": 760.0, "y": 420.0,
        "enemy_sprite": "goblin",
        "enemy_type": "walker",
        "movement_range": 220.0,
        "movement_speed": 2.0,
        "map_id": 1
    },
    {
        "x": 150.0, "y": 150.0,
        "enemy_sprite": "fire_worm",
        "enemy_type": "charger",
        "movement_range": 300.0,
        "movement_speed": 1.5,
        "map_id": 2
    }
]"#;

const MAX_TICKS: usize = 60 * 60 * 5;

fn main() {
    let seed = 42;
    println!("Starting Kastles and Krakens headless simulation (seed: {})", seed);

    let spawns = match parse_room(DEMO_ROOM) {
        Ok(spawns) => spawns,
        Err(error) => {
            log_error(&format!("❌ Demo room is malformed: {}", error));
            return;
        }
    };

    let mut app = create_headless_app(seed);
    start_session(app.world_mut(), &spawns);

    let mut held = HeldDirections::default();

    for tick in 0..MAX_TICKS {
        drive_player(app.world_mut(), &mut held);
        app.update();

        let session = app.world().resource::<GameSession>().clone();
        if tick % 300 == 0 {
            println!(
                "Tick {}: {:?}, player {} HP, {} enemies left",
                tick, session.mode, session.player_health, session.enemies_remaining
            );
        }
        if session.is_over() {
            println!("Session finished at tick {}: {:?}", tick, session.mode);
            return;
        }
    }

    println!("Simulation stopped after {} ticks", MAX_TICKS);
}

/// Скриптованный ввод на следующий tick.
fn drive_player(world: &mut World, held: &mut HeldDirections) {
    let mode = world.resource::<GameSession>().mode;

    match mode {
        SessionMode::Roaming => {
            let wanted = direction_to_nearest_enemy(world);
            hold_directions(world, held, wanted);
        }
        SessionMode::Battle(_) => {
            hold_directions(world, held, IVec2::ZERO);
            if let Some(symbol) = next_battle_press(world) {
                world.send_event(InputPressed(symbol));
            }
        }
        SessionMode::GameOver | SessionMode::Victory => {}
    }
}

fn direction_to_nearest_enemy(world: &mut World) -> IVec2 {
    let mut players = world.query_filtered::<&OverworldBody, With<Player>>();
    let Ok(player) = players.single(world).copied() else {
        return IVec2::ZERO;
    };

    let mut enemies = world.query_filtered::<&OverworldBody, (With<Enemy>, Without<Defeated>)>();
    let nearest = enemies
        .iter(world)
        .map(|body| body.rect().center() - player.rect().center())
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));

    match nearest {
        Some(offset) => IVec2::new(offset.x.signum() as i32, offset.y.signum() as i32),
        None => IVec2::ZERO,
    }
}

/// Шлёт edge события только для изменившихся направлений.
fn hold_directions(world: &mut World, held: &mut HeldDirections, wanted: IVec2) {
    let targets = [
        (InputSymbol::Up, wanted.y < 0),
        (InputSymbol::Down, wanted.y > 0),
        (InputSymbol::Left, wanted.x < 0),
        (InputSymbol::Right, wanted.x > 0),
    ];

    for (symbol, pressed) in targets {
        let current = match symbol {
            InputSymbol::Up => held.up,
            InputSymbol::Down => held.down,
            InputSymbol::Left => held.left,
            _ => held.right,
        };
        if current == pressed {
            continue;
        }

        held.set(symbol, pressed);
        if pressed {
            world.send_event(InputPressed(symbol));
        } else {
            world.send_event(InputReleased(symbol));
        }
    }
}

/// Меню: Attack (курсор по умолчанию). QTE: следующий символ комбо.
fn next_battle_press(world: &World) -> Option<InputSymbol> {
    let battle = world.get_resource::<BattleController>()?;
    if battle.outcome().is_some() {
        return None;
    }

    match battle.phase() {
        BattlePhase::Select if battle.menu().selected() == MenuAction::Attack => Some(InputSymbol::Confirm),
        BattlePhase::Select => Some(InputSymbol::Right),
        BattlePhase::PlayerAct | BattlePhase::EnemyAct => {
            let qte = battle.qte()?;
            qte.sequence().get(qte.progress().position)
        }
        BattlePhase::TallyPlayer | BattlePhase::TallyEnemy => None,
    }
}
