//! Kastles and Krakens Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: overworld (enemy AI FSM) + пошаговый бой с QTE.
//!
//! Один tick = FixedUpdate 60Hz, порядок фиксирован через `TickSet`:
//! input → overworld (player + AI + contact) → battle → presentation → reap.
//! Рендера и звука нет: наружу уходят `FramePresented` / `FeedbackShown`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod battle;
pub mod clock;
pub mod combat;
pub mod config;
pub mod geometry;
pub mod input;
pub mod logger;
pub mod overworld;
pub mod presentation;
pub mod qte;
pub mod session;

// Re-export основных типов
pub use animation::{ActionKind, ActorAnimation, ActorKind, AnimationFrames, BuiltinFrames, FrameHandle};
pub use battle::{BattleController, BattleEnded, BattleOutcome, BattlePhase, BattlePlugin, FeedbackShown, MenuAction};
pub use clock::{ClockSource, ManualClock, TickClock};
pub use combat::{CombatantStatus, FeedbackKind, FeedbackText, Side};
pub use config::{BattleConfig, PlayerConfig, WorldBounds};
pub use geometry::{GeometryOracle, RoomWalls};
pub use input::{HeldDirections, InputPressed, InputReleased, InputSymbol};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use overworld::{
    parse_room, Defeated, Enemy, EnemyAiState, EnemyBehavior, EnemyKind, EnemyMode, EnemySpawn, InBattle,
    OverworldBody, OverworldPlugin, Player,
};
pub use presentation::{FramePresented, PresentationPlugin};
pub use qte::{HitRatio, QteEngine, QteKind};
pub use session::{start_session, EnemyContact, GameSession, SessionMode};

/// Порядок фаз одного tick'а (FixedUpdate, chained).
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// InputPressed/InputReleased → HeldDirections
    Input,
    /// Player movement, enemy AI, contact detection, walk cycles
    Overworld,
    /// Battle start, menu/QTE input, animations + resolver + phases
    Battle,
    /// FramePresented
    Presentation,
    /// Despawn defeated enemies, Victory check
    Reap,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // seed мог поставить create_headless_app — не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz: все скорости заданы в px за 1/60 s
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Конфиг (design constants в Default impl'ах)
            .init_resource::<WorldBounds>()
            .init_resource::<PlayerConfig>()
            .init_resource::<BattleConfig>()
            .init_resource::<RoomWalls>()
            .init_resource::<GameSession>()
            .init_resource::<HeldDirections>()
            .add_event::<InputPressed>()
            .add_event::<InputReleased>();

        app.configure_sets(
            FixedUpdate,
            (
                TickSet::Input,
                TickSet::Overworld,
                TickSet::Battle,
                TickSet::Presentation,
                TickSet::Reap,
            )
                .chain(),
        );

        app.add_systems(FixedUpdate, input::track_held_directions.in_set(TickSet::Input))
            .add_plugins((OverworldPlugin, BattlePlugin, PresentationPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт headless Bevy App с полной симуляцией.
///
/// Время ручное: каждый `app.update()` сдвигает часы ровно на один fixed
/// timestep, так что один update = один tick симуляции.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();

    let tick = Time::<Fixed>::from_hz(60.0).timestep();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Debug формат как сериализация (f32 печатаются точно)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
