//! Battle animation: segment tables + per-actor state machine.
//!
//! Анимация — не только визуал: завершение последнего сегмента действия
//! сообщает battle controller'у, что пора считать урон (`Completion`).

pub mod fireball;
pub mod frames;
pub mod machine;
pub mod segment;
pub mod tables;


pub use fireball::Fireball;
pub use frames::{ActionKind, ActorKind, AnimationFrames, BuiltinFrames, Clip, FrameHandle};
pub use machine::{ActorAnimation, AnimationState, AnimationStep};
pub use segment::{ActionTable, Completion, Cue, Segment, SegmentRule, TravelTarget};
pub use tables::action_table;
