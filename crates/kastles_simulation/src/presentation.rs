//! Presentation handoff: one `(frame, position)` per visible actor per tick.
//!
//! Рендера нет — внешний sink читает `FramePresented` события.

use bevy::prelude::*;

use crate::animation::{ActorKind, FrameHandle};
use crate::battle::BattleController;
use crate::overworld::{Defeated, Facing, OverworldBody, WalkCycle};
use crate::session::{GameSession, SessionMode};

/// Who is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentedSubject {
    Overworld(Entity),
    Battle(ActorKind),
}

/// Which frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentedFrame {
    Walk { facing: Facing, frame: usize },
    Battle(FrameHandle),
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FramePresented {
    pub subject: PresentedSubject,
    pub frame: PresentedFrame,
    /// Top-left (overworld) or anchor point (battle), screen space.
    pub position: Vec2,
}

/// Система: публикует кадры текущего режима.
///
/// Battle (и GameOver, пока доигрывает смерть) — оба бойца + fireball в полёте.
/// Roaming — все overworld тела с walk cycle.
pub fn present_frames(
    session: Res<GameSession>,
    battle: Option<Res<BattleController>>,
    bodies: Query<(Entity, &OverworldBody, &WalkCycle), Without<Defeated>>,
    mut frames: EventWriter<FramePresented>,
) {
    match (session.mode, battle) {
        (SessionMode::Battle(_) | SessionMode::GameOver, Some(battle)) => {
            for animation in [battle.player_animation(), battle.enemy_animation()] {
                let Some(handle) = animation.current_frame() else {
                    continue;
                };
                frames.write(FramePresented {
                    subject: PresentedSubject::Battle(animation.actor()),
                    frame: PresentedFrame::Battle(handle),
                    position: animation.position(),
                });
            }

            let fireball = battle.fireball();
            if fireball.is_active() {
                if let Some(handle) = fireball.current_frame() {
                    frames.write(FramePresented {
                        subject: PresentedSubject::Battle(ActorKind::Fireball),
                        frame: PresentedFrame::Battle(handle),
                        position: fireball.position(),
                    });
                }
            }
        }
        (SessionMode::Roaming, _) => {
            for (entity, body, cycle) in bodies.iter() {
                frames.write(FramePresented {
                    subject: PresentedSubject::Overworld(entity),
                    frame: PresentedFrame::Walk {
                        facing: cycle.facing,
                        frame: cycle.frame,
                    },
                    position: body.position,
                });
            }
        }
        _ => {}
    }
}

/// Presentation Plugin (`TickSet::Presentation`).
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FramePresented>()
            .add_systems(FixedUpdate, present_frames.in_set(crate::TickSet::Presentation));
    }
}
