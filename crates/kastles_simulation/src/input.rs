//! Input alphabet и input события.
//!
//! Шесть символов со стабильными ordinal'ами (0..=5). QTE сравнивает
//! последовательности по ordinal'у, поэтому порядок вариантов менять нельзя.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One input symbol.
///
/// 0–3 are directional keys: combo inputs during a QTE, menu motion in the
/// select phase (1 = previous, 3 = next), held movement in the overworld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub enum InputSymbol {
    /// W
    Up = 0,
    /// A
    Left = 1,
    /// S
    Down = 2,
    /// D
    Right = 3,
    /// J
    Confirm = 4,
    /// K
    SecondaryConfirm = 5,
}

impl InputSymbol {
    pub const ALL: [InputSymbol; 6] = [
        InputSymbol::Up,
        InputSymbol::Left,
        InputSymbol::Down,
        InputSymbol::Right,
        InputSymbol::Confirm,
        InputSymbol::SecondaryConfirm,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }
}

/// Key went down (edge). Consumed by the battle menu/QTE and the overworld.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputPressed(pub InputSymbol);

/// Key went up (edge).
#[derive(Event, Debug, Clone, Copy)]
pub struct InputReleased(pub InputSymbol);

/// Directional keys currently held (overworld movement).
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HeldDirections {
    pub up: bool,
    pub left: bool,
    pub down: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn set(&mut self, symbol: InputSymbol, held: bool) {
        match symbol {
            InputSymbol::Up => self.up = held,
            InputSymbol::Left => self.left = held,
            InputSymbol::Down => self.down = held,
            InputSymbol::Right => self.right = held,
            InputSymbol::Confirm | InputSymbol::SecondaryConfirm => {}
        }
    }

    /// `right − left`, `down − up`.
    pub fn axis(&self) -> IVec2 {
        IVec2::new(
            self.right as i32 - self.left as i32,
            self.down as i32 - self.up as i32,
        )
    }
}

/// Система: обновляет HeldDirections по edge событиям.
pub fn track_held_directions(
    mut pressed: EventReader<InputPressed>,
    mut released: EventReader<InputReleased>,
    mut held: ResMut<HeldDirections>,
) {
    for InputPressed(symbol) in pressed.read() {
        held.set(*symbol, true);
    }
    for InputReleased(symbol) in released.read() {
        held.set(*symbol, false);
    }
}
