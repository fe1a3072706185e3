//! Select-phase menu.

use crate::input::InputSymbol;
use crate::qte::QteKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Attack,
    HeavyAttack,
    Potion,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] = [MenuAction::Attack, MenuAction::HeavyAttack, MenuAction::Potion];

    /// QTE that accompanies the action. Potion has none.
    pub fn qte(self) -> Option<QteKind> {
        match self {
            MenuAction::Attack => Some(QteKind::LightAttack),
            MenuAction::HeavyAttack => Some(QteKind::HeavyAttack),
            MenuAction::Potion => None,
        }
    }
}

/// Cursor over [`MenuAction::ALL`], wraps both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BattleMenu {
    cursor: usize,
}

impl BattleMenu {
    pub fn selected(&self) -> MenuAction {
        MenuAction::ALL[self.cursor]
    }

    /// Left = previous, Right = next, Confirm = pick. Everything else is ignored.
    pub fn press(&mut self, symbol: InputSymbol) -> Option<MenuAction> {
        let len = MenuAction::ALL.len();
        match symbol {
            InputSymbol::Left => {
                self.cursor = (self.cursor + len - 1) % len;
                None
            }
            InputSymbol::Right => {
                self.cursor = (self.cursor + 1) % len;
                None
            }
            InputSymbol::Confirm => Some(self.selected()),
            _ => None,
        }
    }
}
