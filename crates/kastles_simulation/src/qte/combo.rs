//! Combo repertoires and the chosen sequence.

use crate::input::InputSymbol;
use crate::input::InputSymbol::{
    Confirm as J, Down as S, Left as A, Right as D, SecondaryConfirm as K, Up as W,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Which QTE is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QteKind {
    /// Player's light attack (6 symbols).
    LightAttack,
    /// Player's heavy attack (9 symbols).
    HeavyAttack,
    /// Player defending against the enemy's attack (6 symbols).
    Defense,
}

const LIGHT_ATTACK: [&[InputSymbol]; 3] = [
    &[D, W, D, J, K, A],
    &[D, A, S, D, K, K],
    &[A, D, A, D, J, K],
];

const HEAVY_ATTACK: [&[InputSymbol]; 3] = [
    &[D, D, S, S, D, J, K, J, A],
    &[D, W, A, D, S, D, J, K, K],
    &[D, J, S, J, W, K, J, S, K],
];

const DEFENSE: [&[InputSymbol]; 3] = [
    &[A, A, S, D, S, A],
    &[A, S, A, J, J, S],
    &[W, S, S, A, D, K],
];

impl QteKind {
    /// The three fixed alternatives for this kind.
    pub fn repertoire(self) -> &'static [&'static [InputSymbol]; 3] {
        match self {
            QteKind::LightAttack => &LIGHT_ATTACK,
            QteKind::HeavyAttack => &HEAVY_ATTACK,
            QteKind::Defense => &DEFENSE,
        }
    }

    pub fn sequence_len(self) -> usize {
        self.repertoire()[0].len()
    }
}

/// Target sequence for one QTE. Immutable once chosen; never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboSequence {
    kind: QteKind,
    symbols: &'static [InputSymbol],
}

impl ComboSequence {
    /// Uniform pick from the kind's repertoire.
    pub fn choose(kind: QteKind, rng: &mut impl Rng) -> Self {
        let symbols = kind
            .repertoire()
            .choose(rng)
            .copied()
            .unwrap_or(kind.repertoire()[0]);
        Self { kind, symbols }
    }

    /// Alternative `index` (0..3) of the repertoire. Out-of-range wraps.
    pub fn from_repertoire(kind: QteKind, index: usize) -> Self {
        let repertoire = kind.repertoire();
        Self {
            kind,
            symbols: repertoire[index % repertoire.len()],
        }
    }

    pub fn kind(&self) -> QteKind {
        self.kind
    }

    pub fn symbols(&self) -> &'static [InputSymbol] {
        self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<InputSymbol> {
        self.symbols.get(position).copied()
    }
}
