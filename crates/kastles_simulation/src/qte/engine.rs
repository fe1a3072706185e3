//! QTE scoring: live input stream против выбранной последовательности.

use super::combo::{ComboSequence, QteKind};
use crate::input::InputSymbol;
use rand::Rng;

/// Per-position feedback shown under the combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFeedback {
    #[default]
    Default,
    Correct,
    Failed,
}

/// Progress through one QTE.
///
/// Invariants: `position <= len`, `hits <= position`,
/// `feedback.len() == len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboProgress {
    pub hits: usize,
    pub position: usize,
    pub feedback: Vec<KeyFeedback>,
}

impl ComboProgress {
    pub fn new(len: usize) -> Self {
        Self {
            hits: 0,
            position: 0,
            feedback: vec![KeyFeedback::Default; len],
        }
    }
}

/// Result of one scored submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored {
    pub position: usize,
    pub hit: bool,
}

/// `hits / total` kept as integers so the perfect and zero thresholds are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRatio {
    pub hits: u32,
    pub total: u32,
}

impl HitRatio {
    pub fn new(hits: u32, total: u32) -> Self {
        // total == 0 не бывает (комбо непустые), но ratio обязан быть определён
        let total = total.max(1);
        Self {
            hits: hits.min(total),
            total,
        }
    }

    pub fn perfect() -> Self {
        Self::new(1, 1)
    }

    pub fn zero() -> Self {
        Self::new(0, 1)
    }

    pub fn is_perfect(&self) -> bool {
        self.hits == self.total
    }

    pub fn is_zero(&self) -> bool {
        self.hits == 0
    }

    pub fn as_f32(&self) -> f32 {
        self.hits as f32 / self.total as f32
    }
}

/// One active QTE at a time: chosen sequence plus progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QteEngine {
    sequence: ComboSequence,
    progress: ComboProgress,
}

impl QteEngine {
    /// Picks a sequence from the kind's repertoire and starts fresh progress.
    pub fn begin(kind: QteKind, rng: &mut impl Rng) -> Self {
        Self::with_sequence(ComboSequence::choose(kind, rng))
    }

    pub fn with_sequence(sequence: ComboSequence) -> Self {
        Self {
            progress: ComboProgress::new(sequence.len()),
            sequence,
        }
    }

    /// Scores `symbol` at the current position.
    ///
    /// Returns `None` once the sequence is exhausted; such input changes nothing.
    pub fn submit(&mut self, symbol: InputSymbol) -> Option<Scored> {
        let position = self.progress.position;
        let expected = self.sequence.get(position)?;

        let hit = expected == symbol;
        if hit {
            self.progress.hits += 1;
            self.progress.feedback[position] = KeyFeedback::Correct;
        } else {
            self.progress.feedback[position] = KeyFeedback::Failed;
        }
        self.progress.position += 1;

        Some(Scored { position, hit })
    }

    pub fn hit_ratio(&self) -> HitRatio {
        HitRatio::new(self.progress.hits as u32, self.sequence.len() as u32)
    }

    pub fn is_complete(&self) -> bool {
        self.progress.position >= self.sequence.len()
    }

    pub fn sequence(&self) -> &ComboSequence {
        &self.sequence
    }

    pub fn progress(&self) -> &ComboProgress {
        &self.progress
    }

    pub fn kind(&self) -> QteKind {
        self.sequence.kind()
    }
}
