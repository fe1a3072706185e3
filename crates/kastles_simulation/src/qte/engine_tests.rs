//! Tests for QTE combo selection and scoring.

use super::*;
use crate::input::InputSymbol;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_repertoire_lengths() {
    assert_eq!(QteKind::LightAttack.sequence_len(), 6);
    assert_eq!(QteKind::HeavyAttack.sequence_len(), 9);
    assert_eq!(QteKind::Defense.sequence_len(), 6);

    for kind in [QteKind::LightAttack, QteKind::HeavyAttack, QteKind::Defense] {
        for alternative in kind.repertoire() {
            assert_eq!(alternative.len(), kind.sequence_len());
        }
    }
}

#[test]
fn test_repertoire_ordinals() {
    let ordinals = |kind: QteKind, index: usize| -> Vec<u8> {
        ComboSequence::from_repertoire(kind, index)
            .symbols()
            .iter()
            .map(|s| s.ordinal())
            .collect()
    };

    assert_eq!(ordinals(QteKind::LightAttack, 0), vec![3, 0, 3, 4, 5, 1]);
    assert_eq!(ordinals(QteKind::HeavyAttack, 2), vec![3, 4, 2, 4, 0, 5, 4, 2, 5]);
    assert_eq!(ordinals(QteKind::Defense, 1), vec![1, 2, 1, 4, 4, 2]);
}

#[test]
fn test_choose_stays_in_repertoire() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut seen = [false; 3];

    for _ in 0..200 {
        let sequence = ComboSequence::choose(QteKind::Defense, &mut rng);
        let index = QteKind::Defense
            .repertoire()
            .iter()
            .position(|alt| *alt == sequence.symbols())
            .expect("sequence must come from the repertoire");
        seen[index] = true;
    }

    // 200 равномерных выборов — все три варианта должны встретиться
    assert_eq!(seen, [true; 3]);
}

#[test]
fn test_submit_is_positional() {
    let mut qte = QteEngine::with_sequence(ComboSequence::from_repertoire(QteKind::LightAttack, 0));

    // [3,0,3,4,5,1]
    assert_eq!(qte.submit(InputSymbol::Right), Some(Scored { position: 0, hit: true }));
    assert_eq!(qte.submit(InputSymbol::Left), Some(Scored { position: 1, hit: false }));
    assert_eq!(qte.submit(InputSymbol::Right), Some(Scored { position: 2, hit: true }));

    let progress = qte.progress();
    assert_eq!(progress.hits, 2);
    assert_eq!(progress.position, 3);
    assert_eq!(
        &progress.feedback[..4],
        &[KeyFeedback::Correct, KeyFeedback::Failed, KeyFeedback::Correct, KeyFeedback::Default]
    );
}

#[test]
fn test_submissions_past_end_are_ignored() {
    let sequence = ComboSequence::from_repertoire(QteKind::Defense, 2);
    let mut qte = QteEngine::with_sequence(sequence);

    for symbol in sequence.symbols() {
        qte.submit(*symbol);
    }
    assert!(qte.is_complete());
    assert!(qte.hit_ratio().is_perfect());

    let before = qte.progress().clone();
    assert_eq!(qte.submit(InputSymbol::Confirm), None);
    assert_eq!(qte.submit(InputSymbol::Up), None);
    assert_eq!(qte.progress(), &before);
}

#[test]
fn test_hit_ratio_without_input() {
    let qte = QteEngine::with_sequence(ComboSequence::from_repertoire(QteKind::HeavyAttack, 0));
    let ratio = qte.hit_ratio();
    assert_eq!(ratio, HitRatio::new(0, 9));
    assert!(ratio.is_zero());
    assert!(!ratio.is_perfect());
}

#[test]
fn test_hit_ratio_half() {
    let sequence = ComboSequence::from_repertoire(QteKind::LightAttack, 1);
    let mut qte = QteEngine::with_sequence(sequence);

    for (i, symbol) in sequence.symbols().iter().enumerate() {
        if i % 2 == 0 {
            qte.submit(*symbol);
        } else {
            qte.submit(InputSymbol::Up);
        }
    }

    // [3,1,2,3,5,5]: промахи на позициях 1,3,5 (Up ни разу не совпадает)
    let ratio = qte.hit_ratio();
    assert_eq!(ratio, HitRatio::new(3, 6));
    assert!((ratio.as_f32() - 0.5).abs() < f32::EPSILON);
}

#[test]
fn test_hit_ratio_clamps_degenerate_total() {
    let ratio = HitRatio::new(3, 0);
    assert_eq!(ratio.total, 1);
    assert!(ratio.is_perfect());
}
