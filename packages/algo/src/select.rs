//! Next-Card Selection
//!
//! 1. Drop the card shown last (unless it is the only card).
//! 2. Prefer non-mastered cards; recycle everything once all are mastered.
//! 3. Weighted draw: new cards weigh 1, seen cards `1 / interval`.
//!
//! The random source is injected so callers (and tests) control it.

use rand::Rng;

use crate::card::Card;
use crate::sanitize::{has_invalid_values, sanitize_weights};

/// Selection weight of a card
pub fn card_weight(card: &Card) -> f64 {
    if card.is_new() {
        1.0
    } else {
        1.0 / card.interval() as f64
    }
}

/// Candidates for the next draw, before weighting
pub fn candidate_pool<'a>(cards: &'a [Card], last_shown: Option<&str>) -> Vec<&'a Card> {
    let candidates: Vec<&Card> = if cards.len() == 1 {
        cards.iter().collect()
    } else {
        cards
            .iter()
            .filter(|card| Some(card.id()) != last_shown)
            .collect()
    };

    if candidates.iter().any(|card| !card.is_mastered()) {
        candidates.into_iter().filter(|card| !card.is_mastered()).collect()
    } else {
        candidates
    }
}

/// Pick the next card to show, or `None` for an empty deck
pub fn select_next<'a, R: Rng + ?Sized>(
    cards: &'a [Card],
    last_shown: Option<&str>,
    rng: &mut R,
) -> Option<&'a Card> {
    select_next_with(cards, last_shown, rng, card_weight)
}

/// [`select_next`] with a custom weight function
pub fn select_next_with<'a, R, F>(
    cards: &'a [Card],
    last_shown: Option<&str>,
    rng: &mut R,
    weight: F,
) -> Option<&'a Card>
where
    R: Rng + ?Sized,
    F: Fn(&Card) -> f64,
{
    let pool = candidate_pool(cards, last_shown);
    let weights: Vec<f64> = pool.iter().map(|&card| weight(card)).collect();
    weighted_index(&weights, rng).map(|i| pool[i])
}

/// Proportional draw over `weights`
///
/// Returns `None` when the total weight is not a positive finite number.
/// If rounding drift exhausts the walk, the last positively weighted index
/// is returned.
pub fn weighted_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let mut weights = weights.to_vec();
    if has_invalid_values(&weights) {
        tracing::debug!("ignoring non-finite selection weights");
    }
    sanitize_weights(&mut weights);

    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }

    let mut remaining = rng.gen::<f64>() * total;
    for (i, w) in weights.iter().enumerate() {
        remaining -= w;
        if remaining < 0.0 {
            return Some(i);
        }
    }

    weights.iter().rposition(|&w| w > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::apply_outcome;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn card(id: &str) -> Card {
        Card::new(id, format!("Wort {id}"), format!("word {id}"), "")
    }

    fn mastered(id: &str) -> Card {
        apply_outcome(&card(id), true, 0)
    }

    fn missed(id: &str) -> Card {
        apply_outcome(&card(id), false, 0)
    }

    #[test]
    fn test_card_weight() {
        assert_eq!(card_weight(&card("a")), 1.0);
        assert_eq!(card_weight(&missed("a")), 1.0);
        assert_eq!(card_weight(&mastered("a")), 1.0 / 16.0);
    }

    #[test]
    fn test_empty_deck_returns_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(select_next(&[], None, &mut rng).is_none());
        assert!(select_next(&[], Some("a"), &mut rng).is_none());
    }

    #[test]
    fn test_single_card_deck_ignores_exclusion() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let cards = vec![card("only")];
        for _ in 0..10 {
            let picked = select_next(&cards, Some("only"), &mut rng).unwrap();
            assert_eq!(picked.id(), "only");
        }
    }

    #[test]
    fn test_single_mastered_card_still_returned() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let cards = vec![mastered("only")];
        assert_eq!(select_next(&cards, Some("only"), &mut rng).unwrap().id(), "only");
    }

    #[test]
    fn test_no_immediate_repeat() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let cards = vec![card("a"), card("b"), missed("c"), mastered("d")];
        for _ in 0..500 {
            let picked = select_next(&cards, Some("b"), &mut rng).unwrap();
            assert_ne!(picked.id(), "b");
        }
    }

    #[test]
    fn test_no_immediate_repeat_two_cards() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let cards = vec![card("a"), card("b")];
        for _ in 0..100 {
            assert_eq!(select_next(&cards, Some("a"), &mut rng).unwrap().id(), "b");
        }
    }

    #[test]
    fn test_prefers_non_mastered() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let cards = vec![mastered("a"), card("b"), mastered("c"), missed("d")];
        for _ in 0..500 {
            let picked = select_next(&cards, None, &mut rng).unwrap();
            assert!(picked.id() == "b" || picked.id() == "d");
        }
    }

    #[test]
    fn test_all_mastered_recycles_everything_but_last() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let cards = vec![mastered("a"), mastered("b"), mastered("c")];
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..300 {
            let picked = select_next(&cards, Some("a"), &mut rng).unwrap();
            *counts.entry(picked.id().to_string()).or_default() += 1;
        }
        assert!(!counts.contains_key("a"));
        assert!(counts["b"] > 0 && counts["c"] > 0);
    }

    #[test]
    fn test_only_mastered_candidate_left_after_exclusion() {
        // the single non-mastered card was just shown; the rest are mastered
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let cards = vec![card("a"), mastered("b")];
        assert_eq!(select_next(&cards, Some("a"), &mut rng).unwrap().id(), "b");
    }

    #[test]
    fn test_weighting_favours_low_intervals() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        // interval 1 (weight 1) against interval 4 (weight 1/4)
        let reviewing = apply_outcome(&apply_outcome(&missed("slow"), true, 0), true, 0);
        assert_eq!(reviewing.interval(), 4);
        let cards = vec![missed("fast"), reviewing];

        let mut fast = 0;
        let draws = 5000;
        for _ in 0..draws {
            if select_next(&cards, None, &mut rng).unwrap().id() == "fast" {
                fast += 1;
            }
        }
        let share = fast as f64 / draws as f64;
        assert!((share - 0.8).abs() < 0.03, "share {} should be near 0.8", share);
    }

    #[test]
    fn test_zero_total_weight_returns_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cards = vec![card("a"), card("b")];
        assert!(select_next_with(&cards, None, &mut rng, |_| 0.0).is_none());
        assert!(select_next_with(&cards, None, &mut rng, |_| f64::NAN).is_none());
    }

    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..200 {
            assert_eq!(weighted_index(&[0.0, 2.0, 0.0], &mut rng), Some(1));
        }
    }

    #[test]
    fn test_weighted_index_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(weighted_index(&[], &mut rng), None);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let cards = vec![card("a"), card("b"), card("c"), missed("d")];
        let draw = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..20)
                .map(|_| select_next(&cards, None, &mut rng).unwrap().id().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }
}
