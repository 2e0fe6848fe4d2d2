//! Review Transition
//!
//! How a card's scheduling state evolves after one answer:
//!
//! | outcome | prior state | interval | category |
//! |---|---|---|---|
//! | miss | any | 1 | learning |
//! | correct | new | 16 | mastered |
//! | correct | seen | interval × 2 | by threshold (<3, <7, ≥7) |

use crate::card::Card;
use crate::types::{Category, Timestamp, INITIAL_INTERVAL, KNOWN_ON_FIRST_SIGHT_INTERVAL};

/// Apply one answer to `card`, returning the updated card
///
/// Pure: the result depends only on the arguments.
pub fn apply_outcome(card: &Card, was_correct: bool, now: Timestamp) -> Card {
    let interval = if !was_correct {
        INITIAL_INTERVAL
    } else if card.is_new {
        KNOWN_ON_FIRST_SIGHT_INTERVAL
    } else {
        card.interval.saturating_mul(2).max(INITIAL_INTERVAL)
    };

    let mut next = card.clone();
    next.interval = interval;
    next.is_new = false;
    next.category = Category::classify(false, interval);
    next.last_shown_at = Some(now);
    next
}
