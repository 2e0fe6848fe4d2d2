//! Progress Aggregation
//!
//! Read-only projection over a deck. Always recomputed from the cards, never
//! cached.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::types::Category;

/// Category counts for one deck
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub new: usize,
    pub learning: usize,
    pub reviewing: usize,
    pub mastered: usize,
    /// Cards never answered (`is_new`)
    pub unanswered: usize,
    pub total: usize,
}

impl Progress {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::New => self.new,
            Category::Learning => self.learning,
            Category::Reviewing => self.reviewing,
            Category::Mastered => self.mastered,
        }
    }

    /// Share of the deck in `category`, in percent (0 for an empty deck)
    pub fn percent(&self, category: Category) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(category) as f64 / self.total as f64 * 100.0
    }
}

/// Count cards per category
pub fn progress(cards: &[Card]) -> Progress {
    let mut p = Progress {
        total: cards.len(),
        ..Progress::default()
    };

    for card in cards {
        match card.category() {
            Category::New => p.new += 1,
            Category::Learning => p.learning += 1,
            Category::Reviewing => p.reviewing += 1,
            Category::Mastered => p.mastered += 1,
        }
        if card.is_new() {
            p.unanswered += 1;
        }
    }

    p
}
