//! Deck
//!
//! The fixed set of cards loaded for one level. Cards are only replaced
//! through [`Deck::answer`].

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::card::Card;
use crate::error::{DataIntegrityError, SessionError, SessionResult};
use crate::progress::{progress, Progress};
use crate::schedule::apply_outcome;
use crate::select::select_next;
use crate::types::{CardId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    level: String,
    cards: Vec<Card>,
}

/// Result of answering one card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answered {
    /// The card after the transition
    pub card: Card,
    /// Card to show next; `None` only for an empty deck
    pub next_card_id: Option<CardId>,
}

impl Deck {
    pub(crate) fn from_parts(level: String, cards: Vec<Card>) -> Self {
        Self { level, cards }
    }

    /// Rebuild a deck from already validated cards (e.g. a restored snapshot)
    pub fn from_cards(level: impl Into<String>, cards: Vec<Card>) -> Result<Self, DataIntegrityError> {
        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(card.id()) {
                return Err(DataIntegrityError::DuplicateId(card.id().to_string()));
            }
        }
        Ok(Self::from_parts(level.into(), cards))
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == card_id)
    }

    pub fn position(&self, card_id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id() == card_id)
    }

    pub fn select_next<R: Rng + ?Sized>(&self, last_shown: Option<&str>, rng: &mut R) -> Option<&Card> {
        select_next(&self.cards, last_shown, rng)
    }

    pub fn progress(&self) -> Progress {
        progress(&self.cards)
    }

    /// Apply an answer to `card_id` and pick the following card
    ///
    /// The answered card is excluded from the next draw.
    pub fn answer<R: Rng + ?Sized>(
        &mut self,
        card_id: &str,
        was_correct: bool,
        now: Timestamp,
        rng: &mut R,
    ) -> SessionResult<Answered> {
        let index = self
            .position(card_id)
            .ok_or_else(|| SessionError::UnknownCard(card_id.to_string()))?;

        let updated = apply_outcome(&self.cards[index], was_correct, now);
        self.cards[index] = updated.clone();

        let next_card_id = self
            .select_next(Some(card_id), rng)
            .map(|card| card.id().to_string());

        Ok(Answered {
            card: updated,
            next_card_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use crate::vocabulary::init_deck;
    use crate::vocabulary::tests::entry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn deck(ids: &[&str]) -> Deck {
        let entries: Vec<_> = ids.iter().map(|id| entry(id, "B1.1 (1-30)")).collect();
        init_deck("B1.1 (1-30)", &entries).unwrap()
    }

    #[test]
    fn test_answer_unknown_card() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut d = deck(&["A", "B"]);
        assert!(matches!(
            d.answer("Z", true, 0, &mut rng),
            Err(SessionError::UnknownCard(id)) if id == "Z"
        ));
    }

    #[test]
    fn test_answer_updates_in_place() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut d = deck(&["A", "B"]);
        let answered = d.answer("A", false, 10, &mut rng).unwrap();

        assert_eq!(answered.card.category(), Category::Learning);
        assert_eq!(d.get("A").unwrap().category(), Category::Learning);
        assert_eq!(d.get("A").unwrap().last_shown_at(), Some(10));
        assert_eq!(answered.next_card_id.as_deref(), Some("B"));
    }

    #[test]
    fn test_single_card_deck_comes_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut d = deck(&["A"]);
        let answered = d.answer("A", true, 0, &mut rng).unwrap();
        assert_eq!(answered.next_card_id.as_deref(), Some("A"));
    }

    #[test]
    fn test_end_to_end_mastered_card_waits() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut d = deck(&["A", "B", "C"]);

        let answered = d.answer("A", true, 0, &mut rng).unwrap();
        assert_eq!(answered.card.category(), Category::Mastered);

        // keep answering B and C wrong: A must never come up
        let mut current = answered.next_card_id.unwrap();
        for step in 0..200 {
            assert_ne!(current, "A");
            let answered = d.answer(&current, false, step, &mut rng).unwrap();
            current = answered.next_card_id.unwrap();
        }

        // master B and C; then A may return
        d.answer("B", true, 300, &mut rng).unwrap();
        d.answer("B", true, 301, &mut rng).unwrap();
        d.answer("B", true, 302, &mut rng).unwrap();
        d.answer("C", true, 303, &mut rng).unwrap();
        d.answer("C", true, 304, &mut rng).unwrap();
        let last = d.answer("C", true, 305, &mut rng).unwrap();
        assert_eq!(d.progress().mastered, 3);
        assert!(matches!(last.next_card_id.as_deref(), Some("A") | Some("B")));
    }

    #[test]
    fn test_from_cards_rejects_duplicates() {
        let d = deck(&["A", "B"]);
        let mut cards = d.cards().to_vec();
        cards.push(cards[0].clone());
        assert!(matches!(
            Deck::from_cards("x", cards),
            Err(DataIntegrityError::DuplicateId(_))
        ));
    }
}
