//! Deck Session
//!
//! Drives one learner's session: level switches, restoring or loading the
//! deck, answering, and persisting after every answer.
//!
//! ## Level switch and in-flight fetches
//!
//! Every [`DeckSession::select_level`] starts a new load generation. When the
//! level has to be fetched, the caller receives a [`LoadTicket`] and hands the
//! fetched page back through [`DeckSession::complete_load`]. Tickets from an
//! older generation are discarded, so a slow fetch can never overwrite the
//! deck of the level the learner switched to.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::deck::{Answered, Deck};
use crate::error::{SessionError, SessionResult, StoreError};
use crate::progress::Progress;
use crate::store::{session_key, SessionSnapshot, SessionStore};
use crate::types::{CardId, Timestamp};
use crate::vocabulary::{init_deck, parse_entries, RawVocabularyEntry, VocabularyEntry};

/// Permission to install a fetched page for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTicket {
    pub level: String,
    pub generation: u64,
}

/// How a level switch was satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelLoad {
    /// Deck restored from the session store
    Restored,
    /// No usable snapshot; fetch the vocabulary and call `complete_load`
    NeedsFetch(LoadTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// The ticket belongs to a level that is no longer active
    Stale,
}

/// Result of one answer event
#[derive(Debug)]
pub struct AnswerOutcome {
    pub answered: Answered,
    /// Set when the snapshot could not be written; the session continues in memory
    pub persist_error: Option<StoreError>,
}

pub struct DeckSession<S, R> {
    store: S,
    rng: R,
    generation: u64,
    level: Option<String>,
    pending: Option<LoadTicket>,
    deck: Option<Deck>,
    current_id: Option<CardId>,
    last_shown_id: Option<CardId>,
}

impl<S: SessionStore, R: Rng> DeckSession<S, R> {
    pub fn new(store: S, rng: R) -> Self {
        Self {
            store,
            rng,
            generation: 0,
            level: None,
            pending: None,
            deck: None,
            current_id: None,
            last_shown_id: None,
        }
    }

    /// Switch to `level`, restoring its snapshot when one is usable
    ///
    /// The previous deck is dropped; its state was persisted by the last answer.
    pub fn select_level(&mut self, level: &str) -> LevelLoad {
        self.generation += 1;
        self.level = Some(level.to_string());
        self.pending = None;
        self.deck = None;
        self.current_id = None;
        self.last_shown_id = None;

        let key = session_key(level);
        let restored = match self.store.load(&key) {
            Ok(Some(snapshot)) => match snapshot.into_deck(level) {
                Ok(restored) => Some(restored),
                Err(err) => {
                    tracing::warn!(error = %err, level, "discarding invalid session snapshot");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, level, "session read failed, fetching fresh deck");
                None
            }
        };

        match restored {
            Some(restored) => {
                tracing::debug!(level, cards = restored.deck.len(), "session restored");
                self.last_shown_id = restored.last_shown_id;
                self.current_id = restored
                    .current_id
                    .or_else(|| pick(&restored.deck, None, &mut self.rng));
                self.deck = Some(restored.deck);
                LevelLoad::Restored
            }
            None => {
                let ticket = LoadTicket {
                    level: level.to_string(),
                    generation: self.generation,
                };
                self.pending = Some(ticket.clone());
                LevelLoad::NeedsFetch(ticket)
            }
        }
    }

    /// Install a fetched vocabulary page
    ///
    /// Stale tickets are ignored without validating the entries.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        entries: &[VocabularyEntry],
    ) -> SessionResult<LoadOutcome> {
        if self.pending.as_ref() != Some(ticket) {
            tracing::debug!(
                level = %ticket.level,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale vocabulary page"
            );
            return Ok(LoadOutcome::Stale);
        }
        self.pending = None;

        let deck = init_deck(&ticket.level, entries)?;
        self.current_id = pick(&deck, None, &mut self.rng);
        self.last_shown_id = None;
        tracing::debug!(level = %ticket.level, cards = deck.len(), "deck initialized");
        self.deck = Some(deck);

        Ok(LoadOutcome::Applied)
    }

    /// [`complete_load`](Self::complete_load) for rows that have not been
    /// parsed yet
    ///
    /// The ticket is consumed before parsing, so a malformed page ends the
    /// load with an error instead of leaving the session loading.
    pub fn complete_load_raw(
        &mut self,
        ticket: &LoadTicket,
        rows: &[RawVocabularyEntry],
    ) -> SessionResult<LoadOutcome> {
        match parse_entries(rows) {
            Ok(entries) => self.complete_load(ticket, &entries),
            Err(err) => match self.fail_load(ticket) {
                LoadOutcome::Applied => Err(err.into()),
                LoadOutcome::Stale => Ok(LoadOutcome::Stale),
            },
        }
    }

    /// Give up on the fetch behind `ticket` (network error, undecodable page)
    ///
    /// The level stays selected with no deck.
    pub fn fail_load(&mut self, ticket: &LoadTicket) -> LoadOutcome {
        if self.pending.as_ref() != Some(ticket) {
            return LoadOutcome::Stale;
        }
        self.pending = None;
        tracing::warn!(level = %ticket.level, "vocabulary load failed");
        LoadOutcome::Applied
    }

    /// Answer `card_id`, advance to the next card and persist the session
    pub fn answer(
        &mut self,
        card_id: &str,
        was_correct: bool,
        now: Timestamp,
    ) -> SessionResult<AnswerOutcome> {
        let deck = self.deck.as_mut().ok_or(SessionError::NoActiveDeck)?;
        let answered = deck.answer(card_id, was_correct, now, &mut self.rng)?;

        self.last_shown_id = Some(card_id.to_string());
        self.current_id = answered.next_card_id.clone();

        let persist_error = self.persist().err();
        if let Some(err) = &persist_error {
            tracing::warn!(error = %err, "session not persisted, continuing in memory");
        }

        Ok(AnswerOutcome {
            answered,
            persist_error,
        })
    }

    /// Answer whatever card is currently shown
    pub fn answer_current(&mut self, was_correct: bool, now: Timestamp) -> SessionResult<AnswerOutcome> {
        let card_id = match (&self.deck, &self.current_id) {
            (None, _) => return Err(SessionError::NoActiveDeck),
            (Some(_), None) => return Err(SessionError::NoCurrentCard),
            (Some(_), Some(id)) => id.clone(),
        };
        self.answer(&card_id, was_correct, now)
    }

    /// Write the current snapshot to the store
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let Some(snapshot) = self.snapshot() else {
            return Ok(());
        };
        self.store.save(&session_key(&snapshot.level), &snapshot)
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        let deck = self.deck.as_ref()?;
        let current_index = self
            .current_id
            .as_deref()
            .and_then(|id| deck.position(id))
            .unwrap_or(0);

        Some(SessionSnapshot {
            level: deck.level().to_string(),
            deck: deck.cards().to_vec(),
            current_index,
            current_id: self.current_id.clone(),
            last_shown_id: self.last_shown_id.clone(),
        })
    }

    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn current_card(&self) -> Option<&Card> {
        let deck = self.deck.as_ref()?;
        deck.get(self.current_id.as_deref()?)
    }

    pub fn last_shown_id(&self) -> Option<&str> {
        self.last_shown_id.as_deref()
    }

    /// Category counts of the active deck (all zero when none is loaded)
    pub fn progress(&self) -> Progress {
        self.deck.as_ref().map(Deck::progress).unwrap_or_default()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

fn pick<R: Rng>(deck: &Deck, last_shown: Option<&str>, rng: &mut R) -> Option<CardId> {
    deck.select_next(last_shown, rng).map(|card| card.id().to_string())
}
