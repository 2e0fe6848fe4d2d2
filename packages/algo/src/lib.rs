//! # wortkarten-algo - vocabulary flashcard scheduling core
//!
//! Pure Rust spaced-repetition engine for level-based vocabulary decks:
//!
//! - **Card State Initializer** - catalog rows become new, schedulable cards
//! - **Review Transition** - interval doubling on success, reset on a miss
//! - **Next-Card Selection** - weighted draw that favours new and missed words
//! - **Progress** - per-category counts recomputed from the deck
//!
//! No I/O happens here. Vocabulary fetching and snapshot persistence are
//! external collaborators, reached through [`VocabularyEntry`] pages and the
//! [`SessionStore`] trait.
//!
//! ## Module layout
//!
//! - [`types`] - categories, constants, identifiers
//! - [`card`] - the card model and its invariants
//! - [`vocabulary`] - strict row parsing and deck initialization
//! - [`schedule`] - review transition
//! - [`select`] - next-card selection
//! - [`deck`] - the deck of one level
//! - [`progress`] - category counts
//! - [`store`] - session snapshots and stores
//! - [`session`] - level switching, answering, persistence
//! - [`level`] - level name helpers
//! - [`sanitize`] - field and weight validation
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use wortkarten_algo::{DeckSession, LevelLoad, MemoryStore, RawVocabularyEntry, parse_entries};
//!
//! let mut session = DeckSession::new(MemoryStore::new(), ChaCha8Rng::seed_from_u64(7));
//! let LevelLoad::NeedsFetch(ticket) = session.select_level("A1 (1-30)") else {
//!     unreachable!("empty store");
//! };
//!
//! let page = parse_entries(&[RawVocabularyEntry {
//!     id: Some("1".into()),
//!     german: Some("der Apfel".into()),
//!     english: Some("the apple".into()),
//!     example: Some("Ich esse einen Apfel.".into()),
//!     category: Some("learning".into()),
//!     level: Some("A1 (1-30)".into()),
//! }])
//! .unwrap();
//! session.complete_load(&ticket, &page).unwrap();
//!
//! let outcome = session.answer_current(true, 1_700_000_000_000).unwrap();
//! assert_eq!(outcome.answered.card.interval(), 16);
//! assert_eq!(session.progress().mastered, 1);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod card;
pub mod deck;
pub mod error;
pub mod level;
pub mod progress;
pub mod sanitize;
pub mod schedule;
pub mod select;
pub mod session;
pub mod store;
pub mod types;
pub mod vocabulary;

// ============================================================================
// 重新导出
// ============================================================================

pub use types::*;

pub use card::{Card, CardRecord};
pub use deck::{Answered, Deck};
pub use error::{DataIntegrityError, SessionError, SessionResult, StoreError};
pub use level::{default_sublevel, parse_level, sort_levels, LevelName};
pub use progress::{progress, Progress};
pub use schedule::apply_outcome;
pub use select::{card_weight, select_next};
pub use session::{AnswerOutcome, DeckSession, LevelLoad, LoadOutcome, LoadTicket};
pub use store::{session_key, MemoryStore, SessionSnapshot, SessionStore};
pub use vocabulary::{init_deck, parse_entries, RawVocabularyEntry, VocabularyEntry};
