//! Session Snapshots and Stores
//!
//! One snapshot per level, overwritten wholesale after every answer. The
//! store itself is an external key/value collaborator; adapters only move
//! blobs, the JSON encoding lives here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::deck::Deck;
use crate::error::{DataIntegrityError, StoreError};
use crate::types::{CardId, SESSION_KEY_PREFIX};

/// Storage key for a level's snapshot
///
/// Injective: distinct levels never share a key.
pub fn session_key(level: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{level}")
}

/// Persisted state of one level's session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub level: String,
    pub deck: Vec<Card>,
    /// Position of the current card within `deck`
    pub current_index: usize,
    #[serde(default)]
    pub current_id: Option<CardId>,
    #[serde(default)]
    pub last_shown_id: Option<CardId>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(blob: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(blob)?)
    }

    /// Validate against the requested level and rebuild the deck
    pub fn into_deck(self, expected_level: &str) -> Result<RestoredSession, DataIntegrityError> {
        if self.level != expected_level {
            return Err(DataIntegrityError::SnapshotLevelMismatch {
                expected: expected_level.to_string(),
                found: self.level,
            });
        }

        let deck = Deck::from_cards(self.level, self.deck)?;

        let current_id = self
            .current_id
            .filter(|id| deck.get(id).is_some())
            .or_else(|| deck.cards().get(self.current_index).map(|c| c.id().to_string()));
        let last_shown_id = self.last_shown_id.filter(|id| deck.get(id).is_some());

        Ok(RestoredSession {
            deck,
            current_id,
            last_shown_id,
        })
    }
}

/// Deck and cursor recovered from a snapshot
#[derive(Debug, Clone)]
pub struct RestoredSession {
    pub deck: Deck,
    pub current_id: Option<CardId>,
    pub last_shown_id: Option<CardId>,
}

/// Key/value persistence for session snapshots
pub trait SessionStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn write(&mut self, key: &str, blob: &str) -> Result<(), StoreError>;

    fn load(&self, key: &str) -> Result<Option<SessionSnapshot>, StoreError> {
        match self.read(key)? {
            Some(blob) => SessionSnapshot::from_json(&blob).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, key: &str, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        let blob = snapshot.to_json()?;
        self.write(key, &blob)
    }
}

/// In-process store, used by tests and headless drivers
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl SessionStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
