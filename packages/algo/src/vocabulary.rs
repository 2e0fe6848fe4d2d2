//! Vocabulary Records and Deck Initialization
//!
//! The vocabulary source hands over loosely typed rows
//! ([`RawVocabularyEntry`]). They cross into the engine through exactly one
//! strict boundary, [`parse_entries`], which yields fully typed
//! [`VocabularyEntry`] values or a [`DataIntegrityError`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::deck::Deck;
use crate::error::DataIntegrityError;
use crate::sanitize::{require_present, require_text};
use crate::types::{CardId, Category};

/// Catalog row as delivered by the vocabulary source, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVocabularyEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub german: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

/// Validated catalog row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: CardId,
    pub german: String,
    pub english: String,
    pub example: String,
    /// Catalog-side category; not used for scheduling
    pub category: Category,
    pub level: String,
}

impl VocabularyEntry {
    /// Parse one row; `index` is its position in the fetched page
    pub fn parse(index: usize, raw: &RawVocabularyEntry) -> Result<Self, DataIntegrityError> {
        let id = require_text(index, "id", raw.id.as_deref())?;
        let german = require_text(index, "german", raw.german.as_deref())?;
        let english = require_text(index, "english", raw.english.as_deref())?;
        let example = require_present(index, "example", raw.example.as_deref())?;
        let category_raw = require_text(index, "category", raw.category.as_deref())?;
        let level = require_text(index, "level", raw.level.as_deref())?;

        let category =
            Category::from_str(category_raw).ok_or_else(|| DataIntegrityError::UnknownCategory {
                index,
                value: category_raw.to_string(),
            })?;

        Ok(Self {
            id: id.to_string(),
            german: german.to_string(),
            english: english.to_string(),
            example: example.to_string(),
            category,
            level: level.to_string(),
        })
    }
}

/// Parse a fetched page, failing on the first malformed row
pub fn parse_entries(raw: &[RawVocabularyEntry]) -> Result<Vec<VocabularyEntry>, DataIntegrityError> {
    raw.iter()
        .enumerate()
        .map(|(index, row)| VocabularyEntry::parse(index, row))
        .collect()
}

/// Card State Initializer
///
/// Builds the deck for `level` with every card new. Entries must belong to
/// `level`, carry non-blank text and unique ids.
pub fn init_deck(level: &str, entries: &[VocabularyEntry]) -> Result<Deck, DataIntegrityError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());
    let mut cards = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        require_text(index, "id", Some(&entry.id))?;
        require_text(index, "german", Some(&entry.german))?;
        require_text(index, "english", Some(&entry.english))?;

        if entry.level != level {
            return Err(DataIntegrityError::LevelMismatch {
                index,
                expected: level.to_string(),
                found: entry.level.clone(),
            });
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(DataIntegrityError::DuplicateId(entry.id.clone()));
        }

        cards.push(Card::new(
            entry.id.clone(),
            entry.german.clone(),
            entry.english.clone(),
            entry.example.clone(),
        ));
    }

    Ok(Deck::from_parts(level.to_string(), cards))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn entry(id: &str, level: &str) -> VocabularyEntry {
        VocabularyEntry {
            id: id.to_string(),
            german: format!("Wort {id}"),
            english: format!("word {id}"),
            example: format!("Das ist Wort {id}."),
            category: Category::Learning,
            level: level.to_string(),
        }
    }

    fn raw(id: &str) -> RawVocabularyEntry {
        RawVocabularyEntry {
            id: Some(id.to_string()),
            german: Some("laufen".to_string()),
            english: Some("to run".to_string()),
            example: Some("Ich laufe.".to_string()),
            category: Some("learning".to_string()),
            level: Some("B1.1 (1-30)".to_string()),
        }
    }

    #[test]
    fn test_parse_valid_row() {
        let parsed = VocabularyEntry::parse(0, &raw("12")).unwrap();
        assert_eq!(parsed.id, "12");
        assert_eq!(parsed.german, "laufen");
        assert_eq!(parsed.category, Category::Learning);
    }

    #[test]
    fn test_parse_missing_field_reports_index() {
        let mut row = raw("1");
        row.english = None;
        let err = parse_entries(&[raw("0"), row]).unwrap_err();
        assert_eq!(
            err,
            DataIntegrityError::MissingField {
                index: 1,
                field: "english"
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let mut row = raw("1");
        row.category = Some("forgotten".to_string());
        assert!(matches!(
            VocabularyEntry::parse(0, &row),
            Err(DataIntegrityError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_parse_allows_empty_example() {
        let mut row = raw("1");
        row.example = Some(String::new());
        assert!(VocabularyEntry::parse(0, &row).is_ok());
    }

    #[test]
    fn test_raw_entry_from_json_with_missing_keys() {
        let rows: Vec<RawVocabularyEntry> =
            serde_json::from_str(r#"[{"id":"1","german":"gehen"}]"#).unwrap();
        assert!(matches!(
            parse_entries(&rows),
            Err(DataIntegrityError::MissingField { field: "english", .. })
        ));
    }

    #[test]
    fn test_init_deck_all_new() {
        let entries = vec![entry("1", "A1"), entry("2", "A1"), entry("3", "A1")];
        let deck = init_deck("A1", &entries).unwrap();

        assert_eq!(deck.level(), "A1");
        assert_eq!(deck.len(), 3);
        for card in deck.cards() {
            assert!(card.is_new());
            assert_eq!(card.category(), Category::New);
            assert_eq!(card.interval(), 1);
            assert_eq!(card.last_shown_at(), None);
        }
        assert_eq!(deck.cards()[1].native_text(), "Wort 2");
        assert_eq!(deck.cards()[1].translated_text(), "word 2");
    }

    #[test]
    fn test_init_deck_empty_is_not_an_error() {
        let deck = init_deck("A1", &[]).unwrap();
        assert!(deck.is_empty());
    }

    #[test]
    fn test_init_deck_rejects_duplicate_ids() {
        let entries = vec![entry("1", "A1"), entry("1", "A1")];
        assert_eq!(
            init_deck("A1", &entries).unwrap_err(),
            DataIntegrityError::DuplicateId("1".to_string())
        );
    }

    #[test]
    fn test_init_deck_rejects_blank_text() {
        let mut bad = entry("1", "A1");
        bad.english = "  ".to_string();
        assert!(matches!(
            init_deck("A1", &[bad]),
            Err(DataIntegrityError::BlankField { field: "english", .. })
        ));
    }

    #[test]
    fn test_init_deck_rejects_foreign_level() {
        let entries = vec![entry("1", "A1"), entry("2", "A2")];
        assert!(matches!(
            init_deck("A1", &entries),
            Err(DataIntegrityError::LevelMismatch { index: 1, .. })
        ));
    }
}
