//! Card Model
//!
//! A [`Card`] is one vocabulary item plus its scheduling state. The
//! scheduling fields are only written by the engine; everything outside the
//! crate reads them through accessors.

use serde::{Deserialize, Serialize};

use crate::error::DataIntegrityError;
use crate::types::{CardId, Category, Timestamp, INITIAL_INTERVAL};

/// Schedulable vocabulary card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CardRecord")]
pub struct Card {
    id: CardId,
    native_text: String,
    translated_text: String,
    example: String,
    pub(crate) category: Category,
    pub(crate) is_new: bool,
    pub(crate) interval: u32,
    pub(crate) last_shown_at: Option<Timestamp>,
}

impl Card {
    /// Fresh, never answered card
    pub(crate) fn new(
        id: impl Into<CardId>,
        native_text: impl Into<String>,
        translated_text: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            native_text: native_text.into(),
            translated_text: translated_text.into(),
            example: example.into(),
            category: Category::New,
            is_new: true,
            interval: INITIAL_INTERVAL,
            last_shown_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn native_text(&self) -> &str {
        &self.native_text
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn last_shown_at(&self) -> Option<Timestamp> {
        self.last_shown_at
    }

    pub fn is_mastered(&self) -> bool {
        self.category == Category::Mastered
    }
}

/// Unchecked wire form of a [`Card`], as found in persisted snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: CardId,
    pub native_text: String,
    pub translated_text: String,
    pub example: String,
    pub category: Category,
    pub is_new: bool,
    pub interval: u32,
    #[serde(default)]
    pub last_shown_at: Option<Timestamp>,
}

impl TryFrom<CardRecord> for Card {
    type Error = DataIntegrityError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let inconsistent = |reason| DataIntegrityError::InconsistentCard {
            id: record.id.clone(),
            reason,
        };

        if record.id.trim().is_empty() {
            return Err(inconsistent("blank id"));
        }
        if record.interval < INITIAL_INTERVAL {
            return Err(inconsistent("interval below 1"));
        }
        if record.category != Category::classify(record.is_new, record.interval) {
            return Err(inconsistent("category does not match interval"));
        }
        if record.is_new && (record.interval != INITIAL_INTERVAL || record.last_shown_at.is_some()) {
            return Err(inconsistent("new card carries review history"));
        }
        if record.native_text.trim().is_empty() || record.translated_text.trim().is_empty() {
            return Err(inconsistent("blank display text"));
        }

        Ok(Self {
            id: record.id,
            native_text: record.native_text,
            translated_text: record.translated_text,
            example: record.example,
            category: record.category,
            is_new: record.is_new,
            interval: record.interval,
            last_shown_at: record.last_shown_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CardRecord {
        CardRecord {
            id: "7".to_string(),
            native_text: "der Hund".to_string(),
            translated_text: "the dog".to_string(),
            example: "Der Hund bellt.".to_string(),
            category: Category::Reviewing,
            is_new: false,
            interval: 4,
            last_shown_at: Some(1_700_000_000_000),
        }
    }

    #[test]
    fn test_new_card_defaults() {
        let card = Card::new("1", "die Katze", "the cat", "");
        assert_eq!(card.category(), Category::New);
        assert!(card.is_new());
        assert_eq!(card.interval(), 1);
        assert_eq!(card.last_shown_at(), None);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let card = Card::new("1", "die Katze", "the cat", "Die Katze schläft.");
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["nativeText"], "die Katze");
        assert_eq!(json["translatedText"], "the cat");
        assert_eq!(json["isNew"], true);
        assert_eq!(json["category"], "new");
        assert!(json["lastShownAt"].is_null());
    }

    #[test]
    fn test_deserialize_valid_record() {
        let json = serde_json::to_string(&record()).unwrap();
        let card: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card.id(), "7");
        assert_eq!(card.interval(), 4);
        assert_eq!(card.category(), Category::Reviewing);
    }

    #[test]
    fn test_try_from_rejects_blank_id() {
        let mut r = record();
        r.id = "  ".to_string();
        assert_eq!(
            Card::try_from(r).unwrap_err(),
            DataIntegrityError::InconsistentCard {
                id: "  ".to_string(),
                reason: "blank id",
            }
        );
    }

    #[test]
    fn test_try_from_rejects_zero_interval() {
        let mut r = record();
        r.interval = 0;
        assert!(matches!(
            Card::try_from(r),
            Err(DataIntegrityError::InconsistentCard { .. })
        ));
    }

    #[test]
    fn test_try_from_rejects_category_drift() {
        let mut r = record();
        r.category = Category::Mastered;
        assert!(Card::try_from(r).is_err());
    }

    #[test]
    fn test_try_from_rejects_new_with_history() {
        let mut r = record();
        r.is_new = true;
        r.category = Category::New;
        r.interval = 1;
        assert!(Card::try_from(r).is_err());
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_json() {
        let json = r#"{"id":"1","nativeText":"a","translatedText":"b","example":"",
            "category":"mastered","isNew":false,"interval":2,"lastShownAt":5}"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
    }
}
