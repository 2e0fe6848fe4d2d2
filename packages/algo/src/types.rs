//! Common Types and Constants
//!
//! Shared data structures used across the scheduling modules.

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Interval of a card that has never been answered, and of any missed card
pub const INITIAL_INTERVAL: u32 = 1;

/// Interval granted when a new card is answered correctly on first sight
pub const KNOWN_ON_FIRST_SIGHT_INTERVAL: u32 = 16;

/// Lowest interval classified as `Reviewing`
pub const REVIEWING_THRESHOLD: u32 = 3;

/// Lowest interval classified as `Mastered`
pub const MASTERED_THRESHOLD: u32 = 7;

/// Default vocabulary page size for one level
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Prefix of the persisted session key
pub const SESSION_KEY_PREFIX: &str = "flashcardSession_";

// ==================== Identifiers ====================

/// Stable card identifier (the catalog row id)
pub type CardId = String;

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

// ==================== Category ====================

/// Learning category of a card
///
/// Always derived from `(is_new, interval)` through [`Category::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    New,
    Learning,
    Reviewing,
    Mastered,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::New,
        Category::Learning,
        Category::Reviewing,
        Category::Mastered,
    ];

    /// Category implied by the scheduling fields of a card
    pub fn classify(is_new: bool, interval: u32) -> Self {
        if is_new {
            Category::New
        } else if interval < REVIEWING_THRESHOLD {
            Category::Learning
        } else if interval < MASTERED_THRESHOLD {
            Category::Reviewing
        } else {
            Category::Mastered
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" => Some(Category::New),
            "learning" => Some(Category::Learning),
            "reviewing" => Some(Category::Reviewing),
            "mastered" => Some(Category::Mastered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::New => "new",
            Category::Learning => "learning",
            Category::Reviewing => "reviewing",
            Category::Mastered => "mastered",
        }
    }
}

// ==================== Tests ====================
