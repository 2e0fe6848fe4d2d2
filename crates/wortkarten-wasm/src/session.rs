use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wortkarten_algo::{
    AnswerOutcome, Card, DeckSession, LevelLoad, LoadOutcome, LoadTicket,
    RawVocabularyEntry,
};

use crate::storage::LocalStorageStore;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LevelView {
    restored: bool,
    ticket: Option<LoadTicket>,
}

impl From<LevelLoad> for LevelView {
    fn from(load: LevelLoad) -> Self {
        match load {
            LevelLoad::Restored => Self {
                restored: true,
                ticket: None,
            },
            LevelLoad::NeedsFetch(ticket) => Self {
                restored: false,
                ticket: Some(ticket),
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerView {
    card: Card,
    next_card_id: Option<String>,
    /// Snapshot write failure; the answer itself was applied
    persist_error: Option<String>,
}

impl From<AnswerOutcome> for AnswerView {
    fn from(outcome: AnswerOutcome) -> Self {
        Self {
            card: outcome.answered.card,
            next_card_id: outcome.answered.next_card_id,
            persist_error: outcome.persist_error.map(|e| e.to_string()),
        }
    }
}

/// Flashcard session persisted in `localStorage`
#[wasm_bindgen]
pub struct FlashcardSession {
    inner: DeckSession<LocalStorageStore, ChaCha8Rng>,
}

#[wasm_bindgen]
impl FlashcardSession {
    /// `seed` makes card selection reproducible; omit it for a random draw
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> FlashcardSession {
        let seed = seed.map(seed_from).unwrap_or_else(random_seed);
        Self {
            inner: DeckSession::new(LocalStorageStore::new(), ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Returns `{restored, ticket}`; fetch the level and call `completeLoad`
    /// with the ticket when `restored` is false
    #[wasm_bindgen(js_name = selectLevel)]
    pub fn select_level(&mut self, level: &str) -> Result<JsValue, JsError> {
        to_js(&LevelView::from(self.inner.select_level(level)))
    }

    /// Install a fetched page; `false` when the ticket was superseded
    ///
    /// A page that cannot be decoded or parsed still ends the load, so
    /// `isLoading` turns false and the caller shows the error.
    #[wasm_bindgen(js_name = completeLoad)]
    pub fn complete_load(&mut self, ticket: JsValue, entries: JsValue) -> Result<bool, JsError> {
        let ticket: LoadTicket = serde_wasm_bindgen::from_value(ticket)?;
        let rows: Vec<RawVocabularyEntry> = match serde_wasm_bindgen::from_value(entries) {
            Ok(rows) => rows,
            Err(err) => {
                self.inner.fail_load(&ticket);
                return Err(err.into());
            }
        };

        let outcome = self
            .inner
            .complete_load_raw(&ticket, &rows)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(outcome == LoadOutcome::Applied)
    }

    /// End a load whose fetch failed, e.g. on a network error
    #[wasm_bindgen(js_name = failLoad)]
    pub fn fail_load(&mut self, ticket: JsValue) -> Result<bool, JsError> {
        let ticket: LoadTicket = serde_wasm_bindgen::from_value(ticket)?;
        Ok(self.inner.fail_load(&ticket) == LoadOutcome::Applied)
    }

    pub fn answer(&mut self, card_id: &str, was_correct: bool) -> Result<JsValue, JsError> {
        let now = js_sys::Date::now() as i64;
        let outcome = self
            .inner
            .answer(card_id, was_correct, now)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&AnswerView::from(outcome))
    }

    #[wasm_bindgen(js_name = currentCard)]
    pub fn current_card(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.current_card())
    }

    pub fn progress(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.progress())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.snapshot())
    }

    #[wasm_bindgen(getter)]
    pub fn level(&self) -> Option<String> {
        self.inner.level().map(str::to_string)
    }

    #[wasm_bindgen(getter, js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    #[wasm_bindgen(getter, js_name = storageAvailable)]
    pub fn storage_available(&self) -> bool {
        self.inner.store().is_available()
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(JsError::from)
}

fn seed_from(value: f64) -> u64 {
    if value.is_finite() {
        value.abs().trunc() as u64
    } else {
        0
    }
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_from_handles_odd_numbers() {
        assert_eq!(seed_from(42.9), 42);
        assert_eq!(seed_from(-7.0), 7);
        assert_eq!(seed_from(f64::NAN), 0);
        assert_eq!(seed_from(f64::INFINITY), 0);
    }

    #[test]
    fn test_level_view_carries_ticket_only_for_fetch() {
        let restored = LevelView::from(LevelLoad::Restored);
        assert!(restored.restored);
        assert!(restored.ticket.is_none());

        let ticket = LoadTicket {
            level: "A1 (1-30)".to_string(),
            generation: 3,
        };
        let fetch = LevelView::from(LevelLoad::NeedsFetch(ticket.clone()));
        assert!(!fetch.restored);
        assert_eq!(fetch.ticket, Some(ticket));
    }
}
