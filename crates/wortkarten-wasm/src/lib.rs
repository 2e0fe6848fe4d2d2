mod session;
mod storage;

pub use session::*;
pub use storage::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// `localStorage` key of a level's session, e.g. `flashcardSession_A1 (1-30)`
#[wasm_bindgen(js_name = sessionKey)]
pub fn session_key(level: &str) -> String {
    wortkarten_algo::session_key(level)
}

/// Level opened first for a base level, e.g. `B1.1` → `B1.1 (1-30)`
#[wasm_bindgen(js_name = defaultSublevel)]
pub fn default_sublevel(base: &str) -> String {
    wortkarten_algo::default_sublevel(base)
}

#[wasm_bindgen(js_name = sortLevels)]
pub fn sort_levels(mut levels: Vec<String>) -> Vec<String> {
    wortkarten_algo::sort_levels(&mut levels);
    levels
}
