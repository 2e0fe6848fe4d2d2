use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wortkarten_algo::{SessionStore, StoreError};

/// Session store over the browser's `localStorage`
///
/// Reached through `globalThis.localStorage`, so the same build works in
/// pages and in test runners that install a storage shim.
pub struct LocalStorageStore {
    storage: Option<JsValue>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = Reflect::get(&js_sys::global(), &JsValue::from_str("localStorage"))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null());
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn method(&self, name: &str) -> Result<(&JsValue, Function), String> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| "localStorage is not available".to_string())?;
        let function = Reflect::get(storage, &JsValue::from_str(name))
            .map_err(describe)?
            .dyn_into::<Function>()
            .map_err(|_| format!("localStorage.{name} is not a function"))?;
        Ok((storage, function))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for LocalStorageStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let (storage, get_item) = self.method("getItem").map_err(StoreError::Unavailable)?;
        let value = get_item
            .call1(storage, &JsValue::from_str(key))
            .map_err(|e| StoreError::Read(describe(e)))?;
        Ok(value.as_string())
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        let (storage, set_item) = self.method("setItem").map_err(StoreError::Unavailable)?;
        set_item
            .call2(storage, &JsValue::from_str(key), &JsValue::from_str(blob))
            .map_err(|e| StoreError::Write(describe(e)))?;
        Ok(())
    }
}

fn describe(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
