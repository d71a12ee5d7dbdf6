//! Key/value storage for settings and records
//!
//! LocalStorage in the browser. Native builds keep values in a per-thread
//! map so the same code paths run in tests and the headless demo.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn load_string(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn save_string(key: &str, value: &str) -> Result<()> {
    use crate::error::Error;

    let storage = local_storage().ok_or(Error::StorageUnavailable)?;
    storage
        .set_item(key, value)
        .map_err(|_| Error::StorageWrite(key.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static MEMORY: std::cell::RefCell<std::collections::HashMap<String, String>> =
        std::cell::RefCell::new(std::collections::HashMap::new());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_string(key: &str) -> Option<String> {
    MEMORY.with(|m| m.borrow().get(key).cloned())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_string(key: &str, value: &str) -> Result<()> {
    MEMORY.with(|m| {
        m.borrow_mut().insert(key.to_string(), value.to_string());
    });
    Ok(())
}

/// Missing keys are `Ok(None)`; unreadable JSON is an error
pub fn load_json<T: DeserializeOwned>(key: &str) -> Result<Option<T>> {
    match load_string(key) {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    save_string(key, &json)
}
