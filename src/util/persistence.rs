//! Browser localStorage helpers for durable session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize hydrate-only read/write behavior so the auth
//! store and config cache can persist under well-known keys without
//! repeating web-sys glue. Everything stored here is an advisory cache;
//! the backend remains the source of truth.
//!
//! Tokens persist in every run mode except production-like hosts, where
//! the session deliberately lives only in memory.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "healthpass_token";

/// Storage key for the cached frontend configuration blob.
pub const CONFIG_KEY: &str = "healthpass_config";

/// Hostname suffix that marks a production-like run.
const PRODUCTION_HOST_SUFFIX: &str = "healthpass.example";

/// Whether a host should be treated as production-like.
#[must_use]
pub fn is_production_host(host: &str) -> bool {
    host == PRODUCTION_HOST_SUFFIX || host.ends_with(&format!(".{PRODUCTION_HOST_SUFFIX}"))
}

/// Whether token persistence is enabled for the current run mode.
///
/// Returns `false` on the server and on production-like hosts.
pub fn session_persistence_enabled() -> bool {
    #[cfg(feature = "hydrate")]
    {
        let host = web_sys::window()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_default();
        !is_production_host(&host)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Load a raw string from `localStorage` for `key`.
pub fn load_string(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        storage.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a raw string to `localStorage` for `key`.
pub fn save_string(key: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, value);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

/// Remove `key` from `localStorage`. Safe to call when the key is absent.
pub fn remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = load_string(key)?;
    serde_json::from_str(&raw).ok()
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    save_string(key, &raw);
}
