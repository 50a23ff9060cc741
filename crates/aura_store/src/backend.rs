//! String-keyed storage backends.
//!
//! `get` returns `None` for anything that cannot be read — missing key,
//! missing file, IO error. Write failures are logged and swallowed:
//! persistence is best-effort by contract.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Minimal string key-value store, the shape of browser local storage.
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

// ============================================================================
// MemoryBackend
// ============================================================================

/// In-memory backend for tests and hosts without persistent storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.map.lock() {
            map.remove(key);
        }
    }
}

// ============================================================================
// JsonFileBackend
// ============================================================================

/// Single-file backend: one JSON object mapping keys to string values,
/// loaded on open and written through on every put/remove.
pub struct JsonFileBackend {
    path: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl JsonFileBackend {
    /// Open the store at `path`. A missing or unparseable file starts
    /// empty rather than failing.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let cache = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "store file unparseable, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            cache: Mutex::new(cache),
        }
    }

    fn persist(&self, cache: &HashMap<String, String>) {
        let json = match serde_json::to_string_pretty(cache) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize store");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write store file");
        }
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key.to_string(), value.to_string());
            self.persist(&cache);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.remove(key);
            self.persist(&cache);
        }
    }
}
