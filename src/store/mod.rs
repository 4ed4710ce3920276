//! Key-value persistence port
//!
//! Application state is persisted as a handful of JSON-encoded records,
//! each under a fixed key. The controller only ever talks to the
//! [`KeyValueStore`] trait; the file-backed store is used at runtime and
//! the in-memory store in tests.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key for [`crate::config::preferences::UserPreferences`]
pub const PREFERENCES_KEY: &str = "learningPreferences";
/// Key for [`crate::config::progress::LessonCompletionMap`]
pub const LESSON_PROGRESS_KEY: &str = "lessonProgress";
/// Key for the current lesson id
pub const CURRENT_LESSON_KEY: &str = "currentLessonId";

/// Errors from the persistence port
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage failed
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored value couldn't be decoded (or a value couldn't be encoded)
    #[error("Malformed value for '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string key-value store
pub trait KeyValueStore {
    /// Read the raw value for `key`, if present
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write the raw value for `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read and decode a JSON record
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Malformed { key: key.to_string(), source }),
        None => Ok(None),
    }
}

/// Read a JSON record, falling back to `T::default()` when it's missing or unreadable.
///
/// Failures are logged and never propagated.
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("Error loading saved {}: {}", key, e);
            T::default()
        }
    }
}

/// Encode and write a JSON record
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)
        .map_err(|source| StoreError::Malformed { key: key.to_string(), source })?;
    store.set(key, &raw)
}
