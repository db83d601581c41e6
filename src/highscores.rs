//! High score persistence
//!
//! A single integer, read when the menu shows and written when a run beats
//! it. Storage is injected through [`HighScoreStore`] so the game never
//! touches a global store directly. Unreadable values count as 0.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure writing the high score
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score storage unavailable")]
    Unavailable,
    #[error("failed to write high score: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the high score lives
pub trait HighScoreStore {
    /// Stored high score; missing or corrupt values read as 0
    fn read(&self) -> u32;

    fn write(&mut self, score: u32) -> Result<(), StoreError>;

    /// Forget the stored high score
    fn reset(&mut self) -> Result<(), StoreError> {
        self.write(0)
    }
}

/// Outcome of reporting a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    /// Stored value before this run
    pub previous: u32,
    /// Best of the stored value and this run
    pub best: u32,
    /// This run strictly beat the stored value
    pub is_new_record: bool,
}

/// Report a run's final score; writes only when the stored value is beaten
pub fn record_final_score<S: HighScoreStore + ?Sized>(
    store: &mut S,
    final_score: u32,
) -> Result<HighScoreRecord, StoreError> {
    let previous = store.read();
    let is_new_record = final_score > previous;
    if is_new_record {
        store.write(final_score)?;
        log::info!("New high score: {} (was {})", final_score, previous);
    }
    Ok(HighScoreRecord {
        previous,
        best: previous.max(final_score),
        is_new_record,
    })
}

/// Parse a stored value, treating anything unusable as 0
pub fn parse_stored(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or_else(|_| {
        log::warn!("Ignoring corrupt high score {:?}", raw);
        0
    })
}

/// In-memory store (tests, native sessions without a file)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self { value: Some(value) }
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn write(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = Some(score);
        Ok(())
    }
}

/// Plain-text file holding the bare integer (native)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn read(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => parse_stored(&raw),
            Err(_) => 0,
        }
    }

    fn write(&mut self, score: u32) -> Result<(), StoreError> {
        std::fs::write(&self.path, score.to_string())?;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "color_shift_dash_high_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn read(&self) -> u32 {
        match Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten()) {
            Some(raw) => parse_stored(&raw),
            None => 0,
        }
    }

    fn write(&mut self, score: u32) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .map_err(|_| StoreError::Unavailable)
    }

    fn reset(&mut self) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .remove_item(Self::STORAGE_KEY)
            .map_err(|_| StoreError::Unavailable)?;
        log::info!("High score cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_reads_zero() {
        assert_eq!(MemoryStore::new().read(), 0);
    }

    #[test]
    fn test_record_beats_previous() {
        let mut store = MemoryStore::with_value(10);
        let record = record_final_score(&mut store, 12).unwrap();
        assert_eq!(
            record,
            HighScoreRecord {
                previous: 10,
                best: 12,
                is_new_record: true
            }
        );
        assert_eq!(store.read(), 12);
    }

    #[test]
    fn test_tie_is_not_a_record() {
        let mut store = MemoryStore::with_value(10);
        let record = record_final_score(&mut store, 10).unwrap();
        assert!(!record.is_new_record);
        assert_eq!(record.best, 10);
        assert_eq!(store.read(), 10);
    }

    #[test]
    fn test_lower_score_leaves_store() {
        let mut store = MemoryStore::with_value(10);
        let record = record_final_score(&mut store, 3).unwrap();
        assert!(!record.is_new_record);
        assert_eq!(record.best, 10);
        assert_eq!(store.read(), 10);
    }

    #[test]
    fn test_zero_score_on_empty_store() {
        let mut store = MemoryStore::new();
        let record = record_final_score(&mut store, 0).unwrap();
        assert!(!record.is_new_record);
        assert_eq!(record.best, 0);
    }

    #[test]
    fn test_parse_stored() {
        assert_eq!(parse_stored("42"), 42);
        assert_eq!(parse_stored(" 7\n"), 7);
        assert_eq!(parse_stored("abc"), 0);
        assert_eq!(parse_stored("-3"), 0);
        assert_eq!(parse_stored(""), 0);
    }

    #[test]
    fn test_reset() {
        let mut store = MemoryStore::with_value(50);
        store.reset().unwrap();
        assert_eq!(store.read(), 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store() {
        let path = std::env::temp_dir().join(format!(
            "color_shift_dash_test_{}.txt",
            std::process::id()
        ));
        let mut store = FileStore::new(&path);
        store.reset().unwrap();
        assert_eq!(store.read(), 0);

        record_final_score(&mut store, 17).unwrap();
        assert_eq!(store.read(), 17);

        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(store.read(), 0);

        store.reset().unwrap();
        assert!(!path.exists());
    }
}
