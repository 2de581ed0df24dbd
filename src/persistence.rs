//! High-score persistence
//!
//! The session only ever persists one integer. The store is an injected
//! interface so the sim and driver can be exercised against an in-memory
//! fake.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the persisted high score lives
pub trait HighScoreStore {
    /// Read the stored high score; absent or unreadable stores yield 0
    fn load(&self) -> u32;
    /// Write a new high score (best effort; failures are logged)
    fn save(&mut self, high_score: u32);
}

/// JSON payload under the store's key
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct HighScorePayload {
    high_score: u32,
}

/// Single-key JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<HighScorePayload>(&json) {
                Ok(payload) => {
                    log::info!("Loaded high score {}", payload.high_score);
                    payload.high_score
                }
                Err(e) => {
                    log::warn!("Corrupt high score file {}: {}", self.path.display(), e);
                    0
                }
            },
            Err(_) => {
                log::info!("No high score file, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, high_score: u32) {
        let payload = HighScorePayload { high_score };
        match serde_json::to_string(&payload) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    log::warn!("Failed to save high score: {e}");
                } else {
                    log::info!("High score saved ({high_score})");
                }
            }
            Err(e) => log::warn!("Failed to encode high score: {e}"),
        }
    }
}

/// In-memory fake for tests
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    pub value: u32,
}

impl MemoryStore {
    pub fn with_value(value: u32) -> Self {
        Self { value }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, high_score: u32) {
        self.value = high_score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load(), 0);
        store.save(12);
        assert_eq!(store.load(), 12);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join("math_snake_hiscore_test.json");
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load(), 0);
        store.save(37);
        assert_eq!(store.load(), 37);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_corrupt_payload_reads_zero() {
        let path = std::env::temp_dir().join("math_snake_hiscore_corrupt.json");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert_eq!(store.load(), 0);
        let _ = std::fs::remove_file(&path);
    }
}
