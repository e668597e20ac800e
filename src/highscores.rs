//! Best score persistence
//!
//! A single integer under one storage key. Missing, corrupt or unreadable
//! values read as 0; failed writes are logged and otherwise ignored.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "starHunterMathHighScore";

    pub fn new(score: u64) -> Self {
        Self { score }
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Record a score if it beats the best. Returns true when it did.
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.score = score;
        true
    }

    /// Load the best score, falling back to 0 on any failure
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(score) => {
                    log::info!("Loaded high score {}", score);
                    Self::new(score)
                }
                Err(err) => {
                    log::warn!("Ignoring corrupt high score '{}': {}", raw, err);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not load high score: {:#}", err);
                Self::default()
            }
        }
    }

    /// Persist the best score; failures are logged only
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.score.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.score),
            Err(err) => log::warn!("Could not save high score: {:#}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use crate::platform::storage::tests::BrokenStore;

    #[test]
    fn test_qualifies() {
        let hs = HighScore::new(100);
        assert!(!hs.qualifies(99));
        assert!(!hs.qualifies(100));
        assert!(hs.qualifies(101));
    }

    #[test]
    fn test_submit() {
        let mut hs = HighScore::default();
        assert!(!hs.submit(0));
        assert!(hs.submit(40));
        assert!(!hs.submit(30));
        assert_eq!(hs.score, 40);
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).score, 0);
        HighScore::new(250).save(&mut store);
        assert_eq!(HighScore::load(&store).score, 250);
    }

    #[test]
    fn test_corrupt_value_reads_as_zero() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "lots").unwrap();
        assert_eq!(HighScore::load(&store), HighScore::default());
    }

    #[test]
    fn test_broken_storage_is_tolerated() {
        let mut store = BrokenStore;
        assert_eq!(HighScore::load(&store).score, 0);
        // Must not panic
        HighScore::new(10).save(&mut store);
    }
}
