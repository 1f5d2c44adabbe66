// Configuration for SlideTile Core

use serde::{Deserialize, Serialize};

use crate::types::{PuzzleError, Result, Seed};

/// Storage keys for the four persisted records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageKeys {
    /// size-key → best move count
    pub results: String,
    /// size-key → best time in seconds
    pub best_times: String,
    pub daily_seed: String,
    pub daily_streak: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys {
            results: "puzzleResults".to_string(),
            best_times: "puzzleBestTimes".to_string(),
            daily_seed: "dailySeed".to_string(),
            daily_streak: "dailyStreak".to_string(),
        }
    }
}

/// Tunables for a puzzle session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PuzzleConfig {
    pub default_size: usize,
    pub min_size: usize,
    pub max_size: usize,
    /// Edge length of one tile in pixels, used for renderer coordinates
    pub tile_px: usize,
    pub max_shuffle_attempts: u32,
    /// Board size used by the daily challenge link
    pub daily_size: usize,
    /// Fresh random seeds are drawn from `[0, random_seed_bound)`
    pub random_seed_bound: Seed,
    pub storage_keys: StorageKeys,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            default_size: 3,
            min_size: 2,
            max_size: 6,
            tile_px: 100,
            max_shuffle_attempts: 10_000,
            daily_size: 4,
            random_seed_bound: 1_000_000,
            storage_keys: StorageKeys::default(),
        }
    }
}

impl PuzzleConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<PuzzleConfig> {
        let config: PuzzleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_size < 2 {
            return Err(PuzzleError::InvalidSize(self.min_size));
        }
        if self.min_size > self.max_size {
            return Err(PuzzleError::InvalidSize(self.max_size));
        }
        for size in [self.default_size, self.daily_size] {
            if !self.accepts_size(size) {
                return Err(PuzzleError::InvalidSize(size));
            }
        }
        if self.tile_px == 0 || self.max_shuffle_attempts == 0 || self.random_seed_bound <= 0 {
            return Err(PuzzleError::SerializationError(
                "tilePx, maxShuffleAttempts and randomSeedBound must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn accepts_size(&self, size: usize) -> bool {
        (self.min_size..=self.max_size).contains(&size)
    }
}
