// ScoreStore: best move count and best time per board size
//
// Two maps keyed by size-key ("4x4"), each persisted whole under its own key.
// A stored best is only ever replaced by a strictly better value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::StorageKeys;
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::types::{size_key, Result};

/// Best results for one board size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub best_moves: Option<u32>,
    pub best_time_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    results_key: String,
    best_times_key: String,
    best_moves: BTreeMap<String, u32>,
    best_times: BTreeMap<String, u64>,
}

impl ScoreStore {
    /// Read both maps from `store`, starting empty where a record is missing or corrupt
    pub fn load(store: &dyn KeyValueStore, keys: &StorageKeys) -> ScoreStore {
        ScoreStore {
            best_moves: load_json(store, &keys.results).unwrap_or_default(),
            best_times: load_json(store, &keys.best_times).unwrap_or_default(),
            results_key: keys.results.clone(),
            best_times_key: keys.best_times.clone(),
        }
    }

    pub fn best(&self, size: usize) -> ScoreRecord {
        let key = size_key(size);
        ScoreRecord {
            best_moves: self.best_moves.get(&key).copied(),
            best_time_seconds: self.best_times.get(&key).copied(),
        }
    }

    /// Fold a finished game into the bests for `size` and persist both maps
    pub fn record_result(
        &mut self,
        store: &mut dyn KeyValueStore,
        size: usize,
        move_count: u32,
        elapsed_seconds: u64,
    ) -> Result<ScoreRecord> {
        let key = size_key(size);

        let moves = self.best_moves.entry(key.clone()).or_insert(move_count);
        if move_count < *moves {
            log::info!("new best move count for {}: {} (was {})", key, move_count, moves);
            *moves = move_count;
        }

        let time = self.best_times.entry(key).or_insert(elapsed_seconds);
        if elapsed_seconds < *time {
            *time = elapsed_seconds;
        }

        // Attempt both writes even if the first one fails
        let saved = save_json(store, &self.results_key, &self.best_moves);
        saved.and(save_json(store, &self.best_times_key, &self.best_times))?;

        Ok(self.best(size))
    }
}

/// `M:SS`, or `N/A` when there is no time yet
pub fn format_best_time(seconds: Option<u64>) -> String {
    match seconds {
        Some(s) => format!("{}:{:02}", s / 60, s % 60),
        None => "N/A".to_string(),
    }
}
