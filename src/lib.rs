// SlideTile Core - Rust/WASM Implementation
// Copyright 2025 The SlideTile Contributors
// Licensed under the Apache License, Version 2.0

//! # SlideTile Core (Rust/WASM)
//!
//! Logic core of an N×N sliding-tile puzzle, compiled to WebAssembly and driven
//! by a thin JavaScript page that renders board snapshots and forwards input.
//!
//! ## Architecture
//!
//! - **SeededRng**: sine-hash generator producing reproducible permutations
//! - **Solvability**: inversion-parity check for N×N boards
//! - **PuzzleState**: tiles, shuffle, moves, win detection
//! - **ScoreStore**: best moves and best time per board size
//! - **DailyChallengeTracker**: date-derived seed and solve streak
//! - **PuzzleSession**: one running game, timer included
//! - **Game**: the `#[wasm_bindgen]` facade the page talks to
//!
//! Shared links carry `?seed=<n>&size=<n>`; the same seed and size always
//! produce the same board.

use wasm_bindgen::prelude::*;

// Module declarations
mod config;
mod daily;
mod game;
mod puzzle;
mod rng;
mod scores;
mod session;
mod solvability;
mod storage;
mod timer;
mod types;
mod url;
mod utils;

// Re-exports
pub use config::{PuzzleConfig, StorageKeys};
pub use daily::{daily_seed, DailyChallenge, DailyChallengeTracker, StreakRecord, COMPLETION_PAGE};
pub use game::Game;
pub use puzzle::{col_of, row_of, BoardSnapshot, PuzzleState, Tile, TileView};
pub use rng::SeededRng;
pub use scores::{format_best_time, ScoreRecord, ScoreStore};
pub use session::{MoveOutcome, PuzzleSession};
pub use solvability::{count_inversions, is_solvable, is_solvable_values};
pub use storage::{load_json, save_json, KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use timer::Stopwatch;
pub use types::{size_key, Direction, PuzzleError, Result, Seed, Timestamp};
pub use url::UrlParams;

// WASM initialization
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();

    // Native hosts install their own logger
    #[cfg(target_arch = "wasm32")]
    wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
    log::set_max_level(log::LevelFilter::Info);
}

/// Change how much the core logs (`"error"`, `"warn"`, `"info"`, `"debug"`)
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) {
    log::set_max_level(parse_log_level(level));
}

/// Unknown names fall back to `Info`
fn parse_log_level(name: &str) -> log::LevelFilter {
    name.parse().unwrap_or(log::LevelFilter::Info)
}

// Version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check a board given as a JSON array of values in position order
#[wasm_bindgen(js_name = isSolvable)]
pub fn is_solvable_json(values_json: &str, size: usize) -> Result<bool> {
    let values: Vec<usize> = serde_json::from_str(values_json)?;
    let board = PuzzleState::from_values(&values, size)?;
    Ok(is_solvable(board.tiles(), size))
}

/// Seed of today's daily challenge
#[wasm_bindgen(js_name = dailySeed)]
pub fn daily_seed_today() -> f64 {
    daily_seed(utils::today()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug"), log::LevelFilter::Debug);
        assert_eq!(parse_log_level("WARN"), log::LevelFilter::Warn);
        assert_eq!(parse_log_level("off"), log::LevelFilter::Off);
        assert_eq!(parse_log_level("loud"), log::LevelFilter::Info);
    }

    #[test]
    fn test_is_solvable_json() {
        assert_eq!(is_solvable_json("[1,2,3,4,5,6,7,8,9]", 3), Ok(true));
        assert_eq!(is_solvable_json("[2,1,3,4,5,6,7,8,9]", 3), Ok(false));
        assert!(is_solvable_json("[1,2,3]", 3).is_err());
        assert!(is_solvable_json("nope", 3).is_err());
    }

    #[test]
    fn test_daily_seed_today_is_plausible() {
        let seed = daily_seed_today();
        assert!(seed > 2000.0);
    }
}
