// Shared type definitions for SlideTile Core

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Timestamp in milliseconds since epoch
pub type Timestamp = i64;

/// Seed driving the deterministic tile permutation
pub type Seed = i64;

/// Result type for SlideTile operations
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Error types for SlideTile operations
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleError {
    #[error("No solvable permutation found for seed {seed} after {attempts} attempts")]
    ShuffleExhausted { seed: Seed, attempts: u32 },

    #[error("Invalid board size: {0}")]
    InvalidSize(usize),

    #[error("Board size limit reached: {max}x{max} is the largest puzzle")]
    SizeLimitReached { max: usize },

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Tile not found: {0}")]
    TileNotFound(usize),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// Convert Rust errors to JsValue for WASM boundary
impl From<PuzzleError> for JsValue {
    fn from(err: PuzzleError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<serde_json::Error> for PuzzleError {
    fn from(err: serde_json::Error) -> Self {
        PuzzleError::SerializationError(err.to_string())
    }
}

/// Direction the player wants a tile to slide into the blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Parse a DOM `KeyboardEvent.key` name
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Key used to group best results by board dimension, e.g. `"4x4"`
pub fn size_key(size: usize) -> String {
    format!("{}x{}", size, size)
}
