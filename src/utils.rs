// Utility functions for SlideTile Core

use chrono::NaiveDate;
use rand::Rng;

use crate::types::{Seed, Timestamp};

/// Get current timestamp in milliseconds
pub fn now() -> Timestamp {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as Timestamp
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }
}

/// Today's calendar date in the player's local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Draw a fresh, non-reproducible seed in `[0, bound)`
pub fn random_seed(bound: Seed) -> Seed {
    rand::thread_rng().gen_range(0..bound.max(1))
}
