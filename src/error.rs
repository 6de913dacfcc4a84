//! Startup errors.
//!
//! Everything that can go wrong at runtime is a policy decision (a discarded
//! move, a silently capped growth), so the only error type covers building a
//! level from its compiled-in description.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("body must have at least one segment")]
    EmptyBody,

    #[error("body of {requested} segments exceeds capacity {capacity}")]
    BodyTooLong { requested: usize, capacity: usize },

    #[error("level has {requested} platforms, capacity is {capacity}")]
    TooManyPlatforms { requested: usize, capacity: usize },

    #[error("level wants {requested} collectibles, capacity is {capacity}")]
    TooManyCollectibles { requested: usize, capacity: usize },

    #[error("collectible spawn area x {x:?}, y {y:?} has an empty range")]
    InvalidSpawnArea { x: [i32; 2], y: [i32; 2] },

    #[error("invalid level description: {0}")]
    LevelParse(#[from] serde_json::Error),
}
