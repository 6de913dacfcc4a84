//! Level descriptions.
//!
//! Levels are JSON documents compiled into the binary with `include_str!`.
//! They are parsed once at startup; a malformed or over-capacity level is a
//! fatal setup error.

use crate::collectibles::{RespawnPolicy, SpawnArea};
use crate::constants::{
    MAX_BODY, MAX_COLLECTIBLES, MAX_PLATFORMS, SEGMENT_SIZE, SEGMENT_SPACING, TILE_SIZE,
};
use crate::error::SetupError;
use crate::geometry::{Rect, Vec2};
use serde::{Deserialize, Serialize};

const GRID_LEVEL: &str = include_str!("../levels/grid.json");
const DRIFT_LEVEL: &str = include_str!("../levels/drift.json");

/// Movement model a level is played with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    /// One cell per tick, integer cell coordinates.
    Grid,
    /// Pixel coordinates, velocity and gravity scaled by frame time.
    Continuous,
}

impl MovementMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::Continuous => "Continuous",
        }
    }
}

/// Direction the initial chain extends from the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainLayout {
    /// Hanging straight down from the head.
    Vertical,
    /// Trailing to the left of the head.
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleSpec {
    pub count: usize,
    pub radius: f32,
    pub policy: RespawnPolicy,
    pub area: SpawnArea,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub name: String,
    pub mode: MovementMode,
    /// Head position: a cell in grid mode, the head's top-left pixel otherwise.
    pub start: Vec2,
    pub length: usize,
    pub layout: ChainLayout,
    pub platforms: Vec<Rect>,
    pub collectibles: CollectibleSpec,
}

impl LevelSpec {
    /// The level compiled in for `mode`.
    pub fn builtin(mode: MovementMode) -> Result<Self, SetupError> {
        match mode {
            MovementMode::Grid => Self::from_json(GRID_LEVEL),
            MovementMode::Continuous => Self::from_json(DRIFT_LEVEL),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, SetupError> {
        let level: LevelSpec = serde_json::from_str(text)?;
        level.validate()?;
        Ok(level)
    }

    /// Check the description against the compiled capacities.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.length == 0 {
            return Err(SetupError::EmptyBody);
        }
        if self.length > MAX_BODY {
            return Err(SetupError::BodyTooLong {
                requested: self.length,
                capacity: MAX_BODY,
            });
        }
        if self.platforms.len() > MAX_PLATFORMS {
            return Err(SetupError::TooManyPlatforms {
                requested: self.platforms.len(),
                capacity: MAX_PLATFORMS,
            });
        }
        if self.collectibles.count > MAX_COLLECTIBLES {
            return Err(SetupError::TooManyCollectibles {
                requested: self.collectibles.count,
                capacity: MAX_COLLECTIBLES,
            });
        }
        let area = self.collectibles.area;
        if self.collectibles.count > 0 && area.is_empty() {
            return Err(SetupError::InvalidSpawnArea {
                x: area.x,
                y: area.y,
            });
        }
        Ok(())
    }

    /// Offset between consecutive segments of the initial chain.
    pub fn chain_step(&self) -> Vec2 {
        let spacing = match self.mode {
            MovementMode::Grid => 1.0,
            MovementMode::Continuous => SEGMENT_SPACING,
        };
        match self.layout {
            ChainLayout::Vertical => Vec2::new(0.0, spacing),
            ChainLayout::Horizontal => Vec2::new(-spacing, 0.0),
        }
    }

    /// Edge length of one segment in pixels.
    pub fn segment_size(&self) -> f32 {
        match self.mode {
            MovementMode::Grid => TILE_SIZE,
            MovementMode::Continuous => SEGMENT_SIZE,
        }
    }
}
