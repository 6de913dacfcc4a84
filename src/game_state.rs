//! The simulation state owned by the frame loop.

use crate::body::Body;
use crate::collectibles::CollectibleSet;
use crate::constants::{MAX_BODY, MAX_COLLECTIBLES, MAX_PLATFORMS, SUPPORT_PROBE};
use crate::error::SetupError;
use crate::geometry::Vec2;
use crate::level::{LevelSpec, MovementMode};
use crate::movement::grid::{gravity_support, Support};
use crate::movement::TickInput;
use crate::platforms::PlatformSet;
use rand::Rng;
use tracing::info;

/// Everything the simulation mutates, in one value.
///
/// The loop driver owns it and hands `&mut GameState` to each tick; there is
/// no other copy of the body, platforms or collectibles.
#[derive(Debug, Clone)]
pub struct GameState {
    pub level: LevelSpec,
    /// Body as first laid out, restored on reset.
    initial_body: Body,

    pub body: Body,
    pub platforms: PlatformSet,
    pub collectibles: CollectibleSet,
    /// Continuous mode only; stays zero in grid mode.
    pub velocity: Vec2,

    // Counters
    /// Collectibles eaten since the last reset.
    pub eaten: u32,
    pub resets: u32,
    /// Simulation steps since start.
    pub tick_count: u64,

    /// Grid mode sub-step time accumulator (milliseconds).
    pub accumulated_time_ms: u64,
    /// Grid mode presses waiting for the next step.
    pub buffered_input: TickInput,
}

impl GameState {
    /// Build the initial state for `level`.
    pub fn new<R: Rng>(level: LevelSpec, rng: &mut R) -> Result<Self, SetupError> {
        level.validate()?;

        let body = Body::new(
            level.start,
            level.length,
            level.chain_step(),
            level.segment_size(),
            MAX_BODY,
        )?;

        let mut platforms = PlatformSet::new(MAX_PLATFORMS);
        for rect in &level.platforms {
            if !platforms.add(*rect) {
                return Err(SetupError::TooManyPlatforms {
                    requested: level.platforms.len(),
                    capacity: MAX_PLATFORMS,
                });
            }
        }

        let fruit = &level.collectibles;
        let mut collectibles =
            CollectibleSet::new(MAX_COLLECTIBLES, fruit.radius, fruit.policy, fruit.area);
        collectibles.spawn_all(fruit.count, rng);

        info!(
            level = %level.name,
            mode = level.mode.name(),
            segments = body.len(),
            platforms = platforms.len(),
            "level ready"
        );

        Ok(Self {
            initial_body: body.clone(),
            body,
            platforms,
            collectibles,
            velocity: Vec2::ZERO,
            eaten: 0,
            resets: 0,
            tick_count: 0,
            accumulated_time_ms: 0,
            buffered_input: TickInput::default(),
            level,
        })
    }

    pub fn mode(&self) -> MovementMode {
        self.level.mode
    }

    /// Restore the level's starting layout and respawn collectibles.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.body = self.initial_body.clone();
        self.velocity = Vec2::ZERO;
        self.accumulated_time_ms = 0;
        self.buffered_input = TickInput::default();
        self.eaten = 0;
        self.resets += 1;
        self.collectibles
            .spawn_all(self.level.collectibles.count, rng);
        info!(resets = self.resets, "level reset");
    }

    /// Whether the body is held up this tick. Derived from the body and
    /// platforms every call, never stored.
    pub fn is_grounded(&self) -> bool {
        match self.mode() {
            MovementMode::Grid => gravity_support(&self.body, &self.platforms) != Support::None,
            MovementMode::Continuous => self
                .platforms
                .supports_rect(&self.body.head_rect(), SUPPORT_PROBE),
        }
    }
}
