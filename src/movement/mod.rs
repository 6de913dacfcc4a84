//! Movement and gravity resolution.
//!
//! `tick` is called once per rendered frame. Grid mode steps the body one
//! cell every `GRID_TICK_MS`; continuous mode integrates the frame's elapsed
//! time directly.

pub mod continuous;
pub mod grid;

use crate::constants::{GRID_TICK_MS, MAX_FRAME_DT_MS, MAX_GRID_FRAME_MS, MAX_SUBSTEP_SECS};
use crate::game_state::GameState;
use crate::geometry::Vec2;
use crate::level::MovementMode;
use rand::Rng;

/// Cardinal direction for grid moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the (dx, dy) cell delta for this direction.
    pub fn delta(&self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// UI-agnostic input for one tick.
///
/// The `*_pressed` flags are edge-triggered (newly pressed since the last
/// tick); `axis` reflects keys currently held.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    pub right_pressed: bool,
    pub left_pressed: bool,
    pub up_pressed: bool,
    pub down_pressed: bool,
    pub jump_pressed: bool,
    pub reset_pressed: bool,
    /// Held horizontal axis: -1 left, 0 idle, +1 right.
    pub axis: f32,
}

impl TickInput {
    /// Single grid direction honored this tick.
    ///
    /// When several directions were pressed, priority is
    /// right > left > up > down; diagonals never happen.
    pub fn direction(&self) -> Option<Direction> {
        if self.right_pressed {
            Some(Direction::Right)
        } else if self.left_pressed {
            Some(Direction::Left)
        } else if self.up_pressed {
            Some(Direction::Up)
        } else if self.down_pressed {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// Jump edge for continuous mode: Space, or Up/W.
    pub fn wants_jump(&self) -> bool {
        self.jump_pressed || self.up_pressed
    }

    /// Fold a later frame's input into this one: presses accumulate, the
    /// held axis takes the latest value.
    pub fn merge(&mut self, later: &TickInput) {
        self.right_pressed |= later.right_pressed;
        self.left_pressed |= later.left_pressed;
        self.up_pressed |= later.up_pressed;
        self.down_pressed |= later.down_pressed;
        self.jump_pressed |= later.jump_pressed;
        self.reset_pressed |= later.reset_pressed;
        self.axis = later.axis;
    }
}

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// The body stepped one cell.
    Moved(Direction),
    /// A directional input was discarded as illegal.
    MoveRejected(Direction),
    /// The whole body dropped one row.
    Fell,
    /// Neither end was supported but a middle segment rests on a platform.
    Caught,
    Jumped,
    /// The head came to rest on a platform top.
    Landed { top: f32 },
    /// A collectible was eaten at the given position.
    Consumed { at: Vec2 },
    /// The body grew to `length` segments.
    Grew { length: usize },
    /// The level restarted (R pressed or fell out of the scene).
    Reset,
}

/// Advance the simulation by one rendered frame of `dt_ms` milliseconds.
pub fn tick<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: u64,
    rng: &mut R,
) -> Vec<SimEvent> {
    if input.reset_pressed {
        state.reset(rng);
        return vec![SimEvent::Reset];
    }

    match state.mode() {
        MovementMode::Grid => tick_grid(state, input, dt_ms, rng),
        MovementMode::Continuous => tick_continuous(state, input, dt_ms, rng),
    }
}

/// Run one grid step per elapsed `GRID_TICK_MS`.
///
/// Presses are buffered until the next step consumes them, so a key tapped
/// between steps is not lost; later catch-up steps in the same frame get no
/// input.
fn tick_grid<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: u64,
    rng: &mut R,
) -> Vec<SimEvent> {
    state.buffered_input.merge(input);

    // Clamp to avoid a burst of catch-up steps after a stall
    state.accumulated_time_ms += dt_ms.min(MAX_GRID_FRAME_MS);

    let mut events = Vec::new();
    while state.accumulated_time_ms >= GRID_TICK_MS {
        state.accumulated_time_ms -= GRID_TICK_MS;
        let step_input = std::mem::take(&mut state.buffered_input);
        events.extend(grid::step(state, &step_input, rng));
    }
    events
}

/// Integrate the frame in sub-steps short enough that a falling head cannot
/// skip past the landing band. Jump is only offered to the first sub-step.
fn tick_continuous<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: u64,
    rng: &mut R,
) -> Vec<SimEvent> {
    let mut remaining = dt_ms.min(MAX_FRAME_DT_MS) as f32 / 1000.0;
    let mut events = Vec::new();
    let mut step_input = *input;

    while remaining > 1e-5 {
        let dt = remaining.min(MAX_SUBSTEP_SECS);
        remaining -= dt;
        let step_events = continuous::step(state, &step_input, dt, rng);
        let was_reset = step_events.contains(&SimEvent::Reset);
        events.extend(step_events);
        if was_reset {
            break;
        }
        step_input.jump_pressed = false;
        step_input.up_pressed = false;
    }
    events
}
