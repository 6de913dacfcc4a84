//! Grid-mode resolver: one cell per step, rigid-body gravity.

use super::{Direction, SimEvent, TickInput};
use crate::body::Body;
use crate::constants::{GRID_COLUMNS, GRID_ROWS};
use crate::game_state::GameState;
use crate::geometry::{cell_above, cell_below, Vec2};
use crate::platforms::PlatformSet;
use rand::Rng;
use tracing::{debug, trace};

/// What is holding the body up this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// A platform or the body's own segment is under the head.
    Head,
    /// A platform is under the tail.
    Tail,
    /// Neither end is held, but some segment rests on a platform.
    Caught,
    /// Nothing: the body falls.
    None,
}

/// Classify the body's support.
///
/// The head may rest on its own body, the tail only on platforms: a body
/// resting on its tail is never propped up by itself.
pub fn gravity_support(body: &Body, platforms: &PlatformSet) -> Support {
    let head = body.head();
    if platforms.supports_cell(head) || body.contains_position(cell_below(head)) {
        return Support::Head;
    }
    if platforms.supports_cell(body.tail()) {
        return Support::Tail;
    }
    if body.positions().any(|p| platforms.supports_cell(p)) {
        return Support::Caught;
    }
    Support::None
}

/// Target cell for moving the head in `direction`, or `None` if the move is
/// illegal and the input must be discarded.
pub fn resolve_target(state: &GameState, direction: Direction) -> Option<Vec2> {
    let body = &state.body;
    let platforms = &state.platforms;
    let head = body.head();

    let target = match direction {
        // Climbing only checks for a platform overhead
        Direction::Up => {
            let above = cell_above(head);
            if platforms.blocks_cell(above) {
                return None;
            }
            above
        }
        // No willful descent onto ground or onto the body
        Direction::Down => {
            let below = cell_below(head);
            if platforms.blocks_cell(below) || body.contains_position(below) {
                return None;
            }
            below
        }
        Direction::Left | Direction::Right => head + direction.delta(),
    };

    if !in_bounds(target) || platforms.blocks_cell(target) || body.contains_position(target) {
        return None;
    }
    Some(target)
}

/// Moves may not leave the scene sideways or through the top.
fn in_bounds(cell: Vec2) -> bool {
    let (x, y) = cell.cell();
    (0..GRID_COLUMNS).contains(&x) && y >= 0
}

/// Drop the body one row unless something holds it.
pub fn apply_gravity(state: &mut GameState) -> Option<SimEvent> {
    match gravity_support(&state.body, &state.platforms) {
        Support::None => {
            state.body.shift_down_by_one();
            Some(SimEvent::Fell)
        }
        Support::Caught => Some(SimEvent::Caught),
        Support::Head | Support::Tail => None,
    }
}

/// Single grid step: move, gravity, collectibles, fall-out check.
pub fn step<R: Rng>(state: &mut GameState, input: &TickInput, rng: &mut R) -> Vec<SimEvent> {
    state.tick_count += 1;
    let mut events = Vec::new();

    if let Some(direction) = input.direction() {
        match resolve_target(state, direction) {
            Some(target) => {
                state.body.shift_to(target);
                events.push(SimEvent::Moved(direction));
            }
            None => {
                debug!(?direction, "move rejected");
                events.push(SimEvent::MoveRejected(direction));
            }
        }
    }

    if let Some(event) = apply_gravity(state) {
        trace!(?event, "gravity");
        events.push(event);
    }

    let head = state.body.head();
    let consumed = state.collectibles.try_consume_cell(head, rng);
    for _ in 0..consumed {
        state.eaten += 1;
        events.push(SimEvent::Consumed { at: head });
        if state.body.grow_by_one() {
            events.push(SimEvent::Grew {
                length: state.body.len(),
            });
        }
    }

    if head.y >= GRID_ROWS as f32 {
        state.reset(rng);
        events.push(SimEvent::Reset);
    }

    events
}
