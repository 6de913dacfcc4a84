//! Continuous-mode resolver: velocity integration, jump, landing and
//! smoothing-based segment following.

use super::{SimEvent, TickInput};
use crate::constants::{
    FOLLOW_SPEED, GRAVITY, JUMP_VELOCITY, LANDING_TOLERANCE, MOVE_SPEED, SCREEN_HEIGHT,
    SCREEN_WIDTH, SEGMENT_SPACING, TERMINAL_VELOCITY, TRAIL_SAG,
};
use crate::game_state::GameState;
use crate::geometry::Vec2;
use rand::Rng;
use tracing::debug;

/// Single physics step of `dt` seconds.
pub fn step<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
) -> Vec<SimEvent> {
    state.tick_count += 1;
    let mut events = Vec::new();
    let grounded = state.is_grounded();

    // Horizontal speed follows the held axis directly
    state.velocity.x = input.axis.clamp(-1.0, 1.0) * MOVE_SPEED;

    if input.wants_jump() && grounded {
        state.velocity.y = JUMP_VELOCITY;
        events.push(SimEvent::Jumped);
    }

    // Apply gravity (positive = downward), capped at terminal velocity
    state.velocity.y = (state.velocity.y + GRAVITY * dt).min(TERMINAL_VELOCITY);

    let size = state.body.head_rect().width;
    let mut head = state.body.head() + state.velocity * dt;

    // Side walls and ceiling; the floor is open
    head.x = head.x.clamp(0.0, SCREEN_WIDTH - size);
    if head.y < 0.0 {
        head.y = 0.0;
        state.velocity.y = state.velocity.y.max(0.0);
    }
    state.body.set_head(head);

    if state.velocity.y >= 0.0 {
        let landing = state
            .platforms
            .landing_top(&state.body.head_rect(), LANDING_TOLERANCE);
        if let Some(top) = landing {
            state.body.set_head(Vec2::new(head.x, top - size));
            state.velocity.y = 0.0;
            if !grounded {
                events.push(SimEvent::Landed { top });
            }
        }
    }

    state
        .body
        .follow_chain(dt, FOLLOW_SPEED, SEGMENT_SPACING, TRAIL_SAG);

    let head_rect = state.body.head_rect();
    let consumed = state.collectibles.try_consume_rect(&head_rect, rng);
    for _ in 0..consumed {
        state.eaten += 1;
        events.push(SimEvent::Consumed {
            at: state.body.head(),
        });
        if state.body.grow_by_one() {
            events.push(SimEvent::Grew {
                length: state.body.len(),
            });
        }
    }

    if state.body.head().y > SCREEN_HEIGHT {
        debug!(eaten = state.eaten, "fell out of the scene");
        state.reset(rng);
        events.push(SimEvent::Reset);
    }

    events
}
