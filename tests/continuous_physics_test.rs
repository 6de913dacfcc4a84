//! Integration test: continuous-mode physics
//!
//! Feeds 16ms frames through `snakebird::tick` and checks falling, landing,
//! jumping, walking off ledges and pickups.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snakebird::constants::{FRAME_INTERVAL_MS, SEGMENT_SIZE};
use snakebird::geometry::{Rect, Vec2};
use snakebird::{tick, GameState, LevelSpec, MovementMode, SimEvent, TickInput};

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(777)
}

/// Continuous level with the head's top-left at `start`, the given platforms
/// and no collectibles.
fn drift_level(start: Vec2, platforms: Vec<Rect>) -> LevelSpec {
    let mut level = LevelSpec::builtin(MovementMode::Continuous).unwrap();
    level.start = start;
    level.length = 3;
    level.platforms = platforms;
    level.collectibles.count = 0;
    level
}

fn new_state(level: LevelSpec, rng: &mut ChaCha8Rng) -> GameState {
    GameState::new(level, rng).unwrap()
}

/// Run frames until `done` sees a matching event, up to `max_frames`.
/// Returns the number of frames run, or None if it never matched.
fn run_until<F>(
    state: &mut GameState,
    input: TickInput,
    max_frames: usize,
    rng: &mut ChaCha8Rng,
    done: F,
) -> Option<usize>
where
    F: Fn(&SimEvent) -> bool,
{
    for frame in 1..=max_frames {
        let events = tick(state, &input, FRAME_INTERVAL_MS, rng);
        if events.iter().any(&done) {
            return Some(frame);
        }
    }
    None
}

fn is_landing(event: &SimEvent) -> bool {
    matches!(event, SimEvent::Landed { .. })
}

#[test]
fn test_falls_and_lands_flush_on_platform() {
    let mut rng = create_test_rng();
    let ledge = Rect::new(0.0, 400.0, 800.0, 40.0);
    let mut state = new_state(drift_level(Vec2::new(100.0, 300.0), vec![ledge]), &mut rng);
    assert!(!state.is_grounded());

    let frames = run_until(&mut state, TickInput::default(), 120, &mut rng, is_landing);

    assert!(frames.is_some(), "never landed");
    assert_eq!(state.body.head_rect().bottom(), 400.0);
    assert_eq!(state.velocity.y, 0.0);
    assert!(state.is_grounded());
}

#[test]
fn test_fast_fall_cannot_tunnel_through_thin_ledge() {
    let mut rng = create_test_rng();
    let thin = Rect::new(0.0, 500.0, 800.0, 4.0);
    let mut state = new_state(drift_level(Vec2::new(100.0, 0.0), vec![thin]), &mut rng);

    let frames = run_until(&mut state, TickInput::default(), 200, &mut rng, is_landing);

    assert!(frames.is_some(), "fell through the ledge");
    assert_eq!(state.body.head().y, 500.0 - SEGMENT_SIZE);
    assert_eq!(state.resets, 0);
}

#[test]
fn test_jump_and_land_again() {
    let mut rng = create_test_rng();
    let ledge = Rect::new(0.0, 400.0, 800.0, 40.0);
    let mut state = new_state(
        drift_level(Vec2::new(100.0, 400.0 - SEGMENT_SIZE), vec![ledge]),
        &mut rng,
    );
    assert!(state.is_grounded());

    let jump = TickInput {
        jump_pressed: true,
        ..Default::default()
    };
    let events = tick(&mut state, &jump, FRAME_INTERVAL_MS, &mut rng);
    assert!(events.contains(&SimEvent::Jumped));
    assert!(state.velocity.y < 0.0);

    // Holding jump in the air does nothing
    let events = tick(&mut state, &jump, FRAME_INTERVAL_MS, &mut rng);
    assert!(!events.contains(&SimEvent::Jumped));

    let frames = run_until(&mut state, TickInput::default(), 120, &mut rng, is_landing);
    assert!(frames.is_some());
    assert_eq!(state.body.head_rect().bottom(), 400.0);
}

#[test]
fn test_walking_off_ledge_resets_level() {
    let mut rng = create_test_rng();
    let start = Vec2::new(100.0, 400.0 - SEGMENT_SIZE);
    let ledge = Rect::new(0.0, 400.0, 150.0, 40.0);
    let mut state = new_state(drift_level(start, vec![ledge]), &mut rng);

    let right = TickInput {
        axis: 1.0,
        ..Default::default()
    };
    let frames = run_until(&mut state, right, 200, &mut rng, |e| *e == SimEvent::Reset);

    assert!(frames.is_some(), "never fell out");
    assert_eq!(state.resets, 1);
    assert_eq!(state.body.head(), start);
    assert_eq!(state.velocity, Vec2::ZERO);
}

#[test]
fn test_body_trails_behind_moving_head() {
    let mut rng = create_test_rng();
    let ledge = Rect::new(0.0, 400.0, 800.0, 40.0);
    let mut state = new_state(
        drift_level(Vec2::new(100.0, 400.0 - SEGMENT_SIZE), vec![ledge]),
        &mut rng,
    );

    let right = TickInput {
        axis: 1.0,
        ..Default::default()
    };
    for _ in 0..60 {
        tick(&mut state, &right, FRAME_INTERVAL_MS, &mut rng);
    }
    let xs: Vec<f32> = state.body.positions().map(|p| p.x).collect();
    assert!(xs[0] > 250.0);
    assert!(xs.windows(2).all(|w| w[0] > w[1]), "segments out of order: {xs:?}");
}

#[test]
fn test_pickup_grows_body_and_replenishes() {
    let mut rng = create_test_rng();
    let ledge = Rect::new(0.0, 400.0, 800.0, 40.0);
    let mut state = new_state(
        drift_level(Vec2::new(100.0, 400.0 - SEGMENT_SIZE), vec![ledge]),
        &mut rng,
    );
    assert!(state.collectibles.spawn_one(Vec2::new(150.0, 388.0)));

    let right = TickInput {
        axis: 1.0,
        ..Default::default()
    };
    let frames = run_until(&mut state, right, 60, &mut rng, |e| {
        matches!(e, SimEvent::Grew { length: 4 })
    });

    assert!(frames.is_some(), "never reached the collectible");
    assert_eq!(state.body.len(), 4);
    assert_eq!(state.eaten, 1);
    assert_eq!(state.collectibles.active_count(), 1);
    assert!(state
        .collectibles
        .active()
        .all(|c| c.pos != Vec2::new(150.0, 388.0)));
}
