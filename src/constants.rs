// Scene dimensions (pixels)
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const TILE_SIZE: f32 = 40.0;
pub const GRID_COLUMNS: i32 = 20; // SCREEN_WIDTH / TILE_SIZE
pub const GRID_ROWS: i32 = 15; // SCREEN_HEIGHT / TILE_SIZE

// Capacities (soft caps)
pub const MAX_BODY: usize = 50;
pub const MAX_PLATFORMS: usize = 8;
pub const MAX_COLLECTIBLES: usize = 5;

// Frame pacing
pub const FRAME_INTERVAL_MS: u64 = 16;
pub const GRID_TICK_MS: u64 = 100; // 10 steps per second
pub const MAX_GRID_FRAME_MS: u64 = 500;
pub const MAX_FRAME_DT_MS: u64 = 100;
pub const MAX_SUBSTEP_SECS: f32 = 1.0 / 60.0;

// Continuous physics (pixels, seconds)
pub const SEGMENT_SIZE: f32 = 24.0;
pub const SEGMENT_SPACING: f32 = 20.0;
pub const TRAIL_SAG: f32 = 0.5;
pub const FOLLOW_SPEED: f32 = 12.0;
pub const MOVE_SPEED: f32 = 220.0;
pub const JUMP_VELOCITY: f32 = -520.0;
pub const GRAVITY: f32 = 1100.0;
pub const TERMINAL_VELOCITY: f32 = 700.0;
pub const LANDING_TOLERANCE: f32 = 16.0;
pub const SUPPORT_PROBE: f32 = 2.0;

// Input
pub const KEY_HOLD_MS: u64 = 180;

// Rendering
pub const PIXELS_PER_DOT: f32 = 10.0;
pub const CANVAS_WIDTH: usize = 80; // SCREEN_WIDTH / PIXELS_PER_DOT
pub const CANVAS_HEIGHT: usize = 60; // SCREEN_HEIGHT / PIXELS_PER_DOT
