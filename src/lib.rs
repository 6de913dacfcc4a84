//! Snakebird - a gravity-bound snake on floating ledges.
//!
//! The simulation (body, platforms, collectibles, movement) is independent of
//! the terminal; `app` wires it to crossterm input and ratatui rendering.

pub mod app;
pub mod body;
pub mod collectibles;
pub mod constants;
pub mod error;
pub mod game_state;
pub mod geometry;
pub mod input;
pub mod level;
pub mod movement;
pub mod platforms;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;

pub use error::SetupError;
pub use game_state::GameState;
pub use level::{LevelSpec, MovementMode};
pub use movement::{tick, SimEvent, TickInput};
