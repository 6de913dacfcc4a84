//! Continuous-mode Snakebird: run, jump and land with a trailing body.

use snakebird::{app, MovementMode};
use std::io;

fn main() -> io::Result<()> {
    app::run(MovementMode::Continuous)
}
