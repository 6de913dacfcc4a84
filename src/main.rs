//! Grid-mode Snakebird: one cell per step, climb and descend the ledges.

use snakebird::{app, MovementMode};
use std::io;

fn main() -> io::Result<()> {
    app::run(MovementMode::Grid)
}
