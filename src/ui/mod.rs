pub mod canvas;
pub mod play_scene;

use crate::game_state::GameState;
use ratatui::Frame;

/// Main UI drawing function.
pub fn draw(frame: &mut Frame, state: &GameState) {
    let area = frame.size();
    play_scene::render_play_scene(frame, area, state);
}
