//! Terminal setup and the frame loop shared by both binaries.

use crate::constants::FRAME_INTERVAL_MS;
use crate::game_state::GameState;
use crate::input::Keyboard;
use crate::level::{LevelSpec, MovementMode};
use crate::movement::{self, SimEvent};
use crate::ui;
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::Rng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG`. Redirect stderr to a file to keep
/// it off the play screen.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

/// Play the built-in level for `mode` until the player closes the game.
pub fn run(mode: MovementMode) -> io::Result<()> {
    init_logging();

    let mut rng = rand::thread_rng();
    let level = LevelSpec::builtin(mode).map_err(io::Error::other)?;
    let mut state = GameState::new(level, &mut rng).map_err(io::Error::other)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;

    // Release events let held keys end precisely; without them `Keyboard`
    // falls back to a hold timeout.
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    debug!(enhanced, "keyboard setup");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut state, &mut rng);

    // Cleanup terminal, even when the loop failed
    if enhanced {
        let _ = terminal.backend_mut().execute(PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        eaten = state.eaten,
        resets = state.resets,
        ticks = state.tick_count,
        "closed"
    );
    result
}

/// Poll, tick, draw; one pass per frame.
fn run_loop<B: Backend, R: Rng>(
    terminal: &mut Terminal<B>,
    state: &mut GameState,
    rng: &mut R,
) -> io::Result<()> {
    let mut keyboard = Keyboard::new();
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_frame = Instant::now();

    terminal.draw(|frame| ui::draw(frame, state))?;

    loop {
        poll_until(&mut keyboard, last_frame + frame_interval)?;

        // Advance by whole milliseconds; the remainder carries to the next frame
        let now = Instant::now();
        let dt_ms = now.saturating_duration_since(last_frame).as_millis() as u64;
        last_frame += Duration::from_millis(dt_ms);

        let input = keyboard.take_input(now);
        let events = movement::tick(state, &input, dt_ms, rng);
        log_events(&events);

        terminal.draw(|frame| ui::draw(frame, state))?;

        if keyboard.close_requested() {
            return Ok(());
        }
    }
}

/// Feed key events to `keyboard` until `deadline`, then drain anything
/// still queued.
fn poll_until(keyboard: &mut Keyboard, deadline: Instant) -> io::Result<()> {
    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            keyboard.handle_event(key, Instant::now());
        }
    }
}

fn log_events(events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::Consumed { .. } | SimEvent::Grew { .. } | SimEvent::Landed { .. } => {
                debug!(?event, "sim")
            }
            _ => trace!(?event, "sim"),
        }
    }
}
