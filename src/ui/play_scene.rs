//! Play screen rendering.
//!
//! The 800x600 scene is rasterized onto a `PixelCanvas` at `PIXELS_PER_DOT`
//! scene pixels per dot, then drawn inside a thin border with the half-block
//! packing from `canvas`.

use super::canvas::PixelCanvas;
use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, PIXELS_PER_DOT, TILE_SIZE};
use crate::game_state::GameState;
use crate::geometry::{Rect as SceneRect, Vec2};
use crate::level::MovementMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

// ── Border characters ────────────────────────────────────────────────
const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const FULL_BLOCK: char = '\u{2588}'; // █

// ── Scene colors ─────────────────────────────────────────────────────
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const PLATFORM_COLOR: Color = Color::Rgb(130, 130, 130);
const COLLECTIBLE_COLOR: Color = Color::Rgb(200, 122, 255);
const HEAD_COLOR: Color = Color::Rgb(230, 41, 55);
const BEAK_COLOR: Color = Color::Rgb(253, 249, 0);
const BODY_COLOR: Color = Color::Rgb(255, 161, 0);
const TAIL_COLOR: Color = Color::Rgb(0, 121, 241);
const BORDER_COLOR: Color = Color::Rgb(80, 80, 80);

const INFO_PANEL_WIDTH: u16 = 22;
const STATUS_ROWS: u16 = 2;
/// Terminal rows of the bordered play field.
const FIELD_ROWS: u16 = (CANVAS_HEIGHT as u16).div_ceil(2) + 2;
const MIN_WIDTH: u16 = CANVAS_WIDTH as u16 + 2 + INFO_PANEL_WIDTH + 2;
const MIN_HEIGHT: u16 = FIELD_ROWS + STATUS_ROWS + 2;

const GRID_CONTROLS: &[(&str, &str)] =
    &[("[Arrows/WASD]", "Move"), ("[R]", "Reset"), ("[Esc]", "Quit")];
const DRIFT_CONTROLS: &[(&str, &str)] = &[
    ("[\u{2190}/\u{2192}]", "Move"),
    ("[Space/\u{2191}]", "Jump"),
    ("[R]", "Reset"),
    ("[Esc]", "Quit"),
];

/// Screen regions inside the outer border.
///
/// ```text
/// ┌─ Snakebird: Ledges ─────────────┬─ Info ──────┐
/// │ [play field]                    │  [info]     │
/// │ [status + controls]             │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
struct ScreenAreas {
    field: Rect,
    status: Rect,
    info: Rect,
}

fn split_screen(frame: &mut Frame, area: Rect, title: &str) -> ScreenAreas {
    frame.render_widget(Clear, area);
    let outer = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightGreen));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [left, info] = columns(inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(FIELD_ROWS), Constraint::Length(STATUS_ROWS)])
        .split(left);

    ScreenAreas {
        field: rows[0],
        status: rows[1],
        info,
    }
}

fn columns(inner: Rect) -> [Rect; 2] {
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(INFO_PANEL_WIDTH)])
        .split(inner);
    [split[0], split[1]]
}

/// Render the whole play screen.
pub fn render_play_scene(frame: &mut Frame, area: Rect, state: &GameState) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area);
        return;
    }

    let title = format!(" Snakebird: {} ", state.level.name);
    let screen = split_screen(frame, area, &title);

    render_play_field(frame, screen.field, state);
    render_status(frame, screen.status, state);
    render_info_panel(frame, screen.info, state);
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(Span::styled(
            "Snakebird",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Terminal too small", Style::default().fg(Color::Red))),
        Line::from(Span::styled(
            format!(
                "Need {MIN_WIDTH}x{MIN_HEIGHT}, have {}x{}",
                area.width, area.height
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - height) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect {
            y: top,
            height,
            ..area
        },
    );
}

/// Rasterize platforms, collectibles and the body. The head is drawn last
/// so it stays visible when segments overlap.
pub fn rasterize(state: &GameState) -> PixelCanvas {
    let mut canvas = PixelCanvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, PIXELS_PER_DOT);
    let mode = state.mode();

    for rect in state.platforms.rects() {
        canvas.fill_rect(rect, PLATFORM_COLOR);
    }

    for item in state.collectibles.active() {
        canvas.fill_circle(scene_center(mode, item.pos), item.radius, COLLECTIBLE_COLOR);
    }

    let last = state.body.len() - 1;
    for (i, segment) in state.body.segments().iter().enumerate().rev() {
        let color = if i == 0 {
            HEAD_COLOR
        } else if i == last {
            TAIL_COLOR
        } else {
            BODY_COLOR
        };
        canvas.fill_rect(&segment_rect(mode, segment.pos, segment.size), color);
    }

    let head = segment_rect(mode, state.body.head(), state.body.segments()[0].size);
    let (a, b, c) = beak(&head, facing_left(state));
    canvas.fill_triangle(a, b, c, BEAK_COLOR);

    canvas
}

/// Scene-pixel rectangle of a segment stored in mode coordinates.
fn segment_rect(mode: MovementMode, pos: Vec2, size: f32) -> SceneRect {
    match mode {
        MovementMode::Grid => SceneRect::new(pos.x * TILE_SIZE, pos.y * TILE_SIZE, size, size),
        MovementMode::Continuous => SceneRect::new(pos.x, pos.y, size, size),
    }
}

/// Grid collectibles sit in the middle of their cell.
fn scene_center(mode: MovementMode, pos: Vec2) -> Vec2 {
    match mode {
        MovementMode::Grid => Vec2::new(
            pos.x * TILE_SIZE + TILE_SIZE / 2.0,
            pos.y * TILE_SIZE + TILE_SIZE / 2.0,
        ),
        MovementMode::Continuous => pos,
    }
}

/// The head faces away from its neck; a lone or stacked head faces the way
/// it is moving, else right.
fn facing_left(state: &GameState) -> bool {
    let segments = state.body.segments();
    match segments.get(1) {
        Some(neck) if neck.pos.x != segments[0].pos.x => neck.pos.x > segments[0].pos.x,
        _ => state.velocity.x < 0.0,
    }
}

fn beak(head: &SceneRect, left: bool) -> (Vec2, Vec2, Vec2) {
    let h = head.height;
    let (edge, tip) = if left {
        (head.x, head.x - h * 0.4)
    } else {
        (head.right(), head.right() + h * 0.4)
    };
    (
        Vec2::new(edge, head.y + h * 0.3),
        Vec2::new(edge, head.y + h * 0.7),
        Vec2::new(tip, head.y + h * 0.5),
    )
}

/// Draw the canvas inside a border, with the eaten count in the top edge.
fn render_play_field(frame: &mut Frame, area: Rect, state: &GameState) {
    let canvas = rasterize(state);
    let render_w = ((canvas.width() + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;

    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;
    let border = Style::default().fg(BORDER_COLOR);

    // ── Row 0: Top border with eaten count ──────────────────────
    {
        let value = state.eaten.to_string();
        let label = "Eaten: ";
        let full_len = label.len() + value.len();
        let pad_before = inner_w.saturating_sub(full_len + 1);
        let pad_after = inner_w.saturating_sub(pad_before + full_len);

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_TL.to_string(), border)];
        if pad_before > 0 {
            spans.push(Span::styled(
                std::iter::repeat_n(BORDER_H, pad_before).collect::<String>(),
                border,
            ));
        }
        spans.push(Span::styled(label, border));
        spans.push(Span::styled(value, Style::default().fg(Color::White)));
        if pad_after > 0 {
            spans.push(Span::styled(
                std::iter::repeat_n(BORDER_H, pad_after).collect::<String>(),
                border,
            ));
        }
        spans.push(Span::styled(BORDER_TR.to_string(), border));

        let line = Paragraph::new(Line::from(spans));
        frame.render_widget(line, Rect::new(x_off, y_off, render_w, 1));
    }

    // ── Scene rows ──────────────────────────────────────────────
    let rows = canvas.to_lines(EMPTY_BG);
    let row_count = rows.len();
    for (term_row, row) in rows.into_iter().enumerate() {
        let row_y = y_off + 1 + term_row as u16;
        if row_y >= area.y + area.height {
            break;
        }
        let mut spans = vec![Span::styled(BORDER_V.to_string(), border)];
        spans.extend(row.spans);
        spans.push(Span::styled(BORDER_V.to_string(), border));
        let line = Paragraph::new(Line::from(spans));
        frame.render_widget(line, Rect::new(x_off, row_y, render_w, 1));
    }

    // ── Bottom border ───────────────────────────────────────────
    let bot_y = y_off + 1 + row_count as u16;
    if bot_y < area.y + area.height {
        let mut s = String::new();
        s.push(BORDER_BL);
        s.extend(std::iter::repeat_n(BORDER_H, inner_w));
        s.push(BORDER_BR);
        let line = Paragraph::new(Line::from(Span::styled(s, border)));
        frame.render_widget(line, Rect::new(x_off, bot_y, render_w, 1));
    }
}

fn render_status(frame: &mut Frame, area: Rect, state: &GameState) {
    let (status, color) = if state.is_grounded() {
        ("Holding on", Color::Green)
    } else {
        ("Falling!", Color::Yellow)
    };
    let controls = match state.mode() {
        MovementMode::Grid => GRID_CONTROLS,
        MovementMode::Continuous => DRIFT_CONTROLS,
    };

    let lines = vec![
        Line::from(Span::styled(status, Style::default().fg(color))),
        controls_line(controls),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn controls_line(controls: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(controls.len() * 3);
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// One "label: value" row for the info panel.
fn info_line(label: &str, value: String, value_color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(value_color)),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, state: &GameState) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grounded = if state.is_grounded() { "Yes" } else { "No" };
    let mut lines: Vec<Line> = vec![
        info_line("Mode", state.mode().name().to_string(), Color::Cyan),
        Line::from(""),
        Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{}", state.body.len(), state.body.capacity()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        info_line("Eaten", state.eaten.to_string(), Color::White),
        info_line(
            "Fruit",
            state.collectibles.policy().name().to_string(),
            COLLECTIBLE_COLOR,
        ),
        info_line("Resets", state.resets.to_string(), Color::White),
        info_line("Grounded", grounded.to_string(), Color::White),
    ];

    if state.mode() == MovementMode::Continuous {
        lines.push(info_line(
            "Speed",
            format!("{:.0}", state.velocity.length()),
            Color::White,
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Legend:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    for (color, label) in [
        (HEAD_COLOR, "Head"),
        (BODY_COLOR, "Body"),
        (TAIL_COLOR, "Tail"),
        (COLLECTIBLE_COLOR, "Fruit"),
        (PLATFORM_COLOR, "Ledge"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(color)),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
