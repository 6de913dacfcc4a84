//! Half-block pixel canvas.
//!
//! Scene shapes are rasterized into a grid of colored "dots", each covering
//! `PIXELS_PER_DOT` scene pixels. Pairs of vertical dots are packed into one
//! terminal row using `▀` with fg = top dot, bg = bottom dot.

use crate::geometry::{Rect, Vec2};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

const HALF_TOP: char = '\u{2580}'; // ▀

pub struct PixelCanvas {
    width: usize,
    height: usize,
    /// Scene pixels per dot along each axis.
    scale: f32,
    dots: Vec<Option<Color>>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
            dots: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Terminal rows needed to show the canvas.
    pub fn rows(&self) -> usize {
        self.height.div_ceil(2)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            self.dots[y * self.width + x]
        } else {
            None
        }
    }

    fn set(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.dots[y as usize * self.width + x as usize] = Some(color);
        }
    }

    /// Scene-space center of dot (x, y).
    fn dot_center(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * self.scale,
            (y as f32 + 0.5) * self.scale,
        )
    }

    /// Dot range covering scene span `[start, end)`, clamped to `limit`.
    fn dot_span(&self, start: f32, end: f32, limit: usize) -> std::ops::Range<i32> {
        let first = (start / self.scale).floor().max(0.0) as i32;
        let last = ((end / self.scale).ceil() as i32).min(limit as i32);
        first..last
    }

    /// Fill every dot whose center lies in `rect` (scene pixels).
    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        for y in self.dot_span(rect.y, rect.bottom(), self.height) {
            for x in self.dot_span(rect.x, rect.right(), self.width) {
                let c = self.dot_center(x, y);
                if c.x >= rect.x && c.x < rect.right() && c.y >= rect.y && c.y < rect.bottom() {
                    self.set(x, y, color);
                }
            }
        }
    }

    /// Fill a circle. Radii under one dot still mark the dot under the center.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let mut hit = false;
        for y in self.dot_span(center.y - radius, center.y + radius, self.height) {
            for x in self.dot_span(center.x - radius, center.x + radius, self.width) {
                if (self.dot_center(x, y) - center).length() <= radius {
                    self.set(x, y, color);
                    hit = true;
                }
            }
        }
        if !hit {
            self.set(
                (center.x / self.scale).floor() as i32,
                (center.y / self.scale).floor() as i32,
                color,
            );
        }
    }

    /// Fill the triangle `a b c` using edge functions on dot centers.
    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        let min_x = a.x.min(b.x).min(c.x);
        let max_x = a.x.max(b.x).max(c.x);
        let min_y = a.y.min(b.y).min(c.y);
        let max_y = a.y.max(b.y).max(c.y);

        let edge = |p: Vec2, q: Vec2, r: Vec2| (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x);
        let area = edge(a, b, c);
        if area == 0.0 {
            self.line(a, c, color);
            return;
        }

        for y in self.dot_span(min_y, max_y, self.height) {
            for x in self.dot_span(min_x, max_x, self.width) {
                let p = self.dot_center(x, y);
                let w0 = edge(b, c, p) * area.signum();
                let w1 = edge(c, a, p) * area.signum();
                let w2 = edge(a, b, p) * area.signum();
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.set(x, y, color);
                }
            }
        }
    }

    /// Draw a one-dot line between two scene points.
    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let steps = ((to - from).length() / self.scale).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let p = from + (to - from) * (i as f32 / steps as f32);
            self.set(
                (p.x / self.scale).floor() as i32,
                (p.y / self.scale).floor() as i32,
                color,
            );
        }
    }

    /// Pack the canvas into terminal lines, batching consecutive cells with
    /// the same colors into one span.
    pub fn to_lines(&self, background: Color) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.rows());
        for row in 0..self.rows() {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut cur_fg = Color::Reset;
            let mut cur_bg = Color::Reset;
            let mut cur_text = String::new();

            for x in 0..self.width {
                let fg = self.get(x, row * 2).unwrap_or(background);
                let bg = self.get(x, row * 2 + 1).unwrap_or(background);

                if fg != cur_fg || bg != cur_bg {
                    if !cur_text.is_empty() {
                        spans.push(Span::styled(
                            std::mem::take(&mut cur_text),
                            Style::default().fg(cur_fg).bg(cur_bg),
                        ));
                    }
                    cur_fg = fg;
                    cur_bg = bg;
                }
                cur_text.push(HALF_TOP);
            }
            if !cur_text.is_empty() {
                spans.push(Span::styled(
                    cur_text,
                    Style::default().fg(cur_fg).bg(cur_bg),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}
