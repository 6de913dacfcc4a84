//! Geometry primitives and collision predicates.
//!
//! Every rectangle query uses the same half-open convention: two rectangles
//! overlap only if their interiors intersect, so rectangles that merely share
//! an edge do not collide.

use crate::constants::TILE_SIZE;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// A 2D point or vector.
///
/// Grid mode stores integer-valued cell coordinates; continuous mode stores
/// pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or `fallback` for a (near) zero vector.
    pub fn normalize_or(self, fallback: Vec2) -> Vec2 {
        let len = self.length();
        if len > 1e-4 {
            Vec2::new(self.x / len, self.y / len)
        } else {
            fallback
        }
    }

    /// Integer cell this point falls in.
    pub fn cell(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle in pixels. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Thin strip of `depth` pixels directly under this rectangle.
    pub fn below(&self, depth: f32) -> Rect {
        Rect::new(self.x, self.bottom(), self.width, depth)
    }

    /// True if both horizontal extents intersect (strictly).
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }
}

/// Half-open rectangle intersection. Shared edges do not count.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.overlaps_horizontally(b) && a.y < b.bottom() && a.bottom() > b.y
}

/// Circle/rectangle intersection via the closest point on the rectangle.
/// A circle that only touches the rectangle does not count.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest_x = center.x.clamp(rect.x, rect.right());
    let closest_y = center.y.clamp(rect.y, rect.bottom());
    let dx = center.x - closest_x;
    let dy = center.y - closest_y;
    dx * dx + dy * dy < radius * radius
}

/// Equality at grid resolution: both points floor to the same cell.
pub fn positions_equal(p: Vec2, q: Vec2) -> bool {
    p.cell() == q.cell()
}

/// Pixel rectangle covered by a grid cell.
pub fn cell_rect(cell: Vec2) -> Rect {
    let (cx, cy) = cell.cell();
    Rect::new(
        cx as f32 * TILE_SIZE,
        cy as f32 * TILE_SIZE,
        TILE_SIZE,
        TILE_SIZE,
    )
}

/// Cell directly below `cell`.
pub fn cell_below(cell: Vec2) -> Vec2 {
    Vec2::new(cell.x, cell.y + 1.0)
}

/// Cell directly above `cell`.
pub fn cell_above(cell: Vec2) -> Vec2 {
    Vec2::new(cell.x, cell.y - 1.0)
}
