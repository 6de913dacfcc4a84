//! Static platform rectangles.

use crate::geometry::{cell_below, cell_rect, rects_overlap, Rect, Vec2};

/// Immovable platforms for one level. Bounded by a fixed capacity; adding
/// past it is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSet {
    rects: Vec<Rect>,
    capacity: usize,
}

impl PlatformSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            rects: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a platform. Returns false once the set is full.
    pub fn add(&mut self, rect: Rect) -> bool {
        if self.rects.len() >= self.capacity {
            return false;
        }
        self.rects.push(rect);
        true
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// True if `rect` overlaps any platform.
    pub fn blocks(&self, rect: &Rect) -> bool {
        self.rects.iter().any(|p| rects_overlap(rect, p))
    }

    /// True if the grid cell overlaps any platform.
    pub fn blocks_cell(&self, cell: Vec2) -> bool {
        self.blocks(&cell_rect(cell))
    }

    /// True if the cell one row below `cell` is solid.
    pub fn supports_cell(&self, cell: Vec2) -> bool {
        self.blocks_cell(cell_below(cell))
    }

    /// True if a `probe`-pixel strip under `rect` touches a platform.
    pub fn supports_rect(&self, rect: &Rect, probe: f32) -> bool {
        self.blocks(&rect.below(probe))
    }

    /// Top edge of the highest platform `rect` lands on.
    ///
    /// A landing needs horizontal overlap and the rectangle's bottom edge in
    /// `[top, top + tolerance)`. Anything deeper is side contact and ignored.
    pub fn landing_top(&self, rect: &Rect, tolerance: f32) -> Option<f32> {
        let bottom = rect.bottom();
        self.rects
            .iter()
            .filter(|p| rect.overlaps_horizontally(p))
            .filter(|p| bottom >= p.y && bottom < p.y + tolerance)
            .map(|p| p.y)
            .reduce(f32::min)
    }
}
