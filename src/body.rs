//! The snakebird body: an ordered chain of segments, head first.

use crate::error::SetupError;
use crate::geometry::{positions_equal, Rect, Vec2};

/// One link of the chain. `size` is the edge length in pixels; in continuous
/// mode `pos` is the top-left corner of the segment's square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub pos: Vec2,
    pub size: f32,
}

/// Ordered segment chain. Index 0 is the head, the last index is the tail.
///
/// Length stays within `1..=capacity`: the body never shrinks, and growth
/// past capacity is silently ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    segments: Vec<Segment>,
    capacity: usize,
}

impl Body {
    /// Build a straight chain of `length` segments, segment `i` at
    /// `start + step * i`.
    pub fn new(
        start: Vec2,
        length: usize,
        step: Vec2,
        size: f32,
        capacity: usize,
    ) -> Result<Self, SetupError> {
        if length == 0 {
            return Err(SetupError::EmptyBody);
        }
        if length > capacity {
            return Err(SetupError::BodyTooLong {
                requested: length,
                capacity,
            });
        }

        let segments = (0..length)
            .map(|i| Segment {
                pos: start + step * i as f32,
                size,
            })
            .collect();

        Ok(Self { segments, capacity })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a constructed body; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.segments.iter().map(|s| s.pos)
    }

    pub fn head(&self) -> Vec2 {
        self.segments[0].pos
    }

    pub fn tail(&self) -> Vec2 {
        self.segments[self.segments.len() - 1].pos
    }

    /// Pixel rectangle of the head (continuous mode).
    pub fn head_rect(&self) -> Rect {
        let head = self.segments[0];
        Rect::new(head.pos.x, head.pos.y, head.size, head.size)
    }

    /// True if any segment sits in the same grid cell as `pos`.
    pub fn contains_position(&self, pos: Vec2) -> bool {
        self.segments.iter().any(|s| positions_equal(s.pos, pos))
    }

    /// Rigid one-step move: every segment takes its predecessor's old
    /// position, then the head takes `new_head`.
    pub fn shift_to(&mut self, new_head: Vec2) {
        let previous: Vec<Vec2> = self.positions().collect();
        for (segment, pos) in self.segments.iter_mut().skip(1).zip(previous) {
            segment.pos = pos;
        }
        self.segments[0].pos = new_head;
    }

    /// Move the head directly, leaving the rest of the chain in place.
    pub fn set_head(&mut self, pos: Vec2) {
        self.segments[0].pos = pos;
    }

    /// Ease every non-head segment toward a point trailing its predecessor.
    ///
    /// The target sits `spacing` away from the predecessor along the current
    /// predecessor-to-segment direction, sagging by `sag * index` pixels.
    pub fn follow_chain(&mut self, dt: f32, follow_speed: f32, spacing: f32, sag: f32) {
        let blend = (follow_speed * dt).clamp(0.0, 1.0);
        for i in 1..self.segments.len() {
            let leader = self.segments[i - 1].pos;
            let current = self.segments[i].pos;
            let trail = (current - leader).normalize_or(Vec2::new(-1.0, 0.0));
            let target = leader + trail * spacing + Vec2::new(0.0, sag * i as f32);
            self.segments[i].pos = current + (target - current) * blend;
        }
    }

    /// Append a segment at the tail's position. Returns false (and does
    /// nothing) once the body is at capacity.
    pub fn grow_by_one(&mut self) -> bool {
        if self.segments.len() >= self.capacity {
            return false;
        }
        let tail = self.segments[self.segments.len() - 1];
        self.segments.push(tail);
        true
    }

    /// Drop the whole body one row (grid gravity).
    pub fn shift_down_by_one(&mut self) {
        for segment in &mut self.segments {
            segment.pos.y += 1.0;
        }
    }
}
