//! Axis-aligned collision tests
//!
//! Everything in the game is a box: the avatar, the two obstacle segments.
//! A hit is a horizontal overlap combined with the avatar leaving the gap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Avatar reached the ground line
    Ground,
    /// Avatar left an obstacle's gap while overlapping it
    Obstacle,
}

/// An axis-aligned rectangle described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Strict overlap on the x axis with the column `[x, x + width]`
    #[inline]
    pub fn overlaps_column(&self, x: f32, width: f32) -> bool {
        self.right() > x && self.left() < x + width
    }

    /// True if any part of the box lies outside the vertical span `[gap_top, gap_bottom]`
    #[inline]
    pub fn leaves_span(&self, gap_top: f32, gap_bottom: f32) -> bool {
        self.top() < gap_top || self.bottom() > gap_bottom
    }
}

/// Test a box against a gapped column
///
/// The column occupies `[x, x + width]` horizontally and is solid everywhere
/// except the vertical span `[gap_top, gap_bottom]`.
pub fn hits_gapped_column(body: &Aabb, x: f32, width: f32, gap_top: f32, gap_bottom: f32) -> bool {
    body.overlaps_column(x, width) && body.leaves_span(gap_top, gap_bottom)
}
