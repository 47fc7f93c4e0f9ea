//! Axis-aligned rectangle geometry
//!
//! The only geometry Heart Dash needs: the player and every heart are
//! axis-aligned boxes, and collection is a box overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square rect from a position and edge length
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// AABB overlap via the separating-axis short-circuit
    ///
    /// Touching edges count as overlapping: two rects are separated only
    /// when one is strictly left of, right of, above, or below the other.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_plain() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(20.0, 20.0, 40.0, 40.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_collide() {
        // Player-sized rect with a heart-sized rect exactly on its right edge
        let player = Rect::new(0.0, 0.0, 50.0, 50.0);
        let heart = Rect::new(50.0, 0.0, 40.0, 40.0);
        assert!(player.overlaps(&heart));

        // Same on the vertical axis
        let below = Rect::new(0.0, 50.0, 40.0, 40.0);
        assert!(player.overlaps(&below));
    }

    #[test]
    fn test_one_pixel_gap_misses() {
        let player = Rect::new(0.0, 0.0, 50.0, 50.0);
        let heart = Rect::new(51.0, 0.0, 40.0, 40.0);
        assert!(!player.overlaps(&heart));
        assert!(!heart.overlaps(&player));
    }

    #[test]
    fn test_containment_counts() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(30.0, 30.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_diagonal_miss() {
        // Overlapping x ranges but disjoint y ranges must not collide
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(10.0, 120.0, 40.0, 40.0);
        assert!(!a.overlaps(&b));
    }
}
