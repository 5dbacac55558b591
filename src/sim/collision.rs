//! Collision categories and overlap tests
//!
//! Everything that can touch the player is an axis-aligned rectangle, so
//! detection is circle-vs-rect. Contact *events* use begin-edge semantics:
//! a contact fires on the tick overlap starts, not on every overlapping tick.

use glam::Vec2;

/// What a collidable body is, for contact dispatch.
///
/// A body belongs to exactly one category. The bit values are kept distinct
/// powers of two to match the engine-style contact masks they stand in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCategory {
    Player,
    Obstacle,
    Scoring,
}

impl CollisionCategory {
    pub const fn bits(self) -> u32 {
        match self {
            CollisionCategory::Player => 1,
            CollisionCategory::Obstacle => 2,
            CollisionCategory::Scoring => 4,
        }
    }
}

/// Axis-aligned rectangle, stored as center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }
}

/// True if a circle overlaps an axis-aligned rectangle
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = center.clamp(rect.min(), rect.max());
    (closest - center).length_squared() <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_bits_are_distinct_powers_of_two() {
        let bits = [
            CollisionCategory::Player.bits(),
            CollisionCategory::Obstacle.bits(),
            CollisionCategory::Scoring.bits(),
        ];
        assert_eq!(bits, [1, 2, 4]);
        for b in bits {
            assert_eq!(b.count_ones(), 1);
        }
    }

    #[test]
    fn test_circle_rect_overlap_center_inside() {
        let rect = Rect::from_center_size(Vec2::new(100.0, 100.0), Vec2::new(52.0, 320.0));
        assert!(circle_rect_overlap(Vec2::new(100.0, 100.0), 13.0, &rect));
    }

    #[test]
    fn test_circle_rect_overlap_edge() {
        let rect = Rect::from_center_size(Vec2::ZERO, Vec2::new(20.0, 20.0));

        // Touching the right edge from outside
        assert!(circle_rect_overlap(Vec2::new(22.0, 0.0), 13.0, &rect));
        // Clearly separated
        assert!(!circle_rect_overlap(Vec2::new(24.0, 0.0), 13.0, &rect));
    }

    #[test]
    fn test_circle_rect_overlap_corner() {
        let rect = Rect::from_center_size(Vec2::ZERO, Vec2::new(20.0, 20.0));

        // Corner at (10, 10); circle center at (16, 16) is ~8.49 away
        assert!(circle_rect_overlap(Vec2::new(16.0, 16.0), 9.0, &rect));
        assert!(!circle_rect_overlap(Vec2::new(16.0, 16.0), 8.0, &rect));
    }

    #[test]
    fn test_circle_rect_miss_diagonal() {
        // Near the corner but outside the radius along both axes
        let rect = Rect::from_center_size(Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(!circle_rect_overlap(Vec2::new(70.0, 70.0), 10.0, &rect));
    }

    #[test]
    fn test_thin_trigger_overlap() {
        // The score trigger is only one unit wide; the player circle must
        // still register while crossing it.
        let rect = Rect::from_center_size(Vec2::new(86.0, 300.0), Vec2::new(1.0, 96.0));
        assert!(circle_rect_overlap(Vec2::new(80.0, 300.0), 13.0, &rect));
        assert!(circle_rect_overlap(Vec2::new(92.0, 310.0), 13.0, &rect));
        assert!(!circle_rect_overlap(Vec2::new(60.0, 300.0), 13.0, &rect));
    }
}
