//! Hit detection between the cursor and static targets
//!
//! A linear scan: every target is tested against the cursor position each
//! frame. Hits latch, so a target once hit stays hit.

use glam::Vec2;

use super::state::{HitTestShape, TargetPoint};

/// Whether `point` lies inside the hit window around `target`
#[inline]
pub fn within_tolerance(point: Vec2, target: Vec2, tolerance: f32, shape: HitTestShape) -> bool {
    let delta = target - point;
    match shape {
        HitTestShape::Box => delta.x.abs() < tolerance && delta.y.abs() < tolerance,
        HitTestShape::Circle => delta.length_squared() < tolerance * tolerance,
    }
}

/// Mark every target within `tolerance` of `moving` as hit
///
/// Returns a new list in the same order; already-hit targets stay hit.
pub fn detect_hits(
    moving: Vec2,
    targets: &[TargetPoint],
    tolerance: f32,
    shape: HitTestShape,
) -> Vec<TargetPoint> {
    targets
        .iter()
        .map(|target| TargetPoint {
            position: target.position,
            hit: target.hit || within_tolerance(moving, target.position, tolerance, shape),
        })
        .collect()
}

/// Score is derived from the hit flags, never stored separately
pub fn score(targets: &[TargetPoint]) -> usize {
    targets.iter().filter(|t| t.hit).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(x: f32, y: f32) -> TargetPoint {
        TargetPoint::new(Vec2::new(x, y))
    }

    #[test]
    fn test_box_hit_inside_window() {
        let targets = [target(0.0, 4000.0)];
        let result = detect_hits(Vec2::new(5.0, 3995.0), &targets, 20.0, HitTestShape::Box);
        assert!(result[0].hit);
    }

    #[test]
    fn test_box_miss_outside_window() {
        let targets = [target(0.0, 4000.0)];
        let result = detect_hits(Vec2::new(0.0, 4050.0), &targets, 20.0, HitTestShape::Box);
        assert!(!result[0].hit);
    }

    #[test]
    fn test_box_edges_are_strict() {
        let targets = [target(0.0, 0.0)];
        let result = detect_hits(Vec2::new(20.0, 0.0), &targets, 20.0, HitTestShape::Box);
        assert!(!result[0].hit);
        let result = detect_hits(Vec2::new(0.0, -20.0), &targets, 20.0, HitTestShape::Box);
        assert!(!result[0].hit);
    }

    #[test]
    fn test_box_vs_circle_corner() {
        // Inside the square, outside the circle
        let targets = [target(0.0, 0.0)];
        let corner = Vec2::new(18.0, 18.0);
        assert!(detect_hits(corner, &targets, 20.0, HitTestShape::Box)[0].hit);
        assert!(!detect_hits(corner, &targets, 20.0, HitTestShape::Circle)[0].hit);

        let near = Vec2::new(10.0, 10.0);
        assert!(detect_hits(near, &targets, 20.0, HitTestShape::Circle)[0].hit);
    }

    #[test]
    fn test_hits_latch() {
        let targets = [target(0.0, 100.0)];
        let hit = detect_hits(Vec2::new(0.0, 100.0), &targets, 20.0, HitTestShape::Box);
        assert!(hit[0].hit);
        let later = detect_hits(Vec2::new(500.0, 9000.0), &hit, 20.0, HitTestShape::Box);
        assert!(later[0].hit);
    }

    #[test]
    fn test_order_and_length_preserved() {
        let targets = [target(0.0, 0.0), target(0.0, 500.0), target(0.0, 1000.0)];
        let result = detect_hits(Vec2::new(0.0, 505.0), &targets, 20.0, HitTestShape::Box);
        assert_eq!(result.len(), 3);
        for (before, after) in targets.iter().zip(&result) {
            assert_eq!(before.position, after.position);
        }
        assert_eq!(
            result.iter().map(|t| t.hit).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert_eq!(score(&result), 1);
    }
}
