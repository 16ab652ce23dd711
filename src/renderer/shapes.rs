//! Screen-space geometry for the 2D primitives
//!
//! Pure functions from simulation state to pixel coordinates, so the painter
//! only has to stroke and fill.

use glam::Vec2;

use crate::sim::{KinematicPoint, TargetPoint, score};

/// Maps world coordinates to screen pixels
///
/// World x = 0 sits at the horizontal centre; the cursor's y is pinned to
/// `anchor_y` so the world scrolls past as it falls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    /// Camera for a viewport, following the cursor vertically
    pub fn follow(cursor: &KinematicPoint, viewport: Vec2) -> Self {
        let anchor_y = viewport.y / 3.0;
        Self {
            offset: Vec2::new(viewport.x / 2.0, anchor_y - cursor.position.y),
        }
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world + self.offset
    }
}

/// Screen y of each horizontal background line inside the viewport
///
/// Lines sit at world y = k * spacing and scroll with the camera.
pub fn background_lines(camera: &Camera, viewport_height: f32, spacing: f32) -> Vec<f32> {
    if !(spacing > 0.0 && viewport_height > 0.0) || !camera.offset.y.is_finite() {
        return Vec::new();
    }
    // Screen y of the topmost line at or below 0
    let first = camera.offset.y.rem_euclid(spacing);
    let count = ((viewport_height - first) / spacing).floor() as usize + 1;
    (0..count)
        .map(|i| first + i as f32 * spacing)
        .filter(|y| *y <= viewport_height)
        .collect()
}

/// Triangle vertices (tip first) for the cursor, pointing along its heading
///
/// A resting cursor points straight down.
pub fn cursor_triangle(cursor: &KinematicPoint, camera: &Camera, size: f32) -> [Vec2; 3] {
    let center = camera.world_to_screen(cursor.position);
    let heading = cursor.velocity.try_normalize().unwrap_or(Vec2::Y);
    let perp = heading.perp();

    let tip = center + heading * size;
    let back = center - heading * (size * 0.5);
    [tip, back + perp * (size * 0.5), back - perp * (size * 0.5)]
}

/// A target ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCircle {
    pub center: Vec2,
    pub radius: f32,
    pub hit: bool,
}

/// Screen circle for a target
pub fn target_circle(target: &TargetPoint, camera: &Camera, radius: f32) -> TargetCircle {
    TargetCircle {
        center: camera.world_to_screen(target.position),
        radius,
        hit: target.hit,
    }
}

/// Circles for the targets that overlap the viewport
pub fn visible_targets(
    targets: &[TargetPoint],
    camera: &Camera,
    viewport: Vec2,
    radius: f32,
) -> Vec<TargetCircle> {
    targets
        .iter()
        .map(|t| target_circle(t, camera, radius))
        .filter(|c| {
            c.center.y + c.radius >= 0.0
                && c.center.y - c.radius <= viewport.y
                && c.center.x + c.radius >= 0.0
                && c.center.x - c.radius <= viewport.x
        })
        .collect()
}

/// Score readout
pub fn score_text(targets: &[TargetPoint]) -> String {
    format!("Score: {}", score(targets))
}
