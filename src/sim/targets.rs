//! Startup target layout
//!
//! Targets form a vertical column below the cursor's starting point. An
//! optional seeded jitter scatters them horizontally; the same seed always
//! yields the same layout.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::TargetPoint;
use crate::consts::*;

/// Horizontal scatter applied to generated targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jitter {
    /// Maximum |offset| from the column x
    pub amplitude: f32,
    pub seed: u64,
}

/// Rule for the initial target column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetLayout {
    /// Number of evenly spaced targets
    pub count: usize,
    /// Vertical distance between consecutive targets
    pub spacing: f32,
    /// y of the first target
    pub y_offset: f32,
    /// Column x
    pub x: f32,
    /// Prepend an extra target at `y_offset` (duplicates the first one)
    pub include_seed: bool,
    /// Optional horizontal scatter
    pub jitter: Option<Jitter>,
}

impl Default for TargetLayout {
    fn default() -> Self {
        Self {
            count: TARGET_COUNT,
            spacing: TARGET_SPACING,
            y_offset: TARGET_Y_OFFSET,
            x: 0.0,
            include_seed: false,
            jitter: None,
        }
    }
}

/// Generate the startup targets, all un-hit, in increasing y order
pub fn generate_targets(layout: &TargetLayout) -> Vec<TargetPoint> {
    let capacity = layout
        .count
        .min(MAX_TARGET_COUNT)
        .saturating_add(usize::from(layout.include_seed));
    let mut targets = Vec::with_capacity(capacity);

    if layout.include_seed {
        targets.push(TargetPoint::new(Vec2::new(layout.x, layout.y_offset)));
    }

    let mut rng = layout.jitter.map(|j| (Pcg32::seed_from_u64(j.seed), j.amplitude));

    for i in 0..layout.count {
        let y = layout.y_offset + i as f32 * layout.spacing;
        let x = match rng.as_mut() {
            Some((rng, amplitude)) if *amplitude > 0.0 && amplitude.is_finite() => {
                layout.x + rng.random_range(-*amplitude..=*amplitude)
            }
            _ => layout.x,
        };
        targets.push(TargetPoint::new(Vec2::new(x, y)));
    }

    log::debug!(
        "Generated {} targets (spacing {}, first y {})",
        targets.len(),
        layout.spacing,
        layout.y_offset
    );
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_column() {
        let targets = generate_targets(&TargetLayout::default());
        assert_eq!(targets.len(), 100);
        assert_eq!(targets[0].position, Vec2::new(0.0, 4000.0));
        assert_eq!(targets[99].position, Vec2::new(0.0, 4000.0 + 99.0 * 500.0));
        assert!(targets.iter().all(|t| !t.hit));
        for pair in targets.windows(2) {
            assert_eq!(pair[1].position.y - pair[0].position.y, 500.0);
        }
    }

    #[test]
    fn test_seed_point_duplicates_first() {
        let layout = TargetLayout {
            include_seed: true,
            ..Default::default()
        };
        let targets = generate_targets(&layout);
        assert_eq!(targets.len(), 101);
        assert_eq!(targets[0].position, targets[1].position);
    }

    #[test]
    fn test_empty_layout() {
        let layout = TargetLayout {
            count: 0,
            ..Default::default()
        };
        assert!(generate_targets(&layout).is_empty());
    }

    #[test]
    fn test_jitter_is_deterministic_and_bounded() {
        let layout = TargetLayout {
            count: 50,
            jitter: Some(Jitter {
                amplitude: 150.0,
                seed: 12345,
            }),
            ..Default::default()
        };
        let a = generate_targets(&layout);
        let b = generate_targets(&layout);
        assert_eq!(a, b);
        assert!(a.iter().all(|t| t.position.x.abs() <= 150.0));
        assert!(a.iter().any(|t| t.position.x != 0.0));
        // Jitter never touches y
        assert_eq!(a[10].position.y, 4000.0 + 10.0 * 500.0);
    }

    #[test]
    fn test_non_finite_jitter_keeps_column() {
        let layout = TargetLayout {
            count: 3,
            include_seed: true,
            jitter: Some(Jitter {
                amplitude: f32::INFINITY,
                seed: 1,
            }),
            ..Default::default()
        };
        let targets = generate_targets(&layout);
        assert_eq!(targets.len(), 4);
        assert!(targets.iter().all(|t| t.position.x == 0.0));
    }
}
