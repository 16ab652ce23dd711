//! Simulation state and core types
//!
//! Everything the physics and collision steps read or produce lives here.
//! The renderer only ever sees these values through a shared borrow.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::targets::generate_targets;
use crate::settings::Settings;

/// How the collision step measures proximity to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitTestShape {
    /// Axis-aligned square window (strict on both axes)
    #[default]
    Box,
    /// Euclidean distance, matching how targets are drawn
    Circle,
}

/// Behaviour toggles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Drag impulses go to velocity.x (true) or acceleration.x (false)
    pub apply_drag_to_velocity: bool,
    /// Apply the sign-based pull toward x = 0
    pub centering_enabled: bool,
    /// Proximity test used for hits
    pub hit_test_shape: HitTestShape,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            apply_drag_to_velocity: true,
            centering_enabled: true,
            hit_test_shape: HitTestShape::Box,
        }
    }
}

/// The single moving entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicPoint {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

impl KinematicPoint {
    pub fn new(position: Vec2, velocity: Vec2, acceleration: Vec2) -> Self {
        Self {
            position,
            velocity,
            acceleration,
        }
    }

    /// Current speed (velocity magnitude)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Position and velocity are both finite
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// A static target the cursor can fly through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub position: Vec2,
    /// Latches true on first contact, never resets
    pub hit: bool,
}

impl TargetPoint {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            hit: false,
        }
    }
}

/// Complete simulation state
///
/// Replaced wholesale each frame; only the frame driver holds it mutably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// The moving cursor
    pub cursor: KinematicPoint,
    /// Physics and collision are skipped while set
    pub paused: bool,
    /// A drag gesture is in progress
    pub dragging: bool,
    /// Horizontal drag accumulated since the last physics step
    pub drag_delta: f32,
    /// Speed cap (None disables clamping)
    pub max_speed: Option<f32>,
    /// Magnitude of the pull toward x = 0
    pub centering_acceleration: f32,
    /// Behaviour toggles
    pub features: Features,
    /// Targets in generation order
    pub targets: Vec<TargetPoint>,
}

impl SimulationState {
    /// Build the startup state from settings
    pub fn new(settings: &Settings) -> Self {
        let physics = &settings.physics;
        Self {
            cursor: KinematicPoint::new(Vec2::ZERO, Vec2::ZERO, physics.gravity),
            paused: false,
            dragging: false,
            drag_delta: 0.0,
            max_speed: physics.max_speed,
            centering_acceleration: physics.centering_acceleration,
            features: settings.features,
            targets: generate_targets(&settings.targets),
        }
    }

    /// Number of targets hit so far
    pub fn score(&self) -> usize {
        super::collision::score(&self.targets)
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
