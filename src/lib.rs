//! Drag Flight - a falling cursor steered by drag gestures
//!
//! Core modules:
//! - `sim`: Pure simulation (physics step, hit detection, input intents, frame driver)
//! - `renderer`: Screen-space geometry and the Canvas2D painter
//! - `settings`: Tunable constants and feature toggles

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{PhysicsSettings, Settings};
pub use sim::{Features, SimError, Simulation, SimulationState};

/// Default tuning constants
pub mod consts {
    use glam::Vec2;

    /// Constant acceleration applied to the cursor (world units/s², +y is down)
    pub const GRAVITY: Vec2 = Vec2::new(0.0, 500.0);
    /// Speed cap for the cursor (world units/s)
    pub const MAX_SPEED: f32 = 1000.0;
    /// Magnitude of the sign-based pull back toward x = 0
    pub const CENTERING_ACCELERATION: f32 = 200.0;

    /// Half-width of the hit window around a target
    pub const HIT_TOLERANCE: f32 = 20.0;
    /// Radius targets are drawn with
    pub const TARGET_DRAW_RADIUS: f32 = 20.0;

    /// Target column defaults
    pub const TARGET_COUNT: usize = 100;
    pub const TARGET_SPACING: f32 = 500.0;
    pub const TARGET_Y_OFFSET: f32 = 4000.0;
    /// Upper bound on a configured target count
    pub const MAX_TARGET_COUNT: usize = 100_000;

    /// Longest gap between frames fed to physics (backgrounded tab, debugger pause)
    pub const MAX_FRAME_MILLIS: f64 = 100.0;

    /// Vertical distance between scrolling background lines
    pub const BACKGROUND_LINE_SPACING: f32 = 100.0;
    /// Cursor triangle size in pixels
    pub const CURSOR_SIZE: f32 = 16.0;
}

/// Seconds from a millisecond duration
#[inline]
pub fn millis_to_secs(millis: f64) -> f32 {
    (millis / 1000.0) as f32
}
