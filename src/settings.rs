//! Tuning and feature settings
//!
//! Persisted as JSON: LocalStorage on web, an optional file natively.
//! Every load path validates before handing settings to the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Result, SimError, TargetLayout};

pub use crate::sim::{Features, HitTestShape};

/// Physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Constant acceleration on the cursor (+y is down)
    pub gravity: Vec2,
    /// Speed cap; None disables clamping
    pub max_speed: Option<f32>,
    /// Magnitude of the sign-based pull toward x = 0
    pub centering_acceleration: f32,
    /// Half-width of a target's hit window
    pub hit_tolerance: f32,
    /// Cap on elapsed time per frame
    pub max_frame_millis: f64,
    /// Screen pixels to drag units
    pub drag_gain: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_speed: Some(MAX_SPEED),
            centering_acceleration: CENTERING_ACCELERATION,
            hit_tolerance: HIT_TOLERANCE,
            max_frame_millis: MAX_FRAME_MILLIS,
            drag_gain: 1.0,
        }
    }
}

/// All settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsSettings,
    pub features: Features,
    pub targets: TargetLayout,
    /// Vertical spacing of scrolling background lines
    pub background_line_spacing: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsSettings::default(),
            features: Features::default(),
            targets: TargetLayout::default(),
            background_line_spacing: BACKGROUND_LINE_SPACING,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "drag_flight_settings";

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        if !p.gravity.is_finite() {
            return Err(invalid("gravity must be finite"));
        }
        if let Some(max_speed) = p.max_speed {
            if !(max_speed >= 0.0 && max_speed.is_finite()) {
                return Err(invalid("max_speed must be non-negative"));
            }
        }
        if !(p.centering_acceleration >= 0.0 && p.centering_acceleration.is_finite()) {
            return Err(invalid("centering_acceleration must be non-negative"));
        }
        if !(p.hit_tolerance > 0.0 && p.hit_tolerance.is_finite()) {
            return Err(invalid("hit_tolerance must be positive"));
        }
        if !(p.max_frame_millis > 0.0) {
            return Err(invalid("max_frame_millis must be positive"));
        }
        if !p.drag_gain.is_finite() {
            return Err(invalid("drag_gain must be finite"));
        }
        let t = &self.targets;
        if !(t.spacing > 0.0 && t.spacing.is_finite()) {
            return Err(invalid("target spacing must be positive"));
        }
        if t.count > MAX_TARGET_COUNT {
            return Err(invalid("target count is too large"));
        }
        if !(t.y_offset.is_finite() && t.x.is_finite()) {
            return Err(invalid("target y_offset and x must be finite"));
        }
        if let Some(jitter) = t.jitter {
            if !(jitter.amplitude >= 0.0 && jitter.amplitude.is_finite()) {
                return Err(invalid("jitter amplitude must be non-negative"));
            }
        }
        if !(self.background_line_spacing > 0.0) {
            return Err(invalid("background_line_spacing must be positive"));
        }
        Ok(())
    }

    /// Parse and validate settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| SimError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::InvalidSettings(e.to_string()))
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(json)) => match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                },
                Ok(None) => {
                    // First run: store defaults so they can be edited in devtools
                    let settings = Self::default();
                    settings.save();
                    return settings;
                }
                Err(_) => {}
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SimError::InvalidSettings(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

fn invalid(msg: &str) -> SimError {
    SimError::InvalidSettings(msg.to_string())
}
