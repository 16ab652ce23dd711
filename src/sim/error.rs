//! Simulation error conditions
//!
//! None of these are fatal: the frame driver logs them and keeps the last
//! good state so the visual loop never stops.

use glam::Vec2;
use thiserror::Error;

/// Errors produced by the simulation core and settings validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Elapsed time was negative, NaN or infinite
    #[error("invalid elapsed time: {elapsed_millis} ms")]
    InvalidInput { elapsed_millis: f64 },

    /// Integration produced a non-finite position or velocity
    #[error("numeric overflow: position={position}, velocity={velocity}")]
    NumericOverflow { position: Vec2, velocity: Vec2 },

    /// Settings failed validation or could not be parsed
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// A specialized [`Result`] type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SimError::InvalidInput {
            elapsed_millis: -5.0,
        };
        assert_eq!(err.to_string(), "invalid elapsed time: -5 ms");

        let err = SimError::InvalidSettings("max_speed must be non-negative".into());
        assert!(err.to_string().contains("max_speed"));
    }
}
