//! Cursor physics step
//!
//! Semi-implicit Euler with a twist: velocity is advanced first, but position
//! moves with the velocity from *before* this step. Swapping that order
//! changes the shape of every trajectory.

use glam::Vec2;

use super::error::{Result, SimError};
use super::state::SimulationState;
use crate::millis_to_secs;

/// Sign-based pull toward x = 0 (constant magnitude, not a spring)
#[inline]
pub fn centering_acceleration(x: f32, magnitude: f32) -> f32 {
    if x < 0.0 {
        magnitude
    } else if x > 0.0 {
        -magnitude
    } else {
        0.0
    }
}

/// Rescale `velocity` to `max_speed` if it is faster, keeping direction
#[inline]
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed && speed > 0.0 {
        velocity * (max_speed / speed)
    } else {
        velocity
    }
}

/// Advance the simulation by `elapsed_millis`
///
/// Consumes any pending drag impulse, applies gravity and the centering
/// pull, clamps speed and moves the cursor. The input state is untouched.
pub fn advance(state: &SimulationState, elapsed_millis: f64) -> Result<SimulationState> {
    if !elapsed_millis.is_finite() || elapsed_millis < 0.0 {
        return Err(SimError::InvalidInput { elapsed_millis });
    }

    let mut next = state.clone();
    let cursor = &mut next.cursor;

    // Drag impulse
    if next.drag_delta != 0.0 {
        if next.features.apply_drag_to_velocity {
            cursor.velocity.x += next.drag_delta;
        } else {
            cursor.acceleration.x += next.drag_delta;
        }
        next.drag_delta = 0.0;
    }

    let dt = millis_to_secs(elapsed_millis);
    let v = cursor.velocity;

    let center_x = if next.features.centering_enabled {
        centering_acceleration(cursor.position.x, next.centering_acceleration)
    } else {
        0.0
    };

    let mut v_next = v + (cursor.acceleration + Vec2::new(center_x, 0.0)) * dt;
    if let Some(max_speed) = next.max_speed {
        v_next = clamp_speed(v_next, max_speed);
    }

    cursor.position += v * dt;
    cursor.velocity = v_next;

    if !cursor.is_finite() {
        return Err(SimError::NumericOverflow {
            position: cursor.position,
            velocity: cursor.velocity,
        });
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::KinematicPoint;

    fn state_with(position: Vec2, velocity: Vec2, acceleration: Vec2) -> SimulationState {
        let mut state = SimulationState::default();
        state.cursor = KinematicPoint::new(position, velocity, acceleration);
        state.targets.clear();
        state
    }

    #[test]
    fn test_falling_from_rest_uses_old_velocity() {
        let state = state_with(Vec2::ZERO, Vec2::ZERO, Vec2::new(0.0, 500.0));
        let next = advance(&state, 1000.0).unwrap();
        assert_eq!(next.cursor.velocity, Vec2::new(0.0, 500.0));
        assert_eq!(next.cursor.position, Vec2::ZERO);

        // Second second moves with the velocity gained in the first
        let next = advance(&next, 1000.0).unwrap();
        assert_eq!(next.cursor.position, Vec2::new(0.0, 500.0));
        assert_eq!(next.cursor.velocity, Vec2::new(0.0, 1000.0));
    }

    #[test]
    fn test_zero_elapsed_is_noop() {
        let state = state_with(Vec2::new(12.0, -3.0), Vec2::new(40.0, 60.0), Vec2::new(0.0, 500.0));
        let next = advance(&state, 0.0).unwrap();
        assert_eq!(next.cursor.position, state.cursor.position);
        assert_eq!(next.cursor.velocity, state.cursor.velocity);
    }

    #[test]
    fn test_centering_sign() {
        assert_eq!(centering_acceleration(0.0, 200.0), 0.0);
        assert_eq!(centering_acceleration(-5.0, 200.0), 200.0);
        assert_eq!(centering_acceleration(5.0, 200.0), -200.0);
        // Constant magnitude, not proportional to displacement
        assert_eq!(centering_acceleration(5000.0, 200.0), -200.0);
    }

    #[test]
    fn test_centering_applied_to_velocity() {
        let state = state_with(Vec2::new(50.0, 0.0), Vec2::ZERO, Vec2::ZERO);
        let next = advance(&state, 500.0).unwrap();
        assert!((next.cursor.velocity.x - (-100.0)).abs() < 1e-4);

        let mut disabled = state.clone();
        disabled.features.centering_enabled = false;
        let next = advance(&disabled, 500.0).unwrap();
        assert_eq!(next.cursor.velocity.x, 0.0);
    }

    #[test]
    fn test_clamp_speed() {
        let clamped = clamp_speed(Vec2::new(3000.0, 4000.0), 1000.0);
        assert!((clamped.length() - 1000.0).abs() < 1e-3);
        assert!((clamped.x - 600.0).abs() < 1e-3);
        assert!((clamped.y - 800.0).abs() < 1e-3);

        assert_eq!(clamp_speed(Vec2::ZERO, 0.0), Vec2::ZERO);
        assert_eq!(clamp_speed(Vec2::new(1.0, 1.0), 10.0), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_speed_clamped_after_step() {
        let state = state_with(Vec2::ZERO, Vec2::new(0.0, 990.0), Vec2::new(0.0, 500.0));
        let next = advance(&state, 1000.0).unwrap();
        assert!((next.cursor.speed() - 1000.0).abs() < 1e-3);

        let mut unclamped = state.clone();
        unclamped.max_speed = None;
        let next = advance(&unclamped, 1000.0).unwrap();
        assert_eq!(next.cursor.velocity.y, 1490.0);
    }

    #[test]
    fn test_drag_to_velocity() {
        let mut state = state_with(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO);
        state.features.centering_enabled = false;
        state.drag_delta = 30.0;
        let next = advance(&state, 0.0).unwrap();
        assert_eq!(next.cursor.velocity.x, 30.0);
        assert_eq!(next.drag_delta, 0.0);
        // Original state is untouched
        assert_eq!(state.drag_delta, 30.0);
    }

    #[test]
    fn test_drag_to_acceleration() {
        let mut state = state_with(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO);
        state.features.centering_enabled = false;
        state.features.apply_drag_to_velocity = false;
        state.drag_delta = 30.0;
        let next = advance(&state, 1000.0).unwrap();
        assert_eq!(next.cursor.acceleration.x, 30.0);
        assert_eq!(next.cursor.velocity.x, 30.0);
        assert_eq!(next.drag_delta, 0.0);
        // Acceleration persists into later steps
        let next = advance(&next, 1000.0).unwrap();
        assert_eq!(next.cursor.velocity.x, 60.0);
    }

    #[test]
    fn test_invalid_elapsed() {
        let state = SimulationState::default();
        assert!(matches!(
            advance(&state, -1.0),
            Err(SimError::InvalidInput { .. })
        ));
        assert!(matches!(
            advance(&state, f64::NAN),
            Err(SimError::InvalidInput { .. })
        ));
        assert!(matches!(
            advance(&state, f64::INFINITY),
            Err(SimError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_overflow_detected() {
        let mut state = state_with(Vec2::ZERO, Vec2::new(0.0, f32::MAX), Vec2::ZERO);
        state.max_speed = None;
        assert!(matches!(
            advance(&state, 1_000_000.0),
            Err(SimError::NumericOverflow { .. })
        ));
    }
}
