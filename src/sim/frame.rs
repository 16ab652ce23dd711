//! Frame driver
//!
//! Owns the one mutable state slot. Each frame drains queued input, measures
//! elapsed time, then runs physics and hit detection in that order.

use super::collision::detect_hits;
use super::error::SimError;
use super::input::{InputIntent, InputQueue};
use super::physics::advance;
use super::state::SimulationState;
use crate::settings::Settings;

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    /// Longest gap handed to physics in one frame
    pub max_frame_millis: f64,
}

impl FrameClock {
    pub fn new(max_frame_millis: f64) -> Self {
        Self {
            last_timestamp: None,
            max_frame_millis,
        }
    }

    /// Record `now` and return milliseconds since the previous call
    ///
    /// The first call returns 0. Long gaps are capped at `max_frame_millis`;
    /// negative or non-finite gaps pass through for physics to reject.
    /// A non-finite `now` is never stored, so the next frame measures from
    /// the last good timestamp.
    pub fn tick(&mut self, now: f64) -> f64 {
        if !now.is_finite() {
            return f64::NAN;
        }
        let elapsed = match self.last_timestamp {
            Some(last) => now - last,
            None => 0.0,
        };
        self.last_timestamp = Some(now);
        if elapsed > self.max_frame_millis {
            self.max_frame_millis
        } else {
            elapsed
        }
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    /// Forget the previous timestamp (next tick reports 0)
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

/// What happened during one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Physics and hit detection ran
    Advanced { newly_hit: usize },
    /// Paused; only the clock moved
    Paused,
    /// Bad elapsed time; state unchanged
    Skipped(SimError),
    /// Integration blew up; last good state kept
    Recovered(SimError),
}

/// The running simulation: state, clock and pending input
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimulationState,
    clock: FrameClock,
    input: InputQueue,
    hit_tolerance: f32,
    frame_count: u64,
}

impl Simulation {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: SimulationState::new(settings),
            clock: FrameClock::new(settings.physics.max_frame_millis),
            input: InputQueue::new(),
            hit_tolerance: settings.physics.hit_tolerance,
            frame_count: 0,
        }
    }

    /// Read-only view for the renderer
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Queue an intent for the next frame
    pub fn push_input(&mut self, intent: InputIntent) {
        self.input.push(intent);
    }

    /// Start over from fresh settings, dropping queued input
    pub fn restart(&mut self, settings: &Settings) {
        *self = Self::new(settings);
        log::info!("Simulation restarted");
    }

    /// Run one frame at host timestamp `now` (milliseconds)
    pub fn frame(&mut self, now: f64) -> FrameOutcome {
        self.frame_count += 1;
        self.input.drain_into(&mut self.state);

        // Clock runs while paused so resuming doesn't replay the pause
        let elapsed = self.clock.tick(now);
        if self.state.paused {
            return FrameOutcome::Paused;
        }

        let next = match advance(&self.state, elapsed) {
            Ok(next) => next,
            Err(err @ SimError::InvalidInput { .. }) => {
                log::warn!("Frame {} skipped: {}", self.frame_count, err);
                return FrameOutcome::Skipped(err);
            }
            Err(err) => {
                log::error!(
                    "Frame {}: {}; keeping last good state",
                    self.frame_count,
                    err
                );
                // Pending drag was consumed by the failed step
                self.state.drag_delta = 0.0;
                return FrameOutcome::Recovered(err);
            }
        };

        let before = self.state.score();
        let targets = detect_hits(
            next.cursor.position,
            &next.targets,
            self.hit_tolerance,
            next.features.hit_test_shape,
        );
        self.state = SimulationState { targets, ..next };

        let newly_hit = self.state.score() - before;
        if newly_hit > 0 {
            log::debug!(
                "Hit {} target(s) at {}, score {}",
                newly_hit,
                self.state.cursor.position,
                self.state.score()
            );
        }
        FrameOutcome::Advanced { newly_hit }
    }
}
