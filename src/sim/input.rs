//! Input intents
//!
//! Event handlers never touch the simulation state directly. They push
//! intents onto a queue which the frame driver drains once per frame, before
//! physics runs.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::state::SimulationState;

/// A single user intent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputIntent {
    /// Flip the paused flag
    TogglePause,
    /// Pointer pressed at screen x
    DragStart { x: f32 },
    /// Pointer moved horizontally while pressed
    DragMove { delta_x: f32 },
    /// Pointer released or left the surface
    DragEnd,
}

impl InputIntent {
    /// Apply this intent to the state
    pub fn apply(self, state: &mut SimulationState) {
        match self {
            InputIntent::TogglePause => {
                state.paused = !state.paused;
                log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
            }
            InputIntent::DragStart { .. } => state.dragging = true,
            InputIntent::DragMove { delta_x } => {
                if state.dragging {
                    state.drag_delta += delta_x;
                }
            }
            InputIntent::DragEnd => state.dragging = false,
        }
    }

    /// Intent for a key name (as reported by `KeyboardEvent.key`)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "p" | "P" => Some(InputIntent::TogglePause),
            _ => None,
        }
    }
}

/// FIFO of intents collected between frames
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<InputIntent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: InputIntent) {
        self.pending.push_back(intent);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every queued intent in arrival order, leaving the queue empty
    pub fn drain_into(&mut self, state: &mut SimulationState) -> usize {
        let count = self.pending.len();
        for intent in self.pending.drain(..) {
            intent.apply(state);
        }
        count
    }
}

/// Turns absolute pointer positions into drag intents
#[derive(Debug, Clone, Copy)]
pub struct DragTracker {
    last_x: Option<f32>,
    /// Scale from screen pixels to drag units
    pub gain: f32,
}

impl DragTracker {
    pub fn new(gain: f32) -> Self {
        Self { last_x: None, gain }
    }

    pub fn is_active(&self) -> bool {
        self.last_x.is_some()
    }

    pub fn press(&mut self, x: f32) -> InputIntent {
        self.last_x = Some(x);
        InputIntent::DragStart { x }
    }

    /// None when no drag is in progress or the pointer did not move sideways
    pub fn moved(&mut self, x: f32) -> Option<InputIntent> {
        let last = self.last_x?;
        self.last_x = Some(x);
        let delta_x = (x - last) * self.gain;
        (delta_x != 0.0).then_some(InputIntent::DragMove { delta_x })
    }

    pub fn release(&mut self) -> InputIntent {
        self.last_x = None;
        InputIntent::DragEnd
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(1.0)
    }
}
