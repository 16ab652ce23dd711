//! Simulation module
//!
//! All cursor and target logic lives here. This module must stay pure:
//! - State in, state out for the physics and collision steps
//! - Input only through queued intents
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod frame;
pub mod input;
pub mod physics;
pub mod state;
pub mod targets;

pub use collision::{detect_hits, score, within_tolerance};
pub use error::{Result, SimError};
pub use frame::{FrameClock, FrameOutcome, Simulation};
pub use input::{DragTracker, InputIntent, InputQueue};
pub use physics::{advance, centering_acceleration, clamp_speed};
pub use state::{Features, HitTestShape, KinematicPoint, SimulationState, TargetPoint};
pub use targets::{Jitter, TargetLayout, generate_targets};
