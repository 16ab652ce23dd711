//! Rendering module
//!
//! `shapes` turns simulation state into screen-space geometry; `canvas`
//! paints it with the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use shapes::{Camera, TargetCircle, background_lines, cursor_triangle, score_text, visible_targets};
