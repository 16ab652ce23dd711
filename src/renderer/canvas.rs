//! Canvas2D painter (WASM only)

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{Camera, background_lines, cursor_triangle, score_text, visible_targets};
use crate::consts::{CURSOR_SIZE, TARGET_DRAW_RADIUS};
use crate::sim::SimulationState;

const BACKGROUND: &str = "black";
const LINE_COLOR: &str = "#222";
const CURSOR_COLOR: &str = "white";
const TARGET_COLOR: &str = "#888";
const TARGET_HIT_COLOR: &str = "#4f4";
const TEXT_COLOR: &str = "white";

/// Owns the 2D context; the simulation never sees it
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    /// World units between background lines
    pub line_spacing: f32,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement, line_spacing: f32) -> Result<Self, JsValue> {
        use wasm_bindgen::JsCast;

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            context,
            line_spacing,
        })
    }

    /// Match the backing store to the element's CSS size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    /// Draw one frame from a read-only state snapshot
    pub fn paint(&self, state: &SimulationState) -> Result<(), JsValue> {
        let ctx = &self.context;
        let viewport = self.viewport();
        let camera = Camera::follow(&state.cursor, viewport);

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, viewport.x as f64, viewport.y as f64);

        // Scrolling lines
        ctx.set_stroke_style_str(LINE_COLOR);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        for y in background_lines(&camera, viewport.y, self.line_spacing) {
            ctx.move_to(0.0, y as f64);
            ctx.line_to(viewport.x as f64, y as f64);
        }
        ctx.stroke();

        for circle in visible_targets(&state.targets, &camera, viewport, TARGET_DRAW_RADIUS) {
            ctx.set_fill_style_str(if circle.hit {
                TARGET_HIT_COLOR
            } else {
                TARGET_COLOR
            });
            ctx.begin_path();
            ctx.arc(
                circle.center.x as f64,
                circle.center.y as f64,
                circle.radius as f64,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.fill();
        }

        let [tip, left, right] = cursor_triangle(&state.cursor, &camera, CURSOR_SIZE);
        ctx.set_fill_style_str(CURSOR_COLOR);
        ctx.begin_path();
        ctx.move_to(tip.x as f64, tip.y as f64);
        ctx.line_to(left.x as f64, left.y as f64);
        ctx.line_to(right.x as f64, right.y as f64);
        ctx.close_path();
        ctx.fill();

        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.set_font("20px monospace");
        ctx.fill_text(&score_text(&state.targets), 16.0, 32.0)?;
        if state.paused {
            ctx.fill_text("Paused", 16.0, 60.0)?;
        }

        Ok(())
    }
}
