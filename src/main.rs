//! Drag Flight entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use drag_flight::Settings;
    use drag_flight::renderer::CanvasPainter;
    use drag_flight::sim::{DragTracker, InputIntent, Simulation};

    /// Everything the browser callbacks share
    struct Game {
        sim: Simulation,
        painter: CanvasPainter,
        drag: DragTracker,
        /// Auto-pause already queued for this frame
        pause_queued: bool,
    }

    impl Game {
        fn new(settings: &Settings, painter: CanvasPainter) -> Self {
            Self {
                sim: Simulation::new(settings),
                painter,
                drag: DragTracker::new(settings.physics.drag_gain),
                pause_queued: false,
            }
        }

        fn push(&mut self, intent: InputIntent) {
            if intent == InputIntent::TogglePause {
                self.pause_queued = true;
            }
            self.sim.push_input(intent);
        }

        /// Pause if running and no toggle is already pending
        fn auto_pause(&mut self, reason: &str) {
            if !self.sim.state().paused && !self.pause_queued {
                self.push(InputIntent::TogglePause);
                log::info!("Auto-paused ({})", reason);
            }
        }

        fn frame(&mut self, time: f64) {
            self.sim.frame(time);
            self.pause_queued = false;
            if let Err(e) = self.painter.paint(self.sim.state()) {
                log::warn!("Paint error: {:?}", e);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas = document
            .query_selector("canvas")?
            .ok_or("no canvas element")?
            .dyn_into::<HtmlCanvasElement>()?;

        let settings = Settings::load();
        let painter = CanvasPainter::new(canvas.clone(), settings.background_line_spacing)?;
        fit_to_window(&painter, &document);

        let game = Rc::new(RefCell::new(Game::new(&settings, painter)));
        setup_input(game.clone(), &canvas)?;
        setup_auto_pause(game.clone())?;
        setup_resize(game.clone())?;

        log::info!("Drag Flight started with {} targets", settings.targets.count);
        request_animation_frame(game);
        Ok(())
    }

    fn fit_to_window(painter: &CanvasPainter, document: &web_sys::Document) {
        if let Some(body) = document.body() {
            painter.resize(body.client_width() as u32, body.client_height() as u32);
        }
    }

    fn setup_input(game: Rc<RefCell<Game>>, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        // Pointer down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let intent = g.drag.press(event.offset_x() as f32);
                g.push(intent);
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if let Some(intent) = g.drag.moved(event.offset_x() as f32) {
                    g.push(intent);
                }
            });
            canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer up / leave both end the drag
        for name in ["pointerup", "pointerleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.drag.is_active() {
                    let intent = g.drag.release();
                    g.push(intent);
                }
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(intent) = InputIntent::from_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().push(intent);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().auto_pause("window blur");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                fit_to_window(&game.borrow().painter, &document);
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: fall through the target column at 60 Hz with a little
/// side-to-side steering, then report the score.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use drag_flight::Settings;
    use drag_flight::sim::{FrameOutcome, InputIntent, Simulation};

    env_logger::init();
    log::info!("Drag Flight (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the canvas version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load_from_path(std::path::Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    const FRAME_MILLIS: f64 = 1000.0 / 60.0;
    const SECONDS: u32 = 120;

    let mut sim = Simulation::new(&settings);
    let mut now = 0.0;
    let mut skipped = 0;
    for frame in 0..SECONDS * 60 {
        // Wiggle every two seconds
        if frame % 120 == 0 {
            let delta_x = if (frame / 120) % 2 == 0 { 40.0 } else { -40.0 };
            sim.push_input(InputIntent::DragStart { x: 0.0 });
            sim.push_input(InputIntent::DragMove { delta_x });
            sim.push_input(InputIntent::DragEnd);
        }
        match sim.frame(now) {
            FrameOutcome::Skipped(_) | FrameOutcome::Recovered(_) => skipped += 1,
            _ => {}
        }
        now += FRAME_MILLIS;
    }

    let state = sim.state();
    println!(
        "{} frames, cursor at ({:.1}, {:.1}), speed {:.1}, score {}/{}, {} bad frames",
        sim.frame_count(),
        state.cursor.position.x,
        state.cursor.position.y,
        state.cursor.speed(),
        state.score(),
        state.targets.len(),
        skipped
    );
}
