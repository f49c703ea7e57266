//! Sky Dodge entry point
//!
//! In the browser: wires DOM events into the session and drives it from
//! `requestAnimationFrame`. Natively: plays one headless run with the
//! autopilot and records the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use sky_dodge::driver::FrameLoop;
    use sky_dodge::persistence::LocalStore;
    use sky_dodge::platform::{RafScheduler, now_ms, pointer_to_field_x};
    use sky_dodge::renderer::CanvasSurface;
    use sky_dodge::sim::RunPhase;
    use sky_dodge::{Game, Settings, Tuning};

    type Loop = Rc<FrameLoop<RafScheduler>>;

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    /// Update HUD elements and overlays in the DOM
    fn update_hud(game: &Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        set_text(&document, "#hud-time .hud-value", &game.survival_time().to_string());
        set_text(&document, "#hud-best .hud-value", &game.best_time().to_string());

        show(&document, "hud-fps", game.settings.show_fps);
        if game.settings.show_fps {
            set_text(&document, "#hud-fps .hud-value", &game.fps().to_string());
        }

        show(&document, "hud-demo", game.demo_mode);
        show(&document, "start-screen", game.phase() == RunPhase::Idle);

        let over = game.phase() == RunPhase::Over;
        show(&document, "game-over", over);
        if over {
            set_text(&document, "#final-time", &game.survival_time().to_string());
            let record = game.survival_time() > game.best_time();
            show(&document, "new-record", record);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        show(&document, "loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning::load();
        let settings = Settings::load();
        let field = Vec2::new(tuning.field_width, tuning.field_height);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, tuning, settings, Box::new(LocalStore::default()));
        game.set_surface(Box::new(CanvasSurface::new(canvas.clone(), field)));
        game.render();
        update_hud(&game);
        let game = Rc::new(RefCell::new(game));

        let scheduler = RafScheduler::new().expect("no animation frame scheduler");
        let frame_loop: Loop = Rc::new(FrameLoop::new(game.clone(), Rc::new(scheduler)));
        frame_loop.set_observer(Box::new(update_hud));

        setup_keyboard(&window, frame_loop.clone());
        setup_pointer(&canvas, game.clone(), field.x);
        setup_buttons(&document, frame_loop.clone());
        setup_focus_loss(&window, &document, game);

        log::info!("Sky Dodge ready");
    }

    /// Start from the title screen or after a finished run
    fn begin(frame_loop: &Loop) {
        let phase = frame_loop.game().borrow().phase();
        let result = match phase {
            RunPhase::Idle => frame_loop.start(now_ms()),
            RunPhase::Over => frame_loop.restart(now_ms()),
            RunPhase::Running => return,
        };
        if let Err(e) = result {
            log::error!("Could not start the frame loop: {}", e);
        }
        update_hud(&frame_loop.game().borrow());
    }

    fn setup_keyboard(window: &Window, frame_loop: Loop) {
        // Key down
        {
            let frame_loop = frame_loop.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                match key.as_str() {
                    "i" | "I" => {
                        if !event.repeat() {
                            let game = frame_loop.game();
                            let mut g = game.borrow_mut();
                            g.toggle_demo();
                            update_hud(&g);
                        }
                    }
                    "f" | "F" | "c" | "C" => {
                        if !event.repeat() {
                            let game = frame_loop.game();
                            let mut g = game.borrow_mut();
                            if key.eq_ignore_ascii_case("f") {
                                g.toggle_fps();
                            } else {
                                g.toggle_clouds();
                                g.render();
                            }
                            update_hud(&g);
                        }
                    }
                    " " | "Enter" => {
                        event.prevent_default();
                        begin(&frame_loop);
                    }
                    _ => {
                        if key.starts_with("Arrow") {
                            event.prevent_default();
                        }
                        frame_loop.game().borrow_mut().input.press(&key);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                frame_loop.game().borrow_mut().input.release(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>, field_width: f32) {
        let aim = {
            let canvas = canvas.clone();
            move |event: &MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                if let Some(x) = pointer_to_field_x(
                    event.client_x() as f32,
                    rect.left() as f32,
                    rect.width() as f32,
                    field_width,
                ) {
                    game.borrow_mut().input.point_at(x);
                }
            }
        };
        let aim = Rc::new(aim);

        // Click jumps the player under the pointer
        {
            let aim = aim.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                (*aim)(&event);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Dragging with the primary button held keeps following
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.buttons() & 1 != 0 {
                    (*aim)(&event);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, frame_loop: Loop) {
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let frame_loop = frame_loop.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    begin(&frame_loop);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Keys held when focus leaves never see their keyup
    fn setup_focus_loss(window: &Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Visibility change (tab switch, minimize)
        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().input.release_all();
                    log::info!("Input released (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session: the autopilot plays one run on a manual clock
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use sky_dodge::driver::{FrameLoop, ManualScheduler};
    use sky_dodge::persistence::FileStore;
    use sky_dodge::platform::now_ms;
    use sky_dodge::{Game, Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    // Five minutes of frames
    const MAX_FRAMES: u64 = 60 * 60 * 5;

    env_logger::init();
    log::info!("Sky Dodge (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let mut game = Game::new(
        seed,
        Tuning::load(),
        Settings::load(),
        Box::new(FileStore::in_home()),
    );
    game.demo_mode = true;
    let game = Rc::new(RefCell::new(game));

    let scheduler = Rc::new(ManualScheduler::new());
    let frame_loop = FrameLoop::new(game.clone(), scheduler.clone());
    if let Err(e) = frame_loop.start(0.0) {
        log::error!("Could not start the frame loop: {}", e);
        std::process::exit(1);
    }

    let wall_start = now_ms();
    let mut frames = 0;
    while frames < MAX_FRAMES {
        frames += 1;
        if scheduler.fire(frames as f64 * FRAME_MS) == 0 {
            break;
        }
    }
    frame_loop.stop();
    log::info!("Simulated {} frames in {:.0} ms", frames, now_ms() - wall_start);

    let mut g = game.borrow_mut();
    let record = g.finish();
    println!("Seed:          {}", seed);
    println!("Frames:        {}", g.state.time_ticks);
    println!("Survived:      {}s", g.survival_time());
    println!("Best time:     {}s", g.best_time());
    if record.is_some() {
        println!("New record!");
    }
}
