//! Heart Dash entry point
//!
//! Browser build wires DOM events (keyboard, on-screen buttons, spawn
//! timer, resize, end-screen actions) into the sim. The native build runs a
//! scripted headless session as a smoke check.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent};

    use heart_dash::input::Direction;
    use heart_dash::presentation::{DomPresenter, dispatch};
    use heart_dash::session::MusicHandoff;
    use heart_dash::settings::Settings;
    use heart_dash::sim::{self, GameState, SessionPhase};
    use heart_dash::tuning::Tuning;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        presenter: DomPresenter,
        /// Spawn interval handle; taken exactly once at the Won transition
        spawn_timer: Option<i32>,
    }

    impl Game {
        /// Flush sim events to the view, then react to a finished session.
        /// Runs at the end of every handler.
        fn pump(&mut self) {
            let events = self.state.drain_events();
            dispatch(events, &mut self.presenter);
            if self.state.phase == SessionPhase::Won {
                self.stop_spawner();
            }
        }

        /// Cancel the spawn timer. Idempotent: the handle is taken once,
        /// later calls see `None` and do nothing.
        fn stop_spawner(&mut self) {
            if let Some(handle) = self.spawn_timer.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
                log::info!("Spawn timer cancelled");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Heart Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas = document
            .get_element_by_id("gameCanvas")
            .expect("no game canvas");
        let rect = canvas.get_bounding_client_rect();

        let settings = Settings::load();
        let mut presenter = DomPresenter::new(&document).expect("game DOM anchors missing");
        presenter.apply_settings(&settings);

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(
            Tuning::default(),
            rect.width() as f32,
            rect.height() as f32,
            seed,
        );
        log::info!("Session initialized with seed {seed}");

        let game = Rc::new(RefCell::new(Game {
            state,
            presenter,
            spawn_timer: None,
        }));

        // First heart immediately, then the fixed-period timer
        {
            let mut g = game.borrow_mut();
            sim::try_spawn(&mut g.state);
            g.pump();
        }
        start_spawn_timer(&game);

        setup_keyboard(&game);
        setup_control_buttons(&document, &game);
        setup_resize(&canvas, &game);
        setup_final_screen(&document);

        log::info!("Heart Dash running!");
    }

    fn start_spawn_timer(game: &Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let interval_ms = game.borrow().state.tuning.spawn_interval_ms as i32;

        let g = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            // A tick queued before cancellation lands here and no-ops on
            // the spawner's phase precondition
            let mut g = g.borrow_mut();
            sim::try_spawn(&mut g.state);
            g.pump();
        });
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                interval_ms,
            )
            .expect("failed to start spawn timer");
        closure.forget();

        game.borrow_mut().spawn_timer = Some(handle);
    }

    fn setup_keyboard(game: &Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            if !g.state.is_active() {
                return;
            }
            if let Some(dir) = Direction::from_key(&event.key()) {
                // Keep the page from scrolling on arrow keys
                event.prevent_default();
                let speed = g.state.tuning.player_speed;
                sim::move_player(&mut g.state, dir.delta(speed));
                g.pump();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// On-screen directional buttons: same contract as the arrow keys
    fn setup_control_buttons(document: &Document, game: &Rc<RefCell<Game>>) {
        let Ok(buttons) = document.query_selector_all(".control-btn") else {
            return;
        };

        for i in 0..buttons.length() {
            let Some(node) = buttons.item(i) else { continue };
            let Ok(button) = node.dyn_into::<Element>() else {
                continue;
            };
            let Some(dir) = button
                .get_attribute("data-direction")
                .as_deref()
                .and_then(Direction::from_attr)
            else {
                log::warn!("Control button {i} has no usable data-direction");
                continue;
            };

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.state.is_active() {
                    return;
                }
                let speed = g.state.tuning.player_speed;
                sim::move_player(&mut g.state, dir.delta(speed));
                g.pump();
            });
            let _ =
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &Element, game: &Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let game = game.clone();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let rect = canvas.get_bounding_client_rect();
            let mut g = game.borrow_mut();
            sim::resize(&mut g.state, rect.width() as f32, rect.height() as f32);
            g.pump();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// End-screen interactions: navigation handoff plus the decorative
    /// "yes" celebration. No gameplay state involved.
    fn setup_final_screen(document: &Document) {
        if let Some(btn) = document.get_element_by_id("memories-btn") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(music) = document
                    .get_element_by_id("bgMusic")
                    .and_then(|el| el.dyn_into::<web_sys::HtmlAudioElement>().ok())
                {
                    MusicHandoff {
                        playing: true,
                        time_secs: music.current_time(),
                    }
                    .store();
                }
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("memories.html");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("yes-btn") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                for id in ["finalQuestion", "valentineQuestion", "answerButtons"] {
                    if let Some(el) = document
                        .get_element_by_id(id)
                        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    {
                        let _ = el.style().set_property("display", "none");
                    }
                }
                if let Some(el) = document.get_element_by_id("successMessage") {
                    let _ = el.class_list().add_1("show");
                }
                spawn_heart_explosion(&document);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    const EXPLOSION_HEARTS: u32 = 30;
    const HEART_EMOJIS: [&str; 10] = ["💖", "💕", "💗", "💓", "💝", "💘", "❤️", "💙", "💜", "🩷"];

    /// Burst of emoji hearts fanned out from the screen center; pure
    /// decoration driven by CSS custom properties
    fn spawn_heart_explosion(document: &Document) {
        let Some(container) = document.get_element_by_id("heartExplosion") else {
            return;
        };
        let mut rng = Pcg32::seed_from_u64(js_sys::Date::now() as u64);

        for i in 0..EXPLOSION_HEARTS {
            let Ok(element) = document.create_element("div") else {
                continue;
            };
            element.set_class_name("explosion-heart");
            element.set_text_content(Some(HEART_EMOJIS[rng.random_range(0..HEART_EMOJIS.len())]));
            let Ok(heart) = element.dyn_into::<HtmlElement>() else {
                continue;
            };

            // Evenly fanned directions, random reach, staggered start
            let angle = std::f32::consts::TAU * i as f32 / EXPLOSION_HEARTS as f32;
            let distance = 100.0 + rng.random_range(0.0..150.0f32);
            let style = heart.style();
            let _ = style.set_property("--tx", &format!("{}px", angle.cos() * distance));
            let _ = style.set_property("--ty", &format!("{}px", angle.sin() * distance));
            let _ = style.set_property("left", "50%");
            let _ = style.set_property("top", "50%");
            let _ = style.set_property("animation-delay", &format!("{}s", rng.random_range(0.0..0.5f32)));

            let _ = container.append_child(&heart);
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use heart_dash::sim::{self, GameState};
    use heart_dash::tuning::Tuning;

    env_logger::init();
    log::info!("Heart Dash (native) starting...");

    // Headless scripted session: chase spawned hearts until the win
    let tuning = Tuning::default();
    let speed = tuning.player_speed;
    let mut state = GameState::new(tuning, 800.0, 600.0, 0xC0FFEE);
    state.drain_events();

    let mut moves = 0u32;
    while state.is_active() && moves < 10_000 {
        sim::try_spawn(&mut state);
        let Some(target) = state.hearts.first().map(|h| h.pos) else {
            break;
        };
        let diff = target - state.player_pos;
        let delta = if diff.x.abs() >= diff.y.abs() {
            Vec2::new(speed.copysign(diff.x), 0.0)
        } else {
            Vec2::new(0.0, speed.copysign(diff.y))
        };
        sim::move_player(&mut state, delta);
        moves += 1;
        state.drain_events();
    }

    if state.is_active() {
        println!("Gave up after {moves} moves with score {}", state.score);
    } else {
        println!("Won with score {} in {moves} moves", state.score);
    }
}
