//! Color Shift Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop. The web
//! build drives the simulation from `requestAnimationFrame` and mirrors the
//! run into the page's HUD; the native build plays a headless demo run with
//! the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use color_shift_dash::highscores::LocalStorageStore;
    use color_shift_dash::platform::{FrameClock, KeyEdges, ScreenCommand, screen_command};
    use color_shift_dash::sim::Color;
    use color_shift_dash::{GameListener, Session, Settings};

    /// Writes HUD text into the page
    struct Hud;

    impl Hud {
        fn set_text(id: &str, text: &str) {
            let document = web_sys::window().and_then(|w| w.document());
            if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
                el.set_text_content(Some(text));
            }
        }

        fn set_class(id: &str, class: &str) {
            let document = web_sys::window().and_then(|w| w.document());
            if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
                let _ = el.set_attribute("class", class);
            }
        }
    }

    impl GameListener for Hud {
        fn on_color_changed(&mut self, color: Color) {
            Hud::set_text("hud-color", color.name());
            Hud::set_class("hud-color", &format!("color-{}", color.name().to_lowercase()));
        }

        fn on_miss(&mut self) {
            Hud::set_class("avatar", "shake");
        }

        fn on_life_gained(&mut self) {
            Hud::set_class("hud-lives", "pop");
        }

        fn on_run_ended(&mut self, final_score: u32) {
            Hud::set_text("final-score", &final_score.to_string());
            Hud::set_class("game-over", "");
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        keys: KeyEdges,
        clock: FrameClock,
        hud: Hud,
        /// Showing the menu instead of a finished run
        in_menu: bool,
    }

    impl Game {
        fn new(settings: &Settings, seed: u64) -> Self {
            Self {
                session: Session::with_tuning(
                    LocalStorageStore,
                    seed,
                    settings.viewport(),
                    settings.tuning.clone(),
                ),
                keys: KeyEdges::new(),
                clock: FrameClock::new(),
                hud: Hud,
                in_menu: false,
            }
        }

        fn update(&mut self, time: f64) {
            if self.in_menu {
                return;
            }
            let dt = self.clock.delta_ms(time);
            let input = self.keys.take_input();
            self.session.tick_with(&input, dt, &mut self.hud);
        }

        fn restart(&mut self, seed: u64) {
            self.session.restart(seed);
            self.clock.reset();
            self.in_menu = false;
            Hud::set_class("game-over", "hidden");
            Hud::set_class("menu", "hidden");
            log::info!("Game restarted with seed: {}", seed);
        }

        fn show_menu(&mut self) {
            self.in_menu = true;
            Hud::set_class("game-over", "hidden");
            Hud::set_class("menu", "");
            Hud::set_text("menu-high-score", &self.session.menu_high_score().to_string());
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let state = self.session.state();
            Hud::set_text("hud-score", &state.score.score().to_string());
            Hud::set_text("hud-lives", &"♥".repeat(state.score.lives() as usize));

            let best = self
                .session
                .last_record()
                .map(|r| r.best)
                .unwrap_or_else(|| self.session.menu_high_score());
            Hud::set_text("hud-high-score", &best.to_string());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Color Shift Dash starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(&settings, seed)));

        log::info!(
            "Game initialized with seed: {} (high score {})",
            seed,
            game.borrow().session.menu_high_score()
        );

        setup_input_handlers(game.clone(), settings.seed);
        request_animation_frame(game);

        log::info!("Color Shift Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>, fixed_seed: Option<u64>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if g.keys.key_down(&key) {
                    event.prevent_default();
                    return;
                }
                if !(g.in_menu || g.session.state().is_over()) {
                    return;
                }
                match screen_command(&key) {
                    Some(ScreenCommand::Restart) => {
                        event.prevent_default();
                        let seed = fixed_seed.unwrap_or(js_sys::Date::now() as u64);
                        g.restart(seed);
                    }
                    Some(ScreenCommand::Menu) => g.show_menu(),
                    Some(ScreenCommand::ResetHighScore) => {
                        g.session.reset_high_score();
                        Hud::set_text("menu-high-score", "0");
                    }
                    None => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.release_all();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use color_shift_dash::consts::FRAME_MS;
    use color_shift_dash::highscores::FileStore;
    use color_shift_dash::sim::{Autopilot, Color};
    use color_shift_dash::{GameListener, Session, Settings};

    /// Logs what a renderer would draw
    struct LogListener;

    impl GameListener for LogListener {
        fn on_color_changed(&mut self, color: Color) {
            log::debug!("Avatar -> {}", color.name());
        }
        fn on_miss(&mut self) {
            log::info!("Miss!");
        }
        fn on_life_gained(&mut self) {
            log::info!("Life regained");
        }
        fn on_run_ended(&mut self, final_score: u32) {
            log::info!("Run ended with {} points", final_score);
        }
    }

    env_logger::init();
    log::info!("Color Shift Dash (native) starting...");
    log::info!("Native mode plays a headless autopilot run - build for wasm32 to play");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let store = FileStore::new(std::env::temp_dir().join("color_shift_dash_high_score.txt"));
    log::info!("High score file: {}", store.path().display());
    let mut session = Session::with_tuning(store, seed, settings.viewport(), settings.tuning.clone());
    println!("High score: {}", session.menu_high_score());

    let mut pilot = Autopilot::new(seed ^ 0x5eed, settings.autopilot_slip_rate);
    let mut listener = LogListener;
    // One hour of frames at most
    let max_ticks = (3_600_000.0 / FRAME_MS) as u64;
    while !session.state().is_over() && session.state().time_ticks < max_ticks {
        let input = pilot.input(session.state());
        session.tick_with(&input, FRAME_MS, &mut listener);
    }

    let state = session.state();
    println!(
        "Score: {}  Lives: {}  Time: {:.1}s  Seed: {}",
        state.score.score(),
        state.score.lives(),
        state.elapsed_ms / 1000.0,
        seed
    );
    if let Some(record) = session.last_record() {
        if record.is_new_record {
            println!("New high score! (previous {})", record.previous);
        } else {
            println!("High score: {}", record.best);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
