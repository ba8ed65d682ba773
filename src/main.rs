//! Asteroid Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use asteroid_dodge::GameConfig;
    use asteroid_dodge::platform::{FrameClock, KeyCode, KeyState};
    use asteroid_dodge::renderer::{CanvasRenderer, build_scene};
    use asteroid_dodge::sim::{GameState, Spawner, tick};

    /// Game instance holding all state
    struct Game {
        config: GameConfig,
        state: GameState,
        spawner: Spawner,
        clock: FrameClock,
        keys: KeyState,
        renderer: CanvasRenderer,
        // Last score pushed to the DOM
        shown_score: Option<u64>,
    }

    impl Game {
        fn new(config: GameConfig, renderer: CanvasRenderer, seed: u64) -> Self {
            Self {
                config,
                state: GameState::new(config),
                spawner: Spawner::new(seed, &config),
                clock: FrameClock::new(),
                keys: KeyState::new(),
                renderer,
                shown_score: None,
            }
        }

        /// Run simulation ticks owed for this frame
        fn update(&mut self, time: f64) {
            // Enter only matters on the game over screen
            let restart = self.keys.take_restart();
            if self.state.is_over() {
                if restart {
                    self.restart(js_sys::Date::now() as u64);
                }
                return;
            }

            let steps = self.clock.advance(time);
            for _ in 0..steps {
                let spawns = self.spawner.poll().into_iter().collect();
                let input = self.keys.tick_input(spawns);
                let outcome = tick(&mut self.state, &input);

                if let Some(final_score) = outcome.game_over {
                    self.show_game_over(final_score);
                    break;
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            self.renderer.render(&build_scene(&self.state));
        }

        /// Push score changes to the DOM
        fn update_hud(&mut self) {
            if self.shown_score == Some(self.state.score) {
                return;
            }
            let document = web_sys::window().and_then(|w| w.document());
            if let Some(el) = document.and_then(|d| d.get_element_by_id("scoreValue")) {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            self.shown_score = Some(self.state.score);
        }

        /// Present the final score; falls back to an alert when the page has
        /// no overlay
        fn show_game_over(&mut self, final_score: u64) {
            let document = web_sys::window().and_then(|w| w.document());
            let overlay = document
                .as_ref()
                .and_then(|d| d.get_element_by_id("game-over"));

            match (document, overlay) {
                (Some(document), Some(overlay)) => {
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&final_score.to_string()));
                    }
                    let _ = overlay.set_attribute("class", "");
                }
                _ => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&format!("Game Over! Score: {}", final_score));
                    }
                    self.restart(js_sys::Date::now() as u64);
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(self.config);
            self.spawner = Spawner::new(seed, &self.config);
            self.clock.reset();
            self.keys.reset();

            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("game-over"))
            {
                let _ = el.set_attribute("class", "hidden");
            }

            log::info!("Game restarted with seed: {}", seed);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Asteroid Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = GameConfig::load();
        let renderer = CanvasRenderer::new(&canvas, config.playfield_width, config.playfield_height)
            .expect("Failed to create canvas renderer");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, renderer, seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_focus_loss(game.clone());

        request_animation_frame(game);

        log::info!("Asteroid Dodge running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = KeyCode::from_code(&event.code()) else {
                    return;
                };
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                game.borrow_mut().keys.key_down(key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = KeyCode::from_code(&event.code()) {
                    game.borrow_mut().keys.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
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
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Release held keys when the window loses focus, otherwise the ship
    /// keeps drifting because the keyup never arrives
    fn setup_focus_loss(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().keys.reset();
            log::info!("Input released (window blur)");
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Dodge (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let config = asteroid_dodge::GameConfig::load();
    let report = headless::run(config, 42, 60 * 60);
    println!(
        "Demo finished after {} ticks: score {}, {}",
        report.ticks,
        report.score,
        if report.game_over { "ship destroyed" } else { "survived" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autopilot run without a display
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use asteroid_dodge::GameConfig;
    use asteroid_dodge::consts::ASTEROID_SIZE;
    use asteroid_dodge::sim::{Asteroid, GameState, Spawner, TickInput, tick};

    pub struct Report {
        pub ticks: u64,
        pub score: u64,
        pub game_over: bool,
    }

    /// Ticks between autopilot shots
    const FIRE_EVERY: u64 = 8;

    pub fn run(config: GameConfig, seed: u64, max_ticks: u64) -> Report {
        log::info!("Headless demo: seed {}, up to {} ticks", seed, max_ticks);

        let mut state = GameState::new(config);
        let mut spawner = Spawner::new(seed, &config);

        while state.time_ticks < max_ticks {
            let input = autopilot(&state, spawner.poll());
            let outcome = tick(&mut state, &input);
            if outcome.destroyed > 0 {
                log::debug!("tick {}: score {}", state.time_ticks, outcome.score);
            }
            if outcome.game_over.is_some() {
                break;
            }
        }

        Report {
            ticks: state.time_ticks,
            score: state.score,
            game_over: state.is_over(),
        }
    }

    /// Steer under the lowest falling asteroid and keep shooting
    fn autopilot(state: &GameState, spawn: Option<Asteroid>) -> TickInput {
        let ship_x = state.player.center_x();
        let target_x = state
            .asteroids
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|a| a.pos.x + ASTEROID_SIZE / 2.0);

        let slack = state.config.player_speed;
        let (left, right) = match target_x {
            Some(x) if x < ship_x - slack => (true, false),
            Some(x) if x > ship_x + slack => (false, true),
            _ => (false, false),
        };

        TickInput {
            left,
            right,
            fire: state.time_ticks % FIRE_EVERY == 0,
            spawns: spawn.into_iter().collect(),
        }
    }

}
