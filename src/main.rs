//! Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use breakout::consts::*;
    use breakout::sim::{GameManager, GamePhase, TickInput, tick};
    use breakout::{GameConfig, HighScores};

    /// Game instance holding all state
    struct Game {
        manager: GameManager,
        ctx: CanvasRenderingContext2d,
        canvas_size: (f64, f64),
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        left_held: bool,
        right_held: bool,
        high_scores: HighScores,
    }

    impl Game {
        fn new(seed: u64, ctx: CanvasRenderingContext2d, canvas_size: (f64, f64)) -> Self {
            let mut manager = GameManager::new(GameConfig::default(), seed);
            manager.start();
            Self {
                manager,
                ctx,
                canvas_size,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                left_held: false,
                right_held: false,
                high_scores: HighScores::load(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            self.input.move_axis = match (self.left_held, self.right_held) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            };

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.manager, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.pause = false;
            }

            let events = self.manager.drain_events();
            if self.high_scores.record(&events, js_sys::Date::now()).is_some() {
                self.high_scores.save();
            }
        }

        /// World units -> canvas pixels (y flipped)
        fn to_screen(&self, x: f32, y: f32) -> (f64, f64) {
            let arena = &self.manager.config().arena;
            let scale = self.scale();
            let sx = (x + arena.half_width) as f64 * scale;
            let sy = (arena.half_height - y) as f64 * scale;
            (sx, sy)
        }

        fn scale(&self) -> f64 {
            let arena = &self.manager.config().arena;
            let sx = self.canvas_size.0 / (arena.half_width * 2.0) as f64;
            let sy = self.canvas_size.1 / (arena.half_height * 2.0) as f64;
            sx.min(sy)
        }

        fn fill_rect(&self, center: glam::Vec2, size: glam::Vec2, style: &str) {
            let scale = self.scale();
            let (x, y) = self.to_screen(center.x - size.x / 2.0, center.y + size.y / 2.0);
            self.ctx.set_fill_style_str(style);
            self.ctx
                .fill_rect(x, y, size.x as f64 * scale, size.y as f64 * scale);
        }

        /// Render the current frame
        fn render(&self) {
            let ctx = &self.ctx;
            ctx.set_fill_style_str("#101018");
            ctx.fill_rect(0.0, 0.0, self.canvas_size.0, self.canvas_size.1);

            for block in self.manager.blocks() {
                self.fill_rect(block.pos, block.size, &block.color.to_css());
            }

            let paddle = self.manager.paddle();
            self.fill_rect(paddle.pos, paddle.size, "#e0e0e0");

            let ball = self.manager.ball();
            if ball.active {
                let (x, y) = self.to_screen(ball.pos.x, ball.pos.y);
                ctx.set_fill_style_str("#ffffff");
                ctx.begin_path();
                let _ = ctx.arc(x, y, ball.radius as f64 * self.scale(), 0.0, std::f64::consts::TAU);
                ctx.fill();
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.manager.hud();

            if let Some(el) = document.get_element_by_id("hud-lives") {
                el.set_text_content(Some(&hud.lives_text));
            }
            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&hud.score_text));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                let best = self.high_scores.top_score().unwrap_or(0);
                el.set_text_content(Some(&best.to_string()));
            }

            if let Some(el) = document.get_element_by_id("pause-menu") {
                let class = if self.manager.phase() == GamePhase::Paused {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let seed = js_sys::Date::now() as u64;
        let size = (canvas.width() as f64, canvas.height() as f64);
        let game = Rc::new(RefCell::new(Game::new(seed, ctx, size)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());
        request_animation_frame(game);

        log::info!("Breakout running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.left_held = true,
                    "ArrowRight" | "d" | "D" => g.right_held = true,
                    "p" | "P" | "Escape" => g.input.pause = true,
                    "i" | "I" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" | "a" | "A" => g.left_held = false,
                "ArrowRight" | "d" | "D" => g.right_held = false,
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            g.left_held = false;
            g.right_held = false;
            if g.manager.phase() != GamePhase::Paused {
                g.input.pause = true;
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use breakout::consts::SIM_DT;
    use breakout::sim::{GameEvent, GameManager, TickInput, tick};
    use breakout::{GameConfig, HighScores};

    /// Headless autopilot runner
    #[derive(Parser, Debug)]
    #[command(name = "breakout", version, about)]
    struct Args {
        /// Game config JSON (built-in layout when omitted)
        config: Option<PathBuf>,
        /// RNG seed for ball launches
        #[arg(long, default_value_t = 12345)]
        seed: u64,
        /// Simulated seconds to run
        #[arg(long, default_value_t = 120.0)]
        seconds: f32,
        /// High score file to load and update
        #[arg(long)]
        scores: Option<PathBuf>,
    }

    fn now_ms() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }

    /// Play on autopilot at the fixed timestep, logging HUD changes
    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let options = Args::parse();
        log::debug!("Args: {:?}", options);

        let config = match &options.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        let mut high_scores = match &options.scores {
            Some(path) => HighScores::load_from(path),
            None => HighScores::new(),
        };

        let mut manager = GameManager::new(config, options.seed);
        manager.start();
        log::info!("Headless run: seed {}, {}s", options.seed, options.seconds);

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let ticks = (options.seconds / SIM_DT).ceil() as u64;
        let mut last_hud = manager.hud().clone();
        let mut best_score = 0;

        for _ in 0..ticks {
            tick(&mut manager, &input, SIM_DT);

            let events = manager.drain_events();
            high_scores.record(&events, now_ms());
            if events.contains(&GameEvent::WaveCleared) {
                log::info!("Wave cleared!");
            }

            if *manager.hud() != last_hud {
                last_hud = manager.hud().clone();
                log::info!("Lives: {}  Score: {}", last_hud.lives_text, last_hud.score_text);
            }
            best_score = best_score.max(manager.score());
        }

        println!(
            "Finished after {} ticks: lives {}, score {}, best {}",
            manager.time_ticks(),
            manager.lives(),
            manager.score(),
            best_score
        );

        if let Some(path) = &options.scores {
            high_scores.save_to(path)?;
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Breakout (native) starting...");

    if let Err(e) = native::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
