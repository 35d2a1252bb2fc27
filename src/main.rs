//! Neon Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, MouseEvent};

    use neon_pong::audio::{AudioManager, SoundEffect};
    use neon_pong::consts::*;
    use neon_pong::renderer::{CourtRenderer, court_scene};
    use neon_pong::sim::{MatchEvent, TickInput};
    use neon_pong::{FrameDriver, Settings};

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver,
        renderer: Option<CourtRenderer>,
        audio: AudioManager,
        settings: Settings,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                driver: FrameDriver::new(seed),
                renderer: None,
                audio: AudioManager::new(),
                settings: Settings::default(),
                input: TickInput::default(),
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = court_scene(self.driver.state());
            if let Some(renderer) = &mut self.renderer {
                match renderer.render(&scene) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        renderer.resize(renderer.size.0, renderer.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("out of GPU memory");
                    }
                    Err(e) => log::warn!("render error: {e:?}"),
                }
            }
        }

        /// React to the events one frame produced: HUD text, audio, screen flips
        fn dispatch_events(&mut self, events: &[MatchEvent]) {
            let Some(document) = document() else { return };

            for event in events {
                log::debug!("{event:?}");
                match *event {
                    MatchEvent::WallBounce => self.audio.play(SoundEffect::WallBounce),
                    MatchEvent::PaddleHit { .. } => self.audio.play(SoundEffect::PaddleHit),
                    MatchEvent::ScoreChanged { player, ai } => {
                        if let Some(el) = document.get_element_by_id("player-score") {
                            el.set_text_content(Some(&player.to_string()));
                        }
                        if let Some(el) = document.get_element_by_id("ai-score") {
                            el.set_text_content(Some(&ai.to_string()));
                        }
                        // The zero-zero refresh on match start stays silent
                        if player + ai > 0 {
                            self.audio.play(SoundEffect::Score);
                        }
                    }
                    MatchEvent::MatchOver {
                        player_won,
                        player,
                        ai,
                    } => {
                        log::info!("match over: player {player}, ai {ai}");
                        self.audio.stop_music();
                        self.audio.play(if player_won {
                            SoundEffect::MatchWon
                        } else {
                            SoundEffect::MatchLost
                        });

                        if let Some(el) = document.get_element_by_id("final-score") {
                            el.set_text_content(Some(&format!("{player} - {ai}")));
                        }
                        if let Some(el) = document.get_element_by_id("winner-text") {
                            el.set_text_content(Some(if player_won {
                                "You win!"
                            } else {
                                "The AI wins."
                            }));
                        }
                        set_hidden(&document, "game-container", true);
                        set_hidden(&document, "game-over", false);
                    }
                }
            }
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|w| w.document())
    }

    /// Toggle a screen by element id via the `hidden` class
    fn set_hidden(document: &web_sys::Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    /// Map a pointer y position in canvas client pixels to a paddle target in
    /// court space, accounting for the letterboxed court
    fn pointer_to_target(client_w: f32, client_h: f32, y: f32) -> f32 {
        let court_aspect = COURT_WIDTH / COURT_HEIGHT;
        let aspect = client_w / client_h.max(1.0);
        let court_y = if aspect < court_aspect {
            // Court fills a vertically centered band of the canvas
            let band_h = client_w / court_aspect;
            (y - (client_h - band_h) / 2.0) / band_h.max(1.0) * COURT_HEIGHT
        } else {
            y / client_h.max(1.0) * COURT_HEIGHT
        };
        // Center the paddle on the pointer
        court_y - PADDLE_HEIGHT / 2.0
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("neon pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        set_hidden(&document, "loading", true);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("game initialized with seed {seed}");

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("failed to create surface: {e}");
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("no suitable GPU adapter: {e}");
                return;
            }
        };

        log::info!("using adapter: {:?}", adapter.get_info().name);

        match CourtRenderer::new(surface, &adapter, width, height).await {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => {
                log::error!("failed to acquire GPU device: {e}");
                return;
            }
        }

        // Set up input handlers and menu buttons
        setup_pointer_input(&canvas, game.clone());
        setup_menu_buttons(game.clone());
        setup_settings_menu(game.clone());
        setup_game_over_buttons(game.clone());

        // Land on the main menu
        set_hidden(&document, "settings-menu", true);
        set_hidden(&document, "game-container", true);
        set_hidden(&document, "game-over", true);
        set_hidden(&document, "main-menu", false);

        log::info!("neon pong ready");
    }

    /// Leave whatever screen is up and start a fresh match
    fn begin_match(game: Rc<RefCell<Game>>) {
        if let Some(document) = document() {
            set_hidden(&document, "main-menu", true);
            set_hidden(&document, "settings-menu", true);
            set_hidden(&document, "game-over", true);
            set_hidden(&document, "game-container", false);
        }

        {
            let mut g = game.borrow_mut();
            g.audio.resume();
            g.audio.start_music();
            let events: Vec<MatchEvent> = g.driver.start().to_vec();
            g.dispatch_events(&events);
        }

        request_animation_frame(game);
    }

    fn setup_pointer_input(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let w = canvas_clone.client_width() as f32;
            let h = canvas_clone.client_height() as f32;
            let target = pointer_to_target(w, h, event.offset_y() as f32);
            game.borrow_mut().input.target_y = Some(target);
        });
        let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };

        // Play
        if let Some(btn) = document.get_element_by_id("play-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                begin_match(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Settings
        if let Some(btn) = document.get_element_by_id("settings-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(document) = document() {
                    set_hidden(&document, "main-menu", true);
                    set_hidden(&document, "settings-menu", false);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_settings_menu(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };

        // Music on/off checkbox
        if let Some(toggle) = document
            .get_element_by_id("music-toggle")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            toggle.set_checked(game.borrow().settings.music_enabled);

            let game = game.clone();
            let toggle_ref = toggle.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let on = toggle_ref.checked();
                let mut g = game.borrow_mut();
                g.settings.music_enabled = on;
                g.audio.set_music_enabled(on);
                if on && g.driver.is_running() {
                    g.audio.start_music();
                }
            });
            let _ =
                toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Master volume slider (0 - 100)
        if let Some(range) = document
            .get_element_by_id("volume-range")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            range.set_value_as_number(game.borrow().settings.master_volume as f64 * 100.0);

            let game = game.clone();
            let range_ref = range.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let vol = (range_ref.value_as_number() / 100.0) as f32;
                let mut g = game.borrow_mut();
                g.settings.set_master_volume(vol);
                g.audio.set_master_volume(vol);
            });
            let _ =
                range.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Back to the main menu
        if let Some(btn) = document.get_element_by_id("back-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(document) = document() {
                    set_hidden(&document, "settings-menu", true);
                    set_hidden(&document, "main-menu", false);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_game_over_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };

        // Rematch
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                begin_match(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Back to the main menu
        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut g = game.borrow_mut();
                    g.driver.return_to_menu();
                    g.audio.stop_music();
                }
                if let Some(document) = document() {
                    set_hidden(&document, "game-over", true);
                    set_hidden(&document, "game-container", true);
                    set_hidden(&document, "main-menu", false);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One displayed frame: one simulation tick, then draw
    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let input = g.input;
            let events: Vec<MatchEvent> = g.driver.frame(&input).to_vec();
            g.dispatch_events(&events);
            g.render();
            g.driver.is_running()
        };

        // The loop dies with the match; menu and game-over screens are static
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_pong::FrameDriver;
    use neon_pong::consts::{BALL_SIZE, PADDLE_HEIGHT};
    use neon_pong::sim::{MatchEvent, TickInput};

    env_logger::init();
    log::info!("neon pong (native) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut driver = FrameDriver::new(seed);
    driver.start();

    // Headless demo match: track the ball with a fixed aim offset so returns
    // pick up spin and the rallies stay interesting
    let mut frames = 0u64;
    while driver.is_running() && frames < 120_000 {
        let ball_center = driver.state().ball_pos.y + BALL_SIZE / 2.0;
        let input = TickInput {
            target_y: Some(ball_center - PADDLE_HEIGHT / 2.0 + 28.0),
        };
        let events: Vec<MatchEvent> = driver.frame(&input).to_vec();
        for event in events {
            if let MatchEvent::ScoreChanged { player, ai } = event {
                log::info!("score: player {player}, ai {ai}");
            }
        }
        frames += 1;
    }

    let state = driver.state();
    match state.winner() {
        Some(true) => log::info!(
            "player wins {} - {} in {} ticks",
            state.player_score,
            state.ai_score,
            state.time_ticks
        ),
        Some(false) => log::info!(
            "ai wins {} - {} in {} ticks",
            state.ai_score,
            state.player_score,
            state.time_ticks
        ),
        None => log::warn!("demo stopped after {frames} frames without a winner"),
    }
}
