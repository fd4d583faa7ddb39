//! Flying Adventure entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use flying_adventure::GameConfig;
    use flying_adventure::draw;
    use flying_adventure::platform::{InputEvent, InputQueue, Key};
    use flying_adventure::renderer::{HudLayer, RenderState, tessellate};
    use flying_adventure::sim::{Game, SceneKind, TickInput, TickOutcome, tick};

    /// Cap on ticks per animation frame after a long stall
    const MAX_SUBSTEPS: u32 = 8;

    /// Browser-side state around the simulation
    struct App {
        game: Game,
        input: InputQueue,
        render_state: Option<RenderState>,
        hud: Option<HudLayer>,
        accumulator: f32,
        last_time: f64,
        /// Demo mode, toggled with `i` during play
        autopilot: bool,
        running: bool,
    }

    impl App {
        fn new(config: GameConfig, seed: u64) -> Self {
            Self {
                game: Game::new(config, seed),
                input: InputQueue::new(),
                render_state: None,
                hud: None,
                accumulator: 0.0,
                last_time: 0.0,
                autopilot: false,
                running: true,
            }
        }

        /// Run fixed ticks at the current scene's rate; each tick drains the queue
        fn update(&mut self, dt: f32) {
            self.accumulator += dt.min(0.25);

            let mut substeps = 0;
            loop {
                let step = self.game.kind().tick_dt();
                if self.accumulator < step || substeps >= MAX_SUBSTEPS {
                    break;
                }
                let input = TickInput {
                    events: self.input.drain(),
                    autopilot: self.autopilot,
                };
                if tick(&mut self.game, &input) == TickOutcome::Quit {
                    self.running = false;
                    return;
                }
                self.accumulator -= step;
                substeps += 1;
            }

            if substeps >= MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let commands = draw::frame(&self.game);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&tessellate(&commands)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if let Some(ref hud) = self.hud {
                if let Err(e) = hud.draw(&commands) {
                    log::warn!("HUD draw failed: {:?}", e);
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flying Adventure starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = GameConfig::load();
        let logical = (config.screen_width(), config.screen_height());

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store in device pixels, drawing in logical pixels
        let dpr = window.device_pixel_ratio();
        let width = (config.width as f64 * dpr) as u32;
        let height = (config.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let hud = HudLayer::new(&document, "hud", logical).expect("no hud canvas");
        hud.resize(width, height);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(config, seed)));
        app.borrow_mut().hud = Some(hud);

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, logical)
            .await
            .expect("Failed to create device");
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(app.clone());
        request_animation_frame(app);

        log::info!("Flying Adventure running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if Key::from_dom_key(&key) == Key::Space {
                    // Keep space from scrolling the page
                    event.prevent_default();
                }

                let mut a = app.borrow_mut();
                if (key == "i" || key == "I") && a.game.kind() != SceneKind::NameEntry {
                    a.autopilot = !a.autopilot;
                    log::info!("Autopilot: {}", a.autopilot);
                    return;
                }
                a.input.extend(InputEvent::from_dom_keydown(&key));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_dom_key(&event.key());
                app.borrow_mut().input.push(InputEvent::KeyUp(key));
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse, on the top-most canvas, scaled to logical pixels
        if let Some(hud) = document.get_element_by_id("hud") {
            let app = app.clone();
            let target = hud.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let client_w = target.client_width().max(1) as f32;
                let client_h = target.client_height().max(1) as f32;
                let x = event.offset_x() as f32 * a.game.config.screen_width() / client_w;
                let y = event.offset_y() as f32 * a.game.config.screen_height() / client_h;
                a.input.push(InputEvent::MouseDown { x, y });
            });
            let _ = hud
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page going away
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().input.push(InputEvent::Quit);
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                a.game.kind().tick_dt()
            };
            a.last_time = time;

            a.update(dt);
            if !a.running {
                log::info!("Game loop stopped");
                return;
            }
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flying Adventure (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` to play");

    if let Err(e) = std::fs::create_dir_all(flying_adventure::GameConfig::DATA_DIR) {
        log::warn!("Could not create data directory: {}", e);
    }

    let score = native::run_autopilot(native::seed_from_args());
    println!("Autopilot scored {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use flying_adventure::GameConfig;
    use flying_adventure::consts::PLAY_TICK_HZ;
    use flying_adventure::platform::{InputEvent, InputQueue, Key};
    use flying_adventure::sim::{Game, SceneKind, TickInput, TickOutcome, layout, tick};

    const PLAYER_NAME: &str = "autopilot";
    /// Five minutes of play
    const MAX_TICKS: u64 = PLAY_TICK_HZ as u64 * 60 * 5;

    /// First CLI argument as the seed, else the clock
    pub fn seed_from_args() -> u64 {
        std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0)
            })
    }

    /// Enter a name, fly until the crash or the tick cap, then quit
    pub fn run_autopilot(seed: u64) -> u32 {
        let config = GameConfig::load();
        let mut game = Game::new(config, seed);
        let mut queue = InputQueue::new();
        log::info!("Headless session with seed {}", seed);

        let (fx, fy) = layout::name_field(&game.config).center();
        queue.push(InputEvent::MouseDown { x: fx, y: fy });
        queue.extend(PLAYER_NAME.chars().map(InputEvent::Text));
        queue.push(InputEvent::KeyDown(Key::Enter));
        tick(&mut game, &TickInput::from_events(queue.drain()));

        let mut ticks = 0;
        while game.kind() == SceneKind::Active && ticks < MAX_TICKS {
            let input = TickInput {
                events: queue.drain(),
                autopilot: true,
            };
            tick(&mut game, &input);
            ticks += 1;
        }

        let score = game.scene.session().map(|s| s.score).unwrap_or(0);
        match game.kind() {
            SceneKind::GameOver => log::info!("Crashed after {} ticks, score {}", ticks, score),
            _ => log::info!("Tick cap reached, score {}", score),
        }

        queue.push(InputEvent::Quit);
        if tick(&mut game, &TickInput::from_events(queue.drain())) == TickOutcome::Quit {
            log::info!("Shut down cleanly");
        }
        score
    }
}
