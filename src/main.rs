//! Star Hunter entry point
//!
//! Web: wires the canvas, keyboard, pause menu and asset loading to a
//! `Session` and runs it from requestAnimationFrame.
//! Native: headless autopilot run, useful for checking balance changes.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use anyhow::{Context, Result, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use star_hunter::assets::WebAssets;
    use star_hunter::platform::{
        ACTIVE_CLASS, FrameLoop, KeyAction, KeyValueStore, KeyboardState, LocalStorage,
        MENU_BUTTONS, MemoryStore, PAUSE_MENU_ID, clock_seed, now_ms, pause_menu_visible,
        prevents_default,
    };
    use star_hunter::renderer::canvas::CanvasRenderer;
    use star_hunter::renderer::{SceneOptions, build_frame};
    use star_hunter::sim::{Command, GamePhase, TickInput};
    use star_hunter::{Session, Settings};

    const CANVAS_ID: &str = "gameCanvas";

    type WebSession = Session<WebAssets, Box<dyn KeyValueStore>>;

    /// Game instance holding all state
    struct Game {
        session: WebSession,
        renderer: CanvasRenderer,
        keyboard: KeyboardState,
        /// Commands from keys and buttons, applied one per frame
        commands: VecDeque<Command>,
        frames: FrameLoop,
        last_phase: GamePhase,
    }

    impl Game {
        /// One animation frame: simulate, draw, sync the DOM menus
        fn frame(&mut self, now: f64) {
            let input = TickInput {
                held: self.keyboard.held(),
                command: self.commands.pop_front(),
            };
            self.session.update(&input, now);

            let options = SceneOptions {
                reduced_motion: self.session.settings().reduced_motion,
            };
            let frame = build_frame(self.session.state(), self.session.assets(), &options);
            self.renderer.render(&frame, self.session.assets());

            let phase = self.session.phase();
            if phase != self.last_phase {
                self.last_phase = phase;
                update_menus(phase);
            }
        }

        /// Pause immediately (focus lost); the simulation must not run a tick
        fn auto_pause(&mut self, reason: &str) {
            self.keyboard.clear();
            if !self.session.settings().auto_pause {
                return;
            }
            if self.session.phase() == GamePhase::Playing {
                self.session.command(Command::Pause, now_ms());
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    fn document() -> Result<Document> {
        web_sys::window()
            .ok_or_else(|| anyhow!("Window not found"))?
            .document()
            .ok_or_else(|| anyhow!("Document not found"))
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(err) => {
                log::warn!("{:#}; progress will not be saved", err);
                Box::new(MemoryStore::new())
            }
        }
    }

    /// Find the game canvas, creating it when the page has none
    fn game_canvas(document: &Document, width: u32, height: u32) -> Result<HtmlCanvasElement> {
        let canvas: HtmlCanvasElement = match document.get_element_by_id(CANVAS_ID) {
            Some(el) => el
                .dyn_into()
                .map_err(|_| anyhow!("#{} is not a canvas", CANVAS_ID))?,
            None => {
                let el = document
                    .create_element("canvas")
                    .map_err(|err| anyhow!("Could not create canvas: {:?}", err))?;
                el.set_id(CANVAS_ID);
                let body = document.body().ok_or_else(|| anyhow!("Document has no body"))?;
                body.append_child(&el)
                    .map_err(|err| anyhow!("Could not attach canvas: {:?}", err))?;
                el.dyn_into()
                    .map_err(|_| anyhow!("Created element is not a canvas"))?
            }
        };
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(canvas)
    }

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|err| anyhow!("Failed to init logger: {}", err))?;

        log::info!("Star Hunter starting...");

        let document = document()?;
        let store = open_store();
        let settings = Settings::load(&store);
        let tuning = settings.tuning.clone();

        let canvas = game_canvas(
            &document,
            tuning.arena_width as u32,
            tuning.arena_height as u32,
        )?;
        let renderer = CanvasRenderer::new(&canvas).context("Canvas setup failed")?;

        let assets = WebAssets::load(settings.effective_volume());
        let seed = clock_seed();
        let session = Session::new(seed, settings, assets, store);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            keyboard: KeyboardState::new(),
            commands: VecDeque::new(),
            frames: FrameLoop::new(),
            last_phase: GamePhase::Loading,
        }));
        update_menus(GamePhase::Loading);

        setup_keyboard(game.clone())?;
        setup_pause_menu(&document, game.clone());
        setup_auto_pause(&document, game.clone())?;
        setup_unload(game.clone())?;

        start_loop(game);

        log::info!("Star Hunter running!");
        Ok(())
    }

    fn listen<F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<()>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|err| anyhow!("Could not listen for '{}': {:?}", event, err))?;
        closure.forget();
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| anyhow!("Window not found"))?;

        {
            let game = game.clone();
            listen(&window, "keydown", move |event: web_sys::Event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                if prevents_default(&key) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                // Browsers only allow audio after a gesture
                g.session.assets().resume_audio();
                match g.keyboard.key_down(&key) {
                    Some(KeyAction::Command(command)) => g.commands.push_back(command),
                    Some(KeyAction::ToggleMute) => {
                        g.session.toggle_mute();
                    }
                    _ => {}
                }
            })?;
        }

        listen(&window, "keyup", move |event: web_sys::Event| {
            if let Ok(event) = event.dyn_into::<KeyboardEvent>() {
                game.borrow_mut().keyboard.key_up(&event.key());
            }
        })
    }

    fn setup_pause_menu(document: &Document, game: Rc<RefCell<Game>>) {
        for (id, command) in MENU_BUTTONS {
            // The menu is optional markup
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let result = listen(&btn, "click", move |_event: web_sys::Event| {
                game.borrow_mut().commands.push_back(command);
            });
            if let Err(err) = result {
                log::warn!("{:#}", err);
            }
        }
    }

    /// Show the pause menu only while paused
    fn update_menus(phase: GamePhase) {
        let Ok(document) = document() else { return };
        let Some(menu) = document.get_element_by_id(PAUSE_MENU_ID) else {
            return;
        };
        if let Err(err) = menu
            .class_list()
            .toggle_with_force(ACTIVE_CLASS, pause_menu_visible(phase))
        {
            log::debug!("Could not update pause menu: {:?}", err);
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| anyhow!("Window not found"))?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let doc = document.clone();
            listen(document, "visibilitychange", move |_event: web_sys::Event| {
                if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            })?;
        }

        // Window blur (click outside)
        listen(&window, "blur", move |_event: web_sys::Event| {
            game.borrow_mut().auto_pause("window blur");
        })
    }

    fn setup_unload(game: Rc<RefCell<Game>>) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| anyhow!("Window not found"))?;
        listen(&window, "beforeunload", move |_event: web_sys::Event| {
            stop_loop(&game);
        })
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frames.start();
        request_animation_frame(game);
    }

    /// Cancel the queued frame; no frame callback runs after this
    fn stop_loop(game: &Rc<RefCell<Game>>) {
        if let Some(handle) = game.borrow_mut().frames.stop() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(handle) {
                    log::debug!("cancelAnimationFrame failed: {:?}", err);
                }
            }
        }
        log::info!("Game loop stopped");
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let owner = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => owner.borrow_mut().frames.scheduled(handle),
            Err(_) => log::error!("requestAnimationFrame failed; game loop halted"),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if !g.frames.fired() {
                return;
            }
            g.frame(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(err) = wasm_game::run() {
        log::error!("Star Hunter failed to start: {:#}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(star_hunter::platform::clock_seed);

    log::info!("Star Hunter (native) autopilot, seed {}", seed);
    autopilot::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use star_hunter::assets::NullAssets;
    use star_hunter::platform::MemoryStore;
    use star_hunter::sim::{Command, GamePhase, GameState, HeldDirections, TickInput};
    use star_hunter::{Session, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Hold the keys that move the avatar toward the correct star
    fn steer(state: &GameState) -> HeldDirections {
        let Some(target) = state
            .stars
            .iter()
            .find(|s| s.is_correct && s.is_active())
            .map(|s| s.center())
        else {
            return HeldDirections::default();
        };

        let delta = target - state.player.center();
        let dead_zone = state.player.speed * 0.5;
        HeldDirections {
            left: delta.x < -dead_zone,
            right: delta.x > dead_zone,
            up: delta.y < -dead_zone,
            down: delta.y > dead_zone,
        }
    }

    pub fn run(seed: u64) {
        let mut session = Session::new(seed, Settings::default(), NullAssets, MemoryStore::new());
        session.poll_loading();

        let mut now = 0.0;
        session.command(Command::Action, now);

        // The session timer ends the run; this only guards against a stuck clock
        let max_frames =
            ((session.state().tuning.session_duration_secs * 1000.0 / FRAME_MS) as u64) + 600;
        let mut frames = 0;
        while session.phase() == GamePhase::Playing && frames < max_frames {
            now += FRAME_MS;
            frames += 1;
            let input = TickInput {
                held: steer(session.state()),
                command: None,
            };
            session.update(&input, now);
        }

        let state = session.state();
        let stats = state.progression.stats();
        log::info!(
            "Finished: {} after {:.1}s",
            state.phase.as_str(),
            now / 1000.0
        );
        log::info!(
            "Score {} | level {} | correct {} | wrong {} | accuracy {}% | lives {}",
            state.score,
            stats.level,
            stats.total_correct,
            stats.total_wrong,
            stats.accuracy,
            state.lives
        );
    }
}
