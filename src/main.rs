//! Contact Sim entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::error::Error;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use contact_sim::consts::*;
    use contact_sim::platform::{Command, FrameClock, SimControl};
    use contact_sim::renderer::RenderState;
    use contact_sim::sim::{SimState, step};

    /// App instance holding all state
    struct App {
        state: SimState,
        render_state: Option<RenderState>,
        clock: FrameClock,
        control: SimControl,
    }

    impl App {
        fn new(seed: u64, now: f64) -> Self {
            Self {
                state: SimState::new(seed),
                render_state: None,
                clock: FrameClock::new(now),
                control: SimControl::default(),
            }
        }

        fn apply(&mut self, command: Command, now: f64) {
            self.control.apply(command);
            if command == Command::ToggleRun {
                self.clock.reset(now);
                update_button_label(self.control.button_label());
            }
        }

        /// Run at most one simulation tick
        fn update(&mut self, now: f64) {
            if !self.control.should_step() || !self.clock.try_tick(now) {
                return;
            }

            step(&mut self.state);

            if self.state.time_ticks % FRAMERATE as u64 == 0 {
                let census = self.state.census();
                log::info!(
                    "t={:.0}s S={} I={} R={}",
                    self.state.elapsed_secs(),
                    census.susceptible,
                    census.infected,
                    census.recovered
                );
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let draw_particles = self.control.should_draw_particles();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state.particles, draw_particles) {
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
        }
    }

    fn now_secs() -> f64 {
        js_sys::Date::now() / 1000.0
    }

    fn update_button_label(label: &str) {
        if let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("sim-toggle"))
        {
            btn.set_text_content(Some(label));
        }
    }

    pub async fn run() -> Result<(), Box<dyn Error>> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)?;

        log::info!("Contact Sim starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "element #canvas is not a canvas")?;
        canvas.set_width(WINDOW_WIDTH);
        canvas.set_height(WINDOW_HEIGHT);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, now_secs())));
        log::info!("Simulation initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, WINDOW_WIDTH, WINDOW_HEIGHT).await?;
        app.borrow_mut().render_state = Some(render_state);

        setup_toggle_button(app.clone());
        setup_keyboard(app.clone());
        update_button_label(app.borrow().control.button_label());

        request_animation_frame(app);

        log::info!("Contact Sim running!");
        Ok(())
    }

    fn setup_toggle_button(app: Rc<RefCell<App>>) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("sim-toggle"))
        else {
            log::warn!("No #sim-toggle button; use Space to start/pause");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().apply(Command::ToggleRun, now_secs());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(command) = Command::from_key(event.key().as_str()) {
                app.borrow_mut().apply(command, now_secs());
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.control.quit {
                log::info!("Contact Sim stopped after {} ticks", a.state.time_ticks);
                return;
            }

            a.update(now_secs());
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_app::run().await {
        log::error!("Setup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use contact_sim::consts::FRAMERATE;
    use contact_sim::sim::{Census, SimState, step};

    /// Longest headless run (simulated seconds)
    const MAX_SECONDS: u64 = 120;

    /// One line of the census trace
    #[derive(Serialize)]
    struct Sample {
        seconds: f64,
        #[serde(flatten)]
        census: Census,
    }

    fn emit(state: &SimState) {
        let sample = Sample {
            seconds: state.elapsed_secs(),
            census: state.census(),
        };
        match serde_json::to_string(&sample) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to encode census: {}", e),
        }
    }

    /// Step the simulation without a window, printing one census per second
    pub fn run(seed: u64) {
        let mut state = SimState::new(seed);
        emit(&state);

        let max_ticks = MAX_SECONDS * FRAMERATE as u64;
        while state.time_ticks < max_ticks {
            step(&mut state);
            if state.time_ticks % FRAMERATE as u64 == 0 {
                emit(&state);
            }
            if state.is_settled() {
                break;
            }
        }

        if state.time_ticks % FRAMERATE as u64 != 0 {
            emit(&state);
        }

        let census = state.census();
        log::info!(
            "Finished after {:.1}s: {} never infected, {} recovered, {} still infected",
            state.elapsed_secs(),
            census.susceptible,
            census.recovered,
            census.infected
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Contact Sim (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the rendered version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("Seed: {}", seed);

    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
