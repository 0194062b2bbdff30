// main.rs - Desktop front end for the lattice engines
// Elementary rows and Life grids are stepped by a background runner task;
// the UI only reads the shared state and draws it.

use egui::Color32;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use lattice::runner::{self, RunControl};
use lattice::{Boundary, Config, ElementaryState, LifeState};

mod ui;

const CONFIG_PATH: &str = "lattice.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default(CONFIG_PATH)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Lattice",
        options,
        Box::new(move |_cc| Box::new(LatticeApp::new(config, runtime))),
    )?;
    Ok(())
}

/// Poisoning only means a step panicked mid-way; the grid is still drawable.
pub fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Elementary,
    Life,
}

pub struct LatticeApp {
    pub mode: Mode,
    pub elementary: Arc<Mutex<ElementaryState>>,
    pub life: Arc<Mutex<LifeState>>,
    pub control: RunControl,

    // Text boxes for the 1-D form
    pub rule_input: String,
    pub width_input: String,
    pub iterations_input: String,
    pub buffer_input: String,

    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub random_seed: u64,

    runtime: tokio::runtime::Runtime,
}

impl LatticeApp {
    pub fn new(config: Config, runtime: tokio::runtime::Runtime) -> Self {
        Self {
            mode: Mode::Elementary,
            rule_input: config.default_rule.to_string(),
            width_input: config.default_lattice_width.to_string(),
            iterations_input: config.default_iterations.to_string(),
            buffer_input: config.default_buffer.to_string(),
            control: RunControl::new(Duration::from_millis(config.default_delay_ms)),
            elementary: Arc::new(Mutex::new(ElementaryState::new(config.clone()))),
            life: Arc::new(Mutex::new(LifeState::new(config))),
            live_color: Color32::BLACK,
            dead_color: Color32::WHITE,
            selected_pattern: 0,
            random_seed: 0,
            runtime,
        }
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Starts a background run for the active mode.
    pub fn start(&mut self) {
        self.control.start();
        log::info!("starting {:?} run", self.mode);
        match self.mode {
            Mode::Elementary => {
                self.runtime
                    .spawn(runner::run_shared(self.elementary.clone(), self.control.clone()));
            }
            Mode::Life => {
                self.runtime
                    .spawn(runner::run_shared(self.life.clone(), self.control.clone()));
            }
        }
    }

    pub fn stop(&mut self) {
        if self.control.is_running() {
            log::info!("stopping {:?} run", self.mode);
        }
        self.control.stop();
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            self.stop();
            log::info!("switching to {mode:?} mode");
            self.mode = mode;
        }
    }

    /// One manual iteration of the active mode.
    pub fn iterate_once(&mut self) {
        match self.mode {
            Mode::Elementary => {
                lock(&self.elementary).iterate(1);
            }
            Mode::Life => {
                lock(&self.life).iterate();
            }
        }
    }

    pub fn clear(&mut self) {
        self.stop();
        match self.mode {
            Mode::Elementary => lock(&self.elementary).clear(),
            Mode::Life => lock(&self.life).clear(),
        }
    }

    pub fn submit_rule(&mut self) {
        // Any rule submission stops a run, accepted or not.
        self.stop();
        let _ = lock(&self.elementary).submit_rule(&self.rule_input);
    }

    pub fn submit_lattice_size(&mut self) {
        self.stop();
        let _ = lock(&self.elementary).submit_lattice_size(&self.width_input);
    }

    pub fn submit_iterations(&mut self) {
        let _ = lock(&self.elementary).submit_iterations(&self.iterations_input);
    }

    pub fn submit_buffer(&mut self) {
        self.stop();
        let _ = lock(&self.elementary).submit_buffer(&self.buffer_input);
    }

    pub fn fill_seed(&mut self) {
        self.stop();
        lock(&self.elementary).fill_seed();
    }

    pub fn randomize_seed(&mut self) {
        self.stop();
        self.random_seed = self.random_seed.wrapping_add(1);
        lock(&self.elementary).randomize_seed(self.random_seed);
    }

    pub fn toggle_boundary(&mut self) {
        let mut state = lock(&self.elementary);
        let next = match state.boundary() {
            Boundary::Periodic => Boundary::Zero,
            Boundary::Zero => Boundary::Periodic,
        };
        state.set_boundary(next);
    }

    pub fn apply_selected_pattern(&mut self) {
        self.stop();
        if let Some(pattern) = lattice::PATTERNS.get(self.selected_pattern) {
            let _ = lock(&self.life).load_preset(pattern.name);
        }
    }

    pub fn apply_random_pattern(&mut self) {
        self.stop();
        self.random_seed = self.random_seed.wrapping_add(1);
        lock(&self.life).randomize(self.random_seed);
    }
}
