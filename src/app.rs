//! Main application loop for the gesture puzzle.

use crate::{
    assets::AssetLibrary,
    config::Config,
    controller::{Controller, Difficulty, Flow, KeyInput},
    gesture::GestureInterpreter,
    landmarks::LandmarkSource,
    render::Presenter,
    Result,
};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Ties a landmark source, the gesture interpreter, the controller and a
/// presenter together at a fixed tick rate
pub struct PuzzleApp<S: LandmarkSource, P: Presenter> {
    config: Config,
    source: S,
    presenter: P,
    interpreter: GestureInterpreter,
    controller: Controller,
    assets: AssetLibrary,
    rng: StdRng,
    frame_budget: Duration,
    pending_key: KeyInput,
    frames: u64,
}

impl<S: LandmarkSource, P: Presenter> PuzzleApp<S, P> {
    /// Create the application. `seed` makes shuffles and image picks
    /// reproducible.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: Config, source: S, presenter: P, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        info!("Initializing puzzle application with source {}", source.name());

        let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let controller = Controller::new(&config, StdRng::seed_from_u64(rng.gen()));
        let interpreter = GestureInterpreter::new(&config.gesture, config.display.screen_size())?;
        let assets = AssetLibrary::new(config.assets.clone());
        let frame_budget = config.display.frame_budget();

        Ok(Self {
            config,
            source,
            presenter,
            interpreter,
            controller,
            assets,
            rng,
            frame_budget,
            pending_key: KeyInput::None,
            frames: 0,
        })
    }

    /// Run until the source ends or the player quits
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails, a puzzle image cannot be
    /// prepared, or drawing fails
    pub fn run(&mut self) -> Result<()> {
        info!("Starting main loop at {} fps", self.config.display.target_fps);

        loop {
            let frame_start = Instant::now();
            if !self.step(frame_start)? {
                break;
            }

            let spent = frame_start.elapsed();
            if let Some(rest) = self.frame_budget.checked_sub(spent) {
                std::thread::sleep(rest);
            } else if spent > self.frame_budget * 2 {
                debug!("Frame {} took {} ms", self.frames, spent.as_millis());
            }
        }

        info!("Application shutting down after {} frames", self.frames);
        Ok(())
    }

    /// Advance one frame; `false` when the loop should stop
    ///
    /// # Errors
    ///
    /// Same as [`PuzzleApp::run`]
    pub fn step(&mut self, now: Instant) -> Result<bool> {
        let Some(samples) = self.source.sample()? else {
            info!("Landmark source {} finished", self.source.name());
            return Ok(false);
        };

        let event = self.interpreter.interpret(&samples, now);
        let key = std::mem::take(&mut self.pending_key);
        match self.controller.tick(&event, key, now) {
            Flow::Continue => {}
            Flow::DifficultySelected(difficulty) => self.begin_session(difficulty, now)?,
            Flow::Exit => return Ok(false),
        }

        let snapshot = self.controller.snapshot(&event, now);
        self.pending_key = self.presenter.present(&snapshot)?;
        self.frames += 1;
        Ok(true)
    }

    fn begin_session(&mut self, difficulty: Difficulty, now: Instant) -> Result<()> {
        let image = self.assets.pick(difficulty, &mut self.rng)?;
        let grid_size = difficulty.grid_size(&self.config.board);
        self.presenter.load_puzzle(&image, grid_size)?;
        self.controller.start_session(difficulty, now)
    }

    #[must_use]
    pub const fn controller(&self) -> &Controller {
        &self.controller
    }

    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}
