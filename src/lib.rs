//! Gesture-controlled sliding-tile puzzle.
//!
//! A webcam hand tracker produces per-frame hand landmarks. The right index
//! fingertip drives an on-screen cursor, a right-hand pinch acts as a click,
//! and a closed left fist pauses the game.
//!
//! The pipeline for one tick:
//! 1. A [`landmarks::LandmarkSource`] yields the hands seen in the frame
//! 2. The [`gesture::GestureInterpreter`] smooths the cursor and detects pinch
//!    and fist gestures
//! 3. The [`controller::Controller`] advances the menu, play, pause or win
//!    screen and mutates the [`board::Board`]
//! 4. A [`render::Presenter`] draws a [`controller::Snapshot`]
//!
//! # Examples
//!
//! ## Driving the controller directly
//!
//! ```no_run
//! use pinch_puzzle::{
//!     config::Config,
//!     controller::{Controller, Flow, KeyInput},
//!     gesture::GestureInterpreter,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//! use std::time::Instant;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut interpreter = GestureInterpreter::new(&config.gesture, config.display.screen_size())?;
//! let mut controller = Controller::new(&config, StdRng::seed_from_u64(7));
//!
//! let now = Instant::now();
//! let event = interpreter.interpret(&[], now);
//! if let Flow::DifficultySelected(difficulty) = controller.tick(&event, KeyInput::None, now) {
//!     controller.start_session(difficulty, now)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Replaying a recording without a window
//!
//! ```no_run
//! use pinch_puzzle::{
//!     app::PuzzleApp, config::Config, landmarks::ScriptedSource, render::HeadlessPresenter,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ScriptedSource::from_file("session.yaml")?;
//! let mut app = PuzzleApp::new(Config::default(), source, HeadlessPresenter::new(), Some(42))?;
//! app.run()?;
//! # Ok(())
//! # }
//! ```

/// Application loop
pub mod app;

/// Puzzle image selection
pub mod assets;

/// Sliding-tile board engine
pub mod board;

/// Configuration management
pub mod config;

/// Constants and tuning defaults
pub mod constants;

/// Screen state machine
pub mod controller;

/// Error types
pub mod error;

/// Cursor smoothing filters
pub mod filters;

/// Gesture interpretation
pub mod gesture;

/// Webcam hand landmark detection
pub mod hand_detection;

/// Hand samples and landmark sources
pub mod landmarks;

/// Screen geometry
pub mod layout;

/// Drawing and key input
pub mod render;

/// Utility functions
pub mod utils;

pub use error::{Error, Result};
