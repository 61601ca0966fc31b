//! Gesture interpreter: hand samples in, cursor and discrete events out.
//!
//! Each call to [`GestureInterpreter::interpret`] consumes the hands seen in
//! one frame. The right hand drives a smoothed screen cursor and the pinch
//! latch; the left hand is classified as fist or not. State carried between
//! frames is limited to the smoothing accumulator and the pinch latch, so a
//! frame without a right hand leaves the cursor where it was and does not
//! release an engaged pinch.

pub mod fist;
pub mod pinch;

pub use fist::classify_fist;
pub use pinch::{PinchDetector, PinchEvent};

use crate::{
    config::GestureConfig,
    constants::{HAND_SIZE_FLOOR, INDEX_TIP, MIDDLE_MCP, MIN_HAND_SIZE, THUMB_TIP, WRIST},
    filters::{create_filter, CursorFilter},
    landmarks::{HandSample, HandSide},
    Result,
};
use std::time::Instant;

/// Interpreter output for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureEvent {
    /// Smoothed cursor in screen pixels, `None` until a right hand is seen
    pub cursor: Option<(f64, f64)>,
    /// Pinch edge for this frame
    pub pinch_event: PinchEvent,
    /// Latched pinch state
    pub pinch_active: bool,
    /// Left hand is a fist in this frame
    pub left_fist: bool,
}

/// Pinch strength: thumb-to-index distance relative to hand size.
///
/// Hand size is the wrist to middle-finger-base distance, floored to
/// `HAND_SIZE_FLOOR` when it collapses to near zero.
#[must_use]
pub fn pinch_strength(sample: &HandSample) -> f64 {
    let mut hand_size = sample.landmark(WRIST).planar_distance(sample.landmark(MIDDLE_MCP));
    if hand_size < MIN_HAND_SIZE {
        hand_size = HAND_SIZE_FLOOR;
    }
    sample.landmark(THUMB_TIP).planar_distance(sample.landmark(INDEX_TIP)) / hand_size
}

/// Stateful per-session gesture interpreter
pub struct GestureInterpreter {
    screen_width: f64,
    screen_height: f64,
    fist_threshold: f64,
    filter: Box<dyn CursorFilter>,
    pinch: PinchDetector,
}

impl GestureInterpreter {
    /// Create an interpreter for a screen of `screen` = (width, height) pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the configured smoothing filter cannot be built
    pub fn new(config: &GestureConfig, screen: (f64, f64)) -> Result<Self> {
        let filter = create_filter(&config.smoothing_filter, config.cursor_smoothing)?;
        log::info!(
            "Gesture interpreter: {} (alpha {}), pinch {}/{} cooldown {} ms, fist {}",
            filter.name(),
            config.cursor_smoothing,
            config.pinch_trigger,
            config.pinch_release,
            config.pinch_cooldown_ms,
            config.fist_threshold
        );

        Ok(Self {
            screen_width: screen.0,
            screen_height: screen.1,
            fist_threshold: config.fist_threshold,
            filter,
            pinch: PinchDetector::new(config.pinch_trigger, config.pinch_release, config.pinch_cooldown()),
        })
    }

    /// Interpret the hands seen in one frame.
    ///
    /// When several samples share a label, the last one is used.
    pub fn interpret(&mut self, samples: &[HandSample], now: Instant) -> GestureEvent {
        let right = samples.iter().rev().find(|s| s.side == HandSide::Right);
        let left = samples.iter().rev().find(|s| s.side == HandSide::Left);

        let pinch_event = right.map_or(PinchEvent::None, |hand| self.track_right(hand, now));
        let left_fist = left.map_or(false, |hand| classify_fist(hand, self.fist_threshold));

        GestureEvent {
            cursor: self.filter.current(),
            pinch_event,
            pinch_active: self.pinch.is_engaged(),
            left_fist,
        }
    }

    /// Smoothed cursor, if a right hand has been seen
    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.filter.current()
    }

    /// Latched pinch state
    #[must_use]
    pub const fn pinch_engaged(&self) -> bool {
        self.pinch.is_engaged()
    }

    /// Forget the cursor and release the pinch latch
    pub fn reset(&mut self) {
        self.filter.reset();
        self.pinch.reset();
    }

    fn track_right(&mut self, hand: &HandSample, now: Instant) -> PinchEvent {
        let tip = hand.landmark(INDEX_TIP);
        let raw_x = f64::from(tip.x) * self.screen_width;
        let raw_y = f64::from(tip.y) * self.screen_height;
        self.filter.apply(raw_x, raw_y);

        self.pinch.update(pinch_strength(hand), now)
    }
}
