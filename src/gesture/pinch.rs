//! Pinch edge detector with hysteresis and cooldown.

use log::debug;
use std::time::{Duration, Instant};

/// Edge emitted by the pinch detector for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinchEvent {
    /// No edge this frame
    #[default]
    None,
    /// Released -> engaged
    PinchDown,
    /// Engaged -> released
    PinchUp,
}

/// Two-state latch driven by pinch strength.
///
/// Engages below `trigger` and releases above `release`; strengths in
/// between keep the current state. A down-edge inside the cooldown window is
/// dropped, not deferred.
#[derive(Debug, Clone)]
pub struct PinchDetector {
    trigger: f64,
    release: f64,
    cooldown: Duration,
    engaged: bool,
    last_down: Option<Instant>,
}

impl PinchDetector {
    #[must_use]
    pub const fn new(trigger: f64, release: f64, cooldown: Duration) -> Self {
        Self {
            trigger,
            release,
            cooldown,
            engaged: false,
            last_down: None,
        }
    }

    /// Feed one pinch strength measurement
    pub fn update(&mut self, strength: f64, now: Instant) -> PinchEvent {
        if self.engaged {
            if strength > self.release {
                self.engaged = false;
                debug!("Pinch up (strength {strength:.3})");
                return PinchEvent::PinchUp;
            }
            return PinchEvent::None;
        }

        if strength < self.trigger {
            if self.cooldown_elapsed(now) {
                self.engaged = true;
                self.last_down = Some(now);
                debug!("Pinch down (strength {strength:.3})");
                return PinchEvent::PinchDown;
            }
            debug!("Pinch down suppressed by cooldown");
        }

        PinchEvent::None
    }

    /// Current latched state
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Time of the last accepted down-edge
    #[must_use]
    pub const fn last_down(&self) -> Option<Instant> {
        self.last_down
    }

    /// Return to the released state and forget the cooldown
    pub fn reset(&mut self) {
        self.engaged = false;
        self.last_down = None;
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        self.last_down
            .map_or(true, |last| now.saturating_duration_since(last) > self.cooldown)
    }
}
