//! Hand landmark samples and the sources that produce them.
//!
//! A [`LandmarkSource`] yields, once per tick, every hand visible in the
//! current frame as a [`HandSample`]: a Left/Right label plus 21 normalized
//! landmark positions. The interpreter only reads these; it never tracks hand
//! identity across frames.

use crate::{constants::NUM_HAND_LANDMARKS, Error, Result};
use log::{debug, info};
use nalgebra::{distance, Point2};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

/// Which hand the upstream classifier assigned to a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandSide {
    /// Left hand (fist gate)
    Left,
    /// Right hand (cursor and pinch)
    Right,
}

/// A single landmark in normalized camera coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Landmark {
    /// 0.0 (left edge) to 1.0 (right edge)
    pub x: f32,
    /// 0.0 (top edge) to 1.0 (bottom edge)
    pub y: f32,
    /// Relative depth; not used by the gesture logic
    pub z: f32,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar position, ignoring depth
    #[must_use]
    pub fn planar(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    /// Planar distance to another landmark
    #[must_use]
    pub fn planar_distance(&self, other: &Self) -> f64 {
        f64::from(distance(&self.planar(), &other.planar()))
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Landmark> for [f32; 3] {
    fn from(lm: Landmark) -> Self {
        [lm.x, lm.y, lm.z]
    }
}

/// One detected hand in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandSample {
    /// Classifier label
    pub side: HandSide,
    /// Landmarks in model order
    pub landmarks: [Landmark; NUM_HAND_LANDMARKS],
}

impl HandSample {
    #[must_use]
    pub const fn new(side: HandSide, landmarks: [Landmark; NUM_HAND_LANDMARKS]) -> Self {
        Self { side, landmarks }
    }

    /// Build a sample from a slice, checking the landmark count
    ///
    /// # Errors
    ///
    /// Returns an error if `points` does not hold exactly 21 landmarks
    pub fn from_slice(side: HandSide, points: &[Landmark]) -> Result<Self> {
        let landmarks: [Landmark; NUM_HAND_LANDMARKS] = points.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Expected {NUM_HAND_LANDMARKS} hand landmarks, got {}",
                points.len()
            ))
        })?;
        Ok(Self { side, landmarks })
    }

    /// Landmark by model index
    #[must_use]
    pub fn landmark(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }
}

/// Producer of per-frame hand samples
pub trait LandmarkSource {
    /// Pull the hands visible in the next frame.
    ///
    /// Returns `Ok(Some(vec![]))` when no hand is visible and `Ok(None)` when
    /// a finite source has run out of frames.
    ///
    /// # Errors
    ///
    /// Returns an error when no frame could be produced; callers treat this
    /// as fatal for the session.
    fn sample(&mut self) -> Result<Option<Vec<HandSample>>>;

    /// Human readable source name, for logs
    fn name(&self) -> &str;
}

/// On-disk layout of a recorded landmark session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recording {
    /// Frames in capture order
    pub frames: Vec<Vec<HandSample>>,
}

/// A finite source that replays pre-recorded frames
pub struct ScriptedSource {
    frames: VecDeque<Vec<HandSample>>,
    name: String,
}

impl ScriptedSource {
    /// Create a source from in-memory frames
    #[must_use]
    pub fn new(frames: Vec<Vec<HandSample>>) -> Self {
        Self {
            frames: frames.into(),
            name: "scripted".to_string(),
        }
    }

    /// Load a YAML recording from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(format!("{}: {e}", path.display())))?;
        let recording: Recording = serde_yaml::from_str(&content)
            .map_err(|e| Error::InvalidInput(format!("Failed to parse recording {}: {e}", path.display())))?;

        info!("Loaded {} recorded frames from {}", recording.frames.len(), path.display());

        Ok(Self {
            frames: recording.frames.into(),
            name: path.display().to_string(),
        })
    }

    /// Frames not yet replayed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for ScriptedSource {
    fn sample(&mut self) -> Result<Option<Vec<HandSample>>> {
        let frame = self.frames.pop_front();
        if frame.is_none() {
            debug!("Scripted source {} exhausted", self.name);
        }
        Ok(frame)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
