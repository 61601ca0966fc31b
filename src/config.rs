//! Configuration management for the gesture puzzle

use crate::constants::{
    DEFAULT_CURSOR_SMOOTHING, DEFAULT_EASY_GRID, DEFAULT_FIST_THRESHOLD, DEFAULT_FPS, DEFAULT_HARD_GRID,
    DEFAULT_MARGIN, DEFAULT_NORMAL_GRID, DEFAULT_PINCH_COOLDOWN_MS, DEFAULT_PINCH_RELEASE, DEFAULT_PINCH_TRIGGER,
    DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DEFAULT_WIN_DISPLAY_MS, SHUFFLE_MOVES_PER_CELL,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window and frame pacing
    pub display: DisplayConfig,

    /// Gesture interpreter thresholds
    pub gesture: GestureConfig,

    /// Board sizes and timings
    pub board: BoardConfig,

    /// Puzzle image locations
    pub assets: AssetConfig,

    /// Webcam settings
    pub camera: CameraConfig,

    /// Hand landmark model
    pub model: ModelConfig,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Screen width in pixels; cursor coordinates are scaled to this
    pub width: u32,

    /// Screen height in pixels
    pub height: u32,

    /// Margin around the board and reference image
    pub margin: u32,

    /// Target framerate of the tick loop
    pub target_fps: u32,

    /// Window title
    pub window_title: String,
}

/// Gesture interpreter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pinch strength below which a pinch engages
    pub pinch_trigger: f64,

    /// Pinch strength above which an engaged pinch releases
    pub pinch_release: f64,

    /// Minimum interval between two accepted pinch-downs
    pub pinch_cooldown_ms: u64,

    /// Mean palm-to-fingertip distance below which the left hand is a fist
    pub fist_threshold: f64,

    /// Exponential smoothing factor for the cursor
    pub cursor_smoothing: f64,

    /// Cursor filter name ("exponential" or "none")
    pub smoothing_filter: String,
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Grid size for the easy tier
    pub easy: usize,

    /// Grid size for the normal tier
    pub normal: usize,

    /// Grid size for the hard tier
    pub hard: usize,

    /// Random legal moves per cell when shuffling
    pub shuffle_moves_per_cell: usize,

    /// How long the solved board is shown before returning to the menu
    pub win_display_ms: u64,
}

/// Asset locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Folder with images for the easy tier
    pub easy_images: PathBuf,

    /// Folder with images for the normal tier
    pub normal_images: PathBuf,

    /// Folder with images for the hard tier
    pub hard_images: PathBuf,

    /// Optional background image
    pub background: PathBuf,
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera index
    pub index: i32,

    /// Requested capture width
    pub width: u32,

    /// Requested capture height
    pub height: u32,

    /// Read timeout requested from the capture backend
    pub read_timeout_ms: u64,

    /// Mirror frames horizontally (selfie view)
    pub mirror: bool,
}

/// Hand landmark model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the hand landmark ONNX model
    pub hand_landmarks: PathBuf,

    /// Minimum hand presence score for a detection to count
    pub presence_threshold: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
            margin: DEFAULT_MARGIN,
            target_fps: DEFAULT_FPS,
            window_title: "Pinch Puzzle".to_string(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_trigger: DEFAULT_PINCH_TRIGGER,
            pinch_release: DEFAULT_PINCH_RELEASE,
            pinch_cooldown_ms: DEFAULT_PINCH_COOLDOWN_MS,
            fist_threshold: DEFAULT_FIST_THRESHOLD,
            cursor_smoothing: DEFAULT_CURSOR_SMOOTHING,
            smoothing_filter: "exponential".to_string(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            easy: DEFAULT_EASY_GRID,
            normal: DEFAULT_NORMAL_GRID,
            hard: DEFAULT_HARD_GRID,
            shuffle_moves_per_cell: SHUFFLE_MOVES_PER_CELL,
            win_display_ms: DEFAULT_WIN_DISPLAY_MS,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            easy_images: PathBuf::from("images/easy"),
            normal_images: PathBuf::from("images/normal"),
            hard_images: PathBuf::from("images/hard"),
            background: PathBuf::from("bg/neon_bg.png"),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: 640,
            height: 480,
            read_timeout_ms: 2000,
            mirror: true,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            hand_landmarks: PathBuf::from("assets/hand_landmark.onnx"),
            presence_threshold: 0.5,
        }
    }
}

impl GestureConfig {
    /// Pinch cooldown as a `Duration`
    #[must_use]
    pub const fn pinch_cooldown(&self) -> Duration {
        Duration::from_millis(self.pinch_cooldown_ms)
    }
}

impl BoardConfig {
    /// Win screen display time as a `Duration`
    #[must_use]
    pub const fn win_display(&self) -> Duration {
        Duration::from_millis(self.win_display_ms)
    }
}

impl DisplayConfig {
    /// Duration of one tick at the target framerate
    #[must_use]
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }

    /// Screen size as floating point, for cursor scaling
    #[must_use]
    pub fn screen_size(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_yaml()?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Serialize configuration to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Display
        if self.display.width == 0 || self.display.height == 0 {
            return Err(Error::ConfigError("Screen size must be greater than 0".to_string()));
        }
        if self.display.target_fps == 0 {
            return Err(Error::ConfigError("Target FPS must be greater than 0".to_string()));
        }
        if self.display.margin.saturating_mul(2) >= self.display.height {
            return Err(Error::ConfigError(format!(
                "Margin {} leaves no room for the board at height {}",
                self.display.margin, self.display.height
            )));
        }

        // Gesture thresholds
        let gesture = &self.gesture;
        if !(gesture.pinch_trigger > 0.0) || !gesture.pinch_trigger.is_finite() {
            return Err(Error::ConfigError("Pinch trigger level must be positive".to_string()));
        }
        if !(gesture.pinch_release > gesture.pinch_trigger) || !gesture.pinch_release.is_finite() {
            return Err(Error::ConfigError(
                "Pinch release level must be greater than the trigger level".to_string(),
            ));
        }
        if !(gesture.fist_threshold > 0.0) || !gesture.fist_threshold.is_finite() {
            return Err(Error::ConfigError("Fist threshold must be positive".to_string()));
        }
        if !(gesture.cursor_smoothing > 0.0) || !gesture.cursor_smoothing.is_finite() {
            return Err(Error::ConfigError("Cursor smoothing must be positive".to_string()));
        }

        // Board
        for (tier, size) in [("easy", self.board.easy), ("normal", self.board.normal), ("hard", self.board.hard)] {
            if size < 2 {
                return Err(Error::ConfigError(format!(
                    "Grid size for {tier} must be at least 2, got {size}"
                )));
            }
        }
        if self.board.shuffle_moves_per_cell == 0 {
            return Err(Error::ConfigError("Shuffle moves per cell must be greater than 0".to_string()));
        }

        // Model
        if !(0.0..=1.0).contains(&self.model.presence_threshold) {
            return Err(Error::ConfigError(
                "Presence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Pinch Puzzle Configuration

# Window and frame pacing
display:
  width: 1280
  height: 720
  margin: 60
  target_fps: 60
  window_title: "Pinch Puzzle"

# Gesture thresholds
gesture:
  pinch_trigger: 0.18
  pinch_release: 0.35
  pinch_cooldown_ms: 400
  fist_threshold: 0.15
  cursor_smoothing: 1.2
  smoothing_filter: "exponential"

# Board sizes per difficulty
board:
  easy: 2
  normal: 3
  hard: 4
  shuffle_moves_per_cell: 20
  win_display_ms: 1500

# Puzzle images
assets:
  easy_images: "images/easy"
  normal_images: "images/normal"
  hard_images: "images/hard"
  background: "bg/neon_bg.png"

# Webcam
camera:
  index: 0
  width: 640
  height: 480
  read_timeout_ms: 2000
  mirror: true

# Hand landmark model
model:
  hand_landmarks: "assets/hand_landmark.onnx"
  presence_threshold: 0.5
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.display.width, defaults.display.width);
        assert_eq!(parsed.gesture.pinch_cooldown_ms, defaults.gesture.pinch_cooldown_ms);
        assert_eq!(parsed.gesture.cursor_smoothing, defaults.gesture.cursor_smoothing);
        assert_eq!(parsed.board.hard, defaults.board.hard);
        assert_eq!(parsed.assets.normal_images, defaults.assets.normal_images);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed = Config::from_yaml("gesture:\n  pinch_trigger: 0.2\n").unwrap();
        assert_eq!(parsed.gesture.pinch_trigger, 0.2);
        assert_eq!(parsed.gesture.pinch_release, DEFAULT_PINCH_RELEASE);
        assert_eq!(parsed.display.target_fps, DEFAULT_FPS);
    }

    #[test]
    fn test_frame_budget() {
        let display = DisplayConfig::default();
        let budget = display.frame_budget();
        assert!((budget.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverted_pinch_levels_rejected() {
        let mut config = Config::default();
        config.gesture.pinch_release = 0.1;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }
}
