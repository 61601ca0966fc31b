//! Constants used throughout the application

/// Number of landmarks per detected hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Hand landmark indices (MediaPipe hand model convention)
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// Fingertips averaged by the fist classifier
pub const FIST_FINGERTIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Default window resolution
pub const DEFAULT_SCREEN_WIDTH: u32 = 1280;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 720;
pub const DEFAULT_MARGIN: u32 = 60;

/// Default frames per second
pub const DEFAULT_FPS: u32 = 60;

/// Default gesture thresholds
pub const DEFAULT_PINCH_TRIGGER: f64 = 0.18;
pub const DEFAULT_PINCH_RELEASE: f64 = 0.35;
pub const DEFAULT_PINCH_COOLDOWN_MS: u64 = 400;
pub const DEFAULT_FIST_THRESHOLD: f64 = 0.15;

/// Cursor smoothing factor. Values above 1 extrapolate past the raw sample.
pub const DEFAULT_CURSOR_SMOOTHING: f64 = 1.2;

/// Hand sizes below this are treated as degenerate
pub const MIN_HAND_SIZE: f64 = 1e-6;

/// Replacement hand size for degenerate frames (normalized units)
pub const HAND_SIZE_FLOOR: f64 = 1.0;

/// Grid sizes per difficulty tier
pub const DEFAULT_EASY_GRID: usize = 2;
pub const DEFAULT_NORMAL_GRID: usize = 3;
pub const DEFAULT_HARD_GRID: usize = 4;

/// Random legal moves per cell when scrambling a board
pub const SHUFFLE_MOVES_PER_CELL: usize = 20;

/// How long the solved board stays on screen
pub const DEFAULT_WIN_DISPLAY_MS: u64 = 1500;

/// Hand landmark model input size (square)
pub const HAND_MODEL_INPUT_SIZE: i32 = 224;

/// Supported puzzle image extensions (lowercase)
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
