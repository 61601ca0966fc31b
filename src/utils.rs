//! Small helpers shared by detection and drawing.

pub mod image_conversion;
pub mod safe_cast;

use std::time::Duration;

/// Border widths `(top, bottom, left, right)` that pad a `width` x `height`
/// region to a centered square
#[must_use]
pub fn square_padding(width: i32, height: i32) -> (i32, i32, i32, i32) {
    let side = width.max(height);
    let left = (side - width) / 2;
    let top = (side - height) / 2;
    (top, side - height - top, left, side - width - left)
}

/// Format a play time as `MM:SS`; minutes keep counting past 59
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
