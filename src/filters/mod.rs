//! Cursor smoothing filters.
//!
//! The right index fingertip jitters from frame to frame; a filter turns the
//! raw screen-space samples into the cursor that is hit-tested and drawn.

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::Result;

/// Trait for all cursor filters
pub trait CursorFilter: Send + Sync {
    /// Apply filter to a raw screen position
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64);

    /// Last filtered value, if any sample has been seen
    fn current(&self) -> Option<(f64, f64)>;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
#[derive(Default)]
pub struct NoFilter {
    last: Option<(f64, f64)>,
}

impl CursorFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.last = Some((x, y));
        (x, y)
    }

    fn current(&self) -> Option<(f64, f64)> {
        self.last
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a cursor filter by type name
pub fn create_filter(filter_type: &str, alpha: f64) -> Result<Box<dyn CursorFilter>> {
    match filter_type.to_lowercase().as_str() {
        "none" | "nofilter" => Ok(Box::new(NoFilter::default())),
        "exponential" => Ok(Box::new(exponential::ExponentialFilter::new(alpha)?)),
        _ => Err(crate::Error::FilterError(format!("Unknown filter type: {filter_type}"))),
    }
}
