use super::CursorFilter;
use crate::{Error, Result};

/// Exponential smoothing filter.
///
/// `alpha` weights the new sample: `s = s * (1 - alpha) + raw * alpha`.
/// An alpha above 1 overshoots the raw sample instead of lagging it; that
/// blend is kept as configured.
pub struct ExponentialFilter {
    alpha: f64,
    last: Option<(f64, f64)>,
}

impl ExponentialFilter {
    /// # Errors
    ///
    /// Returns an error if `alpha` is not a positive finite number
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(Error::FilterError(format!(
                "Alpha must be a positive finite number, got {alpha}"
            )));
        }
        Ok(Self { alpha, last: None })
    }

    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl CursorFilter for ExponentialFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        let filtered = match self.last {
            Some((last_x, last_y)) => (
                last_x * (1.0 - self.alpha) + x * self.alpha,
                last_y * (1.0 - self.alpha) + y * self.alpha,
            ),
            None => (x, y),
        };

        self.last = Some(filtered);
        filtered
    }

    fn current(&self) -> Option<(f64, f64)> {
        self.last
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_filter() {
        let mut filter = ExponentialFilter::new(0.5).unwrap();

        // First value passes through
        let (x1, y1) = filter.apply(10.0, 20.0);
        assert_eq!(x1, 10.0);
        assert_eq!(y1, 20.0);

        // Second value is smoothed
        let (x2, y2) = filter.apply(20.0, 30.0);
        assert_eq!(x2, 15.0); // 0.5 * 10 + 0.5 * 20
        assert_eq!(y2, 25.0);
    }

    #[test]
    fn test_extrapolating_alpha() {
        let mut filter = ExponentialFilter::new(1.2).unwrap();
        filter.apply(100.0, 100.0);

        // 100 * -0.2 + 200 * 1.2 = 220, past the raw sample
        let (x, y) = filter.apply(200.0, 50.0);
        assert!((x - 220.0).abs() < 1e-9);
        assert!((y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_restarts_passthrough() {
        let mut filter = ExponentialFilter::new(1.2).unwrap();
        filter.apply(1.0, 1.0);
        filter.apply(5.0, 5.0);
        filter.reset();
        assert_eq!(filter.current(), None);
        assert_eq!(filter.apply(7.0, 8.0), (7.0, 8.0));
    }

    #[test]
    fn test_invalid_alpha() {
        assert!(ExponentialFilter::new(0.0).is_err());
        assert!(ExponentialFilter::new(-0.5).is_err());
        assert!(ExponentialFilter::new(f64::NAN).is_err());
    }
}
