//! Stateless fist classifier for the left hand.

use crate::constants::{FIST_FINGERTIPS, WRIST};
use crate::landmarks::HandSample;

/// Mean planar distance from the palm landmark to the four fingertips
#[must_use]
pub fn mean_fingertip_distance(sample: &HandSample) -> f64 {
    let palm = sample.landmark(WRIST);
    let total: f64 = FIST_FINGERTIPS
        .iter()
        .map(|&tip| palm.planar_distance(sample.landmark(tip)))
        .sum();
    total / FIST_FINGERTIPS.len() as f64
}

/// True when the fingertips are curled in closer than `threshold`
#[must_use]
pub fn classify_fist(sample: &HandSample, threshold: f64) -> bool {
    mean_fingertip_distance(sample) < threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NUM_HAND_LANDMARKS;
    use crate::landmarks::{HandSide, Landmark};

    fn hand_with_tips_at(offset: f32) -> HandSample {
        let mut landmarks = [Landmark::new(0.5, 0.5, 0.0); NUM_HAND_LANDMARKS];
        for tip in FIST_FINGERTIPS {
            landmarks[tip] = Landmark::new(0.5, 0.5 - offset, 0.0);
        }
        HandSample::new(HandSide::Left, landmarks)
    }

    #[test]
    fn test_mean_distance() {
        let sample = hand_with_tips_at(0.2);
        assert!((mean_fingertip_distance(&sample) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_is_strict() {
        let sample = hand_with_tips_at(0.25);
        assert!(!classify_fist(&sample, 0.25 - 1e-9));
        assert!(classify_fist(&sample, 0.26));
    }
}
