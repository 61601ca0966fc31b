//! Tests for the gesture interpreter


use pinch_puzzle::{
    config::GestureConfig,
    gesture::{pinch_strength, GestureInterpreter, PinchEvent},
    landmarks::{HandSample, HandSide, Landmark},
    constants::{INDEX_TIP, NUM_HAND_LANDMARKS, THUMB_TIP},
};
use std::time::{Duration, Instant};
use test_helpers::{left_fist, left_open, right_hand, DEAD_ZONE, OPEN, PINCHED};

fn interpreter() -> GestureInterpreter {
    GestureInterpreter::new(&GestureConfig::default(), (1280.0, 720.0)).unwrap()
}

fn ms(base: Instant, millis: u64) -> Instant {
    base + Duration::from_millis(millis)
}

#[test]
fn test_no_hands_yields_default_event() {
    let mut gestures = interpreter();
    let event = gestures.interpret(&[], Instant::now());
    assert_eq!(event.cursor, None);
    assert_eq!(event.pinch_event, PinchEvent::None);
    assert!(!event.pinch_active);
    assert!(!event.left_fist);
}

#[test]
fn test_pinch_hysteresis_dead_zone() {
    let mut gestures = interpreter();
    let t0 = Instant::now();
    let strengths = [OPEN, PINCHED, DEAD_ZONE, PINCHED, DEAD_ZONE, OPEN, DEAD_ZONE];
    let expected = [
        (PinchEvent::None, false),
        (PinchEvent::PinchDown, true),
        (PinchEvent::None, true),
        (PinchEvent::None, true),
        (PinchEvent::None, true),
        (PinchEvent::PinchUp, false),
        (PinchEvent::None, false),
    ];

    for (i, (&strength, &(edge, active))) in strengths.iter().zip(expected.iter()).enumerate() {
        let event = gestures.interpret(&[right_hand(640.0, 360.0, strength)], ms(t0, i as u64 * 50));
        assert_eq!(event.pinch_event, edge, "frame {i}");
        assert_eq!(event.pinch_active, active, "frame {i}");
    }
}

#[test]
fn test_pinch_cooldown_drops_early_edges() {
    let mut gestures = interpreter();
    let t0 = Instant::now();

    let down = gestures.interpret(&[right_hand(640.0, 360.0, PINCHED)], t0);
    assert_eq!(down.pinch_event, PinchEvent::PinchDown);
    let up = gestures.interpret(&[right_hand(640.0, 360.0, OPEN)], ms(t0, 100));
    assert_eq!(up.pinch_event, PinchEvent::PinchUp);

    // Re-pinch inside the window is dropped and leaves the latch released
    let early = gestures.interpret(&[right_hand(640.0, 360.0, PINCHED)], ms(t0, 200));
    assert_eq!(early.pinch_event, PinchEvent::None);
    assert!(!early.pinch_active);

    // Exactly at the boundary is still too early
    let boundary = gestures.interpret(&[right_hand(640.0, 360.0, PINCHED)], ms(t0, 400));
    assert_eq!(boundary.pinch_event, PinchEvent::None);

    let late = gestures.interpret(&[right_hand(640.0, 360.0, PINCHED)], ms(t0, 450));
    assert_eq!(late.pinch_event, PinchEvent::PinchDown);
    assert!(late.pinch_active);
}

#[test]
fn test_at_most_one_down_per_cooldown_window() {
    let mut gestures = interpreter();
    let t0 = Instant::now();
    let mut downs = Vec::new();

    // Rapid pinch/release flicker every 20 ms for two seconds
    for i in 0..100u64 {
        let strength = if i % 2 == 0 { PINCHED } else { OPEN };
        let now = ms(t0, i * 20);
        if gestures.interpret(&[right_hand(640.0, 360.0, strength)], now).pinch_event == PinchEvent::PinchDown {
            downs.push(now);
        }
    }

    assert!(downs.len() >= 2);
    for pair in downs.windows(2) {
        assert!(pair[1] - pair[0] > Duration::from_millis(400));
    }
}

#[test]
fn test_cursor_smoothing_overshoots_with_alpha_above_one() {
    let mut gestures = interpreter();
    let t0 = Instant::now();

    let first = gestures.interpret(&[right_hand(640.0, 360.0, OPEN)], t0);
    let (x, y) = first.cursor.unwrap();
    assert!((x - 640.0).abs() < 1e-3);
    assert!((y - 360.0).abs() < 1e-3);

    let second = gestures.interpret(&[right_hand(768.0, 360.0, OPEN)], ms(t0, 16));
    let (x, _) = second.cursor.unwrap();
    // 640 * (1 - 1.2) + 768 * 1.2
    assert!((x - 793.6).abs() < 1e-2, "x = {x}");
}

#[test]
fn test_smoothing_is_deterministic() {
    let path: Vec<(f64, f64)> = (0..30).map(|i| (100.0 + f64::from(i) * 30.0, 200.0 + f64::from(i % 5) * 40.0)).collect();
    let t0 = Instant::now();

    let run = || {
        let mut gestures = interpreter();
        path.iter()
            .enumerate()
            .map(|(i, &(x, y))| gestures.interpret(&[right_hand(x, y, OPEN)], ms(t0, i as u64 * 16)).cursor)
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_cursor_holds_without_right_hand() {
    let mut gestures = interpreter();
    let t0 = Instant::now();

    let pinched = gestures.interpret(&[right_hand(300.0, 200.0, PINCHED)], t0);
    assert!(pinched.pinch_active);

    let lost = gestures.interpret(&[left_open()], ms(t0, 16));
    assert_eq!(lost.cursor, pinched.cursor);
    assert_eq!(lost.pinch_event, PinchEvent::None);
    assert!(lost.pinch_active);
}

#[test]
fn test_fist_only_counts_for_left_hand() {
    let mut gestures = interpreter();
    let t0 = Instant::now();

    assert!(gestures.interpret(&[left_fist()], t0).left_fist);
    assert!(!gestures.interpret(&[left_open()], ms(t0, 16)).left_fist);

    let mut right_fist = left_fist();
    right_fist.side = HandSide::Right;
    assert!(!gestures.interpret(&[right_fist], ms(t0, 32)).left_fist);
}

#[test]
fn test_last_sample_per_side_wins() {
    let mut gestures = interpreter();
    let event = gestures.interpret(
        &[right_hand(100.0, 100.0, OPEN), left_open(), right_hand(900.0, 500.0, OPEN)],
        Instant::now(),
    );
    let (x, y) = event.cursor.unwrap();
    assert!((x - 900.0).abs() < 1e-3);
    assert!((y - 500.0).abs() < 1e-3);
}

#[test]
fn test_degenerate_hand_size_uses_floor() {
    // Every landmark on one point except the thumb tip
    let mut landmarks = [Landmark::new(0.5, 0.5, 0.0); NUM_HAND_LANDMARKS];
    landmarks[THUMB_TIP] = Landmark::new(0.6, 0.5, 0.0);
    let sample = HandSample::new(HandSide::Right, landmarks);
    assert_eq!(landmarks[INDEX_TIP], Landmark::new(0.5, 0.5, 0.0));

    let strength = pinch_strength(&sample);
    assert!(strength.is_finite());
    assert!((strength - 0.1).abs() < 1e-6);

    // Raw distance 0.1 under the 1.0 floor reads as a pinch
    let mut gestures = interpreter();
    let event = gestures.interpret(&[sample], Instant::now());
    assert_eq!(event.pinch_event, PinchEvent::PinchDown);
}

#[test]
fn test_reset_forgets_cursor_and_latch() {
    let mut gestures = interpreter();
    gestures.interpret(&[right_hand(300.0, 200.0, PINCHED)], Instant::now());
    assert!(gestures.pinch_engaged());

    gestures.reset();
    assert!(!gestures.pinch_engaged());
    assert_eq!(gestures.cursor(), None);
}
