//! Tests for configuration loading and validation


use pinch_puzzle::{
    config::{Config, EXAMPLE_CONFIG},
    Error,
};
use std::path::PathBuf;
use test_helpers::scratch_dir;

#[test]
fn test_file_round_trip() {
    let dir = scratch_dir("config-round-trip");
    let path = dir.join("puzzle.yaml");

    let mut config = Config::default();
    config.display.width = 1600;
    config.display.height = 900;
    config.gesture.pinch_cooldown_ms = 250;
    config.board.hard = 5;
    config.assets.easy_images = PathBuf::from("/srv/puzzles/easy");
    config.camera.mirror = false;
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.display.width, 1600);
    assert_eq!(loaded.display.height, 900);
    assert_eq!(loaded.gesture.pinch_cooldown_ms, 250);
    assert_eq!(loaded.board.hard, 5);
    assert_eq!(loaded.assets.easy_images, PathBuf::from("/srv/puzzles/easy"));
    assert!(!loaded.camera.mirror);
    assert!(loaded.validate().is_ok());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_example_config_is_valid() {
    let config = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.gesture.pinch_trigger, 0.18);
    assert_eq!(config.gesture.pinch_release, 0.35);
    assert_eq!(config.gesture.fist_threshold, 0.15);
    assert_eq!(config.board.win_display_ms, 1500);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = Config::from_file("/nonexistent/pinch-puzzle/config.yaml");
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_malformed_yaml_is_config_error() {
    let result = Config::from_yaml("display: [not, a, map]");
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases: Vec<(&str, Box<dyn Fn(&mut Config)>)> = vec![
        ("zero fps", Box::new(|c| c.display.target_fps = 0)),
        ("zero width", Box::new(|c| c.display.width = 0)),
        ("margin fills screen", Box::new(|c| c.display.margin = 360)),
        ("trigger equals release", Box::new(|c| c.gesture.pinch_trigger = c.gesture.pinch_release)),
        ("negative trigger", Box::new(|c| c.gesture.pinch_trigger = -0.1)),
        ("zero fist threshold", Box::new(|c| c.gesture.fist_threshold = 0.0)),
        ("nan smoothing", Box::new(|c| c.gesture.cursor_smoothing = f64::NAN)),
        ("one-cell grid", Box::new(|c| c.board.easy = 1)),
        ("no shuffle", Box::new(|c| c.board.shuffle_moves_per_cell = 0)),
        ("presence above one", Box::new(|c| c.model.presence_threshold = 1.5)),
    ];

    for (name, mutate) in cases {
        let mut config = Config::default();
        mutate(&mut config);
        assert!(
            matches!(config.validate(), Err(Error::ConfigError(_))),
            "{name} should be rejected"
        );
    }
}

#[test]
fn test_smoothing_above_one_is_accepted() {
    let mut config = Config::default();
    config.gesture.cursor_smoothing = 1.2;
    assert!(config.validate().is_ok());
}
