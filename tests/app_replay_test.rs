//! End-to-end tests driving the application with recorded hand landmarks


use pinch_puzzle::{
    app::PuzzleApp,
    config::Config,
    controller::GamePhase,
    landmarks::{HandSample, LandmarkSource, Recording, ScriptedSource},
    render::HeadlessPresenter,
    Error, Result,
};
use std::path::Path;
use std::time::{Duration, Instant};
use test_helpers::{left_fist, right_hand, scratch_dir, OPEN, PINCHED};

const EASY: (f64, f64) = (640.0, 285.0);
const PAUSE_MENU: (f64, f64) = (640.0, 560.0);

/// Config whose image folders live under `root`, each holding one image
fn config_with_images(root: &Path) -> Config {
    let mut config = Config::default();
    for tier in ["easy", "normal", "hard"] {
        let folder = root.join(tier);
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("picture.png"), b"placeholder").unwrap();
        std::fs::write(folder.join("notes.txt"), b"ignored").unwrap();
    }
    config.assets.easy_images = root.join("easy");
    config.assets.normal_images = root.join("normal");
    config.assets.hard_images = root.join("hard");
    config.display.target_fps = 240;
    config
}

fn select_pause_and_leave() -> Vec<Vec<HandSample>> {
    vec![
        vec![right_hand(EASY.0, EASY.1, OPEN)],
        vec![right_hand(EASY.0, EASY.1, PINCHED)],
        vec![],
        vec![left_fist()],
        vec![right_hand(PAUSE_MENU.0, PAUSE_MENU.1, OPEN)],
        vec![right_hand(PAUSE_MENU.0, PAUSE_MENU.1, OPEN)],
        vec![right_hand(PAUSE_MENU.0, PAUSE_MENU.1, PINCHED)],
        vec![],
    ]
}

#[test]
fn test_replay_select_pause_and_return_to_menu() {
    let dir = scratch_dir("replay-steps");
    let config = config_with_images(&dir);
    let source = ScriptedSource::new(select_pause_and_leave());
    let mut app = PuzzleApp::new(config, source, HeadlessPresenter::new(), Some(42)).unwrap();

    let t0 = Instant::now();
    let mut phases = Vec::new();
    let mut tick = 0;
    while app.step(t0 + Duration::from_millis(tick * 500)).unwrap() {
        phases.push(app.controller().phase());
        tick += 1;
    }

    assert_eq!(
        phases,
        vec![
            GamePhase::SelectDifficulty,
            GamePhase::Playing,
            GamePhase::Playing,
            GamePhase::Paused,
            GamePhase::Paused,
            GamePhase::Paused,
            GamePhase::SelectDifficulty,
            GamePhase::SelectDifficulty,
        ]
    );
    assert_eq!(app.frames(), 8);

    let loaded = app.presenter().loaded();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].0, dir.join("easy").join("picture.png"));
    assert_eq!(loaded[0].1, 2);
    assert_eq!(
        app.presenter().phases(),
        &[
            GamePhase::SelectDifficulty,
            GamePhase::Playing,
            GamePhase::Paused,
            GamePhase::SelectDifficulty
        ]
    );

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_run_stops_when_recording_ends() {
    let dir = scratch_dir("replay-run");
    let config = config_with_images(&dir);

    // Recording written to and read back from disk
    let recording = Recording {
        frames: vec![
            vec![right_hand(EASY.0, EASY.1, OPEN)],
            vec![right_hand(EASY.0, EASY.1, PINCHED)],
            vec![],
            vec![],
        ],
    };
    let path = dir.join("session.yaml");
    std::fs::write(&path, serde_yaml::to_string(&recording).unwrap()).unwrap();
    let source = ScriptedSource::from_file(&path).unwrap();
    assert_eq!(source.remaining(), 4);

    let mut app = PuzzleApp::new(config, source, HeadlessPresenter::new(), Some(7)).unwrap();
    app.run().unwrap();

    assert_eq!(app.frames(), 4);
    assert_eq!(app.controller().phase(), GamePhase::Playing);
    assert_eq!(app.presenter().phases(), &[GamePhase::SelectDifficulty, GamePhase::Playing]);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_image_folder_is_fatal() {
    let dir = scratch_dir("replay-no-images");
    let mut config = Config::default();
    config.assets.easy_images = dir.join("does-not-exist");

    let source = ScriptedSource::new(vec![
        vec![right_hand(EASY.0, EASY.1, OPEN)],
        vec![right_hand(EASY.0, EASY.1, PINCHED)],
    ]);
    let mut app = PuzzleApp::new(config, source, HeadlessPresenter::new(), Some(1)).unwrap();

    let result = app.run();
    assert!(matches!(result, Err(Error::Asset(_))));
    assert_eq!(app.controller().phase(), GamePhase::SelectDifficulty);
    assert!(app.presenter().loaded().is_empty());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_empty_image_folder_is_fatal() {
    let dir = scratch_dir("replay-empty-folder");
    let mut config = Config::default();
    config.assets.easy_images = dir.clone();
    std::fs::write(dir.join("readme.md"), b"no pictures here").unwrap();

    let source = ScriptedSource::new(vec![
        vec![right_hand(EASY.0, EASY.1, OPEN)],
        vec![right_hand(EASY.0, EASY.1, PINCHED)],
    ]);
    let mut app = PuzzleApp::new(config, source, HeadlessPresenter::new(), Some(1)).unwrap();
    assert!(matches!(app.run(), Err(Error::Asset(_))));

    std::fs::remove_dir_all(dir).ok();
}

struct UnpluggedCamera;

impl LandmarkSource for UnpluggedCamera {
    fn sample(&mut self) -> Result<Option<Vec<HandSample>>> {
        Err(Error::Camera("device disconnected".to_string()))
    }

    fn name(&self) -> &str {
        "unplugged"
    }
}

#[test]
fn test_source_error_is_fatal() {
    let mut app = PuzzleApp::new(Config::default(), UnpluggedCamera, HeadlessPresenter::new(), None).unwrap();
    assert!(matches!(app.run(), Err(Error::Camera(_))));
    assert_eq!(app.frames(), 0);
}

#[test]
fn test_invalid_config_rejected_at_startup() {
    let mut config = Config::default();
    config.board.normal = 1;
    let result = PuzzleApp::new(config, ScriptedSource::new(vec![]), HeadlessPresenter::new(), None);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}
