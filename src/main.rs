//! Gesture-controlled sliding-tile puzzle.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use pinch_puzzle::{
    app::PuzzleApp,
    assets::AssetLibrary,
    config::Config,
    hand_detection::CameraHandSource,
    landmarks::{LandmarkSource, ScriptedSource},
    render::{HeadlessPresenter, WindowPresenter},
};
use std::path::PathBuf;

/// Presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GuiMode {
    /// Draw the game in an OpenCV window
    Window,
    /// No window; log screen changes only
    None,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use (overrides the config file)
    #[arg(long)]
    cam: Option<i32>,

    /// Replay recorded hand landmarks from a YAML file instead of the camera
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// GUI display mode
    #[arg(short, long, value_enum, default_value = "window")]
    gui: GuiMode,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Seed for shuffles and image choice
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Pinch Puzzle {}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::from_file(path).unwrap_or_else(|e| {
                warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            })
        }
        None => Config::default(),
    };
    if let Some(cam) = args.cam {
        config.camera.index = cam;
    }

    if args.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }
    config.validate().context("Invalid configuration")?;

    match &args.replay {
        Some(path) => {
            let source = ScriptedSource::from_file(path)
                .with_context(|| format!("Failed to load recording {}", path.display()))?;
            run(config, source, args.gui, args.seed)
        }
        None => {
            let source =
                CameraHandSource::new(&config.camera, &config.model).context("Failed to start hand tracking")?;
            run(config, source, args.gui, args.seed)
        }
    }
}

fn run<S: LandmarkSource>(config: Config, source: S, gui: GuiMode, seed: Option<u64>) -> Result<()> {
    match gui {
        GuiMode::Window => {
            let assets = AssetLibrary::new(config.assets.clone());
            let presenter = WindowPresenter::new(&config.display, assets.background())?;
            PuzzleApp::new(config, source, presenter, seed)?.run()?;
        }
        GuiMode::None => {
            PuzzleApp::new(config, source, HeadlessPresenter::new(), seed)?.run()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["pinch-puzzle"]).unwrap();
        assert_eq!(args.gui, GuiMode::Window);
        assert!(args.cam.is_none());
        assert!(args.replay.is_none());
        assert!(!args.debug);
        assert!(!args.print_config);
    }

    #[test]
    fn test_replay_headless_with_seed() {
        let args = Args::try_parse_from([
            "pinch-puzzle",
            "--replay",
            "session.yaml",
            "--gui",
            "none",
            "--seed",
            "42",
            "-C",
            "puzzle.yaml",
        ])
        .unwrap();
        assert_eq!(args.gui, GuiMode::None);
        assert_eq!(args.replay, Some(PathBuf::from("session.yaml")));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.config, Some(PathBuf::from("puzzle.yaml")));
    }

    #[test]
    fn test_invalid_gui_mode() {
        assert!(Args::try_parse_from(["pinch-puzzle", "--gui", "fullscreen"]).is_err());
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
