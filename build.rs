//! Build script for detecting system dependencies and providing installation guidance.
//!
//! Checks for the system libraries the OpenCV bindings link against and
//! prints installation hints when they are missing. ONNX Runtime is fetched
//! by the `ort` crate itself.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    check_pkg_config();
    check_opencv();
    check_gui_backend();

    println!("cargo:rustc-env=BUILD_TARGET={}", env::var("TARGET").unwrap_or_default());
}

fn check_opencv() {
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    let version = ["opencv4", "opencv"].iter().find_map(|module| {
        let output = Command::new("pkg-config").args(["--modversion", module]).output().ok()?;
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    });

    match version {
        Some(version) => println!("cargo:warning=Found OpenCV version: {version}"),
        None => {
            println!("cargo:warning=OpenCV not found via pkg-config. Make sure OpenCV is installed.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev clang libclang-dev");
            println!("cargo:warning=On macOS: brew install opencv");
        }
    }
}

fn check_gui_backend() {
    // highgui needs GTK or Qt on Linux; headless runs work without either
    if env::var("TARGET").unwrap_or_default().contains("linux") {
        let found = ["gtk+-3.0", "Qt5Widgets"].iter().any(|lib| {
            Command::new("pkg-config")
                .args(["--exists", lib])
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        });
        if !found {
            println!("cargo:warning=No GTK3 or Qt5 found. The game window needs OpenCV built with a GUI backend.");
            println!("cargo:warning=Use `--gui none` for headless replays.");
        }
    }
}

fn check_pkg_config() {
    let output = Command::new("pkg-config").arg("--version").output();

    match output {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("cargo:warning=Found pkg-config version: {}", version.trim());
        }
        _ => {
            println!("cargo:warning=pkg-config not found. This is required to find system libraries.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
            println!("cargo:warning=On macOS: brew install pkg-config");
        }
    }
}
