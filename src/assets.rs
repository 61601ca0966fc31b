//! Puzzle image selection.

use crate::{config::AssetConfig, constants::IMAGE_EXTENSIONS, controller::Difficulty, Error, Result};
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Image folders per difficulty tier
#[derive(Debug, Clone)]
pub struct AssetLibrary {
    config: AssetConfig,
}

impl AssetLibrary {
    #[must_use]
    pub const fn new(config: AssetConfig) -> Self {
        Self { config }
    }

    /// Folder holding images for a tier
    #[must_use]
    pub fn folder(&self, difficulty: Difficulty) -> &Path {
        match difficulty {
            Difficulty::Easy => &self.config.easy_images,
            Difficulty::Normal => &self.config.normal_images,
            Difficulty::Hard => &self.config.hard_images,
        }
    }

    /// Supported images in a tier's folder, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the folder does not exist or cannot be read
    pub fn images(&self, difficulty: Difficulty) -> Result<Vec<PathBuf>> {
        let folder = self.folder(difficulty);
        if !folder.is_dir() {
            return Err(Error::Asset(format!(
                "Image folder for {difficulty} not found: {}",
                folder.display()
            )));
        }

        let mut images: Vec<PathBuf> = std::fs::read_dir(folder)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_supported_image(path))
            .collect();
        images.sort();
        Ok(images)
    }

    /// Pick a random image for a tier
    ///
    /// # Errors
    ///
    /// Returns an error if the folder is missing or holds no supported image
    pub fn pick<R: Rng + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> Result<PathBuf> {
        let images = self.images(difficulty)?;
        let chosen = images.choose(rng).cloned().ok_or_else(|| {
            Error::Asset(format!(
                "No .png/.jpg/.jpeg images in {}",
                self.folder(difficulty).display()
            ))
        })?;
        info!("Using puzzle image {}", chosen.display());
        Ok(chosen)
    }

    /// Background image, if it exists
    #[must_use]
    pub fn background(&self) -> Option<&Path> {
        let path = self.config.background.as_path();
        if path.is_file() {
            Some(path)
        } else {
            warn!("Background image not found: {}", path.display());
            None
        }
    }
}

/// Extension check, case-insensitive
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
