//! Everything that must load before the window opens.
//!
//! Missing or incompatible files are fatal; callers abort startup on error.

use std::path::{Path, PathBuf};

use image::{RgbaImage, imageops::FilterType};
use thiserror::Error;

use crate::config::ArtifactPaths;
use crate::sentiment::{ArtifactError, SentimentPredictor, load_predictor};

/// Edge length, in pixels, of the emotion icons.
pub const ICON_SIZE: u32 = 64;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Model(#[from] ArtifactError),
    #[error("Failed to load icon {path}: {source}")]
    Icon {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Happy / sad icons, already resized to [`ICON_SIZE`].
#[derive(Debug, Clone)]
pub struct EmotionImages {
    pub happy: RgbaImage,
    pub sad: RgbaImage,
}

pub struct StartupArtifacts {
    pub predictor: SentimentPredictor,
    pub icons: EmotionImages,
}

/// Load the model pair and both icons.
pub fn load(paths: &ArtifactPaths) -> Result<StartupArtifacts, StartupError> {
    let predictor = load_predictor(&paths.vectorizer_path, &paths.model_path)?;
    let icons = EmotionImages {
        happy: load_icon(&paths.positive_icon)?,
        sad: load_icon(&paths.negative_icon)?,
    };
    Ok(StartupArtifacts { predictor, icons })
}

/// Decode an image file and scale it to the icon size.
pub fn load_icon(path: &Path) -> Result<RgbaImage, StartupError> {
    let image = image::open(path).map_err(|source| StartupError::Icon {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image
        .resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3)
        .to_rgba8())
}
