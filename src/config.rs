//! Persisted settings stored as TOML in the `.revsense` directory.
//!
//! Config keys: `last_csv_dir` and the `[artifacts]` table
//! (`model_path`, `vectorizer_path`, `positive_icon`, `negative_icon`).
//! Relative artifact paths are resolved against the working directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;
pub use crate::app_dirs::CONFIG_FILE_NAME;

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
}

/// Application settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Folder the CSV picker opens in.
    #[serde(default)]
    pub last_csv_dir: Option<PathBuf>,
    #[serde(default)]
    pub artifacts: ArtifactPaths,
}

/// Locations of the files that must be present at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,
    #[serde(default = "default_positive_icon")]
    pub positive_icon: PathBuf,
    #[serde(default = "default_negative_icon")]
    pub negative_icon: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            vectorizer_path: default_vectorizer_path(),
            positive_icon: default_positive_icon(),
            negative_icon: default_negative_icon(),
        }
    }
}

impl ArtifactPaths {
    /// Resolve every relative path against `base`.
    pub fn resolved_against(&self, base: &Path) -> Self {
        let resolve = |path: &PathBuf| {
            if path.is_absolute() {
                path.clone()
            } else {
                base.join(path)
            }
        };
        Self {
            model_path: resolve(&self.model_path),
            vectorizer_path: resolve(&self.vectorizer_path),
            positive_icon: resolve(&self.positive_icon),
            negative_icon: resolve(&self.negative_icon),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("sentiment_model.json")
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("vectorizer.json")
}

fn default_positive_icon() -> PathBuf {
    PathBuf::from("positive.jpeg")
}

fn default_negative_icon() -> PathBuf {
    PathBuf::from("negative.jpeg")
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    app_dirs::config_file().map_err(map_app_dir_error)
}

/// Load configuration from disk, returning defaults if missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load configuration from a specific file, returning defaults if it does not exist.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist configuration to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, parent, data.as_bytes())
}

/// Write through a temporary sibling file so a crash never leaves a partial config.
fn atomic_write(path: &Path, dir: &Path, data: &[u8]) -> Result<(), ConfigError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
    let tmp_path = dir.join(format!("{file_name}.tmp-{:08x}", rand::random::<u32>()));
    let write_err = |source: std::io::Error| ConfigError::Write {
        path: tmp_path.clone(),
        source,
    };
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(write_err)?;
    if let Err(err) = file.write_all(data).and_then(|_| file.sync_all()) {
        drop(file);
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(err));
    }
    drop(file);
    std::fs::rename(&tmp_path, path).map_err(|source| {
        let _ = std::fs::remove_file(&tmp_path);
        ConfigError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.artifacts.model_path,
            PathBuf::from("sentiment_model.json")
        );
        assert_eq!(config.artifacts.negative_icon, PathBuf::from("negative.jpeg"));
    }

    #[test]
    fn partial_artifacts_table_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[artifacts]\nmodel_path = \"models/custom.json\"\n").unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(
            config.artifacts.model_path,
            PathBuf::from("models/custom.json")
        );
        assert_eq!(
            config.artifacts.vectorizer_path,
            PathBuf::from("vectorizer.json")
        );
        assert!(config.last_csv_dir.is_none());
    }

    #[test]
    fn save_then_load_preserves_last_csv_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = AppConfig {
            last_csv_dir: Some(PathBuf::from("/data/reviews")),
            ..AppConfig::default()
        };
        save_to_path(&config, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), config);
        let leftovers = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp-"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "artifacts = [").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let paths = ArtifactPaths {
            model_path: PathBuf::from("/abs/model.json"),
            ..ArtifactPaths::default()
        };
        let resolved = paths.resolved_against(Path::new("/work"));
        assert_eq!(resolved.model_path, PathBuf::from("/abs/model.json"));
        assert_eq!(
            resolved.vectorizer_path,
            PathBuf::from("/work/vectorizer.json")
        );
    }
}
