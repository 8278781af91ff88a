//! Where revsense keeps its files.
//!
//! Everything lives under one `.revsense` folder:
//!
//! ```text
//! <base>/.revsense/config.toml
//! <base>/.revsense/logs/revsense_<timestamp>.log
//! ```
//!
//! `<base>` is the OS config directory unless `REVSENSE_CONFIG_HOME` names
//! another one.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// Folder created under the base config directory.
pub const APP_DIR_NAME: &str = ".revsense";
/// Environment variable that relocates the base config directory.
pub const CONFIG_HOME_ENV: &str = "REVSENSE_CONFIG_HOME";
/// Settings file inside the app folder.
pub const CONFIG_FILE_NAME: &str = "config.toml";
const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolved layout of the `.revsense` folder. Nothing is created until asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// Layout under the current base directory.
    pub fn locate() -> Result<Self, AppDirError> {
        let override_base = std::env::var_os(CONFIG_HOME_ENV).map(PathBuf::from);
        let base = base_dir(override_base).ok_or(AppDirError::NoBaseDir)?;
        Ok(Self::under(&base))
    }

    /// Layout under an explicit base directory.
    pub fn under(base: &Path) -> Self {
        Self {
            root: base.join(APP_DIR_NAME),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn logs(&self) -> PathBuf {
        self.root.join(LOGS_DIR_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Path of the settings file, with its folder created.
    pub fn ensure_config_file(&self) -> Result<PathBuf, AppDirError> {
        create_dir(&self.root)?;
        Ok(self.config_file())
    }

    /// Path of the logs folder, created if missing.
    pub fn ensure_logs(&self) -> Result<PathBuf, AppDirError> {
        let logs = self.logs();
        create_dir(&logs)?;
        Ok(logs)
    }
}

/// Settings file path for this launch, creating `.revsense` if needed.
pub fn config_file() -> Result<PathBuf, AppDirError> {
    AppDirs::locate()?.ensure_config_file()
}

/// Logs folder for this launch, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    AppDirs::locate()?.ensure_logs()
}

/// An empty override counts as unset.
fn base_dir(override_base: Option<PathBuf>) -> Option<PathBuf> {
    override_base
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
}

fn create_dir(path: &Path) -> Result<(), AppDirError> {
    std::fs::create_dir_all(path).map_err(|source| AppDirError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn layout_hangs_off_the_app_folder() {
        let dirs = AppDirs::under(Path::new("/base"));
        assert_eq!(dirs.root(), Path::new("/base/.revsense"));
        assert_eq!(dirs.logs(), PathBuf::from("/base/.revsense/logs"));
        assert_eq!(dirs.config_file(), PathBuf::from("/base/.revsense/config.toml"));
    }

    #[test]
    fn ensure_creates_only_what_is_asked_for() {
        let base = tempdir().unwrap();
        let dirs = AppDirs::under(base.path());
        assert!(!dirs.root().exists());

        let config = dirs.ensure_config_file().unwrap();
        assert!(dirs.root().is_dir());
        assert!(!config.exists());
        assert!(!dirs.logs().exists());

        let logs = dirs.ensure_logs().unwrap();
        assert!(logs.is_dir());
    }

    #[test]
    fn override_wins_unless_empty() {
        let custom = PathBuf::from("/portable");
        assert_eq!(base_dir(Some(custom.clone())), Some(custom));
        assert_ne!(base_dir(Some(PathBuf::new())), Some(PathBuf::new()));
    }

    #[test]
    fn creating_under_a_file_reports_the_path() {
        let base = tempdir().unwrap();
        let blocker = base.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let err = AppDirs::under(&blocker).ensure_logs().unwrap_err();
        match err {
            AppDirError::CreateDir { path, .. } => {
                assert_eq!(path, blocker.join(APP_DIR_NAME).join("logs"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
