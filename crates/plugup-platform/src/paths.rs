use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "plugup";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("no config directory on this platform")]
    ConfigDirUnavailable,
    #[error("no state or data directory on this platform")]
    LogDirUnavailable,
}

/// Where plugup reads its settings and appends its debug log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub settings_file: PathBuf,
    pub log_file: PathBuf,
}

impl AppPaths {
    /// Resolves plugup's files for the current user.
    ///
    /// The log goes to the XDG state directory where the platform has one
    /// and to the local data directory otherwise.
    ///
    /// # Errors
    /// Returns an error when the platform reports no config directory or no
    /// directory to keep the log in.
    pub fn new() -> Result<Self, AppPathsError> {
        let config_base = dirs::config_dir().ok_or(AppPathsError::ConfigDirUnavailable)?;
        let log_base = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .ok_or(AppPathsError::LogDirUnavailable)?;
        Ok(Self::under(&config_base, &log_base))
    }

    #[must_use]
    pub fn under(config_base: &Path, log_base: &Path) -> Self {
        Self {
            settings_file: config_base.join(APP_DIR).join("settings.json"),
            log_file: log_base.join(APP_DIR).join("debug.log"),
        }
    }
}
