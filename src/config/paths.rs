//! Path resolution for the configuration file.
//!
//! Configuration lives in `~/.pomodoro/config.yaml`.

use std::path::{Path, PathBuf};

use crate::error::PomodoroError;

/// Paths to pomodoro configuration files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Config file: `~/.pomodoro/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PomodoroError> {
        let home = std::env::var("HOME").map_err(|_| {
            PomodoroError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(&PathBuf::from(home).join(".pomodoro")))
    }

    /// Create paths under a custom root directory.
    #[must_use]
    pub fn with_root(root: &Path) -> Self {
        Self {
            config_file: root.join("config.yaml"),
        }
    }
}
