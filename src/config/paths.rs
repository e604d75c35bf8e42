//! Path resolution for lockin configuration and data files.
//!
//! All lockin data is stored in `~/.lockin/` (or `$LOCKIN_HOME`):
//! - `config.yaml` - Main configuration file
//! - `lockin.db` - SQLite key/value store holding timer state, the activity
//!   log and music preferences

use std::path::PathBuf;

use crate::error::LockinError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "LOCKIN_HOME";

/// Paths to lockin configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.lockin/`
    pub root: PathBuf,
    /// Config file: `~/.lockin/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.lockin/lockin.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `$LOCKIN_HOME`, falling back to `~/.lockin`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, LockinError> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            if !root.is_empty() {
                return Ok(Self::with_root(PathBuf::from(root)));
            }
        }

        let home = std::env::var("HOME").map_err(|_| {
            LockinError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".lockin")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("lockin.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), LockinError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                LockinError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-lockin");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("lockin.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("lockin"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
