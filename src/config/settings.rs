//! Configuration settings for lockin.
//!
//! Settings are loaded from `~/.lockin/config.yaml`. Every field has a
//! default, so a partial (or missing) file is always valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::LockinError;
use crate::features::music::MusicType;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Work-session timer settings.
    pub timer: TimerConfig,
    /// Background music settings.
    pub music: MusicConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the global `colored` override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Work-session timer settings.
///
/// All values are in seconds of running time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Period of the persistence checkpoint while running.
    #[serde(default = "default_persist_interval")]
    pub persist_interval_secs: u64,
    /// How long the motivational message stays up after a start.
    #[serde(default = "default_motivation_notice")]
    pub motivation_notice_secs: u64,
    /// Session time at which the break reminder fires.
    #[serde(default = "default_break_reminder")]
    pub break_reminder_secs: u64,
    /// How long the break reminder stays up.
    #[serde(default = "default_reminder_dismiss")]
    pub reminder_dismiss_secs: u64,
}

/// Background music settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    /// Music type selected when no preference has been stored yet.
    #[serde(default)]
    pub default_type: MusicType,
    /// Start playback when a work session starts.
    #[serde(default = "default_true")]
    pub play_on_start: bool,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_persist_interval() -> u64 {
    30
}

const fn default_motivation_notice() -> u64 {
    180
}

const fn default_break_reminder() -> u64 {
    1500
}

const fn default_reminder_dismiss() -> u64 {
    10
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            persist_interval_secs: default_persist_interval(),
            motivation_notice_secs: default_motivation_notice(),
            break_reminder_secs: default_break_reminder(),
            reminder_dismiss_secs: default_reminder_dismiss(),
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            default_type: MusicType::default(),
            play_on_start: default_true(),
        }
    }
}

impl TimerConfig {
    /// Persistence checkpoint period. Zero is clamped to one second.
    #[must_use]
    pub fn persist_interval(&self) -> Duration {
        Duration::from_secs(self.persist_interval_secs.max(1))
    }

    /// Motivation notice lifetime.
    #[must_use]
    pub const fn motivation_notice(&self) -> Duration {
        Duration::from_secs(self.motivation_notice_secs)
    }

    /// Reject settings the timer cannot honor.
    ///
    /// The break reminder fires when the session counter reaches
    /// `break_reminder_secs` after a tick, so zero would never fire.
    fn validate(&self) -> Result<(), LockinError> {
        if self.break_reminder_secs == 0 {
            return Err(LockinError::Config(
                "timer.break_reminder_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Break reminder lifetime.
    #[must_use]
    pub const fn reminder_dismiss(&self) -> Duration {
        Duration::from_secs(self.reminder_dismiss_secs)
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, LockinError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            LockinError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            LockinError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        config.timer.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.timer.persist_interval_secs, 30);
        assert_eq!(config.timer.motivation_notice_secs, 180);
        assert_eq!(config.timer.break_reminder_secs, 1500);
        assert_eq!(config.timer.reminder_dismiss_secs, 10);
        assert_eq!(config.music.default_type, MusicType::Radio);
        assert!(config.music.play_on_start);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.timer, TimerConfig::default());
    }

    #[test]
    fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.timer.break_reminder_secs = 3000;
        config.music.default_type = MusicType::Lofi;

        std::fs::write(&config_path, serde_yaml::to_string(&config).unwrap()).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.timer.break_reminder_secs, 3000);
        assert_eq!(loaded.music.default_type, MusicType::Lofi);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
timer:
  persist_interval_secs: 10
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.persist_interval_secs, 10);
        assert_eq!(config.timer.break_reminder_secs, 1500);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(LockinError::Config(_))
        ));
    }

    #[test]
    fn test_zero_break_reminder_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer:\n  break_reminder_secs: 0\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, LockinError::Config(ref msg) if msg.contains("break_reminder_secs")));
    }

    #[test]
    fn test_zero_persist_interval_clamped() {
        let config = TimerConfig {
            persist_interval_secs: 0,
            ..TimerConfig::default()
        };
        assert_eq!(config.persist_interval(), Duration::from_secs(1));
    }
}
