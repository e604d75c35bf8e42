//! Configuration management for lockin.
//!
//! This module handles loading and saving configuration from `~/.lockin/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, MusicConfig, TimerConfig};
