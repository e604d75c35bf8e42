//! Background music for work sessions.
//!
//! Music starts with each work session. The actual player is external; this
//! module tracks the selection and volume and issues player commands.

pub mod controller;
pub mod player;

pub use controller::{MusicController, MusicPreferences, MusicType, KEY_MUSIC_PREFERENCES};
pub use player::{LogPlayer, Player};
