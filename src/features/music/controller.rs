//! Music selection and volume.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::player::Player;
use crate::error::LockinError;
use crate::features::timer::PlaybackControl;
use crate::storage::KeyValueStore;

/// Key holding the JSON preferences.
pub const KEY_MUSIC_PREFERENCES: &str = "musicPreferences";

/// Kind of background music.
#[derive(
    ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MusicType {
    /// Live radio stream.
    #[default]
    Radio,
    /// Lo-fi beats.
    Lofi,
    /// Drum tracks.
    Drums,
    /// Acoustic guitar.
    Acoustic,
    /// Instrumental mix.
    Instrumental,
}

impl MusicType {
    /// All music types, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Radio,
        Self::Lofi,
        Self::Drums,
        Self::Acoustic,
        Self::Instrumental,
    ];

    /// Video played for this type.
    #[must_use]
    pub const fn video_id(self) -> &'static str {
        match self {
            Self::Radio => "eeIlobuJ9WA",
            Self::Lofi => "jfKfPfyJRdk",
            Self::Drums | Self::Acoustic => "amfWIRasxtI",
            Self::Instrumental => "0w80F8FffQ4",
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Radio => "radio",
            Self::Lofi => "lofi",
            Self::Drums => "drums",
            Self::Acoustic => "acoustic",
            Self::Instrumental => "instrumental",
        }
    }
}

impl std::fmt::Display for MusicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MusicType {
    type Err = LockinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LockinError::InvalidInput(format!("unknown music type: {s}")))
    }
}

/// Persisted music state.
///
/// `muted` is true exactly when `volume` is 0. `last_volume` is the level
/// restored by unmuting and is never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MusicPreferences {
    /// Selected music.
    pub music_type: MusicType,
    /// Current volume, 0-100.
    pub volume: u8,
    /// Whether the player is silenced.
    pub muted: bool,
    /// Volume restored on unmute.
    pub last_volume: u8,
}

impl Default for MusicPreferences {
    fn default() -> Self {
        Self {
            music_type: MusicType::default(),
            volume: 0,
            muted: true,
            last_volume: 50,
        }
    }
}

/// Drives a [`Player`] and remembers the user's choices.
pub struct MusicController<S, P> {
    store: S,
    player: P,
    prefs: MusicPreferences,
    play_on_start: bool,
}

impl<S: KeyValueStore, P: Player> MusicController<S, P> {
    /// Load preferences from `store`, or start from `default_type` muted.
    pub fn load(store: S, player: P, default_type: MusicType) -> Self {
        let prefs = match store.get(KEY_MUSIC_PREFERENCES) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "corrupt music preferences, using defaults");
                MusicPreferences {
                    music_type: default_type,
                    ..MusicPreferences::default()
                }
            }),
            Ok(None) => MusicPreferences {
                music_type: default_type,
                ..MusicPreferences::default()
            },
            Err(e) => {
                warn!(error = %e, "failed to read music preferences, using defaults");
                MusicPreferences {
                    music_type: default_type,
                    ..MusicPreferences::default()
                }
            },
        };

        Self {
            store,
            player,
            prefs: normalized(prefs),
            play_on_start: true,
        }
    }

    /// Whether a session start should begin playback.
    #[must_use]
    pub fn with_play_on_start(mut self, enabled: bool) -> Self {
        self.play_on_start = enabled;
        self
    }

    /// Current preferences.
    #[must_use]
    pub const fn preferences(&self) -> &MusicPreferences {
        &self.prefs
    }

    /// Switch to `music_type` and play it.
    ///
    /// Loading a video unmutes the player; a muted controller comes back at
    /// its last volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences cannot be saved.
    pub fn select(&mut self, music_type: MusicType) -> Result<(), LockinError> {
        debug!(%music_type, "music selected");
        self.prefs.music_type = music_type;
        self.load_and_play();
        if self.prefs.muted {
            self.prefs.volume = self.prefs.last_volume;
            self.prefs.muted = false;
        }
        self.player.set_volume(self.prefs.volume);
        self.save()
    }

    /// Set the volume, clamped to 100. Zero mutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences cannot be saved.
    pub fn set_volume(&mut self, volume: u8) -> Result<(), LockinError> {
        let volume = volume.min(100);
        self.player.set_volume(volume);
        self.prefs.volume = volume;
        self.prefs.muted = volume == 0;
        if volume > 0 {
            self.prefs.last_volume = volume;
        }
        self.save()
    }

    /// Mute, or restore the last volume when muted.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences cannot be saved.
    pub fn toggle_mute(&mut self) -> Result<(), LockinError> {
        if self.prefs.muted {
            self.player.unmute();
            self.player.set_volume(self.prefs.last_volume);
            self.prefs.volume = self.prefs.last_volume;
            self.prefs.muted = false;
        } else {
            self.player.mute();
            self.prefs.volume = 0;
            self.prefs.muted = true;
        }
        self.save()
    }

    /// Unmute at full volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences cannot be saved.
    pub fn force_unmute(&mut self) -> Result<(), LockinError> {
        self.player.unmute();
        self.player.set_volume(100);
        self.prefs.volume = 100;
        self.prefs.last_volume = 100;
        self.prefs.muted = false;
        self.save()
    }

    fn load_and_play(&mut self) {
        self.player.load_video(self.prefs.music_type.video_id());
        self.player.unmute();
        self.player.play();
    }

    fn save(&self) -> Result<(), LockinError> {
        let raw = serde_json::to_string(&self.prefs)?;
        self.store.set(KEY_MUSIC_PREFERENCES, &raw)
    }
}

impl<S: KeyValueStore, P: Player> PlaybackControl for MusicController<S, P> {
    fn request_playback_start(&mut self) {
        if !self.play_on_start {
            debug!("playback on start disabled");
            return;
        }
        self.load_and_play();
        if let Err(e) = self.force_unmute() {
            warn!(error = %e, "failed to save music preferences");
        }
    }
}

fn normalized(mut prefs: MusicPreferences) -> MusicPreferences {
    prefs.volume = prefs.volume.min(100);
    prefs.muted = prefs.volume == 0;
    if prefs.last_volume == 0 || prefs.last_volume > 100 {
        prefs.last_volume = 50;
    }
    prefs
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use mockall::Sequence;

    use super::*;
    use crate::features::music::player::MockPlayer;
    use crate::features::music::LogPlayer;
    use crate::storage::MemoryStore;

    fn controller(kv: &MemoryStore) -> MusicController<MemoryStore, LogPlayer> {
        MusicController::load(kv.clone(), LogPlayer, MusicType::Radio)
    }

    #[test]
    fn test_video_ids() {
        assert_eq!(MusicType::Radio.video_id(), "eeIlobuJ9WA");
        assert_eq!(MusicType::Lofi.video_id(), "jfKfPfyJRdk");
        assert_eq!(MusicType::Drums.video_id(), MusicType::Acoustic.video_id());
        assert_eq!(MusicType::Instrumental.video_id(), "0w80F8FffQ4");
    }

    #[test]
    fn test_music_type_from_str() {
        assert_eq!("lofi".parse::<MusicType>().unwrap(), MusicType::Lofi);
        assert_eq!(" Radio ".parse::<MusicType>().unwrap(), MusicType::Radio);
        assert!(matches!(
            "polka".parse::<MusicType>(),
            Err(LockinError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_defaults_start_muted() {
        let music = controller(&MemoryStore::new());
        let prefs = music.preferences();

        assert_eq!(prefs.music_type, MusicType::Radio);
        assert!(prefs.muted);
        assert_eq!(prefs.volume, 0);
        assert_eq!(prefs.last_volume, 50);
    }

    #[test]
    fn test_configured_default_type() {
        let music = MusicController::load(MemoryStore::new(), LogPlayer, MusicType::Drums);
        assert_eq!(music.preferences().music_type, MusicType::Drums);
    }

    #[test]
    fn test_set_volume_clamps_and_mutes_at_zero() {
        let mut music = controller(&MemoryStore::new());

        music.set_volume(250).unwrap();
        assert_eq!(music.preferences().volume, 100);
        assert!(!music.preferences().muted);

        music.set_volume(30).unwrap();
        music.set_volume(0).unwrap();
        assert!(music.preferences().muted);
        assert_eq!(music.preferences().last_volume, 30);
    }

    #[test]
    fn test_toggle_mute_restores_last_volume() {
        let mut music = controller(&MemoryStore::new());
        music.set_volume(70).unwrap();

        music.toggle_mute().unwrap();
        assert!(music.preferences().muted);
        assert_eq!(music.preferences().volume, 0);

        music.toggle_mute().unwrap();
        assert!(!music.preferences().muted);
        assert_eq!(music.preferences().volume, 70);
    }

    #[test]
    fn test_force_unmute() {
        let mut music = controller(&MemoryStore::new());
        music.force_unmute().unwrap();

        assert_eq!(music.preferences().volume, 100);
        assert_eq!(music.preferences().last_volume, 100);
        assert!(!music.preferences().muted);
    }

    #[test]
    fn test_select_loads_video_and_unmutes() {
        let mut player = MockPlayer::new();
        let mut seq = Sequence::new();
        player
            .expect_load_video()
            .withf(|id| id == "jfKfPfyJRdk")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        player.expect_unmute().times(1).in_sequence(&mut seq).return_const(());
        player.expect_play().times(1).in_sequence(&mut seq).return_const(());
        player
            .expect_set_volume()
            .with(eq(50))
            .times(1)
            .return_const(());

        let mut music = MusicController::load(MemoryStore::new(), player, MusicType::Radio);
        music.select(MusicType::Lofi).unwrap();

        assert_eq!(music.preferences().music_type, MusicType::Lofi);
        assert_eq!(music.preferences().volume, 50);
        assert!(!music.preferences().muted);
    }

    #[test]
    fn test_playback_start_plays_selection_at_full_volume() {
        let mut player = MockPlayer::new();
        player
            .expect_load_video()
            .withf(|id| id == "eeIlobuJ9WA")
            .times(1)
            .return_const(());
        player.expect_unmute().times(2).return_const(());
        player.expect_play().times(1).return_const(());
        player
            .expect_set_volume()
            .with(eq(100))
            .times(1)
            .return_const(());

        let mut music = MusicController::load(MemoryStore::new(), player, MusicType::Radio);
        music.request_playback_start();

        assert_eq!(music.preferences().volume, 100);
    }

    #[test]
    fn test_playback_start_can_be_disabled() {
        let player = MockPlayer::new();
        let mut music = MusicController::load(MemoryStore::new(), player, MusicType::Radio)
            .with_play_on_start(false);

        // No expectations: any player call would panic
        music.request_playback_start();
        assert!(music.preferences().muted);
    }

    #[test]
    fn test_preferences_survive_reload() {
        let kv = MemoryStore::new();
        let mut music = controller(&kv);
        music.select(MusicType::Instrumental).unwrap();
        music.set_volume(35).unwrap();

        let reloaded = controller(&kv);
        assert_eq!(reloaded.preferences(), music.preferences());

        let raw = kv.get(KEY_MUSIC_PREFERENCES).unwrap().unwrap();
        assert!(raw.contains("\"musicType\":\"instrumental\""));
    }

    #[test]
    fn test_corrupt_preferences_fall_back() {
        let kv = MemoryStore::new();
        kv.set(KEY_MUSIC_PREFERENCES, "{not json").unwrap();

        let music = MusicController::load(kv, LogPlayer, MusicType::Lofi);
        assert_eq!(music.preferences().music_type, MusicType::Lofi);
        assert!(music.preferences().muted);
    }

    #[test]
    fn test_inconsistent_preferences_are_normalized() {
        let kv = MemoryStore::new();
        kv.set(
            KEY_MUSIC_PREFERENCES,
            r#"{"musicType":"drums","volume":0,"muted":false,"lastVolume":0}"#,
        )
        .unwrap();

        let music = controller(&kv);
        assert!(music.preferences().muted);
        assert_eq!(music.preferences().last_volume, 50);
    }
}
