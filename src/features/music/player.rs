//! The external video player.

use tracing::info;

/// Commands understood by the embedded video player.
#[cfg_attr(test, mockall::automock)]
pub trait Player {
    /// Queue a video by id.
    fn load_video(&mut self, video_id: &str);
    /// Start playback.
    fn play(&mut self);
    /// Silence without changing the volume.
    fn mute(&mut self);
    /// Undo `mute`.
    fn unmute(&mut self);
    /// Volume from 0 to 100.
    fn set_volume(&mut self, volume: u8);
}

/// Player that only logs what it is asked to do.
///
/// Used by the CLI, which has no video surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPlayer;

impl Player for LogPlayer {
    fn load_video(&mut self, video_id: &str) {
        info!(video_id, "player: load video");
    }

    fn play(&mut self) {
        info!("player: play");
    }

    fn mute(&mut self) {
        info!("player: mute");
    }

    fn unmute(&mut self) {
        info!("player: unmute");
    }

    fn set_volume(&mut self, volume: u8) {
        info!(volume, "player: set volume");
    }
}
