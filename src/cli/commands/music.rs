//! Music commands.

use crate::cli::args::{MusicCommands, OutputFormat};
use crate::core::Clock;
use crate::error::LockinError;
use crate::output::format_music;

use super::Workspace;

/// Execute music subcommands.
///
/// # Errors
///
/// Returns an error if the preferences cannot be saved or output formatting
/// fails.
pub fn music<C: Clock + Clone + 'static>(
    ws: &Workspace<C>,
    cmd: MusicCommands,
    format: OutputFormat,
) -> Result<String, LockinError> {
    let mut music = ws.music_mut();

    match cmd {
        MusicCommands::Select { music_type } => music.select(music_type)?,
        MusicCommands::Volume { level } => music.set_volume(level)?,
        MusicCommands::Mute => music.toggle_mute()?,
        MusicCommands::Unmute => music.force_unmute()?,
        MusicCommands::Status => {},
    }

    format_music(music.preferences(), format)
}
