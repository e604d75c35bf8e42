use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::activity::DEFAULT_RECENT_LIMIT;
use crate::features::music::MusicType;

#[derive(Parser)]
#[command(name = "lockin")]
#[command(about = "A work-session timer for the terminal")]
#[command(long_about = "lockin - A work-session timer for the terminal

Tracks today's work time across sessions, reminds you to take a break after
25 minutes, keeps a log of completed sessions and plays background music
while you work. State survives between invocations and resets at midnight.

QUICK START:
  lockin start              Start a work session
  lockin pause              Pause (the segment is added to today's total)
  lockin stop               Stop and log the session
  lockin status             Show today's time
  lockin watch              Live view with keyboard controls

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  lockin <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output suitable for scripting. Defaults to the
    /// `general.default_output` config setting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a work session
    ///
    /// Does nothing if a session is already running. Starts background
    /// music unless `music.play_on_start` is disabled.
    Start,

    /// Pause the running session
    ///
    /// The elapsed segment is added to today's total. Pausing does not
    /// add an entry to the activity log.
    Pause,

    /// Stop the session and log it
    ///
    /// The session is added to today's total and, if it lasted at least a
    /// second, to the activity log.
    Stop,

    /// Zero today's total
    ///
    /// A running session is stopped and logged first.
    Reset,

    /// Pause when running, start otherwise
    Toggle,

    /// Show today's work time
    #[command(visible_alias = "st")]
    Status,

    /// Show or clear the activity log
    ///
    /// # Examples
    ///
    ///   lockin log                Last 10 sessions
    ///   lockin log --limit 50     Last 50 sessions
    ///   lockin log clear --force  Delete the history
    Log(LogArgs),

    /// Control background music
    Music(MusicArgs),

    /// Live timer view
    ///
    /// Keys: space toggles, s stops, r resets, q quits.
    Watch,

    /// Generate shell completions
    ///
    /// Example: lockin completions zsh > ~/.zsh/completions/_lockin
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct LogArgs {
    #[command(subcommand)]
    pub command: Option<LogCommands>,

    /// Number of sessions to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub limit: usize,
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// Delete every logged session
    Clear {
        /// Required; clearing cannot be undone
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Args)]
pub struct MusicArgs {
    #[command(subcommand)]
    pub command: MusicCommands,
}

#[derive(Subcommand)]
pub enum MusicCommands {
    /// Choose the music and play it
    Select {
        /// Kind of music
        #[arg(value_enum)]
        music_type: MusicType,
    },

    /// Set the volume (0 mutes)
    Volume {
        /// Volume from 0 to 100
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        level: u8,
    },

    /// Mute, or restore the last volume when muted
    Mute,

    /// Unmute at full volume
    Unmute,

    /// Show the current music settings
    Status,
}
