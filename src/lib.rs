//! lockin - a work-session timer for the terminal
//!
//! Tracks today's cumulative work time, reminds you to take breaks, logs
//! completed sessions and drives background music. Timer state is persisted
//! to a local `SQLite` key/value store and recovered on every run.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::LockinError;
pub use features::timer::SessionTimer;
