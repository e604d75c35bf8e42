//! Core abstractions for lockin.
//!
//! This module provides the clock seam and the date/time helpers shared by the
//! timer, the activity log and the CLI.

mod clock;
mod datetime;

pub use clock::{Clock, ManualClock, SystemClock};
pub use datetime::{
    elapsed_whole_seconds, format_work_date, from_epoch_millis, parse_work_date, to_epoch_millis,
};
