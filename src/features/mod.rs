//! Feature implementations for lockin.
//!
//! - Work-session timer
//! - Activity log
//! - Background music

pub mod activity;
pub mod music;
pub mod timer;
