//! Storage layer for lockin.
//!
//! Everything lockin persists is a flat string value under a well-known key.
//! [`KeyValueStore`] is that seam;
//! [`Database`] backs it with `SQLite` and [`MemoryStore`] with a map.

mod database;
mod kv;
mod migrations;

pub use database::Database;
pub use kv::{KeyValueStore, MemoryStore};
