//! SQLite-backed joke store.
//!
//! This module provides persistent categories and jokes using SQLite
//! with async access via tokio-rusqlite. It supports:
//!
//! - Case-insensitive unique category names (NOCASE collation)
//! - Conflict-tolerant category upserts safe under concurrent writers
//! - Insertion-order joke listings with optional limits
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod categories;
pub mod connection;
pub mod jokes;
pub mod migrations;

pub use crate::Error;

pub use connection::JokeDb;
pub use jokes::{Joke, NewJoke, RandomJoke};
