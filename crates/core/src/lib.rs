//! Core types and shared functionality for mcp-jokebook.
//!
//! This crate provides:
//! - Joke store implementation with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod store;

pub use config::AppConfig;
pub use error::Error;
pub use store::{Joke, JokeDb, NewJoke, RandomJoke};
