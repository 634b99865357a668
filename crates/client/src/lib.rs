//! Client code for mcp-jokebook.
//!
//! This crate provides the external joke-provider HTTP client and the
//! category resolver shared by the server.

pub mod provider;
pub mod resolver;

pub use provider::{
    BlacklistFlag, JokeApiClient, JokeApiConfig, JokeKind, JokeProvider, JokeRequest, ProviderError, ProviderJoke,
    ProviderPayload,
};

pub use resolver::{CategoryResolver, MAX_LIMIT, Provenance, Resolution};
