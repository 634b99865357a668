//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-jokebook server.

pub mod add;
pub mod categories;
pub mod category;
pub mod random;
