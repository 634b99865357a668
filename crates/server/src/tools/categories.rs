//! jokebook_categories tool implementation.
//!
//! Lists every stored category name.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use jokebook_core::{Error, JokeDb};

/// Output from the jokebook_categories tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoriesOutput {
    /// Stored category names, lexicographically sorted.
    pub categories: Vec<String>,
}

/// Implementation of the jokebook_categories tool.
pub async fn categories_impl(db: &JokeDb) -> Result<CallToolResult, McpError> {
    let categories = db.list_categories().await?;

    let output = CategoriesOutput { categories };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize categories: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
