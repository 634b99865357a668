//! jokebook_category tool implementation.
//!
//! Resolves a category through the store-first, import-on-miss protocol.

use jokebook_client::{CategoryResolver, JokeProvider};
use jokebook_core::{Error, Joke};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for jokebook_category tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryParams {
    /// The category to look up.
    pub category: String,

    /// Maximum number of jokes to return (1-100). Out-of-range values
    /// are clamped. Omitting it returns every joke in the category.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Output structure for jokebook_category tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryOutput {
    /// The category that was resolved.
    pub category: String,
    /// The persisted jokes, in creation order.
    pub jokes: Vec<Joke>,
    /// "local" when served without an external call,
    /// "external-imported" when this request triggered an import.
    pub source: String,
}

/// Implementation of the jokebook_category tool.
pub async fn category_impl<P: JokeProvider>(
    resolver: &CategoryResolver<P>, params: CategoryParams,
) -> Result<CallToolResult, McpError> {
    if params.category.is_empty() {
        return Err(Error::InvalidInput("category cannot be empty".into()).into());
    }

    let resolution = resolver.resolve(&params.category, params.limit).await?;

    let output = CategoryOutput {
        category: resolution.category,
        jokes: resolution.jokes,
        source: resolution.source.as_str().to_string(),
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize resolution: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
