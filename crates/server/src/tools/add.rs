//! jokebook_add tool implementation.
//!
//! Appends one two-part joke, creating its category on first use.

use jokebook_core::{Error, Joke, JokeDb};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for jokebook_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddJokeParams {
    /// Category to add the joke to. Created if it doesn't exist yet.
    pub category: String,

    /// The joke's setup line.
    pub setup: String,

    /// The joke's delivery line.
    pub delivery: String,
}

/// Output structure for jokebook_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddJokeOutput {
    /// The category the joke was added to.
    pub category: String,
    /// All jokes in that category after the addition, in creation order.
    pub jokes: Vec<Joke>,
}

/// Implementation of the jokebook_add tool.
///
/// The payload is validated before any store access.
pub async fn add_impl(db: &JokeDb, params: AddJokeParams) -> Result<CallToolResult, McpError> {
    if params.category.is_empty() || params.setup.is_empty() || params.delivery.is_empty() {
        return Err(Error::InvalidInput("missing category, setup, or delivery".into()).into());
    }

    db.add_joke(&params.category, &params.setup, &params.delivery).await?;
    let jokes = db.list_jokes(&params.category, None).await?;

    let output = AddJokeOutput { category: params.category, jokes };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize jokes: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
