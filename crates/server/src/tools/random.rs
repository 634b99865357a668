//! jokebook_random tool implementation.
//!
//! Picks one joke uniformly at random across every category.

use jokebook_core::{Error, JokeDb};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};

/// Implementation of the jokebook_random tool.
///
/// An empty store is a not-found outcome, not a failure.
pub async fn random_impl(db: &JokeDb) -> Result<CallToolResult, McpError> {
    let joke = db.random_joke().await?.ok_or(Error::NoJokes)?;

    let json = serde_json::to_string_pretty(&joke)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize joke: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_random_impl_empty_store() {
        let db = JokeDb::open_in_memory().await.unwrap();
        let result = random_impl(&db).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_random_impl_with_jokes() {
        let db = JokeDb::open_in_memory().await.unwrap();
        db.add_joke("Puns", "why", "because").await.unwrap();

        let result = random_impl(&db).await;
        assert!(result.is_ok());
    }
}
