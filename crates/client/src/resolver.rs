//! Category resolution and cache fill.
//!
//! The resolver decides whether a category request is served from the
//! store, fetched from the external provider, filtered, persisted, and
//! re-served. All cross-call state lives in the store; each call runs to
//! completion or failure with no internal retries.
//!
//! Concurrency contract: the store's case-insensitive uniqueness
//! constraint on category names is the only serialization point. Two
//! first-time requests for the same category may both fetch and both
//! insert; that leaves one category row and possibly duplicate jokes,
//! an accepted and bounded anomaly.

use crate::provider::{JokeProvider, JokeRequest, ProviderError, ProviderPayload};
use jokebook_core::{Error, Joke, JokeDb};
use serde::Serialize;

/// Largest listing limit a caller may request; larger values are clamped.
pub const MAX_LIMIT: u32 = 100;

/// How many jokes a cache miss requests and persists by default.
pub const DEFAULT_IMPORT_AMOUNT: u8 = 3;

/// Where the jokes in a resolution came from.
///
/// Provenance describes this request only: `ExternalImported` means this
/// very call fetched from the provider, not that the category was ever
/// imported in the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    Local,
    ExternalImported,
}

impl Provenance {
    /// Wire name of the provenance tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Local => "local",
            Provenance::ExternalImported => "external-imported",
        }
    }
}

/// Result of one category resolution.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub category: String,
    pub jokes: Vec<Joke>,
    pub source: Provenance,
}

/// Orchestrates a single category lookup against store and provider.
///
/// Stateless between calls: two resolvers over the same store behave
/// identically.
#[derive(Debug, Clone)]
pub struct CategoryResolver<P> {
    store: JokeDb,
    provider: P,
    import_amount: u8,
}

impl<P: JokeProvider> CategoryResolver<P> {
    /// Create a resolver over a store and a provider.
    pub fn new(store: JokeDb, provider: P) -> Self {
        Self { store, provider, import_amount: DEFAULT_IMPORT_AMOUNT }
    }

    /// Override how many jokes a cache miss imports.
    pub fn with_import_amount(mut self, amount: u8) -> Self {
        self.import_amount = amount;
        self
    }

    /// Resolve a category to its persisted jokes.
    ///
    /// Serves straight from the store whenever any local joke exists for
    /// the category. On a miss, fetches up to `import_amount` two-part
    /// jokes from the provider, filters them, persists the selection
    /// unless the category row already exists, and re-reads the store so
    /// the response is the canonical persisted view.
    ///
    /// A `limit` outside [1, [`MAX_LIMIT`]] is clamped, not rejected.
    pub async fn resolve(&self, category: &str, limit: Option<u32>) -> Result<Resolution, Error> {
        if category.is_empty() {
            return Err(Error::InvalidInput("category cannot be empty".into()));
        }

        let limit = limit.map(|n| n.clamp(1, MAX_LIMIT));

        let jokes = self.store.list_jokes(category, limit).await?;
        if !jokes.is_empty() {
            tracing::debug!("serving '{}' from the store", category);
            return Ok(Resolution { category: category.to_string(), jokes, source: Provenance::Local });
        }

        let request = JokeRequest::two_part(category, self.import_amount);
        let payload = match self.provider.fetch_jokes(&request).await {
            Ok(payload) => payload,
            Err(ProviderError::CategoryUnknown { status }) => {
                tracing::debug!("provider rejected category '{}': HTTP {}", category, status);
                return Err(Error::NotFound(category.to_string()));
            }
            Err(e @ (ProviderError::Timeout | ProviderError::Network(_) | ProviderError::InvalidBaseUrl(_))) => {
                return Err(Error::ProviderUnavailable(e.to_string()));
            }
            Err(ProviderError::Parse(msg)) => {
                // Payload shape is outside our control; an unparseable
                // body counts as an empty selection, not a failure.
                tracing::warn!("unparseable provider payload for '{}': {}", category, msg);
                ProviderPayload::default()
            }
            Err(e) => return Err(Error::InvalidInput(e.to_string())),
        };

        let clean = payload.two_part(self.import_amount as usize);
        if clean.is_empty() {
            return Err(Error::Unfiltered(category.to_string()));
        }

        // The existence check is the import-idempotency guard: a category
        // that already exists with zero jokes is left alone.
        if !self.store.category_exists(category).await? {
            self.store.add_jokes(category, &clean).await?;
            tracing::info!("imported {} jokes into new category '{}'", clean.len(), category);
        }

        let jokes = self.store.list_jokes(category, limit).await?;
        Ok(Resolution { category: category.to_string(), jokes, source: Provenance::ExternalImported })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Parses a JSON fixture on every call, counting invocations.
    struct StaticProvider {
        payload: &'static str,
        calls: AtomicUsize,
    }

    impl StaticProvider {
        fn new(payload: &'static str) -> Self {
            Self { payload, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JokeProvider for StaticProvider {
        async fn fetch_jokes(&self, _req: &JokeRequest) -> Result<ProviderPayload, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_str(self.payload).unwrap())
        }
    }

    /// Fails the test if the resolver reaches for the network.
    struct PanickingProvider;

    #[async_trait]
    impl JokeProvider for PanickingProvider {
        async fn fetch_jokes(&self, req: &JokeRequest) -> Result<ProviderPayload, ProviderError> {
            panic!("provider must not be called for category '{}'", req.category);
        }
    }

    struct ErrProvider(fn() -> ProviderError);

    #[async_trait]
    impl JokeProvider for ErrProvider {
        async fn fetch_jokes(&self, _req: &JokeRequest) -> Result<ProviderPayload, ProviderError> {
            Err((self.0)())
        }
    }

    const TWO_PART_AND_SINGLE: &str = r#"{
        "jokes": [
            {"type": "twopart", "setup": "A", "delivery": "B"},
            {"type": "single", "joke": "C"}
        ]
    }"#;

    #[tokio::test]
    async fn test_local_hit_never_calls_provider() {
        let db = JokeDb::open_in_memory().await.unwrap();
        db.add_joke("Puns", "why", "because").await.unwrap();

        let resolver = CategoryResolver::new(db, PanickingProvider);
        let resolution = resolver.resolve("puns", None).await.unwrap();

        assert_eq!(resolution.source, Provenance::Local);
        assert_eq!(resolution.jokes.len(), 1);
    }

    #[tokio::test]
    async fn test_miss_imports_filtered_selection() {
        let db = JokeDb::open_in_memory().await.unwrap();
        let resolver = CategoryResolver::new(db.clone(), StaticProvider::new(TWO_PART_AND_SINGLE));

        let resolution = resolver.resolve("test", None).await.unwrap();

        assert_eq!(resolution.source, Provenance::ExternalImported);
        assert_eq!(resolution.jokes.len(), 1);
        assert_eq!(resolution.jokes[0].setup, "A");
        assert_eq!(resolution.jokes[0].delivery, "B");

        // The response is the persisted view, not the provider payload.
        let stored = db.list_jokes("test", None).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(db.category_exists("test").await.unwrap());
    }

    #[tokio::test]
    async fn test_second_resolve_is_local() {
        let db = JokeDb::open_in_memory().await.unwrap();
        let provider = StaticProvider::new(TWO_PART_AND_SINGLE);
        let resolver = CategoryResolver::new(db, provider);

        let first = resolver.resolve("newcat", None).await.unwrap();
        let second = resolver.resolve("newcat", None).await.unwrap();

        assert_eq!(first.source, Provenance::ExternalImported);
        assert_eq!(second.source, Provenance::Local);
        assert_eq!(resolver.provider.calls(), 1);

        let firsts: Vec<_> = first.jokes.iter().map(|j| (&j.setup, &j.delivery)).collect();
        let seconds: Vec<_> = second.jokes.iter().map(|j| (&j.setup, &j.delivery)).collect();
        assert_eq!(firsts, seconds);
    }

    #[tokio::test]
    async fn test_error_payload_is_unfiltered() {
        let db = JokeDb::open_in_memory().await.unwrap();
        let resolver = CategoryResolver::new(db, StaticProvider::new(r#"{"error": true}"#));

        let result = resolver.resolve("bogus", None).await;
        assert!(matches!(result, Err(Error::Unfiltered(cat)) if cat == "bogus"));
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let db = JokeDb::open_in_memory().await.unwrap();
        let resolver = CategoryResolver::new(db.clone(), ErrProvider(|| ProviderError::CategoryUnknown { status: 404 }));

        let result = resolver.resolve("nonexistent", None).await;
        assert!(matches!(result, Err(Error::NotFound(cat)) if cat == "nonexistent"));

        // A failed resolution writes nothing.
        assert!(!db.category_exists("nonexistent").await.unwrap());
    }

    #[tokio::test]
    async fn test_timeout_is_provider_unavailable() {
        let db = JokeDb::open_in_memory().await.unwrap();
        let resolver = CategoryResolver::new(db, ErrProvider(|| ProviderError::Timeout));

        let result = resolver.resolve("slowcat", None).await;
        assert!(matches!(result, Err(Error::ProviderUnavailable(_))));
    }

    #[tokio::test]
    async fn test_parse_anomaly_is_unfiltered() {
        let db = JokeDb::open_in_memory().await.unwrap();
        let resolver = CategoryResolver::new(db, ErrProvider(|| ProviderError::Parse("not json".into())));

        let result = resolver.resolve("garbled", None).await;
        assert!(matches!(result, Err(Error::Unfiltered(_))));
    }

    #[tokio::test]
    async fn test_existing_empty_category_skips_import() {
        let db = JokeDb::open_in_memory().await.unwrap();
        db.upsert_category("Ghost").await.unwrap();

        let provider = StaticProvider::new(TWO_PART_AND_SINGLE);
        let resolver = CategoryResolver::new(db.clone(), provider);

        let resolution = resolver.resolve("ghost", None).await.unwrap();

        // The provider was consulted, but the existing row suppresses the
        // import, so the canonical view stays empty.
        assert_eq!(resolver.provider.calls(), 1);
        assert_eq!(resolution.source, Provenance::ExternalImported);
        assert!(resolution.jokes.is_empty());
        assert!(db.list_jokes("Ghost", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_limit_is_clamped() {
        let db = JokeDb::open_in_memory().await.unwrap();
        for i in 0..5 {
            db.add_joke("Puns", &format!("s{i}"), &format!("d{i}")).await.unwrap();
        }

        let resolver = CategoryResolver::new(db, PanickingProvider);

        let oversized = resolver.resolve("Puns", Some(5000)).await.unwrap();
        assert_eq!(oversized.jokes.len(), 5);

        let undersized = resolver.resolve("Puns", Some(0)).await.unwrap();
        assert_eq!(undersized.jokes.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_category_name_rejected() {
        let db = JokeDb::open_in_memory().await.unwrap();
        let resolver = CategoryResolver::new(db, PanickingProvider);

        let result = resolver.resolve("", None).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_import_respects_amount_override() {
        let db = JokeDb::open_in_memory().await.unwrap();
        let payload = r#"{
            "jokes": [
                {"type": "twopart", "setup": "1", "delivery": "a"},
                {"type": "twopart", "setup": "2", "delivery": "b"},
                {"type": "twopart", "setup": "3", "delivery": "c"}
            ]
        }"#;

        let resolver = CategoryResolver::new(db.clone(), StaticProvider::new(payload)).with_import_amount(2);
        let resolution = resolver.resolve("capped", None).await.unwrap();

        assert_eq!(resolution.jokes.len(), 2);
        assert_eq!(db.list_jokes("capped", None).await.unwrap().len(), 2);
    }
}
