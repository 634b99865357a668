//! Joke provider request types and validation.

use serde::{Serialize, Serializer};

/// Maximum category name length accepted before issuing a request.
const MAX_CATEGORY_LEN: usize = 100;

/// Content flags excluded from every import request.
pub const DEFAULT_BLACKLIST: &[BlacklistFlag] = &[
    BlacklistFlag::Nsfw,
    BlacklistFlag::Religious,
    BlacklistFlag::Political,
    BlacklistFlag::Sexist,
    BlacklistFlag::Explicit,
    BlacklistFlag::Racist,
];

/// Joke structure as the provider classifies it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JokeKind {
    Single,
    Twopart,
}

/// Content flags the provider can filter out server-side.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistFlag {
    Nsfw,
    Religious,
    Political,
    Sexist,
    Explicit,
    Racist,
}

impl BlacklistFlag {
    fn as_str(self) -> &'static str {
        match self {
            BlacklistFlag::Nsfw => "nsfw",
            BlacklistFlag::Religious => "religious",
            BlacklistFlag::Political => "political",
            BlacklistFlag::Sexist => "sexist",
            BlacklistFlag::Explicit => "explicit",
            BlacklistFlag::Racist => "racist",
        }
    }
}

/// Request parameters for a category fetch.
///
/// The category travels in the URL path; everything else is serialized
/// into the query string, matching the provider's GET interface.
#[derive(Debug, Clone, Serialize)]
pub struct JokeRequest {
    /// Category name, percent-encoded into the request path.
    #[serde(skip)]
    pub category: String,

    /// Joke structure to request; imports only use two-part jokes.
    #[serde(rename = "type")]
    pub kind: JokeKind,

    /// Number of jokes to request (1-10).
    pub amount: u8,

    /// Request the provider's safe content tier. Serialized as a
    /// valueless `safe-mode` query flag.
    #[serde(rename = "safe-mode", skip_serializing_if = "std::ops::Not::not", serialize_with = "flag")]
    pub safe_mode: bool,

    /// Content flags to exclude via provider-side filtering,
    /// comma-joined into one `blacklistFlags` parameter.
    #[serde(
        rename = "blacklistFlags",
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "join_flags"
    )]
    pub blacklist_flags: Vec<BlacklistFlag>,
}

fn flag<S: Serializer>(_present: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str("")
}

fn join_flags<S: Serializer>(flags: &[BlacklistFlag], serializer: S) -> Result<S::Ok, S::Error> {
    let joined = flags.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(",");
    serializer.serialize_str(&joined)
}

impl JokeRequest {
    /// Build the standard import request: up to `amount` two-part jokes,
    /// safe tier, full blacklist.
    pub fn two_part(category: impl Into<String>, amount: u8) -> Self {
        Self {
            category: category.into(),
            kind: JokeKind::Twopart,
            amount,
            safe_mode: true,
            blacklist_flags: DEFAULT_BLACKLIST.to_vec(),
        }
    }

    /// Validate the request parameters.
    ///
    /// Returns an error if the category is unusable or the amount is out
    /// of the provider's accepted range.
    pub fn validate(&self) -> Result<(), crate::provider::ProviderError> {
        use crate::provider::ProviderError;

        if self.category.is_empty() {
            return Err(ProviderError::InvalidCategory("category cannot be empty".to_string()));
        }

        if self.category.len() > MAX_CATEGORY_LEN {
            return Err(ProviderError::InvalidCategory(format!(
                "category too long: {} chars (max {})",
                self.category.len(),
                MAX_CATEGORY_LEN
            )));
        }

        if !(1..=10).contains(&self.amount) {
            return Err(ProviderError::InvalidAmount);
        }

        Ok(())
    }
}
