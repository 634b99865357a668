//! Joke provider response types and normalization.

use jokebook_core::NewJoke;
use serde::Deserialize;

/// Raw payload from the joke provider.
///
/// The provider answers in one of three shapes: a `jokes` list, a single
/// joke object at the top level, or an error object. All three parse into
/// this one lenient struct; [`ProviderPayload::two_part`] turns any of
/// them into a clean selection.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderPayload {
    #[serde(default)]
    pub error: bool,

    #[serde(default)]
    pub jokes: Option<Vec<ProviderJoke>>,

    /// Top-level joke fields, present when the provider answers with a
    /// single joke object instead of a list.
    #[serde(flatten)]
    pub single: ProviderJoke,
}

/// One entry of a provider payload, shape unchecked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderJoke {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub setup: Option<String>,

    #[serde(default)]
    pub delivery: Option<String>,
}

impl ProviderJoke {
    /// Accept only a structurally complete two-part joke.
    fn into_two_part(self) -> Option<NewJoke> {
        match (self.kind.as_deref(), self.setup, self.delivery) {
            (Some("twopart"), Some(setup), Some(delivery)) if !setup.is_empty() && !delivery.is_empty() => {
                Some(NewJoke { setup, delivery })
            }
            _ => None,
        }
    }
}

impl ProviderPayload {
    /// Select up to `cap` structurally valid two-part jokes.
    ///
    /// Entries of any other shape are discarded silently. An error payload
    /// normalizes to an empty selection; deciding what emptiness means is
    /// the caller's job.
    pub fn two_part(self, cap: usize) -> Vec<NewJoke> {
        let entries = match self.jokes {
            Some(list) => list,
            None if self.error => Vec::new(),
            None => vec![self.single],
        };

        entries
            .into_iter()
            .filter_map(ProviderJoke::into_two_part)
            .take(cap)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_FIXTURE: &str = r#"{
        "error": false,
        "jokes": [
            {
                "category": "Programming",
                "type": "twopart",
                "setup": "Why do programmers prefer dark mode?",
                "delivery": "Because light attracts bugs.",
                "id": 1
            },
            {
                "category": "Programming",
                "type": "single",
                "joke": "A one-liner.",
                "id": 2
            }
        ],
        "amount": 2
    }"#;

    #[test]
    fn test_list_keeps_only_two_part() {
        let payload: ProviderPayload = serde_json::from_str(LIST_FIXTURE).unwrap();
        let clean = payload.two_part(3);

        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].setup, "Why do programmers prefer dark mode?");
        assert_eq!(clean[0].delivery, "Because light attracts bugs.");
    }

    #[test]
    fn test_single_top_level_object() {
        let json = r#"{
            "error": false,
            "category": "Pun",
            "type": "twopart",
            "setup": "A",
            "delivery": "B",
            "id": 7
        }"#;

        let payload: ProviderPayload = serde_json::from_str(json).unwrap();
        let clean = payload.two_part(3);

        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].setup, "A");
        assert_eq!(clean[0].delivery, "B");
    }

    #[test]
    fn test_single_object_wrong_shape_is_discarded() {
        let json = r#"{"error": false, "category": "Pun", "type": "single", "joke": "C", "id": 8}"#;

        let payload: ProviderPayload = serde_json::from_str(json).unwrap();
        assert!(payload.two_part(3).is_empty());
    }

    #[test]
    fn test_error_object_normalizes_to_empty() {
        let json = r#"{"error": true, "message": "No matching joke found"}"#;

        let payload: ProviderPayload = serde_json::from_str(json).unwrap();
        assert!(payload.two_part(3).is_empty());
    }

    #[test]
    fn test_empty_setup_or_delivery_is_discarded() {
        let json = r#"{
            "jokes": [
                {"type": "twopart", "setup": "", "delivery": "B"},
                {"type": "twopart", "setup": "A", "delivery": ""},
                {"type": "twopart", "setup": "A"}
            ]
        }"#;

        let payload: ProviderPayload = serde_json::from_str(json).unwrap();
        assert!(payload.two_part(3).is_empty());
    }

    #[test]
    fn test_selection_capped() {
        let json = r#"{
            "jokes": [
                {"type": "twopart", "setup": "1", "delivery": "a"},
                {"type": "twopart", "setup": "2", "delivery": "b"},
                {"type": "twopart", "setup": "3", "delivery": "c"},
                {"type": "twopart", "setup": "4", "delivery": "d"}
            ]
        }"#;

        let payload: ProviderPayload = serde_json::from_str(json).unwrap();
        let clean = payload.two_part(3);

        assert_eq!(clean.len(), 3);
        assert_eq!(clean[2].setup, "3");
    }
}
