//! Community identifier and wire shape of the `/communities` endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a community on the remote service
///
/// The service does not pin down the JSON type of the `id` field, so the
/// identifier preserves whichever form the service returned; stock mutation
/// payloads pass it through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommunityId {
    /// Numeric identifier
    Numeric(i64),
    /// String identifier
    Text(String),
}

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunityId::Numeric(id) => write!(f, "{}", id),
            CommunityId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for CommunityId {
    fn from(id: i64) -> Self {
        CommunityId::Numeric(id)
    }
}

impl From<&str> for CommunityId {
    fn from(id: &str) -> Self {
        CommunityId::Text(id.to_string())
    }
}

/// One element of the `/communities` response
///
/// Only the identifier is of interest; a missing or null `id` is tolerated
/// at the deserialization layer and rejected by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct Community {
    /// Community identifier, absent when the service returned a malformed entry
    #[serde(default)]
    pub id: Option<CommunityId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_community_id_numeric_and_text() {
        let numeric: CommunityId = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(numeric, CommunityId::Numeric(7));
        assert_eq!(numeric.to_string(), "7");

        let text: CommunityId = serde_json::from_value(json!("c-42")).unwrap();
        assert_eq!(text, CommunityId::Text("c-42".to_string()));
        assert_eq!(text.to_string(), "c-42");
    }

    #[test]
    fn test_community_id_round_trips_unmodified() {
        let value = json!("a1b2");
        let id: CommunityId = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), value);
    }

    #[test]
    fn test_community_without_id() {
        let community: Community = serde_json::from_value(json!({"name": "Home"})).unwrap();
        assert!(community.id.is_none());

        let community: Community = serde_json::from_value(json!({"id": null})).unwrap();
        assert!(community.id.is_none());
    }
}
