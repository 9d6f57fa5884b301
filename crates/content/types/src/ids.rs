//! Resource identifiers
//!
//! Identifiers reach the engine in several shapes: bare strings, numeric
//! keys, or document references such as `{"_id": "..."}` and
//! `{"$oid": "..."}`. They are all projected onto one canonical string so
//! that equality never depends on the representation.

use crate::error::{ContentError, ContentResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical string form of an opaque identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an identifier, rejecting blank input
    pub fn parse(id: &str) -> ContentResult<Self> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ContentError::BlankIdentifier);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank id carries no identity and never matches another id.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Identity comparison used for creator checks and parent matching.
    ///
    /// Blank ids never match, not even each other.
    pub fn same_as(&self, other: &ResourceId) -> bool {
        !self.is_blank() && !other.is_blank() && self.0 == other.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

// ── Wire representations ─────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Reference(RawReference),
}

#[derive(Deserialize)]
struct RawReference {
    #[serde(alias = "_id", alias = "$oid")]
    id: Box<RawId>,
}

impl From<RawId> for ResourceId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Unsigned(n) => Self(n.to_string()),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Reference(r) => Self::from(*r.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heterogeneous_representations_agree() {
        let from_str: ResourceId = serde_json::from_str(r#""42""#).unwrap();
        let from_num: ResourceId = serde_json::from_str("42").unwrap();
        let from_ref: ResourceId = serde_json::from_str(r#"{"_id": "42"}"#).unwrap();
        let from_oid: ResourceId = serde_json::from_str(r#"{"$oid": 42}"#).unwrap();

        assert_eq!(from_str, from_num);
        assert_eq!(from_str, from_ref);
        assert_eq!(from_str, from_oid);
    }

    #[test]
    fn test_nested_reference() {
        let id: ResourceId = serde_json::from_str(r#"{"id": {"$oid": "abc"}}"#).unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ResourceId::from(7u64)).unwrap();
        assert_eq!(json, r#""7""#);
    }

    #[test]
    fn test_blank_ids_never_match() {
        let blank = ResourceId::new("");
        assert!(!blank.same_as(&ResourceId::new("")));
        assert!(ResourceId::new("u1").same_as(&ResourceId::new("u1")));
        assert_eq!(ResourceId::parse("  "), Err(ContentError::BlankIdentifier));
        assert_eq!(ResourceId::parse(" u1 ").unwrap().as_str(), "u1");
    }
}
