//! Identifier newtypes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier of a topic in the ontology.
///
/// Opaque to the pipeline; the ontology loader decides what goes in here
/// (the original corpus uses CSO URIs). Ordered so that item-sets and
/// tie-breaks are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Create a topic id from a raw string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TopicId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TopicId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Identifier of a document in the collection.
///
/// Typically a filename or an upstream database id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id from a raw string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty (an input fault for the resolver).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_id_ordering() {
        let a = TopicId::from("alpha");
        let b = TopicId::from("beta");
        assert!(a < b);
    }

    #[test]
    fn test_topic_id_display() {
        assert_eq!(TopicId::from("neural network").to_string(), "neural network");
    }

    #[test]
    fn test_document_id_empty() {
        assert!(DocumentId::from("").is_empty());
        assert!(!DocumentId::from("paper1.pdf").is_empty());
    }

    #[test]
    fn test_serde_transparent() {
        let id = TopicId::from("machine learning");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"machine learning\"");
        let back: TopicId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
