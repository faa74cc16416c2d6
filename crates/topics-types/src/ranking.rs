//! Recommendation output types.

use serde::{Deserialize, Serialize};

use crate::ids::DocumentId;

/// A single ranked candidate document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The recommended document.
    pub document_id: DocumentId,
    /// Aggregated rule strength, strictly positive.
    pub score: f64,
}

/// Ranked recommendation output for one query.
///
/// Entries are ordered by descending score; equal scores are ordered by
/// ascending document id so repeated calls return identical sequences.
/// Documents with zero score are omitted entirely, they are not ranked last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Query documents the ranking was computed for.
    pub query: Vec<DocumentId>,
    /// Ranked candidates, best first.
    pub ranked: Vec<Recommendation>,
}

impl Recommendations {
    /// Number of ranked candidates.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Whether no candidate scored above zero.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Iterate ranked candidates, best first.
    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation> {
        self.ranked.iter()
    }
}
