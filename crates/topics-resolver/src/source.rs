//! Seam for the upstream term extractor.

use serde_json::Value;
use topics_types::DocumentId;

use crate::error::ResolverError;

/// Trait for the upstream candidate-term source.
///
/// Implement this to plug in whatever proposes terms for a document (a
/// generative model, a classical keyword extractor). The implementation owns
/// API calls, timeouts and retries; the resolver only sees the JSON payload.
pub trait TermSource: Send + Sync {
    /// Fetch the raw candidate payload for a document.
    ///
    /// Returning `Value::Null` (or any non-array payload) means zero
    /// candidates; only transport-level failures should be errors.
    fn candidate_payload(&self, document_id: &DocumentId) -> Result<Value, ResolverError>;
}

/// A term source that never proposes anything.
///
/// Useful in tests and for pipelines that feed terms in directly.
pub struct NoOpTermSource;

impl TermSource for NoOpTermSource {
    fn candidate_payload(&self, _document_id: &DocumentId) -> Result<Value, ResolverError> {
        Ok(Value::Null)
    }
}
