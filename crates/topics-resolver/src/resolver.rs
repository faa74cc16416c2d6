//! Ontology-guarded topic resolution.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use topics_ontology::{OntologyIndex, TopicMatch};
use topics_types::{DocumentId, MatchMethod, ResolverConfig, TopicId, TopicSet};

use crate::error::ResolverError;
use crate::source::TermSource;
use crate::terms::{is_stop_term, parse_candidate_terms, CandidateTerm};

/// A confidence-scored topic assignment for one document.
///
/// Only constructible through [`TopicResolver::resolve`], which in turn only
/// sees topics the ontology index produced: an assignment can never name a
/// topic outside the ontology. Serializes but deliberately does not
/// deserialize; re-resolution supersedes old records instead of mutating
/// them.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAssignment {
    document_id: DocumentId,
    topic_id: TopicId,
    topic_label: String,
    confidence: f64,
    method: MatchMethod,
}

impl ResolvedAssignment {
    fn from_match(document_id: DocumentId, best: &TopicMatch) -> Self {
        Self {
            document_id,
            topic_id: best.topic_id().clone(),
            topic_label: best.label().to_string(),
            confidence: best.score(),
            method: best.method(),
        }
    }

    /// The assigned document.
    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    /// The assigned topic.
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    /// Canonical label of the assigned topic.
    pub fn topic_label(&self) -> &str {
        &self.topic_label
    }

    /// Confidence in [0, 1].
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// How the term matched.
    pub fn method(&self) -> MatchMethod {
        self.method
    }

    /// Natural identity for idempotent upsert: `document::topic`.
    pub fn storage_key(&self) -> String {
        format!("{}::{}", self.document_id, self.topic_id)
    }
}

/// Collapse assignments into the document's topic set.
///
/// Returns `None` for an empty assignment list; a document without topics has
/// no topic set rather than an empty one.
pub fn to_topic_set(assignments: &[ResolvedAssignment]) -> Option<TopicSet> {
    let document_id = assignments.first()?.document_id().clone();
    Some(TopicSet::new(
        document_id,
        assignments.iter().map(|a| a.topic_id.clone()),
    ))
}

/// Resolves candidate terms against the ontology under a confidence policy.
///
/// Holds only a shared reference to the read-only index, so one resolver (or
/// many) can process independent documents concurrently.
pub struct TopicResolver<'a> {
    index: &'a OntologyIndex,
    config: ResolverConfig,
}

impl<'a> TopicResolver<'a> {
    /// Create a resolver over an ontology index.
    pub fn new(index: &'a OntologyIndex, config: ResolverConfig) -> Self {
        Self { index, config }
    }

    /// Resolve a document's candidate terms into topic assignments.
    ///
    /// Policy, in order:
    /// 1. cap candidates at `max_topics_in_prompt` before matching;
    /// 2. per term keep only the best ontology match;
    /// 3. drop matches below `min_confidence`;
    /// 4. deduplicate by topic id, keeping the highest confidence;
    /// 5. cap at `top_k_map_each`, ties broken by topic label.
    ///
    /// Zero assignments is a valid outcome and is logged, not raised. An
    /// empty document id or empty term list is an input fault resolved to an
    /// empty result.
    ///
    /// # Errors
    ///
    /// Only configuration faults are errors, rejected before any matching.
    pub fn resolve(
        &self,
        document_id: &DocumentId,
        terms: &[CandidateTerm],
    ) -> Result<Vec<ResolvedAssignment>, ResolverError> {
        self.config.validate()?;

        if document_id.is_empty() {
            warn!("empty document id, resolving to zero assignments");
            return Ok(Vec::new());
        }
        if terms.is_empty() {
            debug!(document = %document_id, "no candidate terms");
            return Ok(Vec::new());
        }

        let considered = &terms[..terms.len().min(self.config.max_topics_in_prompt)];
        if considered.len() < terms.len() {
            debug!(
                document = %document_id,
                dropped = terms.len() - considered.len(),
                "candidate list capped at max_topics_in_prompt"
            );
        }

        // Best surviving assignment per topic id.
        let mut by_topic: HashMap<TopicId, ResolvedAssignment> = HashMap::new();
        for term in considered {
            if is_stop_term(&term.text) {
                continue;
            }
            let Some(best) = self.index.resolve(&term.text).into_iter().next() else {
                debug!(document = %document_id, term = %term.text, "no ontology match");
                continue;
            };
            if best.score() < self.config.min_confidence {
                debug!(
                    document = %document_id,
                    term = %term.text,
                    score = best.score(),
                    "best match below min_confidence, dropped"
                );
                continue;
            }

            let assignment = ResolvedAssignment::from_match(document_id.clone(), &best);
            match by_topic.get(assignment.topic_id()) {
                Some(existing) if !supersedes(&assignment, existing) => {}
                _ => {
                    by_topic.insert(assignment.topic_id().clone(), assignment);
                }
            }
        }

        let mut assignments: Vec<ResolvedAssignment> = by_topic.into_values().collect();
        assignments.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.topic_label.cmp(&b.topic_label))
        });
        assignments.truncate(self.config.top_k_map_each);

        if assignments.is_empty() {
            debug!(document = %document_id, "document resolved to zero topics");
        } else {
            debug!(
                document = %document_id,
                assignments = assignments.len(),
                "resolved topic assignments"
            );
        }
        Ok(assignments)
    }

    /// Fetch candidates from a term source and resolve them.
    ///
    /// Malformed or empty payloads become zero candidates; only transport
    /// failures from the source propagate.
    pub fn resolve_from_source(
        &self,
        document_id: &DocumentId,
        source: &dyn TermSource,
    ) -> Result<Vec<ResolvedAssignment>, ResolverError> {
        let payload = source.candidate_payload(document_id)?;
        let terms = parse_candidate_terms(&payload);
        self.resolve(document_id, &terms)
    }
}

/// Whether `candidate` should replace `existing` for the same topic.
fn supersedes(candidate: &ResolvedAssignment, existing: &ResolvedAssignment) -> bool {
    candidate
        .confidence
        .total_cmp(&existing.confidence)
        .then_with(|| {
            existing
                .method
                .priority()
                .cmp(&candidate.method.priority())
        })
        .is_gt()
}
