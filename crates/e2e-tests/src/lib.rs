//! End-to-end test infrastructure for the topic pipeline.
//!
//! Provides a shared research ontology, a small paper corpus with candidate
//! term payloads, and helpers that run documents through resolution into the
//! topic-set snapshot that mining and recommendation consume.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use topics_ontology::{OntologyConfig, OntologyIndex, TopicRecord};
use topics_resolver::{to_topic_set, ResolverError, TermSource, TopicResolver};
use topics_types::{DocumentId, ResolverConfig, TopicId, TopicSet};

/// A small computer-science ontology shared across the E2E tests.
///
/// `cs` is a generic root with children and is therefore never matched
/// directly; the leaf and mid-level topics carry the labels the corpus
/// terms resolve against.
pub fn research_ontology() -> OntologyIndex {
    let records = vec![
        TopicRecord::new("cs", "computer science", None),
        TopicRecord::new("ml", "machine learning", Some(TopicId::from("cs"))),
        TopicRecord::new("nn", "neural network", Some(TopicId::from("ml")))
            .with_alternates(["artificial neural network".to_string()]),
        TopicRecord::new("dm", "data mining", Some(TopicId::from("cs"))),
        TopicRecord::new("dss", "decision support system", Some(TopicId::from("cs"))),
        TopicRecord::new("ir", "information retrieval", Some(TopicId::from("cs"))),
    ];
    OntologyIndex::build(records, OntologyConfig::default())
        .expect("fixture ontology must build")
}

/// Candidate term payloads for the fixture papers, as the upstream extractor
/// would deliver them: plain strings and scored objects mixed.
pub fn paper_payloads() -> BTreeMap<DocumentId, Value> {
    [
        ("p1", json!(["machine learning", "neural networks"])),
        (
            "p2",
            json!(["machine learning", {"term": "artificial neural network", "score": 0.9}]),
        ),
        ("p3", json!(["machine learning", "data mining"])),
        ("p4", json!(["data mining", "decision support systems"])),
        (
            "p5",
            json!(["machine learning", "neural network", "data mining"]),
        ),
    ]
    .into_iter()
    .map(|(id, payload)| (DocumentId::from(id), payload))
    .collect()
}

/// Term source backed by an in-memory payload map.
///
/// Unknown documents yield a null payload, which resolves to zero
/// candidates, the same as an extractor that found nothing.
pub struct MapTermSource {
    payloads: BTreeMap<DocumentId, Value>,
}

impl MapTermSource {
    /// Wrap a payload map.
    pub fn new(payloads: BTreeMap<DocumentId, Value>) -> Self {
        Self { payloads }
    }
}

impl TermSource for MapTermSource {
    fn candidate_payload(&self, document_id: &DocumentId) -> Result<Value, ResolverError> {
        Ok(self
            .payloads
            .get(document_id)
            .cloned()
            .unwrap_or(Value::Null))
    }
}

/// Term source whose transport always fails.
pub struct FailingTermSource;

impl TermSource for FailingTermSource {
    fn candidate_payload(&self, _document_id: &DocumentId) -> Result<Value, ResolverError> {
        Err(ResolverError::Source("extractor unavailable".to_string()))
    }
}

/// Resolve every document in `payloads` and collapse the assignments into
/// the topic-set snapshot mining consumes.
///
/// Documents that resolve to zero topics simply have no entry; they do not
/// appear in the snapshot and never enter the support denominator.
pub fn resolve_corpus(
    index: &OntologyIndex,
    config: ResolverConfig,
    payloads: &BTreeMap<DocumentId, Value>,
) -> Result<BTreeMap<DocumentId, TopicSet>, ResolverError> {
    let source = MapTermSource::new(payloads.clone());
    let resolver = TopicResolver::new(index, config);

    let mut snapshot = BTreeMap::new();
    for document_id in payloads.keys() {
        let assignments = resolver.resolve_from_source(document_id, &source)?;
        if let Some(set) = to_topic_set(&assignments) {
            snapshot.insert(document_id.clone(), set);
        }
    }
    Ok(snapshot)
}
