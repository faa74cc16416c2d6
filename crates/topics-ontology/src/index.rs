//! The ontology index: hierarchy validation and term resolution.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use topics_types::{MatchMethod, OntologyConfig, TopicId};

use crate::error::OntologyError;
use crate::normalize::canonical_form;
use crate::similarity::bigram_dice;

/// One row of the loaded ontology, as handed over by the external loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    /// Canonical topic id.
    pub id: TopicId,
    /// Canonical display label.
    pub label: String,
    /// Alternate labels (synonyms, abbreviations).
    #[serde(default)]
    pub alternate_labels: Vec<String>,
    /// Parent topic id; `None` for hierarchy roots.
    #[serde(default)]
    pub parent_id: Option<TopicId>,
}

impl TopicRecord {
    /// Convenience constructor for a record without alternates.
    pub fn new(id: impl Into<TopicId>, label: impl Into<String>, parent_id: Option<TopicId>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            alternate_labels: Vec::new(),
            parent_id,
        }
    }

    /// Add alternate labels.
    pub fn with_alternates(mut self, alternates: impl IntoIterator<Item = String>) -> Self {
        self.alternate_labels.extend(alternates);
        self
    }
}

/// A validated topic inside the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Canonical topic id.
    pub id: TopicId,
    /// Canonical display label.
    pub label: String,
    /// Alternate labels, including those absorbed from merged duplicates.
    pub alternate_labels: Vec<String>,
    /// Parent topic id; `None` for hierarchy roots.
    pub parent_id: Option<TopicId>,
}

/// A single match returned by [`OntologyIndex::resolve`].
///
/// Fields are private: the only way to obtain a `TopicMatch` is through the
/// resolve path, which guarantees the topic exists in the index. This is the
/// closed-world constraint expressed in the type system.
#[derive(Debug, Clone, Serialize)]
pub struct TopicMatch {
    topic_id: TopicId,
    label: String,
    method: MatchMethod,
    score: f64,
}

impl TopicMatch {
    /// The matched topic's id.
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    /// The matched topic's canonical label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// How the match was made.
    pub fn method(&self) -> MatchMethod {
        self.method
    }

    /// Raw match score in [0, 1].
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Read-only lookup structure over the topic hierarchy.
///
/// Built once by [`OntologyIndex::build`], never mutated afterwards.
#[derive(Debug)]
pub struct OntologyIndex {
    config: OntologyConfig,
    topics: BTreeMap<TopicId, Topic>,
    by_canonical: HashMap<String, TopicId>,
    alt_canonical: HashMap<String, TopicId>,
    /// Parentless topics with children: too generic to ever match.
    generic_roots: BTreeSet<TopicId>,
}

impl OntologyIndex {
    /// Build and validate an index from loaded records.
    ///
    /// Validation covers unique ids, non-empty labels, known parents and
    /// acyclic parent chains. Records whose labels share a canonical form are
    /// merged into one topic (smallest id wins, other labels become
    /// alternates). When `max_depth` is configured, topics deeper than that
    /// are left out of the index entirely.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; a partially built index is never
    /// observable.
    pub fn build(
        records: Vec<TopicRecord>,
        config: OntologyConfig,
    ) -> Result<Self, OntologyError> {
        config.validate()?;

        let mut seen_ids: BTreeSet<TopicId> = BTreeSet::new();
        for record in &records {
            if canonical_form(&record.label).is_empty() {
                return Err(OntologyError::EmptyLabel(record.id.to_string()));
            }
            if !seen_ids.insert(record.id.clone()) {
                return Err(OntologyError::DuplicateId(record.id.to_string()));
            }
        }

        // Merge records sharing a canonical label: keep the smallest id,
        // absorb the other labels as alternates.
        let mut groups: BTreeMap<String, Vec<&TopicRecord>> = BTreeMap::new();
        for record in &records {
            groups
                .entry(canonical_form(&record.label))
                .or_default()
                .push(record);
        }

        let mut alias: HashMap<TopicId, TopicId> = HashMap::new();
        let mut topics: BTreeMap<TopicId, Topic> = BTreeMap::new();
        for members in groups.values() {
            let kept = members
                .iter()
                .map(|r| &r.id)
                .min()
                .cloned()
                .unwrap_or_else(|| members[0].id.clone());
            let kept_record = members
                .iter()
                .find(|r| r.id == kept)
                .unwrap_or(&members[0]);

            let mut alternates: Vec<String> = kept_record.alternate_labels.clone();
            for member in members.iter() {
                if member.id != kept {
                    debug!(
                        merged = %member.id,
                        into = %kept,
                        "merging duplicate topic by canonical label"
                    );
                    alias.insert(member.id.clone(), kept.clone());
                    alternates.push(member.label.clone());
                    alternates.extend(member.alternate_labels.iter().cloned());
                }
            }
            alternates.sort();
            alternates.dedup();

            topics.insert(
                kept.clone(),
                Topic {
                    id: kept,
                    label: kept_record.label.clone(),
                    alternate_labels: alternates,
                    parent_id: kept_record.parent_id.clone(),
                },
            );
        }

        // Remap parents through the alias map, then validate them.
        for topic in topics.values_mut() {
            if let Some(parent) = &topic.parent_id {
                if let Some(kept) = alias.get(parent) {
                    topic.parent_id = Some(kept.clone());
                }
            }
        }
        for topic in topics.values() {
            if let Some(parent) = &topic.parent_id {
                if parent == &topic.id {
                    return Err(OntologyError::CycleDetected(topic.id.to_string()));
                }
                if !topics.contains_key(parent) {
                    return Err(OntologyError::UnknownParent {
                        topic: topic.id.to_string(),
                        parent: parent.to_string(),
                    });
                }
            }
        }

        // Acyclicity: every parent chain must terminate at a root.
        for topic in topics.values() {
            let mut visited: BTreeSet<&TopicId> = BTreeSet::new();
            let mut current = topic;
            while let Some(parent) = &current.parent_id {
                if !visited.insert(&current.id) {
                    return Err(OntologyError::CycleDetected(topic.id.to_string()));
                }
                current = &topics[parent];
            }
        }

        // Depth filter, root = depth 1. Children of dropped topics are
        // necessarily deeper and get dropped with them.
        if let Some(max_depth) = config.max_depth {
            let depths: BTreeMap<TopicId, u32> = topics
                .keys()
                .map(|id| (id.clone(), chain_depth(id, &topics)))
                .collect();
            let before = topics.len();
            topics.retain(|id, _| depths[id] <= max_depth);
            if topics.len() < before {
                debug!(
                    dropped = before - topics.len(),
                    max_depth, "depth filter applied to ontology"
                );
            }
        }

        let mut has_children: BTreeSet<TopicId> = BTreeSet::new();
        for topic in topics.values() {
            if let Some(parent) = &topic.parent_id {
                has_children.insert(parent.clone());
            }
        }
        let generic_roots: BTreeSet<TopicId> = topics
            .values()
            .filter(|t| t.parent_id.is_none() && has_children.contains(&t.id))
            .map(|t| t.id.clone())
            .collect();

        let mut by_canonical: HashMap<String, TopicId> = HashMap::new();
        let mut alt_canonical: HashMap<String, TopicId> = HashMap::new();
        for topic in topics.values() {
            by_canonical.insert(canonical_form(&topic.label), topic.id.clone());
            for alternate in &topic.alternate_labels {
                let canonical = canonical_form(alternate);
                if canonical.is_empty() || by_canonical.contains_key(&canonical) {
                    continue;
                }
                // First topic in id order wins on alternate collisions.
                alt_canonical.entry(canonical).or_insert_with(|| topic.id.clone());
            }
        }

        debug!(topics = topics.len(), "ontology index built");
        Ok(Self {
            config,
            topics,
            by_canonical,
            alt_canonical,
            generic_roots,
        })
    }

    /// Resolve a free-text term to candidate topics, best first.
    ///
    /// Ordering: score descending, then match-method priority, then label.
    /// Hierarchy roots are never candidates. An unmatched term yields an
    /// empty list; new topics are never invented.
    pub fn resolve(&self, term: &str) -> Vec<TopicMatch> {
        let needle = canonical_form(term);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<TopicMatch> = Vec::new();
        let mut matched_ids: BTreeSet<&TopicId> = BTreeSet::new();

        if let Some(id) = self.by_canonical.get(&needle) {
            if !self.generic_roots.contains(id) {
                matched_ids.insert(id);
                matches.push(TopicMatch {
                    topic_id: id.clone(),
                    label: self.topics[id].label.clone(),
                    method: MatchMethod::Exact,
                    score: 1.0,
                });
            }
        }

        if let Some(id) = self.alt_canonical.get(&needle) {
            if !self.generic_roots.contains(id) && !matched_ids.contains(id) {
                matched_ids.insert(id);
                matches.push(TopicMatch {
                    topic_id: id.clone(),
                    label: self.topics[id].label.clone(),
                    method: MatchMethod::AlternateLabel,
                    score: 1.0,
                });
            }
        }

        for topic in self.topics.values() {
            if matched_ids.contains(&topic.id) || self.generic_roots.contains(&topic.id) {
                continue;
            }
            let mut best = bigram_dice(&needle, &canonical_form(&topic.label));
            for alternate in &topic.alternate_labels {
                best = best.max(bigram_dice(&needle, &canonical_form(alternate)));
            }
            if best >= self.config.min_fuzzy_similarity {
                matches.push(TopicMatch {
                    topic_id: topic.id.clone(),
                    label: topic.label.clone(),
                    method: MatchMethod::Fuzzy,
                    score: best,
                });
            }
        }

        matches.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.method.priority().cmp(&b.method.priority()))
                .then_with(|| a.label.cmp(&b.label))
        });
        matches
    }

    /// Look up a topic by id.
    pub fn get(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.get(id)
    }

    /// Whether a topic id exists in the index.
    pub fn contains(&self, id: &TopicId) -> bool {
        self.topics.contains_key(id)
    }

    /// Parent chain of a topic, nearest ancestor first.
    pub fn ancestors(&self, id: &TopicId) -> Vec<TopicId> {
        let mut out = Vec::new();
        let mut current = self.topics.get(id);
        while let Some(topic) = current {
            match &topic.parent_id {
                Some(parent) => {
                    out.push(parent.clone());
                    current = self.topics.get(parent);
                }
                None => break,
            }
        }
        out
    }

    /// Number of topics in the index.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether the index holds no topics.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Iterate topics in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.values()
    }
}

fn chain_depth(id: &TopicId, topics: &BTreeMap<TopicId, Topic>) -> u32 {
    let mut depth = 1;
    let mut current = &topics[id];
    while let Some(parent) = &current.parent_id {
        depth += 1;
        current = &topics[parent];
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cs_ontology() -> OntologyIndex {
        let records = vec![
            TopicRecord::new("cs", "computer science", None),
            TopicRecord::new("ml", "machine learning", Some(TopicId::from("cs"))),
            TopicRecord::new("nn", "neural network", Some(TopicId::from("ml")))
                .with_alternates(["artificial neural network".to_string()]),
            TopicRecord::new("dss", "decision support system", Some(TopicId::from("cs"))),
            TopicRecord::new("lstm", "long short term memory", Some(TopicId::from("nn")))
                .with_alternates(["lstm".to_string()]),
        ];
        OntologyIndex::build(records, OntologyConfig::default()).unwrap()
    }

    #[test]
    fn test_build_valid_hierarchy() {
        let index = cs_ontology();
        assert_eq!(index.len(), 5);
        assert!(index.contains(&TopicId::from("nn")));
    }

    #[test]
    fn test_exact_match() {
        let index = cs_ontology();
        let matches = index.resolve("Machine Learning");
        assert_eq!(matches[0].topic_id(), &TopicId::from("ml"));
        assert_eq!(matches[0].method(), MatchMethod::Exact);
        assert!((matches[0].score() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_plural_variant_is_exact() {
        let index = cs_ontology();
        let matches = index.resolve("neural networks");
        assert_eq!(matches[0].topic_id(), &TopicId::from("nn"));
        assert_eq!(matches[0].method(), MatchMethod::Exact);
    }

    #[test]
    fn test_alternate_label_match() {
        let index = cs_ontology();
        let matches = index.resolve("artificial neural network");
        assert_eq!(matches[0].topic_id(), &TopicId::from("nn"));
        assert_eq!(matches[0].method(), MatchMethod::AlternateLabel);
        assert!((matches[0].score() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_abbreviation_via_alternate() {
        let index = cs_ontology();
        let matches = index.resolve("LSTM");
        assert_eq!(matches[0].topic_id(), &TopicId::from("lstm"));
        assert_eq!(matches[0].method(), MatchMethod::AlternateLabel);
    }

    #[test]
    fn test_fuzzy_match_scored() {
        let index = cs_ontology();
        let matches = index.resolve("neural nets");
        assert!(!matches.is_empty());
        assert_eq!(matches[0].topic_id(), &TopicId::from("nn"));
        assert_eq!(matches[0].method(), MatchMethod::Fuzzy);
        assert!(matches[0].score() < 1.0);
        assert!(matches[0].score() >= 0.6);
    }

    #[test]
    fn test_no_match_is_empty_not_invented() {
        let index = cs_ontology();
        assert!(index.resolve("zzzz qqqq").is_empty());
    }

    #[test]
    fn test_root_is_never_a_candidate() {
        let index = cs_ontology();
        assert!(index.resolve("computer science").is_empty());
    }

    #[test]
    fn test_empty_term() {
        let index = cs_ontology();
        assert!(index.resolve("").is_empty());
        assert!(index.resolve("   ").is_empty());
    }

    #[test]
    fn test_resolve_order_best_first() {
        let index = cs_ontology();
        let matches = index.resolve("neural network");
        for pair in matches.windows(2) {
            assert!(pair[0].score() >= pair[1].score());
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let records = vec![
            TopicRecord::new("a", "first topic", None),
            TopicRecord::new("a", "second topic", None),
        ];
        let err = OntologyIndex::build(records, OntologyConfig::default()).unwrap_err();
        assert!(matches!(err, OntologyError::DuplicateId(_)));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let records = vec![TopicRecord::new(
            "a",
            "orphan topic",
            Some(TopicId::from("missing")),
        )];
        let err = OntologyIndex::build(records, OntologyConfig::default()).unwrap_err();
        assert!(matches!(err, OntologyError::UnknownParent { .. }));
    }

    #[test]
    fn test_cycle_rejected() {
        let records = vec![
            TopicRecord::new("a", "topic alpha", Some(TopicId::from("b"))),
            TopicRecord::new("b", "topic beta", Some(TopicId::from("a"))),
        ];
        let err = OntologyIndex::build(records, OntologyConfig::default()).unwrap_err();
        assert!(matches!(err, OntologyError::CycleDetected(_)));
    }

    #[test]
    fn test_self_parent_rejected() {
        let records = vec![TopicRecord::new("a", "topic alpha", Some(TopicId::from("a")))];
        let err = OntologyIndex::build(records, OntologyConfig::default()).unwrap_err();
        assert!(matches!(err, OntologyError::CycleDetected(_)));
    }

    #[test]
    fn test_empty_label_rejected() {
        let records = vec![TopicRecord::new("a", "  ", None)];
        let err = OntologyIndex::build(records, OntologyConfig::default()).unwrap_err();
        assert!(matches!(err, OntologyError::EmptyLabel(_)));
    }

    #[test]
    fn test_duplicate_labels_merged() {
        let records = vec![
            TopicRecord::new("t1", "neural networks", None),
            TopicRecord::new("t2", "neural network", None),
        ];
        let index = OntologyIndex::build(records, OntologyConfig::default()).unwrap();
        assert_eq!(index.len(), 1);
        let topic = index.get(&TopicId::from("t1")).unwrap();
        assert!(topic.alternate_labels.contains(&"neural network".to_string()));
        // Both surface forms resolve to the surviving id.
        assert_eq!(index.resolve("neural network")[0].topic_id(), &TopicId::from("t1"));
    }

    #[test]
    fn test_depth_filter() {
        let records = vec![
            TopicRecord::new("r", "science root", None),
            TopicRecord::new("l2", "level two", Some(TopicId::from("r"))),
            TopicRecord::new("l3", "level three", Some(TopicId::from("l2"))),
        ];
        let config = OntologyConfig {
            max_depth: Some(2),
            ..Default::default()
        };
        let index = OntologyIndex::build(records, config).unwrap();
        assert!(index.contains(&TopicId::from("l2")));
        assert!(!index.contains(&TopicId::from("l3")));
    }

    #[test]
    fn test_ancestors() {
        let index = cs_ontology();
        let chain = index.ancestors(&TopicId::from("lstm"));
        assert_eq!(
            chain,
            vec![TopicId::from("nn"), TopicId::from("ml"), TopicId::from("cs")]
        );
    }

    #[test]
    fn test_fuzzy_threshold_respected() {
        let records = vec![TopicRecord::new("nn", "neural network", None)];
        let config = OntologyConfig {
            min_fuzzy_similarity: 0.95,
            ..Default::default()
        };
        let index = OntologyIndex::build(records, config).unwrap();
        assert!(index.resolve("neural nets").is_empty());
    }
}
