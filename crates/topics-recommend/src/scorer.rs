//! Rule-firing recommendation scorer.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use topics_types::{
    AssociationRule, DocumentId, ItemSet, Recommendation, Recommendations, RecommendConfig,
    TopicSet,
};

/// Scores candidate documents against mined rules for a query.
pub struct RecommendationScorer {
    config: RecommendConfig,
}

impl RecommendationScorer {
    /// Create a scorer with the given configuration.
    pub fn new(config: RecommendConfig) -> Self {
        Self { config }
    }

    /// Rank the collection for a set of query documents.
    ///
    /// The query topic set is the union of the query documents' topics. A
    /// rule fires when its antecedent is contained in that union; each fired
    /// rule credits a candidate with `weight * covered / |consequent|`, where
    /// `covered` is how many consequent topics the candidate carries.
    /// Candidates that accumulate no credit are omitted, not ranked last.
    ///
    /// Query document ids with no topic set are ignored with a warning. An
    /// empty query, or one that yields no topics, ranks nothing.
    pub fn recommend(
        &self,
        query: &[DocumentId],
        rules: &[AssociationRule],
        topic_sets: &BTreeMap<DocumentId, TopicSet>,
    ) -> Recommendations {
        let mut query_topics = Vec::new();
        for document_id in query {
            match topic_sets.get(document_id) {
                Some(set) => query_topics.extend(set.topics.iter().cloned()),
                None => {
                    warn!(document = %document_id, "query document has no topic set, ignoring");
                }
            }
        }
        let query_set: ItemSet = query_topics.into_iter().collect();
        if query_set.is_empty() {
            warn!("query yields no topics, nothing to rank");
            return Recommendations {
                query: query.to_vec(),
                ranked: Vec::new(),
            };
        }

        let fired: Vec<&AssociationRule> =
            rules.iter().filter(|r| r.fires_for(&query_set)).collect();
        debug!(
            query_topics = query_set.len(),
            fired = fired.len(),
            rules = rules.len(),
            "scoring collection"
        );

        let mut scores: BTreeMap<&DocumentId, f64> = BTreeMap::new();
        for (document_id, set) in topic_sets {
            if self.config.exclude_query && query.contains(document_id) {
                continue;
            }
            let mut score = 0.0;
            for rule in &fired {
                let covered = rule.consequent.overlap_with(&set.topics);
                if covered == 0 {
                    continue;
                }
                let weight = self.config.weight_policy.weight(rule.confidence, rule.lift);
                score += weight * covered as f64 / rule.consequent.len() as f64;
            }
            if score > 0.0 {
                scores.insert(document_id, score);
            }
        }

        let mut ranked: Vec<Recommendation> = scores
            .into_iter()
            .map(|(document_id, score)| Recommendation {
                document_id: document_id.clone(),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.document_id.cmp(&b.document_id))
        });

        Recommendations {
            query: query.to_vec(),
            ranked,
        }
    }
}
