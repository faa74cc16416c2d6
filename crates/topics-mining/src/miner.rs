//! Level-wise frequent-itemset and rule mining.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use topics_types::{AssociationRule, DocumentId, FrequentItemSet, ItemSet, MiningConfig, TopicSet};

use crate::combinations::combinations_of;
use crate::error::MiningError;

/// Result of one mining run over a topic-set snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MiningOutput {
    /// Frequent item-sets, support descending, then smaller first, then
    /// lexicographic.
    pub item_sets: Vec<FrequentItemSet>,
    /// Retained rules, ordered by support desc, confidence desc,
    /// antecedent lexicographic.
    pub rules: Vec<AssociationRule>,
    /// Documents that entered support counting (the support denominator).
    pub total_documents: usize,
    /// Documents rejected by the topic-set size guard for this run.
    pub skipped_documents: Vec<DocumentId>,
}

/// Mines frequent item-sets and association rules from topic sets.
pub struct RuleMiner {
    config: MiningConfig,
}

impl RuleMiner {
    /// Create a miner with the given configuration.
    pub fn new(config: MiningConfig) -> Self {
        Self { config }
    }

    /// Mine a fully materialized snapshot of document topic sets.
    ///
    /// Support of a combination is the fraction of counted documents whose
    /// topic set contains every item. Combinations up to
    /// `max_combination_size` are enumerated per document; documents whose
    /// topic set exceeds `max_topic_set_size` are skipped for this run and
    /// reported in the output, without failing the rest.
    ///
    /// # Errors
    ///
    /// Configuration faults are rejected before any counting. Consistency
    /// faults (anti-monotonicity violation, zero antecedent support) are
    /// fatal: they mean the snapshot or the counting is broken, not that the
    /// input data is merely uninteresting.
    pub fn mine(
        &self,
        topic_sets: &BTreeMap<DocumentId, TopicSet>,
    ) -> Result<MiningOutput, MiningError> {
        self.config.validate()?;

        let mut skipped_documents = Vec::new();
        let mut counted: Vec<&TopicSet> = Vec::new();
        for (document_id, set) in topic_sets {
            if set.is_empty() {
                debug!(document = %document_id, "empty topic set, not counted");
                continue;
            }
            if set.len() > self.config.max_topic_set_size {
                warn!(
                    document = %document_id,
                    topics = set.len(),
                    limit = self.config.max_topic_set_size,
                    "topic set exceeds combination guard, skipping document"
                );
                skipped_documents.push(document_id.clone());
                continue;
            }
            counted.push(set);
        }

        let total_documents = counted.len();
        if total_documents == 0 {
            debug!("no countable documents, nothing to mine");
            return Ok(MiningOutput {
                skipped_documents,
                ..Default::default()
            });
        }

        // Support counting: each document contributes one count to every
        // combination (sizes 1..=max) of its topic set. Singletons are
        // counted too; confidence and lift need them.
        let mut counts: HashMap<ItemSet, usize> = HashMap::new();
        for set in &counted {
            for combination in combinations_of(&set.topics, 1, self.config.max_combination_size) {
                *counts.entry(combination).or_insert(0) += 1;
            }
        }

        let mut item_sets: Vec<FrequentItemSet> = counts
            .iter()
            .filter(|(_, &count)| count as f64 / total_documents as f64 >= self.config.min_support)
            .map(|(items, &count)| FrequentItemSet::new(items.clone(), count, total_documents))
            .collect();
        item_sets.sort_by(|a, b| {
            b.support
                .total_cmp(&a.support)
                .then_with(|| a.items.len().cmp(&b.items.len()))
                .then_with(|| a.items.cmp(&b.items))
        });

        self.check_anti_monotonicity(&item_sets, &counts)?;
        let rules = self.derive_rules(&item_sets, &counts, total_documents)?;

        debug!(
            documents = total_documents,
            skipped = skipped_documents.len(),
            frequent = item_sets.len(),
            rules = rules.len(),
            "mining complete"
        );
        Ok(MiningOutput {
            item_sets,
            rules,
            total_documents,
            skipped_documents,
        })
    }

    /// Verify that every one-smaller subset of a frequent item-set is itself
    /// frequent with at least the same support. With exact local counting
    /// this always holds; a violation means the snapshot or counts are
    /// corrupt and must surface, not be repaired.
    fn check_anti_monotonicity(
        &self,
        item_sets: &[FrequentItemSet],
        counts: &HashMap<ItemSet, usize>,
    ) -> Result<(), MiningError> {
        let frequent: HashSet<&ItemSet> = item_sets.iter().map(|f| &f.items).collect();
        for item_set in item_sets {
            if item_set.items.len() < 2 {
                continue;
            }
            for subset in item_set.items.shrink_by_one() {
                let subset_count = counts.get(&subset).copied().unwrap_or(0);
                if !frequent.contains(&subset) || subset_count < item_set.support_count {
                    return Err(MiningError::AntiMonotonicityViolation {
                        item_set: item_set.items.storage_key(),
                        subset: subset.storage_key(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Generate every non-trivial bipartition of each frequent item-set of
    /// size >= 2 and keep the rules clearing `min_confidence`.
    fn derive_rules(
        &self,
        item_sets: &[FrequentItemSet],
        counts: &HashMap<ItemSet, usize>,
        total_documents: usize,
    ) -> Result<Vec<AssociationRule>, MiningError> {
        let mut rules = Vec::new();
        for item_set in item_sets {
            let size = item_set.items.len();
            if size < 2 {
                continue;
            }
            let items = item_set.items.as_slice();
            // Masks enumerate antecedents; the complement is the consequent.
            for mask in 1..(1u64 << size) - 1 {
                let antecedent: ItemSet = items
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, t)| t.clone())
                    .collect();
                let consequent: ItemSet = items
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) == 0)
                    .map(|(_, t)| t.clone())
                    .collect();

                let antecedent_count = counts.get(&antecedent).copied().unwrap_or(0);
                if antecedent_count == 0 {
                    // Impossible by construction: the antecedent is a subset
                    // of an observed item-set.
                    return Err(MiningError::ZeroAntecedentSupport(
                        antecedent.storage_key(),
                    ));
                }
                let consequent_count = counts.get(&consequent).copied().unwrap_or(0);
                if consequent_count == 0 {
                    return Err(MiningError::AntiMonotonicityViolation {
                        item_set: item_set.items.storage_key(),
                        subset: consequent.storage_key(),
                    });
                }

                let confidence = item_set.support_count as f64 / antecedent_count as f64;
                if confidence < self.config.min_confidence {
                    continue;
                }
                let consequent_support = consequent_count as f64 / total_documents as f64;
                rules.push(AssociationRule {
                    antecedent,
                    consequent,
                    support: item_set.support,
                    confidence,
                    lift: confidence / consequent_support,
                });
            }
        }

        rules.sort_by(|a, b| {
            b.support
                .total_cmp(&a.support)
                .then_with(|| b.confidence.total_cmp(&a.confidence))
                .then_with(|| a.antecedent.cmp(&b.antecedent))
                .then_with(|| a.consequent.cmp(&b.consequent))
        });
        Ok(rules)
    }
}
