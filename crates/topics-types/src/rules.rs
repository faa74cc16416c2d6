//! Mined facts: frequent item-sets and association rules.

use serde::{Deserialize, Serialize};

use crate::sets::ItemSet;

/// A topic combination observed frequently across the collection.
///
/// Support is the fraction of documents whose topic set contains every item.
/// Anti-monotonicity holds by construction: support never increases as the
/// item-set grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemSet {
    /// The combination itself.
    pub items: ItemSet,
    /// Number of documents containing every item.
    pub support_count: usize,
    /// `support_count / total documents`.
    pub support: f64,
}

impl FrequentItemSet {
    /// Create a frequent item-set record.
    pub fn new(items: ItemSet, support_count: usize, total_documents: usize) -> Self {
        let support = if total_documents == 0 {
            0.0
        } else {
            support_count as f64 / total_documents as f64
        };
        Self {
            items,
            support_count,
            support,
        }
    }

    /// Natural identity for idempotent upsert: the sorted items.
    pub fn storage_key(&self) -> String {
        self.items.storage_key()
    }
}

/// A directional co-occurrence rule `antecedent -> consequent`.
///
/// Both sides are non-empty and disjoint. Confidence is the conditional
/// support of the union given the antecedent; lift is confidence relative to
/// the consequent's base support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    /// Left-hand side.
    pub antecedent: ItemSet,
    /// Right-hand side.
    pub consequent: ItemSet,
    /// Support of antecedent ∪ consequent.
    pub support: f64,
    /// `support(antecedent ∪ consequent) / support(antecedent)`, in [0, 1].
    pub confidence: f64,
    /// `confidence / support(consequent)`.
    pub lift: f64,
}

impl AssociationRule {
    /// Whether the rule fires for a query item-set (antecedent ⊆ query).
    pub fn fires_for(&self, query: &ItemSet) -> bool {
        self.antecedent.is_subset_of(query)
    }

    /// Natural identity: `lhs=>rhs` over sorted items.
    pub fn storage_key(&self) -> String {
        format!(
            "{}=>{}",
            self.antecedent.storage_key(),
            self.consequent.storage_key()
        )
    }
}

impl std::fmt::Display for AssociationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} (support {:.3}, confidence {:.3}, lift {:.3})",
            self.antecedent, self.consequent, self.support, self.confidence, self.lift
        )
    }
}
