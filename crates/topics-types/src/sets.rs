//! Topic sets and item-set combinations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ids::{DocumentId, TopicId};

/// The resolved topic set of a single document.
///
/// One per document; order of topics is irrelevant and the backing set keeps
/// them sorted. A topic set is regenerated wholesale when the document's
/// topics change, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSet {
    /// Owning document.
    pub document_id: DocumentId,
    /// Distinct topic ids, size >= 1 for any document that resolved.
    pub topics: BTreeSet<TopicId>,
}

impl TopicSet {
    /// Create a topic set for a document.
    pub fn new(document_id: impl Into<DocumentId>, topics: impl IntoIterator<Item = TopicId>) -> Self {
        Self {
            document_id: document_id.into(),
            topics: topics.into_iter().collect(),
        }
    }

    /// Number of distinct topics.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether the set holds no topics.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Whether this document's topics are a superset of `items`.
    pub fn contains_all(&self, items: &ItemSet) -> bool {
        items.iter().all(|t| self.topics.contains(t))
    }

    /// Natural identity for idempotent upsert: the document id.
    pub fn storage_key(&self) -> String {
        self.document_id.to_string()
    }
}

/// A sorted, deduplicated combination of topic ids.
///
/// The unit of support counting and the side of an association rule.
/// Construction sorts and deduplicates, so two item-sets built from the same
/// topics in any order compare equal and serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemSet(Vec<TopicId>);

impl ItemSet {
    /// Build an item-set from topics, sorting and deduplicating.
    pub fn new(items: impl IntoIterator<Item = TopicId>) -> Self {
        let set: BTreeSet<TopicId> = items.into_iter().collect();
        Self(set.into_iter().collect())
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the item-set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the items in sorted order.
    pub fn iter(&self) -> std::slice::Iter<'_, TopicId> {
        self.0.iter()
    }

    /// The items as a sorted slice.
    pub fn as_slice(&self) -> &[TopicId] {
        &self.0
    }

    /// Whether every item also appears in `other`.
    pub fn is_subset_of(&self, other: &ItemSet) -> bool {
        self.0.iter().all(|t| other.0.binary_search(t).is_ok())
    }

    /// Whether the two item-sets share no items.
    pub fn is_disjoint_from(&self, other: &ItemSet) -> bool {
        self.0.iter().all(|t| other.0.binary_search(t).is_err())
    }

    /// Number of items shared with a document's topic set.
    pub fn overlap_with(&self, topics: &BTreeSet<TopicId>) -> usize {
        self.0.iter().filter(|t| topics.contains(*t)).count()
    }

    /// Union with another item-set.
    pub fn union(&self, other: &ItemSet) -> ItemSet {
        ItemSet::new(self.0.iter().chain(other.0.iter()).cloned())
    }

    /// All subsets of `self` with exactly one item removed.
    pub fn shrink_by_one(&self) -> Vec<ItemSet> {
        (0..self.0.len())
            .map(|skip| {
                ItemSet(
                    self.0
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != skip)
                        .map(|(_, t)| t.clone())
                        .collect(),
                )
            })
            .collect()
    }

    /// Natural identity: sorted items joined with `|`.
    pub fn storage_key(&self) -> String {
        self.0
            .iter()
            .map(TopicId::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl std::fmt::Display for ItemSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.storage_key().replace('|', ", "))
    }
}

impl FromIterator<TopicId> for ItemSet {
    fn from_iter<I: IntoIterator<Item = TopicId>>(iter: I) -> Self {
        Self::new(iter)
    }
}
