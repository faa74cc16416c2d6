//! # topics-ontology
//!
//! Read-only index over a fixed hierarchical topic ontology.
//!
//! The index is built once from already-loaded [`TopicRecord`]s (parsing the
//! ontology file is the loader's job, not ours) and is never mutated
//! afterwards, so concurrent resolution across documents needs no locking.
//!
//! Matching is closed-world: [`OntologyIndex::resolve`] can only return topics
//! that exist in the index, and [`TopicMatch`] cannot be constructed anywhere
//! else. A term that matches nothing resolves to an empty list, never to an
//! invented topic.
//!
//! ## Matching policy
//! 1. Normalized-exact match on the canonical label (score 1.0)
//! 2. Normalized-exact match on an alternate label (score 1.0)
//! 3. Character-bigram Dice similarity above the configured minimum

pub mod error;
pub mod index;
pub mod normalize;
pub mod similarity;

pub use error::OntologyError;
pub use topics_types::OntologyConfig;
pub use index::{OntologyIndex, Topic, TopicMatch, TopicRecord};
pub use normalize::{canonical_form, normalize_label};
pub use similarity::bigram_dice;
