//! # topics-resolver
//!
//! Maps noisy candidate terms onto canonical ontology topics.
//!
//! Candidate terms come from an upstream extractor (a generative model in the
//! original system); they arrive as loosely-typed JSON and are validated into
//! [`CandidateTerm`]s before any matching. Resolution itself is a pure
//! function over the read-only [`topics_ontology::OntologyIndex`]: independent
//! documents can be resolved concurrently without coordination.
//!
//! The confidence policy trades recall for precision: per term only the best
//! ontology match survives, anything under `min_confidence` is dropped, and a
//! document keeps at most `top_k_map_each` assignments. A document resolving
//! to zero topics is a reported condition, not an error.

pub mod error;
pub mod resolver;
pub mod source;
pub mod terms;

pub use error::ResolverError;
pub use resolver::{to_topic_set, ResolvedAssignment, TopicResolver};
pub use source::{NoOpTermSource, TermSource};
pub use terms::{parse_candidate_terms, CandidateTerm};
