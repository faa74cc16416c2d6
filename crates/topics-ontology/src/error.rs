//! Ontology index errors.

use thiserror::Error;
use topics_types::ConfigError;

/// Errors raised while building or querying the ontology index.
#[derive(Debug, Error)]
pub enum OntologyError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Two records carry the same topic id
    #[error("duplicate topic id: {0}")]
    DuplicateId(String),

    /// A record names a parent that is not in the ontology
    #[error("topic {topic} references unknown parent {parent}")]
    UnknownParent {
        /// Child topic id.
        topic: String,
        /// Missing parent id.
        parent: String,
    },

    /// The parent chain of a topic loops back on itself
    #[error("cycle detected in parent chain of topic {0}")]
    CycleDetected(String),

    /// A record carries an empty canonical label
    #[error("topic {0} has an empty label")]
    EmptyLabel(String),
}
