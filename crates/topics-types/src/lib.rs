//! # topics-types
//!
//! Shared domain types for the topic recommender.
//!
//! This crate defines the data structures that flow between the pipeline
//! stages (ontology resolution, rule mining, recommendation scoring):
//! - Identifiers: [`TopicId`], [`DocumentId`]
//! - Resolution: [`MatchMethod`]
//! - Transactions: [`TopicSet`], [`ItemSet`]
//! - Mined facts: [`FrequentItemSet`], [`AssociationRule`]
//! - Output: [`Recommendation`], [`Recommendations`]
//! - Configuration: [`ResolverConfig`], [`MiningConfig`], [`RecommendConfig`]
//!
//! Derived facts (`FrequentItemSet`, `AssociationRule`) expose a
//! `storage_key()` built from their natural identity so an external store can
//! upsert them idempotently. None of them carry timestamps: re-running a stage
//! on unchanged inputs must produce byte-identical records.

pub mod config;
pub mod error;
pub mod ids;
pub mod matching;
pub mod ranking;
pub mod rules;
pub mod sets;

pub use config::{MiningConfig, OntologyConfig, RecommendConfig, ResolverConfig, WeightPolicy};
pub use error::ConfigError;
pub use ids::{DocumentId, TopicId};
pub use matching::MatchMethod;
pub use ranking::{Recommendation, Recommendations};
pub use rules::{AssociationRule, FrequentItemSet};
pub use sets::{ItemSet, TopicSet};
