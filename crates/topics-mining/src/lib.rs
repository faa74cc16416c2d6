//! # topics-mining
//!
//! Frequent-itemset and association-rule mining over document topic sets.
//!
//! Mining operates on a fully materialized snapshot of the collection's
//! topic sets: support for every enumerated combination, level-wise frequent
//! item-set selection, and directional rules with confidence and lift. The
//! anti-monotonicity property of support is verified as an invariant, not
//! assumed; a violation is a consistency fault and surfaces as an error.
//!
//! Documents whose topic set exceeds the combinatorial guard are skipped for
//! that run and reported, without aborting mining for the rest of the
//! collection.

pub mod combinations;
pub mod error;
pub mod miner;

pub use combinations::combinations_of;
pub use error::MiningError;
pub use miner::{MiningOutput, RuleMiner};
