//! Pipeline configuration.
//!
//! Every stage takes its configuration as an explicit value; there is no
//! process-wide state. All structs deserialize with per-field defaults so a
//! partial config file is enough, and each has an eager `validate()` that
//! rejects out-of-range parameters before anything is computed.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn ratio(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::RatioOutOfRange { name, value });
    }
    Ok(())
}

fn at_least(name: &'static str, min: usize, value: usize) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::CountTooSmall { name, min, value });
    }
    Ok(())
}

/// Ontology matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyConfig {
    /// Minimum fuzzy similarity for a label match to be reported at all.
    #[serde(default = "default_min_fuzzy_similarity")]
    pub min_fuzzy_similarity: f64,

    /// Maximum hierarchy depth kept in the index (root = depth 1).
    /// `None` keeps the whole hierarchy.
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<u32>,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            min_fuzzy_similarity: default_min_fuzzy_similarity(),
            max_depth: default_max_depth(),
        }
    }
}

impl OntologyConfig {
    /// Reject out-of-range parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ratio("min_fuzzy_similarity", self.min_fuzzy_similarity)?;
        if let Some(depth) = self.max_depth {
            at_least("max_depth", 1, depth as usize)?;
        }
        Ok(())
    }
}

fn default_min_fuzzy_similarity() -> f64 {
    0.6
}
fn default_max_depth() -> Option<u32> {
    Some(4)
}

/// Topic resolution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Minimum confidence for an assignment to be retained.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Maximum assignments retained per document, highest confidence first.
    #[serde(default = "default_top_k_map_each")]
    pub top_k_map_each: usize,

    /// Maximum distinct candidate terms considered per document,
    /// applied before any matching.
    #[serde(default = "default_max_topics_in_prompt")]
    pub max_topics_in_prompt: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            top_k_map_each: default_top_k_map_each(),
            max_topics_in_prompt: default_max_topics_in_prompt(),
        }
    }
}

impl ResolverConfig {
    /// Reject out-of-range parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ratio("min_confidence", self.min_confidence)?;
        at_least("top_k_map_each", 1, self.top_k_map_each)?;
        at_least("max_topics_in_prompt", 1, self.max_topics_in_prompt)?;
        Ok(())
    }
}

fn default_min_confidence() -> f64 {
    0.85
}
fn default_top_k_map_each() -> usize {
    5
}
fn default_max_topics_in_prompt() -> usize {
    100
}

/// Rule mining configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Minimum support ratio for an item-set to count as frequent.
    #[serde(default = "default_min_support")]
    pub min_support: f64,

    /// Minimum confidence for a rule to be retained.
    #[serde(default = "default_min_confidence_rule")]
    pub min_confidence: f64,

    /// Largest combination size enumerated per document.
    #[serde(default = "default_max_combination_size")]
    pub max_combination_size: usize,

    /// Largest topic set admitted into mining. Documents above this bound are
    /// skipped for that run; the guard keeps subset enumeration from blowing
    /// up combinatorially.
    #[serde(default = "default_max_topic_set_size")]
    pub max_topic_set_size: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: default_min_support(),
            min_confidence: default_min_confidence_rule(),
            max_combination_size: default_max_combination_size(),
            max_topic_set_size: default_max_topic_set_size(),
        }
    }
}

impl MiningConfig {
    /// Reject out-of-range parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ratio("min_support", self.min_support)?;
        ratio("min_confidence", self.min_confidence)?;
        at_least("max_combination_size", 2, self.max_combination_size)?;
        at_least("max_topic_set_size", 2, self.max_topic_set_size)?;
        Ok(())
    }
}

fn default_min_support() -> f64 {
    0.2
}
fn default_min_confidence_rule() -> f64 {
    0.7
}
fn default_max_combination_size() -> usize {
    4
}
fn default_max_topic_set_size() -> usize {
    12
}

/// How confidence and lift combine into one rule weight.
///
/// Every policy is monotonic in both factors: a stronger rule never
/// contributes less.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WeightPolicy {
    /// `confidence * lift`, the default.
    #[default]
    ConfidenceTimesLift,
    /// Confidence alone, ignoring lift.
    ConfidenceOnly,
}

impl WeightPolicy {
    /// Combine a rule's confidence and lift into a single weight.
    pub fn weight(&self, confidence: f64, lift: f64) -> f64 {
        match self {
            WeightPolicy::ConfidenceTimesLift => confidence * lift,
            WeightPolicy::ConfidenceOnly => confidence,
        }
    }
}

/// Recommendation scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Drop the query documents themselves from the ranking.
    #[serde(default = "default_true")]
    pub exclude_query: bool,

    /// Confidence/lift combination function.
    #[serde(default)]
    pub weight_policy: WeightPolicy,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            exclude_query: default_true(),
            weight_policy: WeightPolicy::default(),
        }
    }
}

fn default_true() -> bool {
    true
}
