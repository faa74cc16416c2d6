//! Mining error types.

use thiserror::Error;
use topics_types::ConfigError;

/// Errors that can occur while mining rules.
#[derive(Debug, Error)]
pub enum MiningError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A frequent item-set has a non-frequent or higher-support subset.
    /// Indicates broken upstream data, not bad input.
    #[error("anti-monotonicity violated: {item_set} is frequent but subset {subset} is not")]
    AntiMonotonicityViolation {
        /// The offending frequent item-set (storage key form).
        item_set: String,
        /// The subset that should have been frequent.
        subset: String,
    },

    /// A rule antecedent has zero observed support, which is impossible for
    /// a frequent item-set. Fatal data-consistency fault.
    #[error("zero support for antecedent {0} of a frequent item-set")]
    ZeroAntecedentSupport(String),
}
