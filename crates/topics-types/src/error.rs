//! Configuration validation errors.

use thiserror::Error;

/// Rejected configuration, reported eagerly before any computation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A ratio parameter left the [0, 1] interval.
    #[error("{name} must be within [0, 1], got {value}")]
    RatioOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A count parameter was too small to be meaningful.
    #[error("{name} must be at least {min}, got {value}")]
    CountTooSmall {
        /// Parameter name.
        name: &'static str,
        /// Minimum accepted value.
        min: usize,
        /// Offending value.
        value: usize,
    },
}
