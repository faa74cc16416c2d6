//! Resolver error types.

use thiserror::Error;
use topics_types::ConfigError;

/// Errors that can occur during topic resolution.
///
/// Malformed candidate input is NOT represented here: input faults resolve
/// locally to empty results and a log line.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Upstream term source failure
    #[error("term source error: {0}")]
    Source(String),
}
