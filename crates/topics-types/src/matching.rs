//! Match method classification for ontology resolution.

use serde::{Deserialize, Serialize};

/// How a candidate term was matched against the ontology.
///
/// Methods have a total priority order used to break score ties:
/// exact > alternate-label > fuzzy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    /// Case-insensitive match on the canonical label.
    Exact,
    /// Exact match on one of the alternate labels.
    AlternateLabel,
    /// Fuzzy string similarity above the configured minimum.
    Fuzzy,
}

impl MatchMethod {
    /// Priority rank, lower is better.
    pub fn priority(&self) -> u8 {
        match self {
            MatchMethod::Exact => 0,
            MatchMethod::AlternateLabel => 1,
            MatchMethod::Fuzzy => 2,
        }
    }

    /// Get short code for storage keys.
    pub fn code(&self) -> &'static str {
        match self {
            MatchMethod::Exact => "exact",
            MatchMethod::AlternateLabel => "alt",
            MatchMethod::Fuzzy => "fuzzy",
        }
    }
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMethod::Exact => write!(f, "exact"),
            MatchMethod::AlternateLabel => write!(f, "alternate-label"),
            MatchMethod::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(MatchMethod::Exact.priority() < MatchMethod::AlternateLabel.priority());
        assert!(MatchMethod::AlternateLabel.priority() < MatchMethod::Fuzzy.priority());
    }

    #[test]
    fn test_display() {
        assert_eq!(MatchMethod::Exact.to_string(), "exact");
        assert_eq!(MatchMethod::AlternateLabel.to_string(), "alternate-label");
        assert_eq!(MatchMethod::Fuzzy.to_string(), "fuzzy");
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&MatchMethod::AlternateLabel).unwrap();
        assert_eq!(json, "\"alternate-label\"");
    }
}
