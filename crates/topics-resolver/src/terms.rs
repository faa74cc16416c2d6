//! Candidate terms and validation of the upstream JSON payload.
//!
//! The upstream extractor replies with loosely-typed JSON; everything is
//! funneled through [`parse_candidate_terms`], which keeps only well-formed
//! entries. Malformed entries are filtered with a log line, never passed
//! through and never raised as errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A free-text candidate term proposed for one document.
///
/// Transient: exists only between extraction and resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTerm {
    /// Raw term text.
    pub text: String,
    /// Optional upstream relevance/rank signal.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl CandidateTerm {
    /// Create a candidate term without an upstream signal.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: None,
        }
    }

    /// Create a candidate term with an upstream relevance signal.
    pub fn with_weight(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight: Some(weight),
        }
    }
}

/// Validate the upstream payload into candidate terms.
///
/// Accepted shapes, per array element:
/// - a plain string: `"neural networks"`
/// - an object with a `term` or `text` field and an optional numeric
///   `score` or `weight`: `{"term": "lstm", "score": 0.82}`
///
/// Anything else (non-array payloads included) yields zero candidates.
pub fn parse_candidate_terms(payload: &Value) -> Vec<CandidateTerm> {
    let Some(entries) = payload.as_array() else {
        if !payload.is_null() {
            warn!("candidate payload is not an array, treating as zero candidates");
        }
        return Vec::new();
    };

    let mut terms = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::String(text) if !text.trim().is_empty() => {
                terms.push(CandidateTerm::new(text.trim()));
            }
            Value::Object(fields) => {
                let text = fields
                    .get("term")
                    .or_else(|| fields.get("text"))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|t| !t.is_empty());
                match text {
                    Some(text) => {
                        let weight = fields
                            .get("score")
                            .or_else(|| fields.get("weight"))
                            .and_then(Value::as_f64);
                        terms.push(CandidateTerm {
                            text: text.to_string(),
                            weight,
                        });
                    }
                    None => warn!("dropping candidate object without a usable term field"),
                }
            }
            _ => warn!("dropping malformed candidate entry"),
        }
    }
    terms
}

/// Whether a term is too short or too common to be worth matching.
pub fn is_stop_term(term: &str) -> bool {
    const STOP_TERMS: &[&str] = &[
        "the", "and", "for", "with", "are", "this", "that", "from", "been", "have", "will",
        "can", "may", "use", "used", "using",
    ];
    let trimmed = term.trim();
    trimmed.len() < 3 || STOP_TERMS.contains(&trimmed.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_strings() {
        let payload = json!(["neural networks", "machine learning"]);
        let terms = parse_candidate_terms(&payload);
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].text, "neural networks");
        assert_eq!(terms[0].weight, None);
    }

    #[test]
    fn test_parse_objects_with_scores() {
        let payload = json!([{"term": "lstm", "score": 0.82}, {"text": "svm", "weight": 0.5}]);
        let terms = parse_candidate_terms(&payload);
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].weight, Some(0.82));
        assert_eq!(terms[1].text, "svm");
        assert_eq!(terms[1].weight, Some(0.5));
    }

    #[test]
    fn test_malformed_entries_filtered() {
        let payload = json!([
            "valid term",
            42,
            {"no_term_field": true},
            {"term": "   "},
            null,
            ["nested"]
        ]);
        let terms = parse_candidate_terms(&payload);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].text, "valid term");
    }

    #[test]
    fn test_non_array_payload_is_zero_candidates() {
        assert!(parse_candidate_terms(&json!({"terms": ["a"]})).is_empty());
        assert!(parse_candidate_terms(&json!("just a string")).is_empty());
        assert!(parse_candidate_terms(&Value::Null).is_empty());
    }

    #[test]
    fn test_whitespace_trimmed() {
        let payload = json!(["  deep learning  "]);
        let terms = parse_candidate_terms(&payload);
        assert_eq!(terms[0].text, "deep learning");
    }

    #[test]
    fn test_is_stop_term() {
        assert!(is_stop_term("the"));
        assert!(is_stop_term("USING"));
        assert!(is_stop_term("ml")); // too short
        assert!(!is_stop_term("machine learning"));
        assert!(!is_stop_term("svm"));
    }
}
