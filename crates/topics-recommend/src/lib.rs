//! # topics-recommend
//!
//! Rule-driven document recommendations.
//!
//! Scoring is a pure fold over previously mined association rules: the query
//! documents' topics are unioned into one query set, every rule whose
//! antecedent is contained in that set fires, and each fired rule credits
//! candidate documents in proportion to how much of its consequent they
//! cover. No ranking state is kept between calls and no randomness is
//! involved, so the same inputs always produce the same ranking.

pub mod scorer;

pub use scorer::RecommendationScorer;
