//! Stay Match - property matching and filtering engine for vacation rentals
//!
//! This library provides the scoring and filtering core used by the rental
//! recommendation service: per-dimension attribute scorers, a weighted
//! aggregator that ranks a property catalog, and a multi-criterion filter
//! with descriptive statistics.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use self::core::{haversine_distance, CriteriaError, DiscountPolicy, MatchOutcome, Matcher};
pub use models::{
    Coordinates, EmptyReason, FilterCriteria, FilterStatistics, MatchCriteria, MatchWeights,
    Property, ScoredProperty,
};
pub use services::{PropertyCatalog, Recommender};
