// Core algorithm exports
pub mod discount;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

use thiserror::Error;

pub use discount::DiscountPolicy;
pub use distance::haversine_distance;
pub use filters::{
    apply_filters, filter_statistics, unique_features, unique_locations, unique_property_types,
};
pub use matcher::{MatchOutcome, Matcher};
pub use scoring::{feature_score, location_score, price_score, type_score};

/// Malformed criteria rejected at the aggregator/filter boundary
///
/// The scoring primitives themselves are total functions; only the batch
/// entry points validate and only for inputs that would make the request
/// meaningless rather than merely empty.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("invalid budget interval: minimum {min} exceeds maximum {max}")]
    InvertedBudgetInterval { min: f64, max: f64 },

    #[error("budget values must be non-negative, got {0}")]
    NegativeBudget(f64),

    #[error("radius must be positive, got {0} km")]
    NonPositiveRadius(f64),
}
