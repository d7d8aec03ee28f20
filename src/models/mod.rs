// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Coordinates, EmptyReason, FilterCriteria, FilterStatistics, MatchCriteria, MatchWeights,
    Property, ScoredProperty,
};
pub use requests::{FilterRequest, RecommendRequest};
pub use responses::{FilterOptionsResponse, FilterResponse, PriceRange, RecommendResponse};
