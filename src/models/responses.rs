use serde::{Deserialize, Serialize};

use crate::models::domain::{EmptyReason, FilterStatistics, Property, ScoredProperty};

/// Response for the recommendation operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub matches: Vec<ScoredProperty>,
    pub total_candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<EmptyReason>,
}

/// Response for the filter operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterResponse {
    pub properties: Vec<Property>,
    pub count: usize,
    pub statistics: FilterStatistics,
}

/// Observed price interval across the full catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Available filter options, used to populate caller-side option lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    pub features: Vec<String>,
    pub property_types: Vec<String>,
    pub locations: Vec<String>,
    pub price_range: PriceRange,
}
