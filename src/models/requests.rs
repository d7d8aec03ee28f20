use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{Coordinates, MatchWeights};

/// Request for ranked recommendations
///
/// The center may be given either as a free-text place name (resolved via the
/// geocoder) or as direct coordinates; coordinates take precedence when both
/// are present.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_recommend_request"))]
pub struct RecommendRequest {
    #[serde(default)]
    pub center_location: Option<String>,
    #[serde(default)]
    pub center_coordinates: Option<Coordinates>,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub min_budget: f64,
    #[validate(range(min = 0.0))]
    #[serde(default = "default_max_budget")]
    pub max_budget: f64,
    #[serde(default)]
    pub selected_types: Vec<String>,
    #[serde(default)]
    pub selected_features: Vec<String>,
    #[serde(flatten)]
    pub weights: MatchWeights,
}

fn default_radius_km() -> f64 {
    50.0
}

fn default_max_budget() -> f64 {
    1000.0
}

fn validate_recommend_request(request: &RecommendRequest) -> Result<(), ValidationError> {
    if request.center_location.is_none() && request.center_coordinates.is_none() {
        return Err(ValidationError::new("missing_center"));
    }
    if request.radius_km <= 0.0 {
        return Err(ValidationError::new("non_positive_radius"));
    }
    if request.min_budget > request.max_budget {
        return Err(ValidationError::new("inverted_budget_interval"));
    }
    Ok(())
}

/// Request to filter the catalog by arbitrary criteria
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_filter_request"))]
pub struct FilterRequest {
    #[serde(default)]
    pub budget_range: Option<(f64, f64)>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub property_types: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub case_sensitive: bool,
}

fn validate_filter_request(request: &FilterRequest) -> Result<(), ValidationError> {
    if let Some((min_budget, max_budget)) = request.budget_range {
        if min_budget < 0.0 {
            return Err(ValidationError::new("negative_budget"));
        }
        if min_budget > max_budget {
            return Err(ValidationError::new("inverted_budget_interval"));
        }
    }
    Ok(())
}
