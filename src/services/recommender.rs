use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use crate::core::{
    apply_filters, filter_statistics, unique_features, unique_locations, unique_property_types,
    CriteriaError, Matcher,
};
use crate::models::{
    Coordinates, FilterCriteria, FilterOptionsResponse, FilterRequest, FilterResponse,
    MatchCriteria, PriceRange, RecommendRequest, RecommendResponse,
};
use crate::services::catalog::PropertyCatalog;
use crate::services::geocoder::{GeocodeError, NominatimGeocoder};

/// Errors surfaced to callers of the recommendation service
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error("geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),
}

/// Recommendation service tying the catalog, geocoder, and matcher together
///
/// Serves the three external operations: ranked recommendations, ad-hoc
/// filtering with statistics, and filter-option enumeration. Each call works
/// on its own catalog snapshot, so concurrent requests share no mutable
/// state.
pub struct Recommender {
    catalog: Arc<PropertyCatalog>,
    geocoder: Arc<NominatimGeocoder>,
    matcher: Matcher,
}

impl Recommender {
    pub fn new(
        catalog: Arc<PropertyCatalog>,
        geocoder: Arc<NominatimGeocoder>,
        matcher: Matcher,
    ) -> Self {
        Self {
            catalog,
            geocoder,
            matcher,
        }
    }

    /// Rank the catalog against the request and return the top matches
    ///
    /// An unresolvable center location produces an empty response with a
    /// reason, never an error; malformed requests are rejected before any
    /// work happens.
    pub async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<RecommendResponse, RecommendError> {
        request.validate()?;

        let center = self.resolve_center(request).await?;

        let criteria = MatchCriteria {
            selected_types: request.selected_types.clone(),
            selected_features: request.selected_features.clone(),
            min_budget: request.min_budget,
            max_budget: request.max_budget,
            center,
            radius_km: request.radius_km,
            weights: request.weights,
        };

        let snapshot = self.catalog.snapshot();
        let outcome = self.matcher.rank_properties(&snapshot, &criteria)?;

        Ok(RecommendResponse {
            matches: outcome.matches,
            total_candidates: outcome.total_candidates,
            reason: outcome.reason,
        })
    }

    /// Direct coordinates win over a place name; a place name the geocoder
    /// cannot resolve becomes `None` rather than an error.
    async fn resolve_center(
        &self,
        request: &RecommendRequest,
    ) -> Result<Option<Coordinates>, RecommendError> {
        if let Some(coordinates) = request.center_coordinates {
            return Ok(Some(coordinates));
        }

        let Some(place) = &request.center_location else {
            return Ok(None);
        };

        match self.geocoder.geocode(place).await {
            Ok(coordinates) => Ok(Some(coordinates)),
            Err(GeocodeError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Filter the catalog and attach descriptive statistics
    pub fn filter(&self, request: &FilterRequest) -> Result<FilterResponse, RecommendError> {
        request.validate()?;

        let criteria = FilterCriteria {
            budget_range: request.budget_range,
            features: request.features.clone(),
            property_types: request.property_types.clone(),
            locations: request.locations.clone(),
            case_sensitive: request.case_sensitive,
        };

        let snapshot = self.catalog.snapshot();
        let properties = apply_filters(&snapshot, &criteria)?;
        let statistics = filter_statistics(&properties);

        Ok(FilterResponse {
            count: properties.len(),
            properties,
            statistics,
        })
    }

    /// Enumerate filter options over the full catalog, independent of any
    /// active filter
    pub fn filter_options(&self) -> FilterOptionsResponse {
        let snapshot = self.catalog.snapshot();

        let price_range = if snapshot.is_empty() {
            PriceRange { min: 0.0, max: 0.0 }
        } else {
            PriceRange {
                min: snapshot
                    .iter()
                    .map(|p| p.nightly_price)
                    .fold(f64::INFINITY, f64::min),
                max: snapshot
                    .iter()
                    .map(|p| p.nightly_price)
                    .fold(f64::NEG_INFINITY, f64::max),
            }
        };

        FilterOptionsResponse {
            features: unique_features(&snapshot, false),
            property_types: unique_property_types(&snapshot, false),
            locations: unique_locations(&snapshot, false),
            price_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Property;
    use crate::services::catalog::InMemorySource;

    fn create_property(id: u32, property_type: &str, price: f64, features: &[&str]) -> Property {
        Property {
            id,
            location: "Toronto".to_string(),
            property_type: property_type.to_string(),
            nightly_price: price,
            features: features.iter().map(|f| f.to_string()).collect(),
            tags: vec![],
            image_url: None,
            image_alt: None,
            latitude: Some(43.65),
            longitude: Some(-79.38),
        }
    }

    fn create_recommender(properties: Vec<Property>, geocoder_url: String) -> Recommender {
        let catalog = Arc::new(PropertyCatalog::new());
        catalog.reload(&InMemorySource::new(properties)).unwrap();

        let geocoder = Arc::new(NominatimGeocoder::new(
            geocoder_url,
            Some("Canada".to_string()),
            5,
            "stay-match-tests/0.1",
        ));

        Recommender::new(catalog, geocoder, Matcher::with_defaults())
    }

    fn direct_center_request() -> RecommendRequest {
        serde_json::from_str(
            r#"{
                "center_coordinates": {"latitude": 43.65, "longitude": -79.38},
                "radius_km": 10.0,
                "min_budget": 100.0,
                "max_budget": 200.0,
                "selected_types": ["Condo"],
                "selected_features": ["WiFi"]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_recommend_with_direct_coordinates_skips_geocoder() {
        // Unroutable geocoder URL proves no request is made
        let recommender = create_recommender(
            vec![create_property(1, "Condo", 180.0, &["WiFi", "Pool"])],
            "http://127.0.0.1:1".to_string(),
        );

        let response = recommender.recommend(&direct_center_request()).await.unwrap();

        assert_eq!(response.matches.len(), 1);
        assert_eq!(response.matches[0].total_score, 1.0);
        assert!(response.reason.is_none());
    }

    #[tokio::test]
    async fn test_recommend_unresolvable_place_is_empty_with_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let recommender = create_recommender(
            vec![create_property(1, "Condo", 180.0, &["WiFi"])],
            server.url(),
        );

        let mut request = direct_center_request();
        request.center_coordinates = None;
        request.center_location = Some("Nowhereville".to_string());

        let response = recommender.recommend(&request).await.unwrap();

        assert!(response.matches.is_empty());
        assert_eq!(
            response.reason,
            Some(crate::models::EmptyReason::CenterNotResolved)
        );
    }

    #[tokio::test]
    async fn test_recommend_rejects_invalid_request() {
        let recommender = create_recommender(vec![], "http://127.0.0.1:1".to_string());

        let mut request = direct_center_request();
        request.min_budget = 500.0;

        let result = recommender.recommend(&request).await;
        assert!(matches!(result, Err(RecommendError::Validation(_))));
    }

    #[tokio::test]
    async fn test_filter_returns_subset_and_statistics() {
        let recommender = create_recommender(
            vec![
                create_property(1, "Cabin", 200.0, &["WiFi", "Hot Tub"]),
                create_property(2, "Apartment", 150.0, &["WiFi"]),
            ],
            "http://127.0.0.1:1".to_string(),
        );

        let request = FilterRequest {
            budget_range: Some((100.0, 250.0)),
            features: vec!["WiFi".to_string()],
            property_types: vec!["Cabin".to_string()],
            ..Default::default()
        };

        let response = recommender.filter(&request).unwrap();

        assert_eq!(response.count, 1);
        assert_eq!(response.properties[0].id, 1);
        assert_eq!(response.statistics.total_properties, 1);
        assert_eq!(response.statistics.price_range, (200.0, 200.0));
    }

    #[tokio::test]
    async fn test_filter_options_cover_full_catalog() {
        let recommender = create_recommender(
            vec![
                create_property(1, "Cabin", 200.0, &["WiFi", "Hot Tub"]),
                create_property(2, "Apartment", 150.0, &["WiFi"]),
            ],
            "http://127.0.0.1:1".to_string(),
        );

        let options = recommender.filter_options();

        assert_eq!(options.property_types, vec!["apartment", "cabin"]);
        assert_eq!(options.features, vec!["hot tub", "wifi"]);
        assert_eq!(options.price_range.min, 150.0);
        assert_eq!(options.price_range.max, 200.0);
    }
}
