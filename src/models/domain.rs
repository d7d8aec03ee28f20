use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A rental property listing
///
/// One canonical record shape regardless of which schema-migration stage the
/// row came from: fields that older rows lack (coordinates, image metadata)
/// are explicit `Option`s populated by the storage adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "property_id")]
    pub id: u32,
    pub location: String,
    #[serde(alias = "ptype")]
    pub property_type: String,
    pub nightly_price: f64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Property {
    /// Both coordinates, if the property has been geocoded
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

/// Per-dimension scoring weights
///
/// Unsigned so non-negativity holds by construction. Conventionally 1-10,
/// but any values are accepted; an all-zero set falls back to an unweighted
/// average in the aggregator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchWeights {
    #[serde(rename = "location_weight", default = "default_weight")]
    pub location: u32,
    #[serde(rename = "type_weight", default = "default_weight")]
    pub property_type: u32,
    #[serde(rename = "features_weight", default = "default_weight")]
    pub features: u32,
    #[serde(rename = "price_weight", default = "default_weight")]
    pub price: u32,
}

fn default_weight() -> u32 {
    1
}

impl MatchWeights {
    pub fn sum(&self) -> u32 {
        self.location + self.property_type + self.features + self.price
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            location: 1,
            property_type: 1,
            features: 1,
            price: 1,
        }
    }
}

/// Resolved per-request matching criteria
///
/// `center` is already geocoded by the caller; `None` means the center
/// location could not be resolved, which yields an empty ranking rather
/// than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCriteria {
    #[serde(default)]
    pub selected_types: Vec<String>,
    #[serde(default)]
    pub selected_features: Vec<String>,
    pub min_budget: f64,
    pub max_budget: f64,
    pub center: Option<Coordinates>,
    pub radius_km: f64,
    #[serde(default)]
    pub weights: MatchWeights,
}

/// A property with its four dimension scores and weighted total, all in [0,1]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProperty {
    #[serde(flatten)]
    pub property: Property,
    pub type_score: f64,
    pub features_score: f64,
    pub location_score: f64,
    pub price_score: f64,
    pub total_score: f64,
}

/// Machine-readable explanation for an empty ranking result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    CenterNotResolved,
    NoProperties,
}

/// Catalog filter criteria; every criterion is optional and an empty one
/// leaves the collection unfiltered on that dimension
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
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

/// Descriptive statistics over a filtered subset
///
/// Frequency tables are ordered by count descending, then name, so responses
/// are reproducible run to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterStatistics {
    pub total_properties: usize,
    pub avg_price: f64,
    pub price_range: (f64, f64),
    pub feature_counts: Vec<(String, usize)>,
    pub type_counts: Vec<(String, usize)>,
    pub location_counts: Vec<(String, usize)>,
}

impl FilterStatistics {
    /// The defined result for an empty subset
    pub fn empty() -> Self {
        Self {
            total_properties: 0,
            avg_price: 0.0,
            price_range: (0.0, 0.0),
            feature_counts: Vec::new(),
            type_counts: Vec::new(),
            location_counts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_require_both_fields() {
        let mut property = Property {
            id: 1,
            location: "Banff".to_string(),
            property_type: "Cabin".to_string(),
            nightly_price: 200.0,
            features: vec![],
            tags: vec![],
            image_url: None,
            image_alt: None,
            latitude: Some(51.18),
            longitude: None,
        };
        assert!(property.coordinates().is_none());

        property.longitude = Some(-115.57);
        let coords = property.coordinates().unwrap();
        assert_eq!(coords.latitude, 51.18);
        assert_eq!(coords.longitude, -115.57);
    }

    #[test]
    fn test_property_deserializes_legacy_ptype_column() {
        let json = r#"{
            "property_id": 7,
            "location": "Toronto",
            "ptype": "Condo",
            "nightly_price": 180.0,
            "features": ["WiFi"]
        }"#;

        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.id, 7);
        assert_eq!(property.property_type, "Condo");
        assert!(property.tags.is_empty());
        assert!(property.coordinates().is_none());
    }

    #[test]
    fn test_default_weights_are_uniform() {
        let weights = MatchWeights::default();
        assert_eq!(weights.sum(), 4);
    }
}
