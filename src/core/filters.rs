use std::collections::HashMap;

use crate::core::CriteriaError;
use crate::models::{FilterCriteria, FilterStatistics, Property};

/// Frequency tables report at most this many features
const TOP_FEATURE_COUNT: usize = 10;

#[inline]
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Inclusive budget interval test on the nightly price
pub fn filter_by_budget(properties: &[Property], min_budget: f64, max_budget: f64) -> Vec<Property> {
    let filtered: Vec<Property> = properties
        .iter()
        .filter(|p| p.nightly_price >= min_budget && p.nightly_price <= max_budget)
        .cloned()
        .collect();

    tracing::debug!(
        "Budget filter: {} properties match {}-{}",
        filtered.len(),
        min_budget,
        max_budget
    );
    filtered
}

/// Existential feature match: at least one selected feature must be present
///
/// Weaker than the feature *scorer*'s fractional-overlap rule, and that is
/// intentional: filtering answers "could this listing possibly qualify",
/// scoring answers "how well does it fit".
pub fn filter_by_features(
    properties: &[Property],
    selected_features: &[String],
    case_sensitive: bool,
) -> Vec<Property> {
    if selected_features.is_empty() {
        return properties.to_vec();
    }

    let selected: Vec<String> = if case_sensitive {
        selected_features.to_vec()
    } else {
        selected_features.iter().map(|f| normalize(f)).collect()
    };

    let filtered: Vec<Property> = properties
        .iter()
        .filter(|p| {
            if case_sensitive {
                p.features.iter().any(|f| selected.contains(f))
            } else {
                p.features.iter().any(|f| selected.contains(&normalize(f)))
            }
        })
        .cloned()
        .collect();

    tracing::debug!(
        "Feature filter: {} properties match {:?}",
        filtered.len(),
        selected
    );
    filtered
}

/// Membership test of the property type in the selected set
pub fn filter_by_property_type(
    properties: &[Property],
    selected_types: &[String],
    case_sensitive: bool,
) -> Vec<Property> {
    if selected_types.is_empty() {
        return properties.to_vec();
    }

    let selected: Vec<String> = if case_sensitive {
        selected_types.to_vec()
    } else {
        selected_types.iter().map(|t| normalize(t)).collect()
    };

    let filtered: Vec<Property> = properties
        .iter()
        .filter(|p| {
            if case_sensitive {
                selected.contains(&p.property_type)
            } else {
                selected.contains(&normalize(&p.property_type))
            }
        })
        .cloned()
        .collect();

    tracing::debug!(
        "Type filter: {} properties match {:?}",
        filtered.len(),
        selected
    );
    filtered
}

/// Membership test of the property location in the selected set
pub fn filter_by_location(
    properties: &[Property],
    selected_locations: &[String],
    case_sensitive: bool,
) -> Vec<Property> {
    if selected_locations.is_empty() {
        return properties.to_vec();
    }

    let selected: Vec<String> = if case_sensitive {
        selected_locations.to_vec()
    } else {
        selected_locations.iter().map(|l| normalize(l)).collect()
    };

    let filtered: Vec<Property> = properties
        .iter()
        .filter(|p| {
            if case_sensitive {
                selected.contains(&p.location)
            } else {
                selected.contains(&normalize(&p.location))
            }
        })
        .cloned()
        .collect();

    tracing::debug!(
        "Location filter: {} properties match {:?}",
        filtered.len(),
        selected
    );
    filtered
}

/// Apply every supplied criterion as an intersection (AND)
///
/// Absent or empty criteria pass the collection through untouched, input
/// order is preserved, and filtering an already-filtered subset with the
/// same criteria is a no-op.
pub fn apply_filters(
    properties: &[Property],
    criteria: &FilterCriteria,
) -> Result<Vec<Property>, CriteriaError> {
    let mut filtered = properties.to_vec();

    if let Some((min_budget, max_budget)) = criteria.budget_range {
        if min_budget < 0.0 {
            return Err(CriteriaError::NegativeBudget(min_budget));
        }
        if min_budget > max_budget {
            return Err(CriteriaError::InvertedBudgetInterval {
                min: min_budget,
                max: max_budget,
            });
        }
        filtered = filter_by_budget(&filtered, min_budget, max_budget);
    }

    if !criteria.features.is_empty() {
        filtered = filter_by_features(&filtered, &criteria.features, criteria.case_sensitive);
    }

    if !criteria.property_types.is_empty() {
        filtered = filter_by_property_type(
            &filtered,
            &criteria.property_types,
            criteria.case_sensitive,
        );
    }

    if !criteria.locations.is_empty() {
        filtered = filter_by_location(&filtered, &criteria.locations, criteria.case_sensitive);
    }

    tracing::info!(
        "Combined filters applied: {} of {} properties remain",
        filtered.len(),
        properties.len()
    );
    Ok(filtered)
}

/// Descriptive statistics over an already-filtered subset
///
/// An empty subset yields the defined all-zero result rather than dividing
/// by zero on the mean.
pub fn filter_statistics(filtered: &[Property]) -> FilterStatistics {
    if filtered.is_empty() {
        return FilterStatistics::empty();
    }

    let count = filtered.len();
    let total: f64 = filtered.iter().map(|p| p.nightly_price).sum();
    let min_price = filtered
        .iter()
        .map(|p| p.nightly_price)
        .fold(f64::INFINITY, f64::min);
    let max_price = filtered
        .iter()
        .map(|p| p.nightly_price)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut feature_counts =
        count_values(filtered.iter().flat_map(|p| p.features.iter().cloned()));
    feature_counts.truncate(TOP_FEATURE_COUNT);

    let type_counts = count_values(filtered.iter().map(|p| p.property_type.clone()));
    let location_counts = count_values(filtered.iter().map(|p| p.location.clone()));

    FilterStatistics {
        total_properties: count,
        avg_price: total / count as f64,
        price_range: (min_price, max_price),
        feature_counts,
        type_counts,
        location_counts,
    }
}

/// Frequency table ordered by count descending, then name, for determinism
fn count_values(values: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut table: Vec<(String, usize)> = counts.into_iter().collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    table
}

/// Sorted, de-duplicated feature values across the full collection
pub fn unique_features(properties: &[Property], case_sensitive: bool) -> Vec<String> {
    unique_values(
        properties.iter().flat_map(|p| p.features.iter()),
        case_sensitive,
    )
}

/// Sorted, de-duplicated property types across the full collection
pub fn unique_property_types(properties: &[Property], case_sensitive: bool) -> Vec<String> {
    unique_values(properties.iter().map(|p| &p.property_type), case_sensitive)
}

/// Sorted, de-duplicated locations across the full collection
pub fn unique_locations(properties: &[Property], case_sensitive: bool) -> Vec<String> {
    unique_values(properties.iter().map(|p| &p.location), case_sensitive)
}

fn unique_values<'a>(
    values: impl Iterator<Item = &'a String>,
    case_sensitive: bool,
) -> Vec<String> {
    let mut unique: Vec<String> = values
        .map(|v| {
            if case_sensitive {
                v.clone()
            } else {
                normalize(v)
            }
        })
        .collect();
    unique.sort();
    unique.dedup();
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_property(
        id: u32,
        location: &str,
        property_type: &str,
        price: f64,
        features: &[&str],
    ) -> Property {
        Property {
            id,
            location: location.to_string(),
            property_type: property_type.to_string(),
            nightly_price: price,
            features: features.iter().map(|f| f.to_string()).collect(),
            tags: vec![],
            image_url: None,
            image_alt: None,
            latitude: None,
            longitude: None,
        }
    }

    fn sample_catalog() -> Vec<Property> {
        vec![
            create_property(1, "Banff", "Cabin", 200.0, &["WiFi", "Hot Tub", "Mountain View"]),
            create_property(2, "Vancouver", "Apartment", 150.0, &["WiFi", "Balcony", "City View"]),
            create_property(3, "Toronto", "Condo", 180.0, &["WiFi", "Pool"]),
        ]
    }

    #[test]
    fn test_combined_filters_intersect() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria {
            budget_range: Some((100.0, 250.0)),
            features: vec!["WiFi".to_string()],
            property_types: vec!["Cabin".to_string()],
            ..Default::default()
        };

        let filtered = apply_filters(&catalog, &criteria).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let catalog = sample_catalog();
        let filtered = apply_filters(&catalog, &FilterCriteria::default()).unwrap();

        let ids: Vec<u32> = filtered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria {
            budget_range: Some((150.0, 200.0)),
            features: vec!["wifi".to_string()],
            ..Default::default()
        };

        let once = apply_filters(&catalog, &criteria).unwrap();
        let twice = apply_filters(&once, &criteria).unwrap();

        let once_ids: Vec<u32> = once.iter().map(|p| p.id).collect();
        let twice_ids: Vec<u32> = twice.iter().map(|p| p.id).collect();
        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn test_feature_filter_is_existential() {
        let catalog = sample_catalog();
        // "Pool" only appears on the Condo; "Hot Tub" only on the Cabin.
        // One shared feature is enough to survive.
        let filtered = filter_by_features(
            &catalog,
            &["Pool".to_string(), "Hot Tub".to_string()],
            false,
        );

        let ids: Vec<u32> = filtered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_case_insensitive_matching_trims_and_folds() {
        let catalog = sample_catalog();
        let filtered = filter_by_property_type(&catalog, &[" cabin ".to_string()], false);
        assert_eq!(filtered.len(), 1);

        let none = filter_by_property_type(&catalog, &[" cabin ".to_string()], true);
        assert!(none.is_empty());
    }

    #[test]
    fn test_budget_filter_bounds_inclusive() {
        let catalog = sample_catalog();
        let filtered = filter_by_budget(&catalog, 150.0, 200.0);
        assert_eq!(filtered.len(), 3);

        let narrower = filter_by_budget(&catalog, 151.0, 199.0);
        assert_eq!(narrower.len(), 1);
        assert_eq!(narrower[0].id, 3);
    }

    #[test]
    fn test_inverted_budget_range_rejected() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria {
            budget_range: Some((250.0, 100.0)),
            ..Default::default()
        };

        assert!(matches!(
            apply_filters(&catalog, &criteria),
            Err(CriteriaError::InvertedBudgetInterval { .. })
        ));
    }

    #[test]
    fn test_statistics_over_subset() {
        let catalog = sample_catalog();
        let stats = filter_statistics(&catalog);

        assert_eq!(stats.total_properties, 3);
        assert!((stats.avg_price - 176.666666).abs() < 1e-4);
        assert_eq!(stats.price_range, (150.0, 200.0));

        // WiFi appears on all three properties and leads the table
        assert_eq!(stats.feature_counts[0], ("WiFi".to_string(), 3));
        assert_eq!(stats.type_counts.len(), 3);
        assert_eq!(stats.location_counts.len(), 3);
    }

    #[test]
    fn test_statistics_empty_subset() {
        let stats = filter_statistics(&[]);

        assert_eq!(stats.total_properties, 0);
        assert_eq!(stats.avg_price, 0.0);
        assert_eq!(stats.price_range, (0.0, 0.0));
        assert!(stats.feature_counts.is_empty());
    }

    #[test]
    fn test_unique_enumerations() {
        let catalog = sample_catalog();

        let features = unique_features(&catalog, false);
        assert!(features.contains(&"wifi".to_string()));
        assert_eq!(
            features.iter().filter(|f| f.as_str() == "wifi").count(),
            1
        );
        let mut sorted = features.clone();
        sorted.sort();
        assert_eq!(features, sorted);

        let types = unique_property_types(&catalog, false);
        assert_eq!(types, vec!["apartment", "cabin", "condo"]);

        let locations = unique_locations(&catalog, true);
        assert_eq!(locations, vec!["Banff", "Toronto", "Vancouver"]);
    }
}
