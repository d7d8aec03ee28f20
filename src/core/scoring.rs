use std::collections::HashSet;

use crate::core::{discount::DiscountPolicy, distance::haversine_distance};
use crate::models::Coordinates;

/// Calculate the type match score (0 or 1)
///
/// Case-insensitive exact membership of the property type in the selected
/// set. An empty selection scores 0 - type is a hard, filter-like signal, so
/// "no preference stated" is a non-match. This is deliberately asymmetric
/// with [`feature_score`], where an empty selection means full credit.
#[inline]
pub fn type_score(property_type: &str, selected_types: &[String]) -> f64 {
    if selected_types.is_empty() || property_type.is_empty() {
        return 0.0;
    }

    let property_type_lower = property_type.to_lowercase();
    let is_match = selected_types
        .iter()
        .any(|t| t.to_lowercase() == property_type_lower);

    if is_match {
        1.0
    } else {
        0.0
    }
}

/// Calculate the feature match score (0 to 1)
///
/// Fraction of the selected features present in the property's feature set,
/// case-insensitive. An empty selection scores 1.0 (no preference means full
/// credit); a property with no features against a non-empty selection
/// scores 0.0.
#[inline]
pub fn feature_score(property_features: &[String], selected_features: &[String]) -> f64 {
    if selected_features.is_empty() {
        return 1.0;
    }

    if property_features.is_empty() {
        return 0.0;
    }

    let property_set: HashSet<String> = property_features
        .iter()
        .map(|f| f.to_lowercase())
        .collect();
    let selected_set: HashSet<String> = selected_features
        .iter()
        .map(|f| f.to_lowercase())
        .collect();

    let matched_count = selected_set.intersection(&property_set).count();
    matched_count as f64 / selected_features.len() as f64
}

/// Calculate the location match score (0 to 1)
///
/// 1.0 within the radius, then linear decay with distance: a property twice
/// as far as the radius boundary scores exactly 0. A property without
/// coordinates scores 0.0 rather than failing the pipeline.
#[inline]
pub fn location_score(coordinates: Option<Coordinates>, center: Coordinates, radius_km: f64) -> f64 {
    let Some(coords) = coordinates else {
        return 0.0;
    };

    let distance = haversine_distance(
        coords.latitude,
        coords.longitude,
        center.latitude,
        center.longitude,
    );

    if distance <= radius_km {
        return 1.0;
    }

    let score = 1.0 - (distance - radius_km) / radius_km;
    score.max(0.0)
}

/// Calculate the price match score (0 to 1)
///
/// 0.0 below the minimum budget, 1.0 inside the budget interval, and a
/// discounted score on the policy ramp above the maximum.
#[inline]
pub fn price_score(
    property_price: f64,
    min_budget: f64,
    max_budget: f64,
    policy: &DiscountPolicy,
) -> f64 {
    if property_price < min_budget {
        return 0.0;
    }

    if property_price <= max_budget {
        return 1.0;
    }

    1.0 - policy.discount_rate(max_budget, property_price)
}
