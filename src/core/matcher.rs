use crate::core::{
    discount::DiscountPolicy,
    scoring::{feature_score, location_score, price_score, type_score},
    CriteriaError,
};
use crate::models::{EmptyReason, MatchCriteria, Property, ScoredProperty};

/// Result of a ranking pass
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub matches: Vec<ScoredProperty>,
    pub total_candidates: usize,
    /// Set when the result is empty for a reason other than low scores
    pub reason: Option<EmptyReason>,
}

/// Weighted aggregator - combines the four dimension scores into a ranking
///
/// Scoring formula:
/// total = (type*w_type + features*w_features + location*w_location + price*w_price)
///         / (w_type + w_features + w_location + w_price)
///
/// An all-zero weight set falls back to the unweighted average of the four
/// dimension scores instead of dividing by zero.
#[derive(Debug, Clone)]
pub struct Matcher {
    policy: DiscountPolicy,
    result_limit: usize,
}

/// Ranked results are truncated to this many entries by default
pub const DEFAULT_RESULT_LIMIT: usize = 20;

impl Matcher {
    pub fn new(policy: DiscountPolicy, result_limit: usize) -> Self {
        Self {
            policy,
            result_limit,
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            policy: DiscountPolicy::default(),
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }

    /// Build a matcher from loaded configuration
    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self {
            policy: DiscountPolicy::new(
                settings.scoring.budget_tolerance,
                settings.scoring.discount_exponent,
            ),
            result_limit: settings.matching.result_limit,
        }
    }

    /// Score a single property against the criteria
    ///
    /// Total function: missing coordinates or an unresolved center zero out
    /// the location dimension rather than failing.
    pub fn score_property(&self, property: &Property, criteria: &MatchCriteria) -> ScoredProperty {
        let type_score = type_score(&property.property_type, &criteria.selected_types);
        let features_score = feature_score(&property.features, &criteria.selected_features);
        let location_score = criteria
            .center
            .map(|center| location_score(property.coordinates(), center, criteria.radius_km))
            .unwrap_or(0.0);
        let price_score = price_score(
            property.nightly_price,
            criteria.min_budget,
            criteria.max_budget,
            &self.policy,
        );

        let weights = criteria.weights;
        let weight_sum = weights.sum();

        let total_score = if weight_sum == 0 {
            (type_score + features_score + location_score + price_score) / 4.0
        } else {
            (type_score * weights.property_type as f64
                + features_score * weights.features as f64
                + location_score * weights.location as f64
                + price_score * weights.price as f64)
                / weight_sum as f64
        };

        ScoredProperty {
            property: property.clone(),
            type_score,
            features_score,
            location_score,
            price_score,
            total_score,
        }
    }

    /// Score every property, rank descending by total score, truncate
    ///
    /// Ties keep their input order (stable sort). An unresolved center or an
    /// empty collection yields an empty outcome with a machine-readable
    /// reason, not an error; malformed criteria are rejected up front.
    pub fn rank_properties(
        &self,
        properties: &[Property],
        criteria: &MatchCriteria,
    ) -> Result<MatchOutcome, CriteriaError> {
        validate_criteria(criteria)?;

        let total_candidates = properties.len();

        if criteria.center.is_none() {
            tracing::warn!("Center location unresolved, returning empty ranking");
            return Ok(MatchOutcome {
                matches: Vec::new(),
                total_candidates,
                reason: Some(EmptyReason::CenterNotResolved),
            });
        }

        if properties.is_empty() {
            return Ok(MatchOutcome {
                matches: Vec::new(),
                total_candidates,
                reason: Some(EmptyReason::NoProperties),
            });
        }

        let mut scored: Vec<ScoredProperty> = properties
            .iter()
            .map(|property| self.score_property(property, criteria))
            .collect();

        // Stable sort: equal-score entries keep their input order
        scored.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored.truncate(self.result_limit);

        tracing::info!(
            "Ranked {} candidates, returning top {}",
            total_candidates,
            scored.len()
        );

        Ok(MatchOutcome {
            matches: scored,
            total_candidates,
            reason: None,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn validate_criteria(criteria: &MatchCriteria) -> Result<(), CriteriaError> {
    if criteria.min_budget < 0.0 {
        return Err(CriteriaError::NegativeBudget(criteria.min_budget));
    }
    if criteria.min_budget > criteria.max_budget {
        return Err(CriteriaError::InvertedBudgetInterval {
            min: criteria.min_budget,
            max: criteria.max_budget,
        });
    }
    if criteria.radius_km <= 0.0 {
        return Err(CriteriaError::NonPositiveRadius(criteria.radius_km));
    }
    Ok(())
}
