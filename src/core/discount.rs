use serde::{Deserialize, Serialize};

/// Tunable price-overage penalty policy
///
/// Overages inside the tolerance band are penalized on a super-linear ramp:
/// small overages cost little, and the penalty accelerates toward the band
/// ceiling. Both constants are policy, not geometry, so they are named and
/// overridable; the defaults preserve the production behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscountPolicy {
    /// Fraction of `max_budget` an overage may reach before the penalty
    /// saturates at 1.0
    pub tolerance: f64,
    /// Exponent of the penalty ramp inside the tolerance band
    pub exponent: f64,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            tolerance: 0.2,
            exponent: 1.7,
        }
    }
}

impl DiscountPolicy {
    pub fn new(tolerance: f64, exponent: f64) -> Self {
        Self {
            tolerance,
            exponent,
        }
    }

    /// Penalty fraction in [0,1] for a price relative to a maximum budget
    ///
    /// Returns 0 at or below budget, 1 beyond the tolerance band, and the
    /// ramp value in between. A non-positive budget with a positive price is
    /// full penalty; both zero is no penalty.
    pub fn discount_rate(&self, max_budget: f64, price: f64) -> f64 {
        if max_budget <= 0.0 {
            return if price > 0.0 { 1.0 } else { 0.0 };
        }

        let difference = price - max_budget;
        if difference <= 0.0 {
            return 0.0;
        }

        let ceiling = self.tolerance * max_budget;
        if difference > ceiling {
            return 1.0;
        }

        (difference / ceiling).powf(self.exponent)
    }
}
