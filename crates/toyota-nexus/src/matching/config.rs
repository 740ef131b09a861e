use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Hand-tuned weights and thresholds for the preference match score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub budget: f64,
    pub fuel_commute: f64,
    pub charging: f64,
    pub family: f64,
    pub terrain: f64,
    pub tech: f64,
    pub safety: f64,
    /// Reference financing used to turn MSRP into a comparable monthly payment.
    pub reference_apr_percent: f64,
    pub reference_term_months: u32,
    pub reference_down_fraction: f64,
    /// Budget ratio above which the budget reason is emitted.
    pub budget_headroom_ratio: f64,
    /// EV range must cover this many daily commutes.
    pub ev_range_commute_multiplier: f64,
    pub family_seat_cap: u8,
    pub safety_rating_threshold: f64,
    pub tech_features: BTreeSet<String>,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            budget: 0.35,
            fuel_commute: 0.12,
            charging: 0.10,
            family: 0.12,
            terrain: 0.08,
            tech: 0.08,
            safety: 0.05,
            reference_apr_percent: 6.0,
            reference_term_months: 60,
            reference_down_fraction: 0.10,
            budget_headroom_ratio: 0.8,
            ev_range_commute_multiplier: 5.0,
            family_seat_cap: 5,
            safety_rating_threshold: 4.0,
            tech_features: ["ACC", "LKA", "HUD", "CarPlay", "AndroidAuto"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl MatchWeights {
    /// Highest score the rules can produce before clamping.
    pub fn ceiling(&self) -> f64 {
        self.budget
            + self.fuel_commute
            + self.charging
            + self.family
            + self.terrain
            + self.tech
            + self.safety
    }
}
