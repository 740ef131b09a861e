use tracing::debug;

use super::config::MatchWeights;
use super::{MatchRule, ReasonTag, ScoreComponent};
use crate::catalog::{BodyStyle, Drivetrain, FuelType, Vehicle};
use crate::finance::estimate_finance;
use crate::profile::PreferenceProfile;

/// Components and reasons accumulated while applying the rules in order.
#[derive(Debug, Default)]
pub(crate) struct RuleOutcome {
    pub components: Vec<ScoreComponent>,
    pub reasons: Vec<ReasonTag>,
}

impl RuleOutcome {
    fn award(&mut self, rule: MatchRule, weight: f64, notes: String) {
        self.components.push(ScoreComponent {
            rule,
            weight,
            notes,
        });
    }

    fn reason(&mut self, tag: ReasonTag) {
        if !self.reasons.contains(&tag) {
            self.reasons.push(tag);
        }
    }

    pub fn total(&self) -> f64 {
        self.components.iter().map(|component| component.weight).sum()
    }
}

pub(crate) fn score_rules(
    vehicle: &Vehicle,
    profile: &PreferenceProfile,
    weights: &MatchWeights,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    budget_fit(vehicle, profile, weights, &mut outcome);
    fuel_commute_fit(vehicle, profile, weights, &mut outcome);

    if profile.has_charging_access() && vehicle.fuel_type == FuelType::Ev {
        outcome.award(
            MatchRule::Charging,
            weights.charging,
            "home charging available for an EV".to_string(),
        );
        outcome.reason(ReasonTag::HomeCharging);
    }

    if let Some(family_size) = profile.positive_family_size() {
        let seats_needed = family_size.min(weights.family_seat_cap);
        if vehicle.seats >= seats_needed {
            outcome.award(
                MatchRule::Family,
                weights.family,
                format!("{} seats cover a household of {family_size}", vehicle.seats),
            );
            // Same tag as the budget rule; kept as-is.
            if matches!(vehicle.body_style, BodyStyle::Suv | BodyStyle::Minivan) {
                outcome.reason(ReasonTag::MaxSpaceUnderBudget);
            }
        }
    }

    if profile.has_lifestyle_tag("adventure") && vehicle.drivetrain == Drivetrain::Awd {
        outcome.award(
            MatchRule::Terrain,
            weights.terrain,
            "AWD suits an adventure lifestyle".to_string(),
        );
        outcome.reason(ReasonTag::AwdTerrain);
    }

    if profile.has_lifestyle_tag("tech") {
        let matched: Vec<&str> = vehicle
            .features
            .iter()
            .filter(|feature| weights.tech_features.contains(*feature))
            .map(String::as_str)
            .collect();
        if !matched.is_empty() {
            outcome.award(
                MatchRule::Tech,
                weights.tech,
                format!("tech features: {}", matched.join(", ")),
            );
            outcome.reason(ReasonTag::TechForward);
        }
    }

    if vehicle.safety_rating >= weights.safety_rating_threshold {
        outcome.award(
            MatchRule::Safety,
            weights.safety,
            format!("safety rating {:.1}", vehicle.safety_rating),
        );
        outcome.reason(ReasonTag::HighSafety);
    }

    outcome
}

fn budget_fit(
    vehicle: &Vehicle,
    profile: &PreferenceProfile,
    weights: &MatchWeights,
    outcome: &mut RuleOutcome,
) {
    let Some(budget) = profile.positive_budget() else {
        return;
    };

    let reference = match estimate_finance(
        vehicle.msrp,
        weights.reference_apr_percent,
        weights.reference_term_months,
        vehicle.msrp * weights.reference_down_fraction,
    ) {
        Ok(estimate) => estimate.monthly,
        Err(err) => {
            debug!(vehicle = %vehicle.id, error = %err, "budget fit skipped");
            return;
        }
    };

    let ratio = (budget / reference.max(1.0)).clamp(0.0, 1.0);
    outcome.award(
        MatchRule::Budget,
        ratio * weights.budget,
        format!(
            "budget {budget:.0}/mo covers {:.0}% of reference {reference:.2}/mo",
            ratio * 100.0
        ),
    );
    if ratio > weights.budget_headroom_ratio {
        outcome.reason(ReasonTag::MaxSpaceUnderBudget);
    }
}

fn fuel_commute_fit(
    vehicle: &Vehicle,
    profile: &PreferenceProfile,
    weights: &MatchWeights,
    outcome: &mut RuleOutcome,
) {
    let Some(commute) = profile.positive_commute() else {
        return;
    };

    let notes = match vehicle.fuel_type {
        FuelType::Hybrid if vehicle.has_known_mpg() => {
            format!("hybrid economy for a {commute:.0} mi daily commute")
        }
        FuelType::Ev => match vehicle.battery_range_mi {
            Some(range) if range >= commute * weights.ev_range_commute_multiplier => {
                format!("{range:.0} mi range covers a {commute:.0} mi daily commute")
            }
            _ => return,
        },
        _ => return,
    };

    outcome.award(MatchRule::FuelCommute, weights.fuel_commute, notes);
    outcome.reason(ReasonTag::LowerFuelCost);
    outcome.reason(ReasonTag::LongCommutes);
}
