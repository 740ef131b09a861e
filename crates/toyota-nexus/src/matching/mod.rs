//! Vehicle-to-preference matching.
//!
//! [`MatchEngine::score`] is a fixed linear weighted sum: each rule in
//! [`rules`] contributes independently, the sum is clamped to `[0, 1]`, and the
//! reasons come back de-duplicated in the order the rules fired. Ranking for the
//! results page additionally uses the psychographic [`score_vehicle_for_profile`].

mod affinity;
mod config;
pub mod router;
mod rules;

#[cfg(test)]
mod tests;

use std::cmp::Ordering;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Vehicle, VehicleCatalog};
use crate::profile::PreferenceProfile;

pub use affinity::{score_vehicle_for_profile, MAX_AFFINITY};
pub use config::MatchWeights;
pub use router::{matching_router, MatchingState};

/// Number of vehicles shown on the results page.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

/// Short explanation attached to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonTag {
    #[serde(rename = "Max space under budget")]
    MaxSpaceUnderBudget,
    #[serde(rename = "Lower long-term fuel cost")]
    LowerFuelCost,
    #[serde(rename = "Great for long commutes")]
    LongCommutes,
    #[serde(rename = "EV-friendly home charging")]
    HomeCharging,
    #[serde(rename = "AWD for mixed terrain")]
    AwdTerrain,
    #[serde(rename = "Tech-forward")]
    TechForward,
    #[serde(rename = "High safety rating")]
    HighSafety,
}

impl ReasonTag {
    pub const fn label(self) -> &'static str {
        match self {
            ReasonTag::MaxSpaceUnderBudget => "Max space under budget",
            ReasonTag::LowerFuelCost => "Lower long-term fuel cost",
            ReasonTag::LongCommutes => "Great for long commutes",
            ReasonTag::HomeCharging => "EV-friendly home charging",
            ReasonTag::AwdTerrain => "AWD for mixed terrain",
            ReasonTag::TechForward => "Tech-forward",
            ReasonTag::HighSafety => "High safety rating",
        }
    }
}

/// Scoring rule that produced a [`ScoreComponent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    Budget,
    FuelCommute,
    Charging,
    Family,
    Terrain,
    Tech,
    Safety,
}

/// Discrete contribution to a match score, kept for transparency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: MatchRule,
    pub weight: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    pub reasons: Vec<ReasonTag>,
    #[serde(default)]
    pub components: Vec<ScoreComponent>,
}

impl MatchResult {
    pub fn reason_labels(&self) -> Vec<&'static str> {
        self.reasons.iter().map(|reason| reason.label()).collect()
    }
}

/// A ranked vehicle with both scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub vehicle: Vehicle,
    #[serde(rename = "match")]
    pub fit: MatchResult,
    pub affinity: u8,
}

/// Stateless scorer applying [`MatchWeights`].
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    weights: MatchWeights,
}

impl MatchEngine {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, vehicle: &Vehicle, profile: &PreferenceProfile) -> MatchResult {
        let outcome = rules::score_rules(vehicle, profile, &self.weights);
        let score = outcome.total().clamp(0.0, 1.0);

        debug!(
            vehicle = %vehicle.id,
            score,
            reasons = outcome.reasons.len(),
            "scored vehicle"
        );

        MatchResult {
            score,
            reasons: outcome.reasons,
            components: outcome.components,
        }
    }

    /// Rank the catalog for a profile: affinity first, then match score, then id.
    ///
    /// Until the quiz is completed the first `limit` catalog entries are
    /// returned unscored.
    pub fn recommend(
        &self,
        catalog: &VehicleCatalog,
        profile: &PreferenceProfile,
        limit: usize,
    ) -> Vec<Recommendation> {
        if !profile.completed {
            return catalog
                .vehicles()
                .iter()
                .take(limit)
                .map(|vehicle| Recommendation {
                    vehicle: vehicle.clone(),
                    fit: MatchResult::default(),
                    affinity: 0,
                })
                .collect();
        }

        let mut ranked: Vec<Recommendation> = catalog
            .vehicles()
            .iter()
            .map(|vehicle| Recommendation {
                vehicle: vehicle.clone(),
                fit: self.score(vehicle, profile),
                affinity: score_vehicle_for_profile(vehicle, profile),
            })
            .collect();

        ranked.sort_by(compare_recommendations);
        ranked.truncate(limit);
        ranked
    }
}

fn compare_recommendations(left: &Recommendation, right: &Recommendation) -> Ordering {
    right
        .affinity
        .cmp(&left.affinity)
        .then_with(|| right.fit.score.total_cmp(&left.fit.score))
        .then_with(|| left.vehicle.id.0.cmp(&right.vehicle.id.0))
}

/// Score with the default weights.
pub fn score_vehicle(vehicle: &Vehicle, profile: &PreferenceProfile) -> MatchResult {
    static ENGINE: OnceLock<MatchEngine> = OnceLock::new();
    ENGINE.get_or_init(MatchEngine::default).score(vehicle, profile)
}
