use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::catalog::{BodyStyle, Drivetrain, FuelType, Vehicle, VehicleCatalog, VehicleId};
use crate::matching::{MatchEngine, MatchingState};
use crate::profile::{PreferenceProfile, SpendingStyle, VehicleEmotion, WeekendVibe};

pub(super) const FAMILY_NARRATIVE: &str =
    "Starting a family in the suburbs and road tripping to the mountains";

pub(super) fn catalog() -> VehicleCatalog {
    VehicleCatalog::builtin().expect("bundled lineup is valid")
}

pub(super) fn vehicle(id: &str) -> Vehicle {
    catalog()
        .get(&VehicleId(id.to_string()))
        .cloned()
        .unwrap_or_else(|| panic!("{id} present in lineup"))
}

/// A vehicle that triggers nothing but the safety rule.
pub(super) fn plain_vehicle(safety_rating: f64) -> Vehicle {
    Vehicle {
        id: VehicleId("plain-sedan".to_string()),
        make: "Toyota".to_string(),
        model: "Plain".to_string(),
        year: 2025,
        trim: "Base".to_string(),
        msrp: 25_000.0,
        body_style: BodyStyle::Sedan,
        fuel_type: FuelType::Gas,
        mpg_city: Some(30.0),
        mpg_highway: Some(38.0),
        mpg_combined: Some(33.0),
        battery_range_mi: None,
        drivetrain: Drivetrain::Fwd,
        seats: 5,
        safety_rating,
        features: BTreeSet::new(),
        tags: BTreeSet::new(),
        specs: BTreeMap::new(),
        description: String::new(),
    }
}

pub(super) fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn family_profile() -> PreferenceProfile {
    PreferenceProfile {
        weekend_vibe: Some(WeekendVibe::FamilyFocused),
        vehicle_emotion: Some(VehicleEmotion::Security),
        spending_style: Some(SpendingStyle::MiniRoadTrip),
        future_chapter_narrative: FAMILY_NARRATIVE.to_string(),
        completed: true,
        ..PreferenceProfile::default()
    }
}

pub(super) fn matching_state() -> MatchingState {
    MatchingState::new(Arc::new(catalog()), Arc::new(MatchEngine::default()))
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
