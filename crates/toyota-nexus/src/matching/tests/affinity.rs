use super::common::*;

use crate::matching::{score_vehicle_for_profile, MAX_AFFINITY};
use crate::profile::{PreferenceProfile, SpendingStyle, VehicleEmotion, WeekendVibe};

#[test]
fn unanswered_quiz_scores_only_safety_and_features() {
    let profile = PreferenceProfile::default();

    // 5 stars capped at 12 points plus 6 features at 1.2 each.
    assert_eq!(
        score_vehicle_for_profile(&vehicle("camry-se-2025"), &profile),
        19
    );
    // 3 stars and 4 features.
    assert_eq!(
        score_vehicle_for_profile(&vehicle("4runner-trd-pro-2025"), &profile),
        14
    );
}

#[test]
fn family_answers_favor_three_row_haulers() {
    let profile = family_profile();

    assert_eq!(
        score_vehicle_for_profile(&vehicle("sienna-xle-2025"), &profile),
        MAX_AFFINITY
    );
    assert_eq!(
        score_vehicle_for_profile(&vehicle("camry-se-2025"), &profile),
        65
    );
    assert_eq!(
        score_vehicle_for_profile(&vehicle("gr86-premium-2025"), &profile),
        16
    );
}

#[test]
fn outdoor_answers_favor_trail_hardware() {
    let profile = PreferenceProfile {
        weekend_vibe: Some(WeekendVibe::OutdoorEscape),
        vehicle_emotion: Some(VehicleEmotion::Freedom),
        spending_style: Some(SpendingStyle::HomeProject),
        future_chapter_narrative: "Weekend trails, mountain camping and hauling gear".to_string(),
        ..PreferenceProfile::default()
    };

    assert_eq!(
        score_vehicle_for_profile(&vehicle("4runner-trd-pro-2025"), &profile),
        98
    );
    assert_eq!(
        score_vehicle_for_profile(&vehicle("bz4x-xle-2025"), &profile),
        58
    );
    assert_eq!(
        score_vehicle_for_profile(&vehicle("tacoma-trd-off-road-2025"), &profile),
        MAX_AFFINITY
    );
}

#[test]
fn narrative_cues_are_case_insensitive() {
    let base = PreferenceProfile::default();
    let cued = PreferenceProfile {
        future_chapter_narrative: "Cutting my GAS BUDGET on the Downtown commute".to_string(),
        ..PreferenceProfile::default()
    };
    let prius = vehicle("prius-xle-2025");

    // Commuter tag (+10) and electrified drivetrain (+8).
    assert_eq!(
        score_vehicle_for_profile(&prius, &cued),
        score_vehicle_for_profile(&prius, &base) + 18
    );
}

#[test]
fn whitespace_narrative_adds_nothing() {
    let profile = PreferenceProfile {
        future_chapter_narrative: "   ".to_string(),
        ..PreferenceProfile::default()
    };
    assert_eq!(
        score_vehicle_for_profile(&vehicle("camry-se-2025"), &profile),
        19
    );
}
