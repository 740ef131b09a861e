use super::common::*;

use crate::matching::{score_vehicle, MatchEngine, MatchRule, MatchWeights, ReasonTag};
use crate::profile::{ChargingAccess, PreferenceProfile};

#[test]
fn unset_preferences_score_zero() {
    let result = score_vehicle(&vehicle("4runner-trd-pro-2025"), &PreferenceProfile::default());

    assert_eq!(result.score, 0.0);
    assert!(result.reasons.is_empty());
    assert!(result.components.is_empty());
}

#[test]
fn safety_alone_contributes_five_hundredths() {
    let result = score_vehicle(&plain_vehicle(5.0), &PreferenceProfile::default());

    assert_close(result.score, 0.05);
    assert_eq!(result.reason_labels(), vec!["High safety rating"]);
    assert_eq!(result.components.len(), 1);
    assert_eq!(result.components[0].rule, MatchRule::Safety);
}

#[test]
fn safety_below_four_is_ignored() {
    let result = score_vehicle(&plain_vehicle(3.5), &PreferenceProfile::default());
    assert_eq!(result.score, 0.0);
}

#[test]
fn budget_scales_with_reference_payment() {
    let camry = vehicle("camry-se-2025");

    // Reference payment: 31,000 at 6% over 60 months with 3,100 down.
    let tight = PreferenceProfile {
        budget_monthly: Some(300.0),
        ..PreferenceProfile::default()
    };
    let result = score_vehicle(&camry, &tight);
    assert_close(result.score, 0.35 * 300.0 / 539.39 + 0.05);
    assert!(!result.reasons.contains(&ReasonTag::MaxSpaceUnderBudget));

    let roomy = PreferenceProfile {
        budget_monthly: Some(450.0),
        ..PreferenceProfile::default()
    };
    let result = score_vehicle(&camry, &roomy);
    assert_close(result.score, 0.35 * 450.0 / 539.39 + 0.05);
    assert_eq!(
        result.reasons,
        vec![ReasonTag::MaxSpaceUnderBudget, ReasonTag::HighSafety]
    );
}

#[test]
fn budget_ratio_is_capped_at_full_weight() {
    let profile = PreferenceProfile {
        budget_monthly: Some(5_000.0),
        ..PreferenceProfile::default()
    };
    let result = score_vehicle(&vehicle("corolla-le-2025"), &profile);

    assert_close(result.score, 0.35 + 0.05);
}

#[test]
fn zero_budget_is_treated_as_unset() {
    let profile = PreferenceProfile {
        budget_monthly: Some(0.0),
        ..PreferenceProfile::default()
    };
    let result = score_vehicle(&vehicle("4runner-trd-pro-2025"), &profile);
    assert_eq!(result.score, 0.0);
}

#[test]
fn hybrid_commute_emits_both_fuel_reasons() {
    let profile = PreferenceProfile {
        commute_miles_daily: Some(30.0),
        ..PreferenceProfile::default()
    };
    let result = score_vehicle(&vehicle("prius-xle-2025"), &profile);

    assert_close(result.score, 0.12 + 0.05);
    assert_eq!(
        result.reason_labels(),
        vec![
            "Lower long-term fuel cost",
            "Great for long commutes",
            "High safety rating"
        ]
    );
}

#[test]
fn gas_vehicle_earns_nothing_for_commute() {
    let profile = PreferenceProfile {
        commute_miles_daily: Some(30.0),
        ..PreferenceProfile::default()
    };
    let result = score_vehicle(&vehicle("4runner-trd-pro-2025"), &profile);
    assert_eq!(result.score, 0.0);
}

#[test]
fn ev_range_must_cover_five_commutes() {
    let bz4x = vehicle("bz4x-xle-2025");

    let long = PreferenceProfile {
        commute_miles_daily: Some(60.0),
        ..PreferenceProfile::default()
    };
    assert!(!score_vehicle(&bz4x, &long)
        .reasons
        .contains(&ReasonTag::LongCommutes));

    let short = PreferenceProfile {
        commute_miles_daily: Some(50.0),
        ..PreferenceProfile::default()
    };
    assert!(score_vehicle(&bz4x, &short)
        .reasons
        .contains(&ReasonTag::LongCommutes));
}

#[test]
fn charging_requires_access_and_an_ev() {
    let bz4x = vehicle("bz4x-xle-2025");

    for access in [None, Some(ChargingAccess::None)] {
        let profile = PreferenceProfile {
            charging_access: access,
            ..PreferenceProfile::default()
        };
        assert!(!score_vehicle(&bz4x, &profile)
            .reasons
            .contains(&ReasonTag::HomeCharging));
    }

    let level2 = PreferenceProfile {
        charging_access: Some(ChargingAccess::Level2),
        ..PreferenceProfile::default()
    };
    let result = score_vehicle(&bz4x, &level2);
    assert_close(result.score, 0.10 + 0.05);
    assert!(result.reasons.contains(&ReasonTag::HomeCharging));

    let hybrid = score_vehicle(&vehicle("rav4-hybrid-xle-2025"), &level2);
    assert!(!hybrid.reasons.contains(&ReasonTag::HomeCharging));
}

#[test]
fn family_fit_caps_required_seats_at_five() {
    let profile = PreferenceProfile {
        family_size: Some(7),
        ..PreferenceProfile::default()
    };

    let rav4 = score_vehicle(&vehicle("rav4-hybrid-xle-2025"), &profile);
    assert_close(rav4.score, 0.12 + 0.05);
    assert_eq!(
        rav4.reasons,
        vec![ReasonTag::MaxSpaceUnderBudget, ReasonTag::HighSafety]
    );

    let camry = score_vehicle(&vehicle("camry-se-2025"), &profile);
    assert_close(camry.score, 0.12 + 0.05);
    assert_eq!(camry.reasons, vec![ReasonTag::HighSafety]);

    let coupe = score_vehicle(&vehicle("gr86-premium-2025"), &profile);
    assert_close(coupe.score, 0.05);
}

#[test]
fn terrain_needs_adventure_and_awd() {
    let profile = PreferenceProfile {
        lifestyle_tags: tags(&["adventure"]),
        ..PreferenceProfile::default()
    };

    let tacoma = score_vehicle(&vehicle("tacoma-trd-off-road-2025"), &profile);
    assert_eq!(
        tacoma.reasons,
        vec![ReasonTag::AwdTerrain, ReasonTag::HighSafety]
    );

    let coupe = score_vehicle(&vehicle("gr86-premium-2025"), &profile);
    assert!(!coupe.reasons.contains(&ReasonTag::AwdTerrain));
}

#[test]
fn tech_needs_an_exact_listed_feature() {
    let profile = PreferenceProfile {
        lifestyle_tags: tags(&["tech"]),
        ..PreferenceProfile::default()
    };

    let camry = score_vehicle(&vehicle("camry-se-2025"), &profile);
    assert!(camry.reasons.contains(&ReasonTag::TechForward));
    let tech = camry
        .components
        .iter()
        .find(|component| component.rule == MatchRule::Tech)
        .expect("tech component recorded");
    assert!(tech.notes.contains("ACC"));

    let runner = score_vehicle(&vehicle("4runner-trd-pro-2025"), &profile);
    assert!(runner.reasons.is_empty());
}

#[test]
fn shared_reason_is_reported_once() {
    let profile = PreferenceProfile {
        budget_monthly: Some(2_000.0),
        family_size: Some(4),
        ..PreferenceProfile::default()
    };
    let result = score_vehicle(&vehicle("sienna-xle-2025"), &profile);

    assert_close(result.score, 0.35 + 0.12 + 0.05);
    assert_eq!(
        result.reasons,
        vec![ReasonTag::MaxSpaceUnderBudget, ReasonTag::HighSafety]
    );
}

#[test]
fn every_rule_firing_keeps_rule_order() {
    let profile = PreferenceProfile {
        budget_monthly: Some(2_000.0),
        commute_miles_daily: Some(20.0),
        charging_access: Some(ChargingAccess::Level1),
        family_size: Some(4),
        lifestyle_tags: tags(&["adventure", "tech"]),
        ..PreferenceProfile::default()
    };
    let result = score_vehicle(&vehicle("bz4x-xle-2025"), &profile);

    assert_close(result.score, MatchWeights::default().ceiling());
    assert_eq!(
        result.reasons,
        vec![
            ReasonTag::MaxSpaceUnderBudget,
            ReasonTag::LowerFuelCost,
            ReasonTag::LongCommutes,
            ReasonTag::HomeCharging,
            ReasonTag::AwdTerrain,
            ReasonTag::TechForward,
            ReasonTag::HighSafety,
        ]
    );
}

#[test]
fn score_is_clamped_for_heavy_weights() {
    let engine = MatchEngine::new(MatchWeights {
        budget: 2.0,
        ..MatchWeights::default()
    });
    let profile = PreferenceProfile {
        budget_monthly: Some(2_000.0),
        ..PreferenceProfile::default()
    };

    let result = engine.score(&vehicle("corolla-le-2025"), &profile);
    assert_eq!(result.score, 1.0);
}

#[test]
fn scores_stay_in_unit_interval_across_catalog() {
    let catalog = catalog();
    let profiles = [
        PreferenceProfile::default(),
        PreferenceProfile {
            budget_monthly: Some(650.0),
            commute_miles_daily: Some(45.0),
            charging_access: Some(ChargingAccess::Level2),
            family_size: Some(3),
            lifestyle_tags: tags(&["adventure", "tech", "family"]),
            ..PreferenceProfile::default()
        },
    ];

    for profile in &profiles {
        for vehicle in catalog.vehicles() {
            let result = score_vehicle(vehicle, profile);
            assert!((0.0..=1.0).contains(&result.score), "{}", vehicle.id);
            let mut unique = result.reasons.clone();
            unique.dedup();
            assert_eq!(unique.len(), result.reasons.len());
        }
    }
}
