//! Psychographic affinity between quiz answers and a vehicle, on a 0-100 scale.

use crate::catalog::{BodyStyle, FuelType, Vehicle};
use crate::profile::{PreferenceProfile, SpendingStyle, VehicleEmotion, WeekendVibe};

pub const MAX_AFFINITY: u8 = 100;

struct NarrativeCue {
    keywords: &'static [&'static str],
    points: f64,
    applies: fn(&Vehicle) -> bool,
}

const NARRATIVE_CUES: [NarrativeCue; 4] = [
    NarrativeCue {
        keywords: &["baby", "kid", "family", "parent", "suburb"],
        points: 12.0,
        applies: is_family_vehicle,
    },
    NarrativeCue {
        keywords: &["commute", "downtown", "city"],
        points: 10.0,
        applies: is_commuter_vehicle,
    },
    NarrativeCue {
        keywords: &["travel", "road trip", "adventure", "mountain"],
        points: 10.0,
        applies: is_adventure_vehicle,
    },
    NarrativeCue {
        keywords: &["budget", "gas", "payment", "cost"],
        points: 8.0,
        applies: is_electrified,
    },
];

fn is_family_vehicle(vehicle: &Vehicle) -> bool {
    vehicle.has_tag("family")
}

fn is_commuter_vehicle(vehicle: &Vehicle) -> bool {
    vehicle.has_tag("commuter")
}

fn is_adventure_vehicle(vehicle: &Vehicle) -> bool {
    vehicle.has_tag("adventure")
}

fn is_electrified(vehicle: &Vehicle) -> bool {
    vehicle.fuel_type.is_electrified()
}

/// Score how well a vehicle fits the psychographic quiz answers.
///
/// Unanswered questions contribute nothing; every vehicle still earns a base
/// from its safety rating and feature count.
pub fn score_vehicle_for_profile(vehicle: &Vehicle, profile: &PreferenceProfile) -> u8 {
    let mut points = 0.0;

    if let Some(vibe) = profile.weekend_vibe {
        points += weekend_points(vehicle, vibe);
    }
    if let Some(emotion) = profile.vehicle_emotion {
        points += emotion_points(vehicle, emotion);
    }
    if let Some(style) = profile.spending_style {
        points += spending_points(vehicle, style);
    }
    points += narrative_points(vehicle, &profile.future_chapter_narrative);

    points += (vehicle.safety_rating * 3.0).min(12.0);
    points += (vehicle.features.len() as f64 * 1.2).min(10.0);

    points.round().clamp(0.0, f64::from(MAX_AFFINITY)) as u8
}

fn bonus(condition: bool, points: f64) -> f64 {
    if condition {
        points
    } else {
        0.0
    }
}

fn weekend_points(vehicle: &Vehicle, vibe: WeekendVibe) -> f64 {
    let style = vehicle.body_style;
    match vibe {
        WeekendVibe::CityAdventures => {
            bonus(vehicle.has_tag("tech"), 14.0)
                + bonus(vehicle.has_tag("commuter"), 12.0)
                + bonus(matches!(style, BodyStyle::Sedan | BodyStyle::Hatchback), 8.0)
        }
        WeekendVibe::OutdoorEscape => {
            bonus(vehicle.has_tag("adventure"), 18.0)
                + bonus(matches!(style, BodyStyle::Suv | BodyStyle::Truck), 12.0)
                + bonus(
                    vehicle.has_feature_keyword(&["awd", "4wd", "multi-terrain"]),
                    10.0,
                )
        }
        WeekendVibe::FamilyFocused => {
            bonus(vehicle.has_tag("family"), 18.0)
                + bonus(vehicle.seats >= 6, 12.0)
                + bonus(vehicle.safety_rating >= 5.0, 10.0)
        }
        WeekendVibe::HomeBase => {
            bonus(matches!(style, BodyStyle::Suv | BodyStyle::Truck), 10.0)
                + bonus(vehicle.has_tag("commuter"), 8.0)
                + bonus(vehicle.has_feature_keyword(&["liftgate", "cargo", "tow"]), 8.0)
        }
    }
}

fn emotion_points(vehicle: &Vehicle, emotion: VehicleEmotion) -> f64 {
    match emotion {
        VehicleEmotion::Security => {
            bonus(vehicle.safety_rating >= 5.0, 18.0)
                + bonus(
                    vehicle.has_feature_keyword(&["safety sense", "blind spot", "lane departure"]),
                    10.0,
                )
        }
        VehicleEmotion::Efficiency => {
            bonus(vehicle.fuel_type.is_electrified(), 18.0)
                + bonus(vehicle.combined_mpg() >= 35.0, 12.0)
        }
        VehicleEmotion::Freedom => {
            bonus(vehicle.has_tag("adventure"), 16.0)
                + bonus(
                    vehicle.has_feature_keyword(&["awd", "4wd", "crawl control"]),
                    12.0,
                )
                + bonus(vehicle.seats >= 5 && vehicle.combined_mpg() >= 28.0, 6.0)
        }
        VehicleEmotion::Thrill => {
            bonus(
                vehicle.has_tag("tech") || vehicle.has_feature_keyword(&["sport", "turbo", "gr"]),
                12.0,
            ) + bonus(vehicle.msrp >= 38_000.0, 8.0)
        }
    }
}

fn spending_points(vehicle: &Vehicle, style: SpendingStyle) -> f64 {
    let body = vehicle.body_style;
    match style {
        SpendingStyle::HomeProject => {
            bonus(body == BodyStyle::Truck, 18.0)
                + bonus(
                    vehicle.has_feature_keyword(&["towing", "bed", "payload"]),
                    12.0,
                )
                + bonus(body == BodyStyle::Suv, 6.0)
        }
        SpendingStyle::MiniRoadTrip => {
            bonus(matches!(body, BodyStyle::Suv | BodyStyle::Minivan), 15.0)
                + bonus(vehicle.seats >= 5, 8.0)
                + bonus(
                    vehicle.has_feature_keyword(&["moonroof", "power liftgate", "premium audio"]),
                    6.0,
                )
        }
        SpendingStyle::LuxuryExperience => {
            bonus(vehicle.msrp >= 40_000.0, 16.0)
                + bonus(
                    vehicle.has_feature_keyword(&["leather", "premium", "panoramic"]),
                    12.0,
                )
        }
        SpendingStyle::Investing => {
            bonus(vehicle.msrp <= 30_000.0, 14.0)
                + bonus(vehicle.combined_mpg() >= 35.0, 12.0)
                + bonus(
                    matches!(vehicle.fuel_type, FuelType::Hybrid | FuelType::Ev),
                    6.0,
                )
        }
    }
}

fn narrative_points(vehicle: &Vehicle, narrative: &str) -> f64 {
    let narrative = narrative.to_lowercase();
    if narrative.trim().is_empty() {
        return 0.0;
    }

    NARRATIVE_CUES
        .iter()
        .filter(|cue| cue.keywords.iter().any(|keyword| narrative.contains(keyword)))
        .filter(|cue| (cue.applies)(vehicle))
        .map(|cue| cue.points)
        .sum()
}
