use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{BodyStyle, FuelType};

/// Fuel preference where `Any` places no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelPreference {
    Any,
    Gas,
    Hybrid,
    Ev,
}

impl FuelPreference {
    pub fn accepts(self, fuel: FuelType) -> bool {
        match self {
            FuelPreference::Any => true,
            FuelPreference::Gas => fuel == FuelType::Gas,
            FuelPreference::Hybrid => fuel == FuelType::Hybrid,
            FuelPreference::Ev => fuel == FuelType::Ev,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FuelPreference::Any => "any",
            FuelPreference::Gas => "gas",
            FuelPreference::Hybrid => "hybrid",
            FuelPreference::Ev => "ev",
        }
    }
}

/// Body-style preference where `Any` places no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyStylePreference {
    Any,
    Sedan,
    Suv,
    Truck,
    Minivan,
    Coupe,
    Hatchback,
}

impl BodyStylePreference {
    pub fn accepts(self, style: BodyStyle) -> bool {
        self.body_style().map_or(true, |wanted| wanted == style)
    }

    pub const fn body_style(self) -> Option<BodyStyle> {
        match self {
            BodyStylePreference::Any => None,
            BodyStylePreference::Sedan => Some(BodyStyle::Sedan),
            BodyStylePreference::Suv => Some(BodyStyle::Suv),
            BodyStylePreference::Truck => Some(BodyStyle::Truck),
            BodyStylePreference::Minivan => Some(BodyStyle::Minivan),
            BodyStylePreference::Coupe => Some(BodyStyle::Coupe),
            BodyStylePreference::Hatchback => Some(BodyStyle::Hatchback),
        }
    }

    pub const fn label(self) -> &'static str {
        match self.body_style() {
            Some(style) => style.label(),
            None => "any",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinanceGoal {
    Lease,
    Finance,
    Undecided,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parking {
    Street,
    Garage,
    Driveway,
}

/// Home charging available to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingAccess {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "120V")]
    Level1,
    #[serde(rename = "240V")]
    Level2,
}

impl ChargingAccess {
    pub const fn has_access(self) -> bool {
        matches!(self, ChargingAccess::Level1 | ChargingAccess::Level2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrivingStyle {
    Calm,
    Balanced,
    Spirited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekendVibe {
    CityAdventures,
    OutdoorEscape,
    FamilyFocused,
    HomeBase,
}

impl WeekendVibe {
    pub const ALL: [WeekendVibe; 4] = [
        WeekendVibe::CityAdventures,
        WeekendVibe::OutdoorEscape,
        WeekendVibe::FamilyFocused,
        WeekendVibe::HomeBase,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            WeekendVibe::CityAdventures => "City adventures",
            WeekendVibe::OutdoorEscape => "Outdoor escape",
            WeekendVibe::FamilyFocused => "Family-focused",
            WeekendVibe::HomeBase => "Home base",
        }
    }

    pub const fn tagline(self) -> &'static str {
        match self {
            WeekendVibe::CityAdventures => {
                "You chase culture, energy, and effortless maneuverability."
            }
            WeekendVibe::OutdoorEscape => {
                "You crave all-terrain confidence and gear-ready flexibility."
            }
            WeekendVibe::FamilyFocused => {
                "Safety, space, and calm logistics always travel with you."
            }
            WeekendVibe::HomeBase => {
                "Comfort, practicality, and reliable utility fuel your projects."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleEmotion {
    Security,
    Efficiency,
    Freedom,
    Thrill,
}

impl VehicleEmotion {
    pub const ALL: [VehicleEmotion; 4] = [
        VehicleEmotion::Security,
        VehicleEmotion::Efficiency,
        VehicleEmotion::Freedom,
        VehicleEmotion::Thrill,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            VehicleEmotion::Security => "Security",
            VehicleEmotion::Efficiency => "Efficiency",
            VehicleEmotion::Freedom => "Freedom",
            VehicleEmotion::Thrill => "Thrill",
        }
    }

    pub const fn tagline(self) -> &'static str {
        match self {
            VehicleEmotion::Security => {
                "Stability first: top-tier safety tech and confident control matter most."
            }
            VehicleEmotion::Efficiency => {
                "You want every mile (and dollar) to go further without sacrificing style."
            }
            VehicleEmotion::Freedom => {
                "Adventure-capable, go-anywhere presence keeps your story moving."
            }
            VehicleEmotion::Thrill => {
                "Dynamic performance and stand-out personality keep the ride electric."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingStyle {
    HomeProject,
    MiniRoadTrip,
    LuxuryExperience,
    Investing,
}

impl SpendingStyle {
    pub const ALL: [SpendingStyle; 4] = [
        SpendingStyle::HomeProject,
        SpendingStyle::MiniRoadTrip,
        SpendingStyle::LuxuryExperience,
        SpendingStyle::Investing,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SpendingStyle::HomeProject => "Home project hero",
            SpendingStyle::MiniRoadTrip => "Mini road-trip captain",
            SpendingStyle::LuxuryExperience => "Luxury experience",
            SpendingStyle::Investing => "Stacking the future",
        }
    }

    pub const fn tagline(self) -> &'static str {
        match self {
            SpendingStyle::HomeProject => "Cargo space and power tools-on-board ready.",
            SpendingStyle::MiniRoadTrip => {
                "Flexible seating, road-trip tech, and comfort for the crew."
            }
            SpendingStyle::LuxuryExperience => {
                "Premium finishes, smooth ride, and statement-making aesthetics."
            }
            SpendingStyle::Investing => "Smart spend with low operating costs and long-term value.",
        }
    }
}

/// Canonical per-user profile: matching preferences, psychographic quiz
/// answers, and completion state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceProfile {
    pub budget_monthly: Option<f64>,
    pub finance_goal: Option<FinanceGoal>,
    pub zipcode: Option<String>,
    pub fuel_type: Option<FuelPreference>,
    pub body_style: Option<BodyStylePreference>,
    pub family_size: Option<u8>,
    pub commute_miles_daily: Option<f64>,
    pub parking: Option<Parking>,
    pub charging_access: Option<ChargingAccess>,
    pub driving_style: Option<DrivingStyle>,
    pub lifestyle_tags: BTreeSet<String>,
    pub weekend_vibe: Option<WeekendVibe>,
    pub vehicle_emotion: Option<VehicleEmotion>,
    pub spending_style: Option<SpendingStyle>,
    pub future_chapter_narrative: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl PreferenceProfile {
    pub fn has_lifestyle_tag(&self, tag: &str) -> bool {
        self.lifestyle_tags.contains(tag)
    }

    /// Budget only counts when a positive amount was supplied.
    pub fn positive_budget(&self) -> Option<f64> {
        self.budget_monthly.filter(|budget| *budget > 0.0)
    }

    pub fn positive_commute(&self) -> Option<f64> {
        self.commute_miles_daily.filter(|miles| *miles > 0.0)
    }

    pub fn positive_family_size(&self) -> Option<u8> {
        self.family_size.filter(|size| *size > 0)
    }

    pub fn has_charging_access(&self) -> bool {
        self.charging_access
            .is_some_and(ChargingAccess::has_access)
    }
}

/// Partial update applied by quiz steps and preference forms. `None` leaves a
/// field untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub budget_monthly: Option<f64>,
    pub finance_goal: Option<FinanceGoal>,
    pub zipcode: Option<String>,
    pub fuel_type: Option<FuelPreference>,
    pub body_style: Option<BodyStylePreference>,
    pub family_size: Option<u8>,
    pub commute_miles_daily: Option<f64>,
    pub parking: Option<Parking>,
    pub charging_access: Option<ChargingAccess>,
    pub driving_style: Option<DrivingStyle>,
    pub lifestyle_tags: Option<BTreeSet<String>>,
    pub weekend_vibe: Option<WeekendVibe>,
    pub vehicle_emotion: Option<VehicleEmotion>,
    pub spending_style: Option<SpendingStyle>,
    pub future_chapter_narrative: Option<String>,
}

impl ProfileUpdate {
    pub(crate) fn apply_to(self, profile: &mut PreferenceProfile) {
        fn merge<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }

        merge(&mut profile.budget_monthly, self.budget_monthly);
        merge(&mut profile.finance_goal, self.finance_goal);
        merge(&mut profile.zipcode, self.zipcode);
        merge(&mut profile.fuel_type, self.fuel_type);
        merge(&mut profile.body_style, self.body_style);
        merge(&mut profile.family_size, self.family_size);
        merge(&mut profile.commute_miles_daily, self.commute_miles_daily);
        merge(&mut profile.parking, self.parking);
        merge(&mut profile.charging_access, self.charging_access);
        merge(&mut profile.driving_style, self.driving_style);
        merge(&mut profile.weekend_vibe, self.weekend_vibe);
        merge(&mut profile.vehicle_emotion, self.vehicle_emotion);
        merge(&mut profile.spending_style, self.spending_style);

        if let Some(tags) = self.lifestyle_tags {
            profile.lifestyle_tags = tags;
        }
        if let Some(narrative) = self.future_chapter_narrative {
            profile.future_chapter_narrative = narrative;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charging_access_uses_voltage_labels() {
        let parsed: ChargingAccess = serde_json::from_str("\"240V\"").expect("parses");
        assert_eq!(parsed, ChargingAccess::Level2);
        assert!(parsed.has_access());
        assert!(!ChargingAccess::None.has_access());
    }

    #[test]
    fn unset_or_non_positive_fields_do_not_count() {
        let profile = PreferenceProfile {
            budget_monthly: Some(0.0),
            commute_miles_daily: Some(-4.0),
            family_size: Some(0),
            ..PreferenceProfile::default()
        };

        assert_eq!(profile.positive_budget(), None);
        assert_eq!(profile.positive_commute(), None);
        assert_eq!(profile.positive_family_size(), None);
        assert!(!profile.has_charging_access());
    }

    #[test]
    fn any_preferences_accept_everything() {
        assert!(FuelPreference::Any.accepts(FuelType::Ev));
        assert!(!FuelPreference::Gas.accepts(FuelType::Hybrid));
        assert!(BodyStylePreference::Any.accepts(BodyStyle::Truck));
        assert!(BodyStylePreference::Suv.accepts(BodyStyle::Suv));
        assert!(!BodyStylePreference::Suv.accepts(BodyStyle::Minivan));
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let mut profile = PreferenceProfile {
            budget_monthly: Some(400.0),
            zipcode: Some("75001".to_string()),
            ..PreferenceProfile::default()
        };

        ProfileUpdate {
            budget_monthly: Some(550.0),
            lifestyle_tags: Some(BTreeSet::from(["tech".to_string()])),
            ..ProfileUpdate::default()
        }
        .apply_to(&mut profile);

        assert_eq!(profile.budget_monthly, Some(550.0));
        assert_eq!(profile.zipcode.as_deref(), Some("75001"));
        assert!(profile.has_lifestyle_tag("tech"));
    }

    #[test]
    fn profile_deserializes_from_sparse_json() {
        let profile: PreferenceProfile = serde_json::from_str(
            r#"{"budget_monthly":450,"fuel_type":"hybrid","weekend_vibe":"outdoor_escape"}"#,
        )
        .expect("sparse profile parses");

        assert_eq!(profile.fuel_type, Some(FuelPreference::Hybrid));
        assert_eq!(profile.weekend_vibe, Some(WeekendVibe::OutdoorEscape));
        assert!(!profile.completed);
    }
}
