use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog vehicles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyStyle {
    Sedan,
    Suv,
    Truck,
    Minivan,
    Coupe,
    Hatchback,
}

impl BodyStyle {
    pub const ALL: [BodyStyle; 6] = [
        BodyStyle::Sedan,
        BodyStyle::Suv,
        BodyStyle::Truck,
        BodyStyle::Minivan,
        BodyStyle::Coupe,
        BodyStyle::Hatchback,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BodyStyle::Sedan => "sedan",
            BodyStyle::Suv => "suv",
            BodyStyle::Truck => "truck",
            BodyStyle::Minivan => "minivan",
            BodyStyle::Coupe => "coupe",
            BodyStyle::Hatchback => "hatchback",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Gas,
    Hybrid,
    Ev,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Gas, FuelType::Hybrid, FuelType::Ev];

    pub const fn label(self) -> &'static str {
        match self {
            FuelType::Gas => "gas",
            FuelType::Hybrid => "hybrid",
            FuelType::Ev => "ev",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|fuel| fuel.label().eq_ignore_ascii_case(needle))
    }

    pub const fn is_electrified(self) -> bool {
        matches!(self, FuelType::Hybrid | FuelType::Ev)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drivetrain {
    #[serde(rename = "FWD")]
    Fwd,
    #[serde(rename = "AWD")]
    Awd,
    #[serde(rename = "RWD")]
    Rwd,
}

impl Drivetrain {
    pub const fn label(self) -> &'static str {
        match self {
            Drivetrain::Fwd => "FWD",
            Drivetrain::Awd => "AWD",
            Drivetrain::Rwd => "RWD",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FWD" => Some(Drivetrain::Fwd),
            "AWD" | "4WD" => Some(Drivetrain::Awd),
            "RWD" => Some(Drivetrain::Rwd),
            _ => None,
        }
    }
}

/// Immutable catalog record consumed by the matching engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub trim: String,
    pub msrp: f64,
    pub body_style: BodyStyle,
    pub fuel_type: FuelType,
    pub mpg_city: Option<f64>,
    pub mpg_highway: Option<f64>,
    pub mpg_combined: Option<f64>,
    pub battery_range_mi: Option<f64>,
    pub drivetrain: Drivetrain,
    pub seats: u8,
    pub safety_rating: f64,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
    #[serde(default)]
    pub description: String,
}

impl Vehicle {
    /// Marketing name, e.g. `Toyota RAV4 Hybrid`.
    pub fn name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// True when any feature contains any keyword, ignoring case.
    pub fn has_feature_keyword(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            self.features
                .iter()
                .any(|feature| feature.to_lowercase().contains(&keyword))
        })
    }

    /// Any published mpg figure, used to decide whether fuel economy is known.
    pub fn has_known_mpg(&self) -> bool {
        [self.mpg_city, self.mpg_highway]
            .into_iter()
            .flatten()
            .any(|mpg| mpg > 0.0)
    }

    /// Combined mpg, falling back to zero when unpublished.
    pub fn combined_mpg(&self) -> f64 {
        self.mpg_combined.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!(BodyStyle::parse(" SUV "), Some(BodyStyle::Suv));
        assert_eq!(BodyStyle::parse("wagon"), None);
        assert_eq!(FuelType::parse("EV"), Some(FuelType::Ev));
        assert_eq!(Drivetrain::parse("awd"), Some(Drivetrain::Awd));
        assert_eq!(Drivetrain::parse("4wd"), Some(Drivetrain::Awd));
    }

    #[test]
    fn drivetrain_serializes_as_uppercase() {
        let json = serde_json::to_string(&Drivetrain::Awd).expect("serializes");
        assert_eq!(json, "\"AWD\"");
    }
}
