use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::{BodyStyle, Drivetrain, FuelType, Vehicle, VehicleId};
use super::CatalogError;

pub(crate) fn parse_vehicles<R: Read>(reader: R) -> Result<Vec<Vehicle>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut vehicles = Vec::new();

    for (index, record) in csv_reader.deserialize::<VehicleRow>().enumerate() {
        let row = record?;
        let vehicle = row
            .into_vehicle()
            .map_err(|reason| CatalogError::InvalidRow {
                row: index + 1,
                reason,
            })?;
        vehicles.push(vehicle);
    }

    Ok(vehicles)
}

#[derive(Debug, Deserialize)]
struct VehicleRow {
    id: String,
    make: String,
    model: String,
    year: u16,
    trim: String,
    msrp: f64,
    body_style: String,
    fuel_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    mpg_city: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    mpg_highway: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    mpg_combined: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    battery_range_mi: Option<f64>,
    drivetrain: String,
    seats: u8,
    safety_rating: f64,
    #[serde(default)]
    features: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    specs: String,
    #[serde(default)]
    description: String,
}

impl VehicleRow {
    fn into_vehicle(self) -> Result<Vehicle, String> {
        if self.id.is_empty() {
            return Err("missing id".to_string());
        }
        if !(self.msrp.is_finite() && self.msrp > 0.0) {
            return Err(format!("msrp must be positive (got {})", self.msrp));
        }
        if self.seats == 0 {
            return Err("seats must be positive".to_string());
        }
        if !(0.0..=5.0).contains(&self.safety_rating) {
            return Err(format!(
                "safety_rating must be within 0-5 (got {})",
                self.safety_rating
            ));
        }
        for (label, value) in [
            ("mpg_city", self.mpg_city),
            ("mpg_highway", self.mpg_highway),
            ("mpg_combined", self.mpg_combined),
            ("battery_range_mi", self.battery_range_mi),
        ] {
            if value.is_some_and(|value| !value.is_finite() || value < 0.0) {
                return Err(format!("{label} must be a finite, non-negative number"));
            }
        }

        let body_style = BodyStyle::parse(&self.body_style)
            .ok_or_else(|| format!("unknown body_style '{}'", self.body_style))?;
        let fuel_type = FuelType::parse(&self.fuel_type)
            .ok_or_else(|| format!("unknown fuel_type '{}'", self.fuel_type))?;
        let drivetrain = Drivetrain::parse(&self.drivetrain)
            .ok_or_else(|| format!("unknown drivetrain '{}'", self.drivetrain))?;

        Ok(Vehicle {
            id: VehicleId(self.id),
            make: self.make,
            model: self.model,
            year: self.year,
            trim: self.trim,
            msrp: self.msrp,
            body_style,
            fuel_type,
            mpg_city: self.mpg_city,
            mpg_highway: self.mpg_highway,
            mpg_combined: self.mpg_combined,
            battery_range_mi: self.battery_range_mi,
            drivetrain,
            seats: self.seats,
            safety_rating: self.safety_rating,
            features: split_list(&self.features),
            tags: split_list(&self.tags),
            specs: parse_specs(&self.specs)?,
            description: self.description,
        })
    }
}

fn split_list(raw: &str) -> BTreeSet<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_specs(raw: &str) -> Result<BTreeMap<String, String>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .ok_or_else(|| format!("spec '{pair}' is not key=value"))
        })
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
