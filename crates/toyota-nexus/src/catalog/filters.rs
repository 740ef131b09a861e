use super::domain::{BodyStyle, FuelType, Vehicle};

/// Explore-page filter. `None` for fuel or body style means "any".
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleFilter {
    pub fuel_type: Option<FuelType>,
    pub body_style: Option<BodyStyle>,
    pub price_min: f64,
    pub price_max: f64,
    pub search: String,
}

impl Default for VehicleFilter {
    fn default() -> Self {
        Self {
            fuel_type: None,
            body_style: None,
            price_min: 20_000.0,
            price_max: 60_000.0,
            search: String::new(),
        }
    }
}

impl VehicleFilter {
    /// A filter with no price window, used when callers only narrow by type.
    pub fn unbounded() -> Self {
        Self {
            price_min: 0.0,
            price_max: f64::MAX,
            ..Self::default()
        }
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if self.fuel_type.is_some_and(|fuel| fuel != vehicle.fuel_type) {
            return false;
        }
        if self.body_style.is_some_and(|style| style != vehicle.body_style) {
            return false;
        }
        if vehicle.msrp < self.price_min || vehicle.msrp > self.price_max {
            return false;
        }

        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        vehicle.name().to_lowercase().contains(&query)
            || vehicle.trim.to_lowercase().contains(&query)
            || vehicle.description.to_lowercase().contains(&query)
            || vehicle
                .features
                .iter()
                .any(|feature| feature.to_lowercase().contains(&query))
            || vehicle
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
    }
}
