//! Static vehicle catalog loaded once at startup and shared read-only.

pub mod domain;
mod filters;
mod loader;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

pub use domain::{BodyStyle, Drivetrain, FuelType, Vehicle, VehicleId};
pub use filters::VehicleFilter;

const BUILTIN_LINEUP: &str = include_str!("lineup.csv");

/// Errors raised while loading or querying the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read vehicle catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid vehicle catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog row {row} rejected: {reason}")]
    InvalidRow { row: usize, reason: String },
    #[error("duplicate vehicle id '{0}'")]
    DuplicateId(VehicleId),
    #[error("vehicle '{0}' not found")]
    UnknownVehicle(VehicleId),
}

#[derive(Debug, Clone, Default)]
pub struct VehicleCatalog {
    vehicles: Vec<Vehicle>,
}

impl VehicleCatalog {
    /// The bundled model-year lineup.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_reader(BUILTIN_LINEUP.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), vehicles = catalog.len(), "loaded vehicle catalog");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::from_vehicles(loader::parse_vehicles(reader)?)
    }

    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for vehicle in &vehicles {
            if !seen.insert(vehicle.id.clone()) {
                return Err(CatalogError::DuplicateId(vehicle.id.clone()));
            }
        }

        debug!(vehicles = vehicles.len(), "catalog validated");
        Ok(Self { vehicles })
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn get(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| &vehicle.id == id)
    }

    pub fn require(&self, id: &VehicleId) -> Result<&Vehicle, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownVehicle(id.clone()))
    }

    /// Vehicles matching the filter, in catalog order.
    pub fn filter(&self, filter: &VehicleFilter) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|vehicle| filter.matches(vehicle))
            .collect()
    }
}
