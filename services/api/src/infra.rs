use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use toyota_nexus::catalog::VehicleCatalog;
use toyota_nexus::config::NexusConfig;
use toyota_nexus::error::AppError;
use toyota_nexus::matching::{MatchEngine, MatchingState};
use toyota_nexus::profile::PreferenceProfile;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The configured CSV lineup, or the bundled one when no path is set.
pub(crate) fn load_catalog(config: &NexusConfig) -> Result<VehicleCatalog, AppError> {
    let catalog = match &config.catalog_path {
        Some(path) => VehicleCatalog::from_path(path)?,
        None => {
            let catalog = VehicleCatalog::builtin()?;
            info!(vehicles = catalog.len(), "using bundled vehicle lineup");
            catalog
        }
    };
    Ok(catalog)
}

pub(crate) fn matching_state(config: &NexusConfig) -> Result<MatchingState, AppError> {
    let catalog = Arc::new(load_catalog(config)?);
    let mut state = MatchingState::new(catalog, Arc::new(MatchEngine::default()));
    state.recommendation_limit = config.recommendation_limit;
    Ok(state)
}

/// Read a profile JSON document. Unlike the profile store, a missing file is an error.
pub(crate) fn read_profile(path: &Path) -> Result<PreferenceProfile, AppError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| {
        AppError::InvalidInput(format!("{} is not a valid profile: {err}", path.display()))
    })
}
