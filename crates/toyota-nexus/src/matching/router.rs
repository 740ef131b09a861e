use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::{MatchEngine, DEFAULT_RECOMMENDATION_LIMIT};
use crate::catalog::{BodyStyle, FuelType, VehicleCatalog, VehicleFilter, VehicleId};
use crate::profile::PreferenceProfile;

/// Shared read-only state for the catalog and matching endpoints.
#[derive(Debug, Clone)]
pub struct MatchingState {
    pub catalog: Arc<VehicleCatalog>,
    pub engine: Arc<MatchEngine>,
    pub recommendation_limit: usize,
}

impl MatchingState {
    pub fn new(catalog: Arc<VehicleCatalog>, engine: Arc<MatchEngine>) -> Self {
        Self {
            catalog,
            engine,
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}

/// Router exposing vehicle browsing, scoring, and recommendations.
pub fn matching_router(state: MatchingState) -> Router {
    Router::new()
        .route("/api/v1/vehicles", get(list_handler))
        .route("/api/v1/vehicles/:vehicle_id", get(vehicle_handler))
        .route("/api/v1/match", post(match_handler))
        .route("/api/v1/recommendations", post(recommendations_handler))
        .with_state(state)
}

/// Explore-page query string. `any` or an empty value leaves a dimension open.
#[derive(Debug, Default, Deserialize)]
pub struct VehicleQuery {
    pub fuel_type: Option<String>,
    pub body_style: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub q: Option<String>,
}

impl VehicleQuery {
    fn into_filter(self) -> Result<VehicleFilter, String> {
        let defaults = VehicleFilter::default();
        Ok(VehicleFilter {
            fuel_type: parse_choice(self.fuel_type, "fuel_type", FuelType::parse)?,
            body_style: parse_choice(self.body_style, "body_style", BodyStyle::parse)?,
            price_min: self.price_min.unwrap_or(defaults.price_min),
            price_max: self.price_max.unwrap_or(defaults.price_max),
            search: self.q.unwrap_or_default(),
        })
    }
}

fn parse_choice<T>(
    raw: Option<String>,
    field: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, String> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("any") => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| format!("unknown {field} '{value}'")),
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub vehicle_id: VehicleId,
    #[serde(default)]
    pub preferences: PreferenceProfile,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub profile: PreferenceProfile,
    #[serde(default)]
    pub limit: Option<usize>,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

fn unknown_vehicle(id: &VehicleId) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("vehicle '{id}' not found"))
}

pub(crate) async fn list_handler(
    State(state): State<MatchingState>,
    Query(query): Query<VehicleQuery>,
) -> Response {
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    let vehicles = state.catalog.filter(&filter);
    let payload = json!({
        "count": vehicles.len(),
        "vehicles": vehicles,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn vehicle_handler(
    State(state): State<MatchingState>,
    Path(vehicle_id): Path<String>,
) -> Response {
    let id = VehicleId(vehicle_id);
    match state.catalog.get(&id) {
        Some(vehicle) => (StatusCode::OK, axum::Json(vehicle)).into_response(),
        None => unknown_vehicle(&id),
    }
}

pub(crate) async fn match_handler(
    State(state): State<MatchingState>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response {
    match state.catalog.get(&request.vehicle_id) {
        Some(vehicle) => {
            let result = state.engine.score(vehicle, &request.preferences);
            (StatusCode::OK, axum::Json(result)).into_response()
        }
        None => unknown_vehicle(&request.vehicle_id),
    }
}

pub(crate) async fn recommendations_handler(
    State(state): State<MatchingState>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response {
    let limit = request.limit.unwrap_or(state.recommendation_limit);
    if limit == 0 {
        return error_response(
            StatusCode::BAD_REQUEST,
            "limit must be at least 1".to_string(),
        );
    }

    let recommendations = state
        .engine
        .recommend(&state.catalog, &request.profile, limit);
    let payload = json!({
        "completed": request.profile.completed,
        "recommendations": recommendations,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
