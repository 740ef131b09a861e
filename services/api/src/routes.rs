use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use toyota_nexus::error::AppError;
use toyota_nexus::finance::{FinanceEstimate, LeaseEstimate, LeaseTerms, LoanTerms};
use toyota_nexus::matching::{matching_router, MatchingState};

pub(crate) fn with_nexus_routes(matching: MatchingState) -> axum::Router {
    matching_router(matching)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/finance/loan",
            axum::routing::post(loan_estimate_endpoint),
        )
        .route(
            "/api/v1/finance/lease",
            axum::routing::post(lease_estimate_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn loan_estimate_endpoint(
    Json(terms): Json<LoanTerms>,
) -> Result<Json<FinanceEstimate>, AppError> {
    Ok(Json(terms.estimate()?))
}

pub(crate) async fn lease_estimate_endpoint(
    Json(terms): Json<LeaseTerms>,
) -> Result<Json<LeaseEstimate>, AppError> {
    Ok(Json(terms.estimate()?))
}
