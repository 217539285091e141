use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use courtside::development::{AttributeDefinition, Position, PositionWeights};
use courtside::roster::{roster_router, PlayerRepository, RosterService};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct CatalogResponse {
    pub(crate) attributes: Vec<AttributeDefinition>,
    pub(crate) weights: BTreeMap<Position, PositionWeights>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) undefined_weighted_ids: Vec<String>,
}

pub(crate) fn with_service_routes<R>(service: Arc<RosterService<R>>) -> axum::Router
where
    R: PlayerRepository + 'static,
{
    roster_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/catalog/attributes",
            axum::routing::get(catalog_endpoint),
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

/// Attribute definitions and every position's weight table.
pub(crate) async fn catalog_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<CatalogResponse> {
    let catalog = &state.catalog;
    let weights = Position::all()
        .into_iter()
        .map(|position| (position, catalog.weights(position).clone()))
        .collect();

    Json(CatalogResponse {
        attributes: catalog.definitions().cloned().collect(),
        weights,
        undefined_weighted_ids: catalog.undefined_weighted_ids(),
    })
}
