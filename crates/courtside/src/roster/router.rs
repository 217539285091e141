use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{AssessmentSubmission, PlayerId, PlayerRegistration};
use super::repository::{PlayerRepository, RepositoryError};
use super::service::{RosterService, RosterServiceError};
use crate::development::{PlayerAttributes, Position};

/// Router builder exposing roster and development endpoints.
pub fn roster_router<R>(service: Arc<RosterService<R>>) -> Router
where
    R: PlayerRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/players",
            post(register_handler::<R>).get(list_handler::<R>),
        )
        .route(
            "/api/v1/players/:player_id",
            get(fetch_handler::<R>).delete(remove_handler::<R>),
        )
        .route(
            "/api/v1/players/:player_id/assessments",
            post(assessment_handler::<R>),
        )
        .route(
            "/api/v1/players/:player_id/development",
            get(development_handler::<R>),
        )
        .route(
            "/api/v1/players/:player_id/progress",
            get(progress_handler::<R>),
        )
        .route(
            "/api/v1/development/evaluate",
            post(evaluate_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) team: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub(crate) position: Position,
    pub(crate) attributes: PlayerAttributes,
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<RosterService<R>>>,
    Json(registration): Json<PlayerRegistration>,
) -> Response
where
    R: PlayerRepository + 'static,
{
    match service.register(registration) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err, None),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<RosterService<R>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: PlayerRepository + 'static,
{
    match service.list(query.team.as_deref()) {
        Ok(players) => (StatusCode::OK, Json(players)).into_response(),
        Err(err) => error_response(err, None),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<RosterService<R>>>,
    Path(player_id): Path<String>,
) -> Response
where
    R: PlayerRepository + 'static,
{
    let id = PlayerId(player_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err, Some(&id)),
    }
}

pub(crate) async fn remove_handler<R>(
    State(service): State<Arc<RosterService<R>>>,
    Path(player_id): Path<String>,
) -> Response
where
    R: PlayerRepository + 'static,
{
    let id = PlayerId(player_id);
    match service.remove(&id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err, Some(&id)),
    }
}

pub(crate) async fn assessment_handler<R>(
    State(service): State<Arc<RosterService<R>>>,
    Path(player_id): Path<String>,
    Json(submission): Json<AssessmentSubmission>,
) -> Response
where
    R: PlayerRepository + 'static,
{
    let id = PlayerId(player_id);
    match service.record_assessment(&id, submission) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err, Some(&id)),
    }
}

pub(crate) async fn development_handler<R>(
    State(service): State<Arc<RosterService<R>>>,
    Path(player_id): Path<String>,
) -> Response
where
    R: PlayerRepository + 'static,
{
    let id = PlayerId(player_id);
    match service.development_report(&id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err, Some(&id)),
    }
}

pub(crate) async fn progress_handler<R>(
    State(service): State<Arc<RosterService<R>>>,
    Path(player_id): Path<String>,
) -> Response
where
    R: PlayerRepository + 'static,
{
    let id = PlayerId(player_id);
    match service.progress(&id) {
        Ok(points) => {
            let payload = json!({ "player_id": id.0, "progress": points });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err, Some(&id)),
    }
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<RosterService<R>>>,
    Json(request): Json<EvaluateRequest>,
) -> Response
where
    R: PlayerRepository + 'static,
{
    match service.assess(request.position, &request.attributes) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(err) => error_response(err, None),
    }
}

fn error_response(err: RosterServiceError, player_id: Option<&PlayerId>) -> Response {
    let status = match &err {
        RosterServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RosterServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RosterServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RosterServiceError::Repository(RepositoryError::Unavailable(_)) => {
            warn!(error = %err, "roster repository unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = match player_id {
        Some(id) if status == StatusCode::NOT_FOUND => json!({
            "error": format!("player {id} not found"),
            "player_id": id.0,
        }),
        _ => json!({ "error": err.to_string() }),
    };

    (status, Json(payload)).into_response()
}
