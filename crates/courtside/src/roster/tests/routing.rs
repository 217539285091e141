use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::development::{AttributeCatalog, Position};
use crate::roster::router::{register_handler, remove_handler};
use crate::roster::RosterService;

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request builds")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn register_route_creates_player() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let payload = json!({
        "name": "Maya Chen",
        "position": "PG",
        "team": "Varsity",
        "initial_assessment": {
            "assessed_on": "2025-09-01",
            "attributes": {
                "shooting": { "value": 12, "potential": 16 },
                "ballHandling": { "value": 14, "potential": 16 }
            }
        }
    });

    let response = router
        .oneshot(json_request("POST", "/api/v1/players", &payload))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["profile"]["name"], "Maya Chen");
    assert_eq!(body["profile"]["position"], "PG");
    assert_eq!(body["assessments"][0]["assessed_on"], "2025-09-01");
}

#[tokio::test]
async fn register_route_rejects_out_of_range_scores() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let payload = json!({
        "name": "Maya Chen",
        "position": "PG",
        "initial_assessment": {
            "attributes": { "shooting": { "value": 24, "potential": 24 } }
        }
    });

    let response = router
        .oneshot(json_request("POST", "/api/v1/players", &payload))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("shooting"));
}

#[tokio::test]
async fn unknown_position_is_rejected_by_the_extractor() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let payload = json!({ "name": "Maya Chen", "position": "QB" });

    let response = router
        .oneshot(json_request("POST", "/api/v1/players", &payload))
        .await
        .expect("route responds");

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn register_handler_returns_conflict_on_duplicate() {
    let service = Arc::new(RosterService::new(
        Arc::new(ConflictRepository),
        Arc::new(AttributeCatalog::standard()),
    ));

    let response =
        register_handler::<ConflictRepository>(State(service), axum::Json(assessed_guard())).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(RosterService::new(
        Arc::new(UnavailableRepository),
        Arc::new(AttributeCatalog::standard()),
    ));

    let response =
        register_handler::<UnavailableRepository>(State(service), axum::Json(assessed_guard()))
            .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn remove_handler_reports_missing_players() {
    let (service, _) = build_service();

    let response = remove_handler::<MemoryRepository>(
        State(Arc::new(service)),
        Path("player-unknown".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["player_id"], "player-unknown");
}

#[tokio::test]
async fn fetch_route_returns_not_found_for_unknown_player() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/players/player-404"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn development_route_returns_rating_and_plan() {
    let (service, _) = build_service();
    let record = service.register(assessed_guard()).expect("registered");
    let router = router_with_service(service);

    let uri = format!("/api/v1/players/{}/development", record.profile.player_id);
    let response = router
        .oneshot(get_request(&uri))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["evaluation"]["overall_rating"], 69);
    assert_eq!(body["evaluation"]["stars"], 4);
    let top = &body["recommendations"][0];
    assert_eq!(top["id"], "shooting-advanced");
    assert_eq!(top["priority"], "Medium");
    assert_eq!(top["category"], "technical");
    assert_eq!(top["icon"], "target");
}

#[tokio::test]
async fn assessment_and_progress_routes_track_history() {
    let (service, _) = build_service();
    let record = service.register(assessed_guard()).expect("registered");
    let id = record.profile.player_id.clone();
    let router = router_with_service(service);

    let payload = json!({
        "assessed_on": "2026-01-10",
        "attributes": {
            "shooting": { "value": 16, "potential": 17 },
            "ballHandling": { "value": 14, "potential": 16 },
            "speed": { "value": 16, "potential": 17 },
            "basketballIQ": { "value": 15, "potential": 17 }
        }
    });
    let uri = format!("/api/v1/players/{id}/assessments");
    let response = router
        .clone()
        .oneshot(json_request("POST", &uri, &payload))
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/api/v1/players/{id}/progress");
    let response = router
        .oneshot(get_request(&uri))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let progress = body["progress"].as_array().expect("progress array");
    assert_eq!(progress.len(), 2);
    assert_eq!(progress[1]["overall_rating"], 76);
    assert_eq!(progress[1]["rating_change"], 7);
}

#[tokio::test]
async fn list_route_filters_by_team() {
    let (service, _) = build_service();
    service.register(assessed_guard()).expect("registered");
    let mut other = registration("Leo Park", Position::PF);
    other.team = Some("JV".to_string());
    service.register(other).expect("registered");
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/players?team=JV"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let players = body.as_array().expect("player list");
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["name"], "Leo Park");
    assert!(players[0].get("overall_rating").is_none());
}

#[tokio::test]
async fn evaluate_route_scores_ad_hoc_snapshots() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let payload = json!({
        "position": "SG",
        "attributes": { "shooting": { "value": 3, "potential": 12 } }
    });

    let response = router
        .oneshot(json_request("POST", "/api/v1/development/evaluate", &payload))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["evaluation"]["overall_rating"], 15);
    assert_eq!(body["evaluation"]["stars"], 1);
    assert_eq!(body["recommendations"][0]["priority"], "High");
    assert_eq!(
        body["recommendations"][0]["title"],
        "Focus on Shooting Fundamentals"
    );
}
