//! REST API tests driving the router in-process.

#![allow(clippy::panic, clippy::indexing_slicing, missing_docs)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use event_schedule_gateway::api::build_app;
use event_schedule_gateway::app_state::AppState;
use event_schedule_gateway::domain::{EventBus, EventRegistry};
use event_schedule_gateway::service::EventService;
use event_schedule_gateway::validation::{EventValidator, FixedClock, ValidatorOptions};

fn app() -> Router {
    let Some(now) = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single() else {
        panic!("valid instant");
    };
    let event_bus = EventBus::new(64);
    let event_service = Arc::new(EventService::new(
        Arc::new(EventRegistry::new()),
        event_bus.clone(),
        EventValidator::new(ValidatorOptions::default()),
        Arc::new(FixedClock::new(now)),
    ));
    build_app(AppState {
        event_service,
        event_bus,
        audit_log: None,
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    };
    let Ok(request) = request else {
        panic!("request should build");
    };
    let Ok(response) = app.clone().oneshot(request).await else {
        panic!("router is infallible");
    };
    let status = response.status();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("body should read");
    };
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn concert_body() -> Value {
    json!({
        "name": "Hòa nhạc Mùa Thu",
        "showtimes": [{
            "id": "tmp-1",
            "start_time": "2026-03-01T19:00",
            "end_time": "2026-03-01T21:00",
            "tickets": [
                { "id": "tmp-a", "name": "VIP", "price": 500000, "quantity": 50 },
                { "name": "Thường", "price": 200000, "quantity": 200 }
            ]
        }]
    })
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn rule_catalog_lists_every_rule() {
    let (status, body) = send(&app(), Method::GET, "/config/validation-rules", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["max_showtime_hours"], 24);
    assert_eq!(body["duplicate_slot_mode"], "raw");
    assert_eq!(body["local_utc_offset"], "+07:00");
    assert_eq!(body["rules"].as_array().map(Vec::len), Some(15));
    assert_eq!(body["rules"][0]["rule"], "name_required");
    assert_eq!(body["rules"][0]["category"], "missing_field");
    assert_eq!(body["rules"][0]["fields"], json!(["name"]));
    assert_eq!(body["rules"][4]["rule"], "invalid_timestamp");
    assert_eq!(body["rules"][4]["fields"], json!(["start_time", "end_time"]));
    assert_eq!(body["rules"][12]["fields"], json!(["quantity"]));
}

#[tokio::test]
async fn validate_accepts_a_clean_draft() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/v1/events/validate",
        Some(concert_body()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["error_count"], 0);
    assert_eq!(body["first_message"], Value::Null);
}

#[tokio::test]
async fn validate_reports_findings_with_ok_status() {
    let draft = json!({ "name": "", "showtimes": [] });
    let (status, body) = send(&app(), Method::POST, "/api/v1/events/validate", Some(draft)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["error_count"], 2);
    assert_eq!(body["first_message"], "Tên sự kiện không được để trống");
    assert_eq!(
        body["summary"],
        "Tên sự kiện không được để trống\nSự kiện phải có ít nhất một suất diễn"
    );
}

#[tokio::test]
async fn validate_carries_indices_and_ordinals() {
    let draft = json!({
        "name": "Concert",
        "showtimes": [{
            "start_time": "2026-03-01T19:00",
            "end_time": "2026-03-01T21:00",
            "tickets": [
                { "name": "VIP", "price": 100, "quantity": 1 },
                { "name": " vip ", "price": -1, "quantity": 1 }
            ]
        }]
    });
    let (_, body) = send(&app(), Method::POST, "/api/v1/events/validate", Some(draft)).await;
    let errors = &body["errors"];
    assert_eq!(errors.as_array().map(Vec::len), Some(2));
    assert_eq!(errors[0]["rule"], "duplicate_ticket_name");
    assert_eq!(errors[0]["showtime_index"], 0);
    assert_eq!(errors[0]["ticket_index"], 1);
    assert_eq!(errors[1]["rule"], "negative_price");
    assert_eq!(errors[1]["message"], "Suất diễn 1 - Vé 2: Giá vé không được âm");
}

#[tokio::test]
async fn create_get_list_delete_roundtrip() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/api/v1/events", Some(concert_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "hoa-nhac-mua-thu");
    assert!(created["showtimes"][0]["id"].is_i64());
    assert!(created["showtimes"][0]["tickets"][1]["id"].is_i64());
    let Some(id) = created["event_id"].as_str().map(str::to_string) else {
        panic!("event_id should be a string");
    };

    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/events/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Hòa nhạc Mùa Thu");

    let (status, list) = send(&app, Method::GET, "/api/v1/events?page=1&per_page=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["pagination"]["total"], 1);
    assert_eq!(list["data"][0]["showtime_count"], 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/events/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/events/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);
}

#[tokio::test]
async fn create_refuses_an_invalid_draft() {
    let mut draft = concert_body();
    draft["showtimes"][0]["end_time"] = json!("2026-03-01T18:00");
    let (status, body) = send(&app(), Method::POST, "/api/v1/events", Some(draft)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 1002);
    assert_eq!(body["error"]["details"][0]["rule"], "end_not_after_start");
    assert_eq!(body["error"]["details"][0]["field"], "end_time");
}

#[tokio::test]
async fn duplicate_slug_conflicts() {
    let app = app();
    let mut first = concert_body();
    first["slug"] = json!("autumn");
    let (status, _) = send(&app, Method::POST, "/api/v1/events", Some(first.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/v1/events", Some(first)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], 2002);
}

#[tokio::test]
async fn update_keeps_persisted_ids() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/v1/events", Some(concert_body())).await;
    let Some(id) = created["event_id"].as_str().map(str::to_string) else {
        panic!("event_id should be a string");
    };
    let showtime_id = created["showtimes"][0]["id"].clone();

    let update = json!({
        "name": "Hòa nhạc Mùa Thu 2026",
        "showtimes": [
            {
                "id": showtime_id,
                "start_time": "2026-03-01T19:30",
                "end_time": "2026-03-01T21:30",
                "tickets": [{ "name": "VIP", "price": 600000, "quantity": 40 }]
            },
            {
                "id": "tmp-2",
                "start_time": "2026-03-02T19:30",
                "end_time": "2026-03-02T21:30",
                "tickets": [{ "name": "VIP", "price": 600000, "quantity": 40 }]
            }
        ]
    });
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/events/{id}"),
        Some(update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["slug"], "hoa-nhac-mua-thu");
    assert_eq!(updated["showtimes"][0]["id"], showtime_id);
    assert_ne!(updated["showtimes"][1]["id"], showtime_id);
}

#[tokio::test]
async fn update_of_unknown_event_is_not_found() {
    let uri = format!("/api/v1/events/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app(), Method::PUT, &uri, Some(concert_body())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(&app(), Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/events/validate"].is_object());
}

#[tokio::test]
async fn history_without_audit_log_is_unavailable() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/v1/events", Some(concert_body())).await;
    let Some(id) = created["event_id"].as_str().map(str::to_string) else {
        panic!("event_id should be a string");
    };
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/events/{id}/history"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], 3002);
}

#[tokio::test]
async fn openapi_document_lists_history_route() {
    let (_, body) = send(&app(), Method::GET, "/api-docs/openapi.json", None).await;
    assert!(body["paths"]["/api/v1/events/{id}/history"]["get"].is_object());
}

