//! End-to-end tests against a live server on an ephemeral port.

#![allow(clippy::panic, clippy::indexing_slicing, missing_docs)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio_tungstenite::tungstenite::Message;

use event_schedule_gateway::api::build_app;
use event_schedule_gateway::app_state::AppState;
use event_schedule_gateway::domain::{EventBus, EventRegistry};
use event_schedule_gateway::service::EventService;
use event_schedule_gateway::validation::{EventValidator, FixedClock, ValidatorOptions};

async fn spawn_server() -> SocketAddr {
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
    let app = build_app(AppState {
        event_service,
        event_bus,
        audit_log: None,
    });

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind should succeed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has an address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

fn command(id: &str, payload: Value) -> Message {
    Message::text(
        json!({
            "id": id,
            "type": "command",
            "timestamp": Utc::now(),
            "payload": payload,
        })
        .to_string(),
    )
}

async fn next_json<S>(stream: &mut S) -> Value
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let Ok(Some(Ok(msg))) = tokio::time::timeout(Duration::from_secs(5), stream.next()).await
        else {
            panic!("expected a websocket message");
        };
        if let Message::Text(text) = msg {
            let Ok(value) = serde_json::from_str::<Value>(text.as_str()) else {
                panic!("server sends JSON");
            };
            return value;
        }
    }
}

fn draft() -> Value {
    json!({
        "name": "Đêm nhạc Trịnh",
        "showtimes": [{
            "start_time": "2026-05-10T20:00",
            "end_time": "2026-05-10T22:00",
            "tickets": [{ "name": "Standard", "price": 300000, "quantity": 100 }]
        }]
    })
}

#[tokio::test]
async fn rest_validate_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let Ok(response) = client
        .post(format!("http://{addr}/api/v1/events/validate"))
        .json(&json!({ "name": "  ", "showtimes": [] }))
        .send()
        .await
    else {
        panic!("request should succeed");
    };
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let Ok(report) = response.json::<Value>().await else {
        panic!("report should be JSON");
    };
    assert_eq!(report["valid"], false);
    assert_eq!(report["errors"][0]["message"], "Tên sự kiện không được để trống");
}

#[tokio::test]
async fn subscribers_receive_created_events() {
    let addr = spawn_server().await;
    let Ok((mut ws, _)) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await else {
        panic!("websocket should connect");
    };

    let Ok(()) = ws
        .send(command("sub-1", json!({ "command": "subscribe", "event_ids": ["*"] })))
        .await
    else {
        panic!("send should succeed");
    };
    let ack = next_json(&mut ws).await;
    assert_eq!(ack["id"], "sub-1");
    assert_eq!(ack["type"], "response");
    assert_eq!(ack["payload"]["wildcard"], true);

    let Ok(response) = reqwest::Client::new()
        .post(format!("http://{addr}/api/v1/events"))
        .json(&draft())
        .send()
        .await
    else {
        panic!("create should succeed");
    };
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let Ok(created) = response.json::<Value>().await else {
        panic!("created event should be JSON");
    };

    let event = next_json(&mut ws).await;
    assert_eq!(event["type"], "event");
    assert_eq!(event["payload"]["event_type"], "event_created");
    assert_eq!(event["payload"]["event_id"], created["event_id"]);
    assert_eq!(event["payload"]["slug"], "dem-nhac-trinh");
}

#[tokio::test]
async fn validate_command_over_websocket() {
    let addr = spawn_server().await;
    let Ok((mut ws, _)) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await else {
        panic!("websocket should connect");
    };

    let mut payload = draft();
    payload["command"] = json!("validate");
    payload["showtimes"][0]["end_time"] = json!("2026-05-12T20:00");
    let Ok(()) = ws.send(command("val-1", payload)).await else {
        panic!("send should succeed");
    };

    let reply = next_json(&mut ws).await;
    assert_eq!(reply["id"], "val-1");
    assert_eq!(reply["payload"]["valid"], false);
    assert_eq!(reply["payload"]["errors"][0]["rule"], "duration_exceeded");
    assert_eq!(
        reply["payload"]["first_message"],
        "Suất diễn 1: Thời lượng không được vượt quá 24 giờ"
    );
}
