//! End-to-end API tests driving the real router without a network socket.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use muster_server::api;
use muster_server::core::{Config, ServerState};
use muster_server::db::DbService;

async fn test_app() -> Router {
    let db = DbService::in_memory().await.expect("in-memory database");
    let state = ServerState::new(Config::from_env(), db.pool);
    api::build_app().with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_user(app: &Router, user_id: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/users",
        Some(json!({"userId": user_id, "name": format!("User {user_id}")})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn create_event(app: &Router, event_id: &str, capacity: i64, waitlist: bool) {
    let (status, _) = send(
        app,
        "POST",
        "/events",
        Some(json!({
            "eventId": event_id,
            "title": format!("Event {event_id}"),
            "description": "integration test event",
            "date": "2026-09-01T18:00:00Z",
            "location": "Main Hall",
            "capacity": capacity,
            "organizer": "tests",
            "status": "published",
            "waitlistEnabled": waitlist,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn register(app: &Router, user_id: &str, event_id: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/users/{user_id}/registrations"),
        Some(json!({"eventId": event_id})),
    )
    .await
}

#[tokio::test]
async fn user_roundtrip_and_duplicate() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"userId": "alice", "name": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["userId"], "alice");
    assert_eq!(created["name"], "Alice");

    let (status, fetched) = send(&app, "GET", "/users/alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["userId"], "alice");
    assert_eq!(fetched["name"], "Alice");
    assert!(fetched["createdAt"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"userId": "alice", "name": "Other"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_USER");
}

#[tokio::test]
async fn whitespace_user_id_is_a_validation_error() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"userId": "  ", "name": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let details = body["error"]["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["field"] == "userId"));
    // Envelope carries request context
    assert_eq!(body["error"]["path"], "/users");
    assert!(body["error"]["requestId"].is_string());
    assert!(body["error"]["timestamp"].is_string());
}

#[tokio::test]
async fn whitespace_name_is_a_validation_error() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"userId": "bob", "name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let details = body["error"]["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["field"] == "name"));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/users/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn event_lifecycle() {
    let app = test_app().await;
    create_event(&app, "e1", 3, true).await;

    let (status, event) = send(&app, "GET", "/events/e1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["eventId"], "e1");
    assert_eq!(event["capacity"], 3);
    assert_eq!(event["registeredCount"], 0);
    assert_eq!(event["availableSpots"], 3);
    assert_eq!(event["waitlistCount"], 0);
    assert_eq!(event["waitlistEnabled"], true);
    assert_eq!(event["waitlist"], json!([]));

    // Listing, with and without a status filter
    let (status, list) = send(&app, "GET", "/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, list) = send(&app, "GET", "/events?status=published", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, list) = send(&app, "GET", "/events?status=draft", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 0);

    let (status, body) = send(&app, "GET", "/events?status=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Opaque update is allowed
    let (status, updated) = send(
        &app,
        "PUT",
        "/events/e1",
        Some(json!({"title": "Renamed", "location": "Annex"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["location"], "Annex");

    // Engine-owned fields are rejected
    let (status, body) = send(&app, "PUT", "/events/e1", Some(json!({"capacity": 10}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Empty patches are rejected
    let (status, body) = send(&app, "PUT", "/events/e1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");

    let (status, _) = send(&app, "DELETE", "/events/e1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/events/e1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "EVENT_NOT_FOUND");

    let (status, _) = send(&app, "DELETE", "/events/e1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn event_create_generates_id_when_absent() {
    let app = test_app().await;

    let (status, event) = send(
        &app,
        "POST",
        "/events",
        Some(json!({
            "title": "No id",
            "description": "",
            "date": "2026-09-01",
            "location": "Hall",
            "capacity": 1,
            "organizer": "tests",
            "status": "draft",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = event["eventId"].as_str().unwrap();
    assert!(!id.is_empty());
    // Defaults: waitlist disabled
    assert_eq!(event["waitlistEnabled"], false);

    let (status, _) = send(&app, "GET", &format!("/events/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn event_create_validates_payload() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/events",
        Some(json!({
            "title": " ",
            "description": "",
            "date": "2026-09-01",
            "location": "Hall",
            "capacity": 0,
            "organizer": "tests",
            "status": "bogus",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"capacity"));
    assert!(fields.contains(&"status"));
}

#[tokio::test]
async fn fill_and_promote_flow() {
    let app = test_app().await;
    for user in ["u1", "u2", "u3"] {
        create_user(&app, user).await;
    }
    create_event(&app, "e", 2, true).await;

    let (status, first) = register(&app, "u1", "e").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["status"], "confirmed");
    assert_eq!(first["availableSpots"], 1);

    let (status, second) = register(&app, "u2", "e").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["status"], "confirmed");
    assert_eq!(second["availableSpots"], 0);

    let (status, third) = register(&app, "u3", "e").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(third["status"], "waitlist");
    assert_eq!(third["waitlistCount"], 1);
    assert_eq!(third["eventTitle"], "Event e");

    let (_, event) = send(&app, "GET", "/events/e", None).await;
    assert_eq!(event["registeredCount"], 2);
    assert_eq!(event["waitlist"], json!(["u3"]));

    let (status, _) = send(&app, "DELETE", "/users/u1/registrations/e", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // u3 was promoted: the slot count is restored and the waitlist drained
    let (_, event) = send(&app, "GET", "/events/e", None).await;
    assert_eq!(event["registeredCount"], 2);
    assert_eq!(event["waitlist"], json!([]));

    let (status, list) = send(&app, "GET", "/users/u3/registrations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["registrations"][0]["status"], "confirmed");
}

#[tokio::test]
async fn full_event_without_waitlist_conflicts() {
    let app = test_app().await;
    create_user(&app, "u1").await;
    create_user(&app, "u2").await;
    create_event(&app, "e2", 1, false).await;

    let (status, _) = register(&app, "u1", "e2").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, "u2", "e2").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "EVENT_FULL");
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app().await;
    create_user(&app, "u1").await;
    create_event(&app, "e3", 5, false).await;

    let (status, _) = register(&app, "u1", "e3").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, "u1", "e3").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "ALREADY_REGISTERED");
}

#[tokio::test]
async fn unknown_references_are_not_found() {
    let app = test_app().await;
    create_user(&app, "u1").await;
    create_event(&app, "e1", 1, false).await;

    let (status, body) = register(&app, "ghost", "e1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");

    let (status, body) = register(&app, "u1", "nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "EVENT_NOT_FOUND");

    let (status, body) = send(&app, "DELETE", "/users/u1/registrations/e1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "REGISTRATION_NOT_FOUND");

    let (status, body) = send(&app, "GET", "/users/ghost/registrations", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");

    let (status, body) = send(&app, "GET", "/events/nowhere/registrations", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "EVENT_NOT_FOUND");
}

#[tokio::test]
async fn event_centric_routes_alias_user_centric_records() {
    let app = test_app().await;
    create_user(&app, "u1").await;
    create_user(&app, "u2").await;
    create_event(&app, "e1", 2, false).await;

    // Register through the event-centric route
    let (status, created) = send(
        &app,
        "POST",
        "/events/e1/registrations",
        Some(json!({"userId": "u1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "confirmed");

    // Visible through the user-centric listing
    let (_, list) = send(&app, "GET", "/users/u1/registrations", None).await;
    assert_eq!(list["total"], 1);

    // And through the event-centric listing
    let (status, _) = register(&app, "u2", "e1").await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, list) = send(&app, "GET", "/events/e1/registrations", None).await;
    assert_eq!(list["total"], 2);

    // Unregister through the event-centric route
    let (status, _) = send(&app, "DELETE", "/events/e1/registrations/u1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, list) = send(&app, "GET", "/users/u1/registrations", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn empty_registration_listing() {
    let app = test_app().await;
    create_user(&app, "u1").await;

    let (status, list) = send(&app, "GET", "/users/u1/registrations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 0);
    assert_eq!(list["registrations"], json!([]));
}

#[tokio::test]
async fn health_and_banner() {
    let app = test_app().await;

    let (status, banner) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(banner["message"], "Muster Events API");

    let (status, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"], "ok");
}
