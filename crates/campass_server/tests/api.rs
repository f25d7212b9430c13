use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use campass_core::db::{open_db, open_db_in_memory};
use campass_server::{router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(open_db_in_memory().unwrap()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn midterm() -> Value {
    json!({
        "title": "Midterm",
        "description": "chapters 1-4",
        "dueAt": "2025-12-01T09:00",
        "completed": false,
        "pinned": true
    })
}

#[tokio::test]
async fn create_deadline_applies_defaults() {
    let app = app();
    let (status, created) = send(&app, Method::POST, "/deadlines", Some(midterm())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 1);
    assert_eq!(created["dueAt"], "2025-12-01T09:00:00");
    assert_eq!(created["pinned"], true);
    assert_eq!(created["iconIndex"], 0);
    assert_eq!(created["colorIndex"], 0);
    assert_eq!(created["notificationEnabled"], false);
    assert_eq!(created["notificationMinutesBefore"], Value::Null);
    assert_eq!(created["widget"], false);
}

#[tokio::test]
async fn put_deadline_replaces_the_whole_record() {
    let app = app();
    send(&app, Method::POST, "/deadlines", Some(midterm())).await;

    let mut payload = midterm();
    payload["notificationEnabled"] = json!(true);
    payload["notificationMinutesBefore"] = json!(30);
    let (status, updated) = send(&app, Method::PUT, "/deadlines/1", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["notificationMinutesBefore"], 30);

    let (_, listed) = send(&app, Method::GET, "/deadlines", None).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], 1);
    assert_eq!(listed[0]["title"], "Midterm");
    assert_eq!(listed[0]["notificationEnabled"], true);
    assert_eq!(listed[0]["notificationMinutesBefore"], 30);
}

#[tokio::test]
async fn put_deadline_with_missing_fields_zeroes_them() {
    let app = app();
    send(&app, Method::POST, "/deadlines", Some(midterm())).await;

    let (_, updated) = send(
        &app,
        Method::PUT,
        "/deadlines/1",
        Some(json!({ "title": "Midterm", "dueAt": "2025-12-01T09:00" })),
    )
    .await;

    assert_eq!(updated["description"], "");
    assert_eq!(updated["pinned"], false);
}

#[tokio::test]
async fn put_unknown_deadline_is_a_server_error_with_code() {
    let app = app();
    let (status, body) = send(&app, Method::PUT, "/deadlines/999", Some(midterm())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "deadline not found with id: 999");
}

#[tokio::test]
async fn deadline_accepts_iso_string_with_utc_suffix() {
    let app = app();
    let mut payload = midterm();
    payload["dueAt"] = json!("2025-12-08T09:00:00.000Z");
    let (status, created) = send(&app, Method::POST, "/deadlines", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["dueAt"], "2025-12-08T09:00:00");
}

#[tokio::test]
async fn null_due_at_decodes_like_a_missing_one() {
    let app = app();
    let mut payload = midterm();
    payload["dueAt"] = Value::Null;
    let (status, created) = send(&app, Method::POST, "/deadlines", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["dueAt"], "1970-01-01T00:00:00");
}

#[tokio::test]
async fn deleting_twice_succeeds_both_times() {
    let app = app();
    send(&app, Method::POST, "/deadlines", Some(midterm())).await;

    let (first, _) = send(&app, Method::DELETE, "/deadlines/1", None).await;
    let (second, _) = send(&app, Method::DELETE, "/deadlines/1", None).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);

    let (_, listed) = send(&app, Method::GET, "/deadlines", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn event_update_keeps_description() {
    let app = app();
    let event = json!({
        "title": "Lecture",
        "description": "Room 1100",
        "startTime": "2025-11-03T14:00",
        "endTime": "2025-11-03T15:30",
        "completed": false
    });
    let (_, created) = send(&app, Method::POST, "/events", Some(event.clone())).await;
    assert_eq!(created["notificationEnabled"], false);

    let mut payload = event;
    payload["completed"] = json!(true);
    let (status, updated) = send(&app, Method::PUT, "/events/1", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Room 1100");
    assert_eq!(updated["completed"], true);
}

#[tokio::test]
async fn put_unknown_event_is_a_server_error_with_code() {
    let app = app();
    let event = json!({
        "title": "Lecture",
        "startTime": "2025-11-03T14:00",
        "endTime": "2025-11-03T15:30"
    });
    let (status, body) = send(&app, Method::PUT, "/events/999", Some(event)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "event not found with id: 999");

    let (_, listed) = send(&app, Method::GET, "/events", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn event_ids_are_not_reused_and_are_per_kind() {
    let app = app();
    let event = json!({
        "title": "Seminar",
        "startTime": "2025-11-04T10:00",
        "endTime": "2025-11-04T11:00"
    });
    send(&app, Method::POST, "/events", Some(event.clone())).await;
    let (_, second) = send(&app, Method::POST, "/events", Some(event.clone())).await;
    assert_eq!(second["id"], 2);

    send(&app, Method::DELETE, "/events/2", None).await;
    let (_, third) = send(&app, Method::POST, "/events", Some(event)).await;
    assert_eq!(third["id"], 3);

    let (_, note) = send(&app, Method::POST, "/notes", Some(json!({ "content": "hi" }))).await;
    assert_eq!(note["id"], 1);
}

#[tokio::test]
async fn events_can_be_deleted_under_api_prefix() {
    let app = app();
    let event = json!({
        "title": "Lab",
        "startTime": "2025-11-05T09:00",
        "endTime": "2025-11-05T11:00"
    });
    send(&app, Method::POST, "/events", Some(event)).await;

    let (status, _) = send(&app, Method::DELETE, "/api/events/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send(&app, Method::GET, "/events", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn note_without_author_is_anonymous() {
    let app = app();
    let (status, created) =
        send(&app, Method::POST, "/notes", Some(json!({ "content": "hello" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["author"], "Anonymous");
    assert_eq!(created["colorIndex"], 0);
}

#[tokio::test]
async fn notes_have_no_update_route() {
    let app = app();
    send(&app, Method::POST, "/notes", Some(json!({ "content": "hello" }))).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/notes/1",
        Some(json!({ "content": "changed" })),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let app = app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/notes")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn health_reports_core_version() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pong");
    assert_eq!(body["version"], campass_core::core_version());
}

#[tokio::test]
async fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campass.sqlite3");

    let first = router(AppState::new(open_db(&path).unwrap()));
    let (status, _) = send(&first, Method::POST, "/deadlines", Some(midterm())).await;
    assert_eq!(status, StatusCode::OK);
    drop(first);

    let reopened = router(AppState::new(open_db(&path).unwrap()));
    let (_, listed) = send(&reopened, Method::GET, "/deadlines", None).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], 1);
    assert_eq!(listed[0]["title"], "Midterm");
}
