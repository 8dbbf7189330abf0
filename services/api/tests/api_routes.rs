//! Router-level tests for the MentorLink API
//!
//! Every test drives the real router against in-memory repositories, so no
//! database is required.

use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use mentorlink_api::{routes::create_router, state::AppState};

fn create_test_router() -> Router {
    create_router(AppState::in_memory())
}

/// Send one request and return the status and the raw body
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Vec<u8>)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let (status, bytes) = send(app, method, uri, body).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn ada() -> Value {
    json!({
        "name": "Ada",
        "expertise": "Systems",
        "bio": "...",
        "email": "ada@example.com",
    })
}

fn registration(username: &str, password: &str, password2: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": password,
        "password2": password2,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "is_mentor": true,
        "is_student": false,
    })
}

#[tokio::test]
async fn test_overview_and_ping() -> Result<()> {
    let app = create_test_router();

    let (status, body) = send_json(&app, Method::GET, "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "API Overview": "/api/", "Admin Panel": "/admin/" })
    );

    let (status, body) = send_json(&app, Method::GET, "/api/test/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "API is working!", "status": "success" })
    );

    Ok(())
}

#[tokio::test]
async fn test_health_with_memory_store() -> Result<()> {
    let app = create_test_router();

    let (status, body) = send_json(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");

    Ok(())
}

#[tokio::test]
async fn test_mentor_lifecycle() -> Result<()> {
    let app = create_test_router();

    let (status, created) = send_json(&app, Method::POST, "/api/mentors/", Some(ada())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Ada");
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_string());

    let (status, fetched) = send_json(&app, Method::GET, "/api/mentors/1/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let replacement = json!({
        "name": "Ada L.",
        "expertise": "Systems",
        "bio": "...",
        "email": "ada@example.com",
    });
    let (status, replaced) =
        send_json(&app, Method::PUT, "/api/mentors/1/", Some(replacement)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["id"], 1);
    assert_eq!(replaced["name"], "Ada L.");
    assert_eq!(replaced["created_at"], created["created_at"]);

    let (status, body) = send(&app, Method::DELETE, "/api/mentors/1/", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = send(&app, Method::GET, "/api/mentors/1/", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (status, _) = send(&app, Method::DELETE, "/api/mentors/1/", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_list_mentors_in_id_order() -> Result<()> {
    let app = create_test_router();

    let (status, body) = send_json(&app, Method::GET, "/api/mentors/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for name in ["Ada", "Grace", "Barbara"] {
        let mut payload = ada();
        payload["name"] = json!(name);
        let (status, _) = send(&app, Method::POST, "/api/mentors/", Some(payload)).await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send_json(&app, Method::GET, "/api/mentors/", None).await?;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada", "Grace", "Barbara"]);

    Ok(())
}

#[tokio::test]
async fn test_server_assigned_fields_are_ignored_on_input() -> Result<()> {
    let app = create_test_router();

    let mut payload = ada();
    payload["id"] = json!(99);
    payload["created_at"] = json!("2000-01-01T00:00:00Z");
    payload["user"] = json!({ "username": "ada" });

    let (status, created) = send_json(&app, Method::POST, "/api/mentors/", Some(payload)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_ne!(created["created_at"], "2000-01-01T00:00:00Z");
    assert!(created.get("user").is_none());

    let (_, users) = send_json(&app, Method::GET, "/api/users/", None).await?;
    assert_eq!(users, json!([]));

    Ok(())
}

#[tokio::test]
async fn test_create_mentor_validation_errors() -> Result<()> {
    let app = create_test_router();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/mentors/",
        Some(json!({ "name": "", "email": "not-an-email" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "name": ["This field may not be blank."],
            "expertise": ["This field is required."],
            "bio": ["This field is required."],
            "email": ["Enter a valid email address."],
        })
    );

    let (_, list) = send_json(&app, Method::GET, "/api/mentors/", None).await?;
    assert_eq!(list, json!([]));

    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() -> Result<()> {
    let app = create_test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/mentors/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert!(body["detail"].is_string());

    let (status, _) = send(&app, Method::POST, "/api/mentors/", Some(json!([1, 2]))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_missing_mentor_is_not_found() -> Result<()> {
    let app = create_test_router();

    let (status, body) = send(&app, Method::GET, "/api/mentors/42/", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (status, body) = send(&app, Method::PUT, "/api/mentors/42/", Some(ada())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    // Existence is checked before the payload
    let (status, _) = send(&app, Method::PUT, "/api/mentors/42/", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/mentors/42/", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/mentors/abc/", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_replace_mentor_with_invalid_payload() -> Result<()> {
    let app = create_test_router();
    send(&app, Method::POST, "/api/mentors/", Some(ada())).await?;

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/mentors/1/",
        Some(json!({ "name": "Ada L." })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["expertise"], json!(["This field is required."]));

    let (_, unchanged) = send_json(&app, Method::GET, "/api/mentors/1/", None).await?;
    assert_eq!(unchanged["name"], "Ada");

    Ok(())
}

#[tokio::test]
async fn test_register_user() -> Result<()> {
    let app = create_test_router();

    let (status, user) = send_json(
        &app,
        Method::POST,
        "/api/users/register/",
        Some(registration("ada", "s3cret!", "s3cret!")),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        user,
        json!({
            "id": 1,
            "username": "ada",
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "is_mentor": true,
            "is_student": false,
            "bio": "",
        })
    );

    let (status, fetched) = send_json(&app, Method::GET, "/api/users/1/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, user);

    Ok(())
}

#[tokio::test]
async fn test_register_password_mismatch() -> Result<()> {
    let app = create_test_router();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/users/register/",
        Some(registration("ada", "a", "b")),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "non_field_errors": ["Passwords don't match"] }));

    let (_, users) = send_json(&app, Method::GET, "/api/users/", None).await?;
    assert_eq!(users, json!([]));

    Ok(())
}

#[tokio::test]
async fn test_register_whitespace_password_is_blank() -> Result<()> {
    let app = create_test_router();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/users/register/",
        Some(registration("ada", "   ", "   ")),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "password": ["This field may not be blank."],
            "password2": ["This field may not be blank."],
        })
    );

    let (_, users) = send_json(&app, Method::GET, "/api/users/", None).await?;
    assert_eq!(users, json!([]));

    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_username() -> Result<()> {
    let app = create_test_router();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users/register/",
        Some(registration("ada", "pw", "pw")),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/users/register/",
        Some(registration("ada", "other", "other")),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "username": ["A user with that username already exists."] })
    );

    Ok(())
}

#[tokio::test]
async fn test_update_user_profile() -> Result<()> {
    let app = create_test_router();
    send(
        &app,
        Method::POST,
        "/api/users/register/",
        Some(registration("ada", "pw", "pw")),
    )
    .await?;
    send(
        &app,
        Method::POST,
        "/api/users/register/",
        Some(registration("grace", "pw", "pw")),
    )
    .await?;

    let (status, updated) = send_json(
        &app,
        Method::PUT,
        "/api/users/1/",
        Some(json!({ "username": "ada", "bio": "Analyst", "is_student": true, "id": 5 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["bio"], "Analyst");
    assert_eq!(updated["is_student"], true);
    assert_eq!(updated["is_mentor"], true);
    assert_eq!(updated["email"], "ada@example.com");

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/users/1/",
        Some(json!({ "username": "grace" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "username": ["A user with that username already exists."] })
    );

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/9/",
        Some(json!({ "username": "nobody" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_create_session_room() -> Result<()> {
    let app = create_test_router();

    let (status, first) = send_json(&app, Method::POST, "/api/sessions/create/", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = send_json(&app, Method::POST, "/api/sessions/create/", None).await?;

    let room = Uuid::parse_str(first["room"].as_str().unwrap())?;
    assert_eq!(room.get_version_num(), 4);
    assert_ne!(first["room"], second["room"]);

    Ok(())
}
