//! API service routes

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use common::error::DatabaseError;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{
        PingResponse, SessionRoomResponse,
        mentor::{MentorPayload, MentorResponse},
        user::{RegisterRequest, USERNAME_TAKEN, UpdateUserRequest, UserResponse},
    },
    password,
    state::AppState,
    validation::FieldErrors,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/test/", get(ping))
        .route("/mentors/", get(list_mentors).post(create_mentor))
        .route(
            "/mentors/:id/",
            get(get_mentor).put(replace_mentor).delete(delete_mentor),
        )
        .route("/users/", get(list_users))
        .route("/users/register/", post(register_user))
        .route("/users/:id/", get(get_user).put(update_user))
        .route("/sessions/create/", post(create_session_room));

    Router::new()
        .route("/", get(api_overview))
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .with_state(state)
}

/// Static map of the top-level entry points
pub async fn api_overview() -> impl IntoResponse {
    Json(json!({
        "API Overview": "/api/",
        "Admin Panel": "/admin/",
    }))
}

/// Liveness ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "API is working!",
        status: "success",
    })
}

/// Health check endpoint, including the backing store
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, summary, database) = if state.store_is_healthy().await {
        (StatusCode::OK, "ok", "up")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
    };

    (
        status,
        Json(json!({
            "status": summary,
            "service": "mentorlink-api",
            "database": database,
        })),
    )
}

/// Get all mentors
pub async fn list_mentors(State(state): State<AppState>) -> ApiResult<Json<Vec<MentorResponse>>> {
    let mentors = state.mentor_repository.list().await?;

    Ok(Json(mentors.into_iter().map(MentorResponse::from).collect()))
}

/// Create a new mentor
pub async fn create_mentor(
    State(state): State<AppState>,
    payload: Result<Json<MentorPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MentorResponse>)> {
    let Json(payload) = payload?;
    let fields = payload.validate()?;

    let mentor = state.mentor_repository.create(&fields).await?;

    Ok((StatusCode::CREATED, Json(MentorResponse::from(mentor))))
}

/// Get a mentor by ID
pub async fn get_mentor(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MentorResponse>> {
    let Path(id) = id?;
    let mentor = state
        .mentor_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(MentorResponse::from(mentor)))
}

/// Replace every mutable field of a mentor
pub async fn replace_mentor(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MentorPayload>, JsonRejection>,
) -> ApiResult<Json<MentorResponse>> {
    let Path(id) = id?;
    if state.mentor_repository.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let Json(payload) = payload?;
    let fields = payload.validate()?;

    let mentor = state
        .mentor_repository
        .replace(id, &fields)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(MentorResponse::from(mentor)))
}

/// Delete a mentor by ID
pub async fn delete_mentor(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;

    if state.mentor_repository.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// Register a new user account
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let Json(payload) = payload?;
    let registration = payload.validate()?;

    info!("Registering user: {}", registration.username);
    let password_hash = password::hash_password(&registration.password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        ApiError::InternalServerError
    })?;

    let user = state
        .user_repository
        .create(&registration.into_new_user(password_hash))
        .await
        .map_err(username_conflict)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.user_repository.list().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Path(id) = id?;
    let user = state
        .user_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(UserResponse::from(user)))
}

/// Edit a user's profile
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Path(id) = id?;
    if state.user_repository.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let Json(payload) = payload?;
    let changes = payload.validate()?;

    let user = state
        .user_repository
        .update(id, &changes)
        .await
        .map_err(username_conflict)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(UserResponse::from(user)))
}

/// Allocate a room id for a video session
pub async fn create_session_room() -> Json<SessionRoomResponse> {
    Json(SessionRoomResponse {
        room: Uuid::new_v4(),
    })
}

fn username_conflict(err: DatabaseError) -> ApiError {
    match err {
        DatabaseError::Conflict(_) => FieldErrors::single("username", USERNAME_TAKEN).into(),
        other => other.into(),
    }
}
