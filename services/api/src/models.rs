//! API models for request and response payloads

use serde::Serialize;

pub mod mentor;
pub mod user;

/// Response for the ping endpoint
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
    pub status: &'static str,
}

/// Response for a freshly created video session room
#[derive(Debug, Serialize)]
pub struct SessionRoomResponse {
    pub room: uuid::Uuid,
}
