//! Fixed-message endpoints: the root greeting and the test probe.

use axum::Json;
use serde::Serialize;

pub const GREETING: &str = "Hello World";
pub const TEST_MESSAGE: &str = "This is a test endpoint";

/// `{"message": ...}` response body.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Message {
    pub message: &'static str,
}

/// `GET /` — `{"message": "Hello World"}`.
pub async fn root() -> Json<Message> {
    Json(Message { message: GREETING })
}

/// `GET /test` — `{"message": "This is a test endpoint"}`.
pub async fn test_probe() -> Json<Message> {
    Json(Message { message: TEST_MESSAGE })
}
