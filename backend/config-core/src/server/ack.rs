//! The small JSON acknowledgement returned by mutating endpoints.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// `{"return": true}` or `{"return": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    #[serde(rename = "return")]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Ack {
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

impl<E: ToString> From<Result<(), E>> for Ack {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Ack::success(),
            Err(e) => Ack::failure(e),
        }
    }
}

impl IntoResponse for Ack {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
