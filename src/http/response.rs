//! Response construction.
//!
//! # Design Decisions
//! - Mock bodies are re-serialized from the parsed JSON, so what is sent is
//!   always well-formed
//! - The terminal 404 is JSON too, so frontends can parse every answer

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// `200 OK` with a mock body.
pub fn mock_response(body: Value) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

/// `404 Not Found` for requests nothing handled.
pub fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not found", "path": path })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    #[test]
    fn test_mock_response_is_json() {
        let res = mock_response(json!({"ok": true}));
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(not_found("/x").status(), StatusCode::NOT_FOUND);
    }
}
