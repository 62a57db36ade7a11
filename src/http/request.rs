//! Request identification and query extraction.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID for every request without one
//! - Read the request ID back for log correlation
//! - Decode the request's query string into `QueryParams`

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::resolver::{parse_query, QueryParams};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Makes UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request ID of `request`, or `"unknown"` if none was assigned.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Query parameters of `request`; empty when it has no query string.
pub fn query_params<B>(request: &Request<B>) -> QueryParams {
    request.uri().query().map(parse_query).unwrap_or_default()
}
