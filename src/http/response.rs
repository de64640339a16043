//! Response construction for answers the gateway produces itself.
//!
//! # Design Decisions
//! - Every gateway-generated error is `{"error": <message>, "status": <code>}`
//! - Upstream responses are streamed back untouched
//! - Upstream connection errors map to 502, upstream timeouts to 504

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    status: u16,
}

/// Build a JSON error response.
pub fn json_error(status: StatusCode, message: &str) -> Response {
    let body = ErrorBody {
        error: message,
        status: status.as_u16(),
    };

    match serde_json::to_vec(&body) {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize error body");
            status.into_response()
        }
    }
}
