//! Session header gate.
//!
//! Gated routes require five headers to be present and non-blank. Their
//! values are never checked against anything.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::{ApiFailure, AppError, ErrorStyle};

/// Headers every gated request must carry, in reporting order.
pub const SESSION_HEADERS: [&str; 5] = ["channelCode", "username", "lang", "countryCode", "sessionId"];

/// Names of the session headers absent or blank in `headers`.
pub fn missing_session_headers(headers: &HeaderMap) -> Vec<&'static str> {
    SESSION_HEADERS
        .iter()
        .copied()
        .filter(|name| {
            let present = headers
                .get(name.to_ascii_lowercase())
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| !v.trim().is_empty());
            !present
        })
        .collect()
}

/// Reject requests missing any session header with a 495 envelope.
pub async fn session_headers_layer(style: ErrorStyle, request: Request, next: Next) -> Response {
    let missing = missing_session_headers(request.headers());
    if missing.is_empty() {
        return next.run(request).await;
    }

    tracing::debug!(
        path = %request.uri().path(),
        missing = ?missing,
        "Rejected request without session headers"
    );
    ApiFailure::new(AppError::MissingHeaders(missing), style).into_response()
}

/// Perform constant-time string comparison.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    a_bytes.ct_eq(b_bytes).into()
}
