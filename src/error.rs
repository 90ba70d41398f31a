use std::fmt::Display;

use axum::http::StatusCode;
use tracing::{error, warn};

/// Handler rejection: status plus a plain-text message.
pub type ApiError = (StatusCode, String);

pub fn internal<E: Display>(e: E) -> ApiError {
    error!(error = %e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

pub fn bad_request(msg: impl Into<String>) -> ApiError {
    let msg = msg.into();
    warn!(reason = %msg, "request rejected");
    (StatusCode::BAD_REQUEST, msg)
}

/// False for NaN as well as for values below `min`.
pub fn at_least(value: f64, min: f64) -> bool {
    value >= min
}
