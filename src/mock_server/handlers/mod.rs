//! HTTP request handlers for the mock server.

pub mod dcs;
pub mod dms;
pub mod fgs;
pub mod rds;

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

pub use dcs::*;
pub use dms::*;
pub use fgs::*;
pub use rds::*;

pub type SharedState = Arc<RwLock<MockState>>;

/// Count the request and check its token.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    state.count_request();
    let Some(required) = &state.required_token else {
        return Ok(());
    };
    let sent = headers.get("x-auth-token").and_then(|v| v.to_str().ok());
    if sent == Some(required.as_str()) {
        Ok(())
    } else {
        Err(error(
            StatusCode::UNAUTHORIZED,
            "APIGW.0301",
            "Incorrect IAM authentication information",
        ))
    }
}

/// A provider-style error body.
pub(crate) fn error(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error_code": code,
            "error_msg": message
        })),
    )
        .into_response()
}

pub(crate) fn not_found(code: &str, what: &str, id: &str) -> Response {
    error(
        StatusCode::NOT_FOUND,
        code,
        &format!("{what} {id} does not exist"),
    )
}

/// The `[start, start + limit)` window of `items`, clamped.
pub(crate) fn window<T: Clone>(items: &[T], start: usize, limit: usize) -> Vec<T> {
    items.iter().skip(start).take(limit).cloned().collect()
}
