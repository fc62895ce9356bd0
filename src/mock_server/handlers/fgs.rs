//! FunctionGraph endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::{authorize, error, not_found, window, SharedState};
use crate::mock_server::state::{matches_filters, MockState};

/// Query parameters for listing functions.
#[derive(Debug, Default, Deserialize)]
pub struct ListFunctionsQuery {
    /// Index of the first function to return.
    pub marker: Option<String>,
    pub maxitems: Option<usize>,
    pub package_name: Option<String>,
}

/// GET /v2/{project_id}/fgs/functions
///
/// The marker is the index of the next function; `next_marker` is only sent
/// while more functions follow.
pub async fn list_fgs_functions(
    State(state): State<SharedState>,
    Path(_project_id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ListFunctionsQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }

    let start = match query.marker.as_deref().map(str::parse::<usize>) {
        None => 0,
        Some(Ok(start)) => start,
        Some(Err(_)) => {
            return error(StatusCode::BAD_REQUEST, "FSS.0400", "invalid marker");
        }
    };
    let matching: Vec<_> = state
        .fgs_functions
        .iter()
        .filter(|f| matches_filters(f, &[("package", query.package_name.as_deref())]))
        .cloned()
        .collect();
    let functions = window(&matching, start, query.maxitems.unwrap_or(400));
    let next = start + functions.len();

    let mut body = json!({
        "functions": functions,
        "count": matching.len()
    });
    if next < matching.len() {
        body["next_marker"] = json!(next);
    }
    (StatusCode::OK, Json(body)).into_response()
}

/// GET /v2/{project_id}/fgs/functions/{function_urn}/config
pub async fn get_fgs_function(
    State(state): State<SharedState>,
    Path((_project_id, urn)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match MockState::find(&state.fgs_functions, "func_urn", &urn) {
        Some(function) => (StatusCode::OK, Json(function.clone())).into_response(),
        None => not_found("FSS.1051", "Function", &urn),
    }
}

/// DELETE /v2/{project_id}/fgs/functions/{function_urn}
pub async fn delete_fgs_function(
    State(state): State<SharedState>,
    Path((_project_id, urn)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    if MockState::remove(&mut state.fgs_functions, "func_urn", &urn) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("FSS.1051", "Function", &urn)
    }
}
