//! DCS endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::{authorize, not_found, window, SharedState};
use crate::mock_server::state::{matches_filters, MockState};

/// Query parameters for listing instances.
#[derive(Debug, Default, Deserialize)]
pub struct ListDcsInstancesQuery {
    /// 1-based index of the first record.
    pub start: Option<usize>,
    pub limit: Option<usize>,
    pub name: Option<String>,
    pub status: Option<String>,
}

/// GET /v1.0/{project_id}/instances
pub async fn list_dcs_instances(
    State(state): State<SharedState>,
    Path(_project_id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ListDcsInstancesQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }

    let matching: Vec<_> = state
        .dcs_instances
        .iter()
        .filter(|i| {
            matches_filters(
                i,
                &[("name", query.name.as_deref()), ("status", query.status.as_deref())],
            )
        })
        .cloned()
        .collect();

    let start = query.start.unwrap_or(1).saturating_sub(1);
    let limit = query.limit.unwrap_or(10);
    let instances = window(&matching, start, limit);

    (
        StatusCode::OK,
        Json(json!({
            "instances": instances,
            "instance_num": matching.len()
        })),
    )
        .into_response()
}

/// GET /v1.0/{project_id}/instances/{instance_id}
pub async fn get_dcs_instance(
    State(state): State<SharedState>,
    Path((_project_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match MockState::find(&state.dcs_instances, "instance_id", &id) {
        Some(instance) => (StatusCode::OK, Json(instance.clone())).into_response(),
        None => not_found("DCS.4001", "Instance", &id),
    }
}

/// DELETE /v1.0/{project_id}/instances/{instance_id}
pub async fn delete_dcs_instance(
    State(state): State<SharedState>,
    Path((_project_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    if MockState::remove(&mut state.dcs_instances, "instance_id", &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("DCS.4001", "Instance", &id)
    }
}
