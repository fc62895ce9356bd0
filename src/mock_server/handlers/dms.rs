//! DMS endpoint handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::{authorize, not_found, SharedState};
use crate::mock_server::state::MockState;

/// GET /v1.0/{project_id}/queues
pub async fn list_dms_queues(
    State(state): State<SharedState>,
    Path(_project_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    (
        StatusCode::OK,
        Json(json!({
            "queues": state.dms_queues,
            "total": state.dms_queues.len()
        })),
    )
        .into_response()
}

/// GET /v1.0/{project_id}/queues/{queue_id}
pub async fn get_dms_queue(
    State(state): State<SharedState>,
    Path((_project_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match MockState::find(&state.dms_queues, "id", &id) {
        Some(queue) => (StatusCode::OK, Json(queue.clone())).into_response(),
        None => not_found("DMS.10020001", "Queue", &id),
    }
}

/// DELETE /v1.0/{project_id}/queues/{queue_id}
pub async fn delete_dms_queue(
    State(state): State<SharedState>,
    Path((_project_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    if MockState::remove(&mut state.dms_queues, "id", &id) {
        state.dms_groups.remove(&id);
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("DMS.10020001", "Queue", &id)
    }
}

/// GET /v1.0/{project_id}/queues/{queue_id}/groups
///
/// The queue is named once at the top of the response.
pub async fn list_dms_groups(
    State(state): State<SharedState>,
    Path((_project_id, queue_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let Some(queue) = MockState::find(&state.dms_queues, "id", &queue_id) else {
        return not_found("DMS.10020001", "Queue", &queue_id);
    };
    let groups = state.dms_groups.get(&queue_id).cloned().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "queue_id": queue_id,
            "queue_name": queue.get("name").cloned().unwrap_or(Value::Null),
            "groups": groups,
            "redrive_policy": "disable"
        })),
    )
        .into_response()
}

/// DELETE /v1.0/{project_id}/queues/{queue_id}/groups/{group_id}
pub async fn delete_dms_group(
    State(state): State<SharedState>,
    Path((_project_id, queue_id, group_id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let removed = state
        .dms_groups
        .get_mut(&queue_id)
        .is_some_and(|groups| MockState::remove(groups, "id", &group_id));
    if removed {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("DMS.10030001", "Group", &group_id)
    }
}

/// GET /v1.0/{project_id}/quotas/dms
pub async fn get_dms_quotas(
    State(state): State<SharedState>,
    Path(_project_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    (
        StatusCode::OK,
        Json(json!({"quotas": {"resources": state.dms_quotas}})),
    )
        .into_response()
}
