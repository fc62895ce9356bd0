//! RDS endpoint handlers.

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
pub struct ListRdsInstancesQuery {
    /// 0-based index of the first record.
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub instance_type: Option<String>,
}

/// GET /v3/{project_id}/instances
pub async fn list_rds_instances(
    State(state): State<SharedState>,
    Path(_project_id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ListRdsInstancesQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }

    let matching: Vec<_> = state
        .rds_instances
        .iter()
        .filter(|i| {
            matches_filters(
                i,
                &[
                    ("id", query.id.as_deref()),
                    ("name", query.name.as_deref()),
                    ("type", query.instance_type.as_deref()),
                ],
            )
        })
        .cloned()
        .collect();
    let instances = window(
        &matching,
        query.offset.unwrap_or(0),
        query.limit.unwrap_or(100),
    );

    (
        StatusCode::OK,
        Json(json!({
            "instances": instances,
            "total_count": matching.len()
        })),
    )
        .into_response()
}

/// DELETE /v3/{project_id}/instances/{instance_id}
pub async fn delete_rds_instance(
    State(state): State<SharedState>,
    Path((_project_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    if MockState::remove(&mut state.rds_instances, "id", &id) {
        (StatusCode::ACCEPTED, Json(json!({"job_id": format!("job-{id}")}))).into_response()
    } else {
        not_found("DBS.200823", "Instance", &id)
    }
}
