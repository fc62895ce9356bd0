//! E2E tests using the mock cloud server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use otcapi::mock_server::{Fixtures, MockServer, MockState, MOCK_PROJECT_ID};
use otcapi::models::DMS_GROUP;
use otcapi::{
    DcsInstance, Delete, DmsQueue, DmsQuota, FgsFunction, Get, List, ListOptions, OtcClient,
    RdsInstance,
};

fn client(server: &MockServer) -> OtcClient {
    OtcClient::new("test-token", MOCK_PROJECT_ID, "eu-de")
        .unwrap()
        .with_base_url(server.url())
        .unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let result = reqwest::Client::new()
        .get(format!("{}/health", url))
        .send()
        .await;
    assert!(result.is_err());
}

// =============================================================================
// List Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_offset_walk_over_several_pages() {
    let server = MockServer::start().await;
    let client = client(&server);

    let records = DcsInstance::list_all(&client, ListOptions::new().limit(2))
        .await
        .expect("Failed to list instances");

    let ids: Vec<_> = records.iter().filter_map(|r| r.id()).collect();
    assert_eq!(ids, vec!["dcs-1", "dcs-2", "dcs-3", "dcs-4", "dcs-5"]);
    assert_eq!(
        server.request_count().await,
        3,
        "The reported total should end the walk without an extra request"
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_marker_walk_over_several_pages() {
    let server = MockServer::start().await;
    let client = client(&server);

    let mut pager = FgsFunction::list(&client, ListOptions::new().limit(2)).unwrap();
    let mut names = Vec::new();
    while let Some(function) = pager.next().await {
        let function = function.expect("Failed to bind function");
        names.push(function.get_str("name").unwrap_or_default().to_string());
    }

    assert_eq!(names, vec!["fn-1", "fn-2", "fn-3", "fn-4", "fn-5"]);
    assert_eq!(pager.pages_fetched(), 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_filtered_list() {
    let server = MockServer::start().await;
    let client = client(&server);

    let singles = RdsInstance::list_all(
        &client,
        ListOptions::new().filter("instance_type", "Single"),
    )
    .await
    .unwrap();

    let names: Vec<_> = singles.iter().filter_map(|r| r.get_str("name")).collect();
    assert_eq!(names, vec!["orders-db", "audit-db"]);

    let cache = DcsInstance::list_all(&client, ListOptions::new().filter("name", "cache-4"))
        .await
        .unwrap();
    assert_eq!(cache.len(), 1);
    assert_eq!(cache[0].id().as_deref(), Some("dcs-4"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_groups_carry_queue_context() {
    let server = MockServer::start().await;
    let client = client(&server);

    let groups = DMS_GROUP
        .pager(&client, ListOptions::new().param("queue_id", "q-1"))
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(groups.len(), 2);
    for group in &groups {
        assert_eq!(group.context("queue_name"), Some(&serde_json::json!("orders")));
        assert_eq!(group.context("region"), Some(&serde_json::json!("eu-de")));
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_quota_list() {
    let server = MockServer::start().await;
    let client = client(&server);

    let quotas = DmsQuota::list_all(&client, ListOptions::new()).await.unwrap();

    let queue = quotas
        .iter()
        .find(|q| q.get_str("type") == Some("queue"))
        .expect("queue quota present");
    assert_eq!(queue.get_i64("quota"), Some(25));

    server.shutdown().await;
}

// =============================================================================
// Item Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_get_then_delete_instance() {
    let server = MockServer::start().await;
    let client = client(&server);

    let instance = DcsInstance::get(&client, "dcs-2").await.unwrap();
    assert_eq!(instance.get_str("name"), Some("cache-2"));

    DcsInstance::delete_record(&client, &instance).await.unwrap();

    let err = DcsInstance::get(&client, "dcs-2").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    let remaining = DcsInstance::list_all(&client, ListOptions::new()).await.unwrap();
    assert_eq!(remaining.len(), 4);

    server.shutdown().await;
}

#[tokio::test]
async fn test_get_function_by_urn() {
    let server = MockServer::start().await;
    let client = client(&server);

    let functions = FgsFunction::list_all(&client, ListOptions::new()).await.unwrap();
    let urn = functions[0].id().unwrap();

    let function = FgsFunction::get(&client, &urn).await.unwrap();
    assert_eq!(function.get_str("runtime"), Some("Python3.9"));

    FgsFunction::delete(&client, &urn).await.unwrap();
    let after = FgsFunction::list_all(&client, ListOptions::new()).await.unwrap();
    assert_eq!(after.len(), functions.len() - 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_each_with_missing_queue() {
    let server = MockServer::start().await;
    let client = client(&server);

    let ids = vec!["q-1".to_string(), "q-9".to_string(), "q-2".to_string()];
    let report = DmsQueue::delete_each(&client, &ids).await;

    assert_eq!(report.deleted, vec!["q-1", "q-2"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "q-9");

    let queues = DmsQueue::list_all(&client, ListOptions::new()).await.unwrap();
    assert!(queues.is_empty());

    server.shutdown().await;
}

// =============================================================================
// Custom State Tests
// =============================================================================

#[tokio::test]
async fn test_custom_state_and_token() {
    let state = MockState::new()
        .with_dcs_instance(Fixtures::dcs_instance("only", "solo"))
        .with_required_token("secret");
    let server = MockServer::with_state(state).await;

    let denied = DcsInstance::list_all(&client(&server), ListOptions::new()).await;
    assert_eq!(denied.unwrap_err().status_code(), Some(401));

    let authorized = OtcClient::new("secret", MOCK_PROJECT_ID, "eu-de")
        .unwrap()
        .with_base_url(server.url())
        .unwrap();
    let records = DcsInstance::list_all(&authorized, ListOptions::new())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_empty_server_lists_nothing() {
    let server = MockServer::start_empty().await;
    let client = client(&server);

    let records = DcsInstance::list_all(&client, ListOptions::new()).await.unwrap();
    assert!(records.is_empty());

    server.shutdown().await;
}
