//! Mock cloud API server.
//!
//! Provides an axum-based HTTP server that simulates a subset of the DCS,
//! DMS, FunctionGraph and RDS APIs on a single host.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// Project ID the default fixtures are created under.
pub const MOCK_PROJECT_ID: &str = "p1";

/// A mock cloud API server for testing.
///
/// The server runs in the background. Point a client at it with
/// [`OtcClient::with_base_url`](crate::OtcClient::with_base_url).
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Number of API requests served so far.
    pub async fn request_count(&self) -> u64 {
        self.state.read().await.request_count()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();
        state.dcs_instances = scenario.dcs_instances;
        state.dms_queues = scenario.dms_queues;
        for (queue_id, groups) in scenario.dms_groups {
            state.dms_groups.insert(queue_id, groups);
        }
        state.dms_quotas = scenario.dms_quotas;
        state.fgs_functions = scenario.fgs_functions;
        state.rds_instances = scenario.rds_instances;
        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // DCS routes
            .route(
                "/v1.0/:project_id/instances",
                get(handlers::list_dcs_instances),
            )
            .route(
                "/v1.0/:project_id/instances/:instance_id",
                get(handlers::get_dcs_instance).delete(handlers::delete_dcs_instance),
            )
            // DMS routes
            .route("/v1.0/:project_id/queues", get(handlers::list_dms_queues))
            .route(
                "/v1.0/:project_id/queues/:queue_id",
                get(handlers::get_dms_queue).delete(handlers::delete_dms_queue),
            )
            .route(
                "/v1.0/:project_id/queues/:queue_id/groups",
                get(handlers::list_dms_groups),
            )
            .route(
                "/v1.0/:project_id/queues/:queue_id/groups/:group_id",
                axum::routing::delete(handlers::delete_dms_group),
            )
            .route(
                "/v1.0/:project_id/quotas/dms",
                get(handlers::get_dms_quotas),
            )
            // FunctionGraph routes
            .route(
                "/v2/:project_id/fgs/functions",
                get(handlers::list_fgs_functions),
            )
            .route(
                "/v2/:project_id/fgs/functions/:function_urn",
                axum::routing::delete(handlers::delete_fgs_function),
            )
            .route(
                "/v2/:project_id/fgs/functions/:function_urn/config",
                get(handlers::get_fgs_function),
            )
            // RDS routes
            .route("/v3/:project_id/instances", get(handlers::list_rds_instances))
            .route(
                "/v3/:project_id/instances/:instance_id",
                axum::routing::delete(handlers::delete_rds_instance),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
