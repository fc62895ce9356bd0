//! Mock cloud API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates a subset of
//! the provider APIs for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server maintains state across
//! requests and pages its list endpoints for real.
//!
//! # Example
//!
//! ```ignore
//! use otcapi::mock_server::{MockServer, MOCK_PROJECT_ID};
//! use otcapi::{DmsQueue, Get, OtcClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = OtcClient::new("test-token", MOCK_PROJECT_ID, "eu-de")
//!         .unwrap()
//!         .with_base_url(server.url())
//!         .unwrap();
//!
//!     // Server comes with default fixtures
//!     let queue = DmsQueue::get(&client, "q-1").await.unwrap();
//!     assert_eq!(queue.get_str("name"), Some("orders"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::{MockServer, MOCK_PROJECT_ID};
pub use state::MockState;
