//! Open Telekom Cloud API client library.
//!
//! A Rust library for listing and binding resources of several cloud
//! services (DCS, DMS, FunctionGraph, ModelArts, RDS) over their REST APIs.
//! Every resource is a static [`ResourceDef`]: a field table, a filter table,
//! path templates, where list responses keep their records and how they
//! page. One shared walker ([`Pager`]) drives all of them.
//!
//! # Quick Start
//!
//! ```no_run
//! use otcapi::{DcsInstance, DmsQuota, FgsFunction, Get, List, ListOptions, OtcClient};
//!
//! #[tokio::main]
//! async fn main() -> otcapi::Result<()> {
//!     // Create client from environment variables
//!     let client = OtcClient::from_env()?;
//!
//!     // Walk every running cache instance, page by page
//!     let options = ListOptions::new().filter("status", "RUNNING").limit(50);
//!     let mut instances = DcsInstance::list(&client, options)?;
//!     while let Some(instance) = instances.next().await {
//!         let instance = instance?;
//!         println!("{:?} {:?}", instance.id(), instance.get_str("name"));
//!     }
//!
//!     // Collect a small list in one go
//!     let quotas = DmsQuota::list_all(&client, ListOptions::new()).await?;
//!     println!("Found {} quotas", quotas.len());
//!
//!     // Fetch one record
//!     let function = FgsFunction::get(&client, "urn:fss:eu-de:p1:function:default:hello:latest").await?;
//!     println!("Runtime: {:?}", function.get_str("runtime"));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around three operation traits:
//!
//! - [`List`] - Walk paginated collections of records
//! - [`Get`] - Fetch a single record by ID
//! - [`Delete`] - Delete records by ID
//!
//! Each resource type (like [`DcsInstance`] or [`RdsBackup`]) implements
//! the traits that are supported by its API endpoints. The CLI reaches the
//! same operations by kind through [`models::lookup`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `OTC_AUTH_TOKEN` (required) - An issued IAM token
//! - `OTC_PROJECT_ID` (required) - The project requests are scoped to
//! - `OTC_REGION` (optional) - Region for service endpoints (defaults to `eu-de`)
//! - `OTC_ENDPOINT` (optional) - Base URL that every service is routed to

mod binder;
pub mod cli;
mod client;
mod container;
mod error;
mod filter;
pub mod models;
pub mod output;
mod pager;
mod pagination;
mod record;
mod resource;
mod schema;
mod template;
mod traits;
mod transport;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use binder::{Ambient, BinderConfig, BoundPage, ResponseBinder};
pub use client::OtcClient;
pub use container::Container;
pub use error::{OtcError, Result};
pub use filter::{FilterParam, FilterSpec};
pub use output::PrettyPrint;
pub use pager::{Pager, WalkState};
pub use pagination::{ListOptions, OffsetUnit, Page, Pagination, Stop, MAX_PAGES};
pub use record::{AttrValue, Record};
pub use resource::{Resource, ResourceDef};
pub use schema::{FieldDecl, FieldKind, FieldType, Schema};
pub use template::PathTemplate;
pub use transport::{Method, RawResponse, Request, Service, Transport};

// Re-export traits
pub use traits::{Delete, DeleteReport, Get, List};

// Re-export resource types
pub use models::{
    DcsAvailableZone, DcsBackup, DcsInstance, DcsProduct, DmsGroup, DmsQueue, DmsQuota,
    FgsFunction, FgsReservedInstance, FgsTrigger, ModelArtsModel, ModelArtsService, RdsBackup,
    RdsFlavor, RdsInstance,
};
