//! Trait definitions for resource operations.
//!
//! Each resource type implements the traits its endpoints support. The
//! implementations are empty: every operation is driven by the type's
//! [`ResourceDef`](crate::ResourceDef).

mod delete;
mod get;
mod list;

pub use delete::{Delete, DeleteReport};
pub use get::Get;
pub use list::List;
