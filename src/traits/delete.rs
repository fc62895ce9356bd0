//! Delete trait for removing records.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{OtcError, Result};
use crate::record::Record;
use crate::resource::Resource;
use crate::transport::Transport;

/// Outcome of deleting several records.
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Identifiers deleted, in request order.
    pub deleted: Vec<String>,
    /// Identifiers that failed, with the error each one hit.
    pub failed: Vec<(String, OtcError)>,
}

impl DeleteReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }
}

/// Delete records by identifier.
#[async_trait]
pub trait Delete: Resource {
    /// Delete one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn delete<T: Transport + ?Sized>(transport: &T, id: &str) -> Result<()> {
        Self::def().delete(transport, id, &BTreeMap::new()).await
    }

    /// Delete a record returned by an earlier list or get.
    async fn delete_record<T: Transport + ?Sized>(transport: &T, record: &Record) -> Result<()> {
        Self::def().delete_record(transport, record).await
    }

    /// Delete several records, going on past individual failures.
    async fn delete_each<T: Transport + ?Sized>(transport: &T, ids: &[String]) -> DeleteReport {
        Self::def().delete_each(transport, ids, &BTreeMap::new()).await
    }
}
