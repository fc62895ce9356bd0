//! Get trait for fetching single records.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::Record;
use crate::resource::Resource;
use crate::transport::Transport;

/// Fetch a single record by identifier.
///
/// # Example
///
/// ```ignore
/// use otcapi::{FgsFunction, Get, OtcClient};
///
/// let client = OtcClient::from_env()?;
/// let function = FgsFunction::get(&client, "urn:fss:eu-de:p1:function:default:hello:latest").await?;
/// ```
#[async_trait]
pub trait Get: Resource {
    /// Fetch the record with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not found or the request fails.
    async fn get<T: Transport + ?Sized>(transport: &T, id: &str) -> Result<Record> {
        Self::def().get(transport, id, &BTreeMap::new()).await
    }

    /// Like [`Get::get`], for item paths with placeholders besides the id.
    async fn get_with<T: Transport + ?Sized>(
        transport: &T,
        id: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Record> {
        Self::def().get(transport, id, params).await
    }
}
