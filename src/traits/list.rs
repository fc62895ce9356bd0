//! List trait for walking collections of records.

use async_trait::async_trait;

use crate::error::Result;
use crate::pager::Pager;
use crate::pagination::{ListOptions, Page};
use crate::record::Record;
use crate::resource::Resource;
use crate::transport::Transport;

/// List records with filtering and pagination.
///
/// # Example
///
/// ```ignore
/// use otcapi::{DcsInstance, List, ListOptions, OtcClient};
///
/// let client = OtcClient::from_env()?;
///
/// // Fetch a single page
/// let page = DcsInstance::list_page(&client, ListOptions::new().limit(50)).await?;
///
/// // Walk every page lazily
/// let mut pager = DcsInstance::list(&client, ListOptions::new().filter("status", "RUNNING"))?;
/// while let Some(instance) = pager.next().await {
///     println!("{:?}", instance?.id());
/// }
/// ```
#[async_trait]
pub trait List: Resource {
    /// Start a lazy walk over every page.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown filters or missing path parameters. No
    /// request has been sent at that point.
    fn list<'a, T: Transport + ?Sized>(transport: &'a T, options: ListOptions) -> Result<Pager<'a, T>> {
        Self::def().pager(transport, options)
    }

    /// Fetch one page.
    ///
    /// For marker-paged resources the returned [`Page::next_marker`] can be
    /// passed back through [`ListOptions::marker`] to fetch the next one.
    /// Offset-paged resources report [`Page::next_offset`] instead, which
    /// goes back through [`ListOptions::start`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or any record on the page does
    /// not bind.
    async fn list_page<T: Transport + ?Sized>(transport: &T, options: ListOptions) -> Result<Page<Record>> {
        Self::def().page(transport, options).await
    }

    /// Fetch every page and collect the records.
    ///
    /// # Errors
    ///
    /// Returns the first error met during the walk.
    async fn list_all<T: Transport + ?Sized>(transport: &T, options: ListOptions) -> Result<Vec<Record>> {
        Self::list(transport, options)?.try_collect().await
    }
}
