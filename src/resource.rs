//! Resource definitions.
//!
//! A [`ResourceDef`] is the static description of one REST entity: its field
//! table, the filters its list endpoint accepts, its path templates, where
//! list responses keep their records and how they page. One shared walker
//! ([`Pager`]) serves every definition.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::binder::{Ambient, BinderConfig, ResponseBinder};
use crate::container::Container;
use crate::error::{OtcError, Result};
use crate::filter::FilterSpec;
use crate::pager::Pager;
use crate::pagination::{Continuation, ListOptions, Page, PageSignals, Pagination, Step};
use crate::record::Record;
use crate::schema::Schema;
use crate::template::PathTemplate;
use crate::traits::DeleteReport;
use crate::transport::{Service, Transport};

/// Placeholder item paths use for the record identifier.
pub const ID_PLACEHOLDER: &str = "id";

/// Static description of one REST entity.
#[derive(Debug)]
pub struct ResourceDef {
    /// Catalog key, e.g. `dcs.instance`.
    pub kind: &'static str,
    pub service: Service,
    pub schema: &'static Schema,
    pub list_path: PathTemplate,
    /// Path that fetches one record, with an `{id}` placeholder.
    pub get_path: Option<PathTemplate>,
    /// Path that deletes one record, with an `{id}` placeholder.
    pub delete_path: Option<PathTemplate>,
    /// Key wrapping the record in single-record responses.
    pub item_key: Option<&'static str>,
    pub container: Container,
    pub pagination: Pagination,
    /// Dotted path of the provider-reported total.
    pub total_key: Option<&'static str>,
    pub filters: FilterSpec,
    pub ambient: &'static [Ambient],
    /// Attributes shown in tables.
    pub columns: &'static [&'static str],
}

/// A type standing for one catalog entry.
///
/// Resource types opt into [`List`](crate::List), [`Get`](crate::Get) and
/// [`Delete`](crate::Delete) according to what their endpoints support.
pub trait Resource {
    fn def() -> &'static ResourceDef;
}

impl ResourceDef {
    /// Check every static table of the definition.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| OtcError::InvalidSchema {
            schema: self.kind,
            reason,
        };

        self.schema.validate()?;
        self.filters.validate(self.kind)?;
        self.list_path.validate()?;

        for item_path in [self.get_path, self.delete_path].into_iter().flatten() {
            if !item_path.placeholders()?.contains(&ID_PLACEHOLDER) {
                return Err(invalid(format!("item path '{item_path}' has no {{id}}")));
            }
        }

        for column in self.columns {
            if self.schema.field(column).is_none() {
                return Err(invalid(format!("column '{column}' is not an attribute")));
            }
        }

        let reserved = self.pagination.reserved_params();
        if let Some(clash) = self
            .filters
            .params
            .iter()
            .find(|p| reserved.contains(&p.wire))
        {
            return Err(invalid(format!(
                "filter '{}' collides with a paging parameter",
                clash.name
            )));
        }

        if self.pagination.next_marker_key().is_none()
            && matches!(self.pagination, Pagination::Marker { .. })
            && self.schema.id_field().is_none()
        {
            return Err(invalid("marker paging needs an identifier".to_string()));
        }
        Ok(())
    }

    /// Start a list walk.
    ///
    /// Path templating and filter translation happen here, so validation
    /// errors surface before any request is sent.
    pub fn pager<'a, T: Transport + ?Sized>(
        &'static self,
        transport: &'a T,
        options: ListOptions,
    ) -> Result<Pager<'a, T>> {
        Pager::new(
            transport,
            self,
            options,
            BinderConfig::from_transport(transport),
        )
    }

    /// Fetch a single page.
    ///
    /// Unlike a walk, a record that fails to bind fails the whole call.
    #[tracing::instrument(skip(self, transport, options), fields(kind = self.kind))]
    pub async fn page<T: Transport + ?Sized>(
        &'static self,
        transport: &T,
        options: ListOptions,
    ) -> Result<Page<Record>> {
        let path = self.list_request_path(transport, &options.path_params)?;
        let mut query = self
            .filters
            .transpose(self.kind, &options.filters, options.allow_unknown_filters)?;
        let mut continuation = Continuation::new(self.pagination, &options);
        query.extend(continuation.page_params());

        let body = transport.get(self.service, &path, query).await?;
        let page =
            ResponseBinder::new(self, BinderConfig::from_transport(transport)).bind_page(&body)?;

        let step = continuation.advance(&PageSignals {
            raw_count: page.raw_count,
            total: page.total,
            next_marker: page.next_marker,
            last_id: page.last_id,
        });
        let has_more = step == Step::Continue;
        let (next_marker, next_offset) = if has_more {
            (continuation.marker().map(str::to_string), continuation.offset())
        } else {
            (None, None)
        };
        let items = page.records.into_iter().collect::<Result<Vec<_>>>()?;
        Ok(Page::new(items, page.total, next_marker, has_more).with_next_offset(next_offset))
    }

    /// Fetch one record by identifier.
    #[tracing::instrument(skip(self, transport, params), fields(kind = self.kind))]
    pub async fn get<T: Transport + ?Sized>(
        &'static self,
        transport: &T,
        id: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Record> {
        let path = self.item_request_path(self.get_path, transport, id, params, "get")?;
        let body = transport.get(self.service, &path, Vec::new()).await?;
        ResponseBinder::new(self, BinderConfig::from_transport(transport)).bind_item(&body)
    }

    /// Delete one record by identifier.
    #[tracing::instrument(skip(self, transport, params), fields(kind = self.kind))]
    pub async fn delete<T: Transport + ?Sized>(
        &'static self,
        transport: &T,
        id: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<()> {
        let path = self.item_request_path(self.delete_path, transport, id, params, "delete")?;
        transport.delete(self.service, &path).await.map(|_: Value| ())
    }

    /// Delete a record returned by an earlier call.
    ///
    /// Path parameters besides the id are taken from the record's path
    /// fields.
    pub async fn delete_record<T: Transport + ?Sized>(
        &'static self,
        transport: &T,
        record: &Record,
    ) -> Result<()> {
        let id = record.id().ok_or_else(|| OtcError::MissingPathParam {
            template: self.delete_path.map_or("", |t| t.as_str()),
            name: ID_PLACEHOLDER.to_string(),
        })?;
        self.delete(transport, &id, &record.path_params()).await
    }

    /// Delete several records, one request at a time.
    ///
    /// Failures are logged and collected; the remaining ids are still tried.
    pub async fn delete_each<T: Transport + ?Sized>(
        &'static self,
        transport: &T,
        ids: &[String],
        params: &BTreeMap<String, String>,
    ) -> DeleteReport {
        let mut report = DeleteReport::default();
        for id in ids {
            match self.delete(transport, id, params).await {
                Ok(()) => report.deleted.push(id.clone()),
                Err(err) => {
                    tracing::warn!(kind = self.kind, %id, error = %err, "delete failed");
                    report.failed.push((id.clone(), err));
                }
            }
        }
        report
    }

    /// Render the list path for a session.
    pub fn list_request_path<T: Transport + ?Sized>(
        &self,
        transport: &T,
        params: &BTreeMap<String, String>,
    ) -> Result<String> {
        self.list_path.render(&with_project(transport, params))
    }

    /// Whether the resource can be fetched by id.
    pub fn supports_get(&self) -> bool {
        self.get_path.is_some()
    }

    /// Whether the resource can be deleted by id.
    pub fn supports_delete(&self) -> bool {
        self.delete_path.is_some()
    }

    fn item_request_path<T: Transport + ?Sized>(
        &self,
        template: Option<PathTemplate>,
        transport: &T,
        id: &str,
        params: &BTreeMap<String, String>,
        operation: &'static str,
    ) -> Result<String> {
        let template = template.ok_or(OtcError::Unsupported {
            resource: self.kind,
            operation,
        })?;
        let mut params = with_project(transport, params);
        params.insert(ID_PLACEHOLDER.to_string(), id.to_string());
        template.render(&params)
    }
}

fn with_project<T: Transport + ?Sized>(
    transport: &T,
    params: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut params = params.clone();
    params
        .entry("project_id".to_string())
        .or_insert_with(|| transport.project_id().to_string());
    params
}
