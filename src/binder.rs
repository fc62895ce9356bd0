//! Turning response bodies into records.

use serde_json::Value;

use crate::container::{lookup, lookup_marker, lookup_u64};
use crate::error::{OtcError, Result};
use crate::record::Record;
use crate::resource::ResourceDef;
use crate::transport::Transport;

/// A response-level value copied onto every record of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ambient {
    /// Context key on the record.
    pub name: &'static str,
    /// Dotted path in the response body.
    pub path: &'static str,
}

/// Context attached to every record a binder produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinderConfig {
    context: Vec<(String, Value)>,
}

impl BinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Context derived from the session: its region, when known.
    pub fn from_transport<T: Transport + ?Sized>(transport: &T) -> Self {
        match transport.region() {
            Some(region) => Self::new().with_context("region", region),
            None => Self::new(),
        }
    }

    pub fn context(&self) -> &[(String, Value)] {
        &self.context
    }
}

/// Records of one page plus the continuation signals found in the body.
#[derive(Debug)]
pub struct BoundPage {
    /// One entry per raw record, in provider order. Records that failed
    /// coercion are kept as errors in their position.
    pub records: Vec<Result<Record>>,
    pub raw_count: usize,
    pub total: Option<u64>,
    pub next_marker: Option<String>,
    /// Identifier of the last raw record, read straight from the wire.
    pub last_id: Option<String>,
}

/// Binds response bodies for one resource.
#[derive(Debug, Clone)]
pub struct ResponseBinder {
    def: &'static ResourceDef,
    config: BinderConfig,
}

impl ResponseBinder {
    pub fn new(def: &'static ResourceDef, config: BinderConfig) -> Self {
        Self { def, config }
    }

    /// Bind every record in a list response.
    ///
    /// # Errors
    ///
    /// Returns [`OtcError::MalformedResponse`] when the record container is
    /// missing or not an array. Per-record coercion failures do not fail the
    /// page; they appear as errors in [`BoundPage::records`].
    pub fn bind_page(&self, body: &Value) -> Result<BoundPage> {
        let raw = self
            .def
            .container
            .extract(body)
            .map_err(|detail| OtcError::MalformedResponse {
                resource: self.def.kind,
                detail,
            })?;

        let ambient: Vec<(&str, Value)> = self
            .def
            .ambient
            .iter()
            .filter_map(|a| lookup(body, a.path).map(|v| (a.name, v.clone())))
            .collect();

        let records = raw
            .iter()
            .map(|item| {
                let mut record = self.def.schema.bind_value(item)?;
                self.attach(&mut record);
                for (name, value) in &ambient {
                    record.set_context(*name, value.clone());
                }
                Ok(record)
            })
            .collect();

        let id_wire = self.def.schema.id_field().map(|f| f.wire);
        let last_id = raw
            .last()
            .zip(id_wire)
            .and_then(|(item, wire)| lookup_marker(item, wire));

        Ok(BoundPage {
            records,
            raw_count: raw.len(),
            total: self.def.total_key.and_then(|key| lookup_u64(body, key)),
            next_marker: self
                .def
                .pagination
                .next_marker_key()
                .and_then(|key| lookup_marker(body, key)),
            last_id,
        })
    }

    /// Bind a single-record response, unwrapping the item key if declared.
    pub fn bind_item(&self, body: &Value) -> Result<Record> {
        let raw = match self.def.item_key {
            Some(key) => lookup(body, key).ok_or_else(|| OtcError::MalformedResponse {
                resource: self.def.kind,
                detail: format!("'{key}' not found"),
            })?,
            None => body,
        };
        let mut record = self.def.schema.bind_value(raw)?;
        self.attach(&mut record);
        Ok(record)
    }

    fn attach(&self, record: &mut Record) {
        for (key, value) in &self.config.context {
            record.set_context(key.clone(), value.clone());
        }
    }
}
