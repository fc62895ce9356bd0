//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization, and table rendering for lists.

use serde_json::Value;
use tabled::builder::Builder;
use tabled::{Table, Tabled};

use crate::pagination::Pagination;
use crate::record::Record;
use crate::resource::ResourceDef;

/// Widest cell shown in list tables before truncation.
const MAX_CELL: usize = 48;

/// Trait for human-readable key-value output.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Record {
    fn pretty_print(&self) -> String {
        let header = match self.id() {
            Some(id) => format!("{}: {}", self.schema().name, id),
            None => self.schema().name.to_string(),
        };
        let width = self
            .attrs()
            .map(|(name, _)| name.len())
            .chain(self.context_map().keys().map(String::len))
            .max()
            .unwrap_or(0)
            + 2;
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];
        for (name, value) in self.attrs() {
            lines.push(format!("{:width$}{}", format!("{name}:"), value));
        }
        for (key, value) in self.context_map() {
            if self.get(key).is_none() {
                lines.push(format!("{:width$}{}", format!("{key}:"), context_text(value)));
            }
        }
        lines.join("\n")
    }
}

/// Render records as a table with the resource's columns.
pub fn record_table(def: &ResourceDef, records: &[Record]) -> String {
    let mut builder = Builder::default();
    builder.push_record(def.columns.iter().map(|c| c.to_string()));
    for record in records {
        builder.push_record(def.columns.iter().map(|column| {
            record
                .get(column)
                .map(|value| truncate(&value.to_string()))
                .unwrap_or_default()
        }));
    }
    builder.build().to_string()
}

#[derive(Tabled)]
struct ResourceRow {
    kind: &'static str,
    path: &'static str,
    paging: &'static str,
    get: &'static str,
    delete: &'static str,
}

/// Render the resource catalog.
pub fn catalog_table(defs: &[&ResourceDef]) -> String {
    let yes_no = |b: bool| if b { "yes" } else { "-" };
    let rows: Vec<ResourceRow> = defs
        .iter()
        .map(|def| ResourceRow {
            kind: def.kind,
            path: def.list_path.as_str(),
            paging: match def.pagination {
                Pagination::Single => "single",
                Pagination::Marker { .. } => "marker",
                Pagination::Offset { .. } => "offset",
            },
            get: yes_no(def.supports_get()),
            delete: yes_no(def.supports_delete()),
        })
        .collect();
    Table::new(rows).to_string()
}

fn context_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_CELL - 1).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DCS_INSTANCE, DMS_QUOTA};
    use serde_json::json;

    #[test]
    fn test_record_pretty_print_format() {
        let record = DCS_INSTANCE
            .schema
            .bind_value(&json!({"instance_id": "abc", "name": "cache-1", "capacity": 2}))
            .unwrap();

        let output = record.pretty_print();
        assert!(output.starts_with("dcs.instance: abc"));
        assert!(output.contains("name:"));
        assert!(output.contains("cache-1"));
    }

    #[test]
    fn test_record_table_uses_columns() {
        let records: Vec<Record> = [("queue", 20), ("group", 3)]
            .iter()
            .map(|(ty, quota)| {
                DMS_QUOTA
                    .schema
                    .bind_value(&json!({"type": ty, "quota": quota}))
                    .unwrap()
            })
            .collect();
        let table = record_table(&DMS_QUOTA, &records);
        assert!(table.contains("type"));
        assert!(table.contains("queue"));
        assert!(table.contains("20"));
    }

    #[test]
    fn test_truncate_long_cells() {
        let long = "x".repeat(100);
        assert_eq!(truncate(&long).chars().count(), MAX_CELL);
        assert_eq!(truncate("short"), "short");
    }
}
