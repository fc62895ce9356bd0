//! Property-based tests using proptest
//!
//! These tests cover filter translation, path rendering, record binding and
//! the page arithmetic of offset walks with randomized inputs.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use otcapi::models::{DCS_BACKUP, DCS_INSTANCE, RDS_INSTANCE};
use otcapi::{
    FieldDecl, FieldType, ListOptions, OtcError, PathTemplate, RawResponse, Request, Result,
    Schema, Transport,
};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Logical DCS filter names with their wire names.
const DCS_FILTERS: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("status", "status"),
    ("ip", "ip"),
    ("include_failure", "include_failure"),
    ("exact_match", "is_exact_match"),
    ("tags", "tags"),
];

fn arb_filters() -> impl Strategy<Value = BTreeMap<String, String>> {
    (
        prop::sample::subsequence(DCS_FILTERS.to_vec(), 0..=DCS_FILTERS.len()),
        prop::collection::vec("[A-Za-z0-9 _=-]{0,16}", DCS_FILTERS.len()),
    )
        .prop_map(|(names, values)| {
            names
                .into_iter()
                .zip(values)
                .map(|((name, _), value)| (name.to_string(), value))
                .collect()
        })
}

fn wire_name(logical: &str) -> Option<&'static str> {
    DCS_FILTERS
        .iter()
        .find(|(name, _)| *name == logical)
        .map(|(_, wire)| *wire)
}

static SAMPLE: Schema = Schema {
    name: "sample",
    fields: &[
        FieldDecl::renamed("sample_id", "id", FieldType::String).alternate_id(),
        FieldDecl::new("name", FieldType::String),
        FieldDecl::new("size", FieldType::Integer),
        FieldDecl::new("enabled", FieldType::Boolean),
        FieldDecl::new("labels", FieldType::List(&FieldType::String)),
    ],
};

/// A raw sample object with only canonical wire types and no nulls.
fn arb_sample() -> impl Strategy<Value = Value> {
    (
        "[a-f0-9]{8}",
        prop::option::of("[a-z][a-z0-9-]{0,20}"),
        prop::option::of(any::<i64>()),
        prop::option::of(any::<bool>()),
        prop::option::of(prop::collection::vec("[a-z]{1,8}", 0..4)),
    )
        .prop_map(|(id, name, size, enabled, labels)| {
            let mut object = serde_json::Map::new();
            object.insert("sample_id".into(), json!(id));
            if let Some(name) = name {
                object.insert("name".into(), json!(name));
            }
            if let Some(size) = size {
                object.insert("size".into(), json!(size));
            }
            if let Some(enabled) = enabled {
                object.insert("enabled".into(), json!(enabled));
            }
            if let Some(labels) = labels {
                object.insert("labels".into(), json!(labels));
            }
            Value::Object(object)
        })
}

/// Serves offset/limit pages out of a fixed record list.
struct OffsetServer {
    records: Vec<Value>,
    report_total: bool,
    requests: AtomicUsize,
}

#[async_trait]
impl Transport for OffsetServer {
    fn project_id(&self) -> &str {
        "p1"
    }

    async fn execute(&self, request: Request) -> Result<RawResponse> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let number = |name: &str, default: usize| {
            request
                .query_value(name)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };
        let offset = number("offset", 0).min(self.records.len());
        let limit = number("limit", 100);
        let end = (offset + limit).min(self.records.len());

        let mut body = json!({ "instances": &self.records[offset..end] });
        if self.report_total {
            body["total_count"] = json!(self.records.len());
        }
        Ok(RawResponse::new(200, body))
    }
}

fn expected_requests(count: usize, limit: usize, report_total: bool) -> usize {
    if count == 0 {
        1
    } else if report_total || count % limit != 0 {
        count.div_ceil(limit)
    } else {
        // A full last page is only known to be last once an empty one follows.
        count / limit + 1
    }
}

proptest! {
    /// Every known filter comes out once, under its wire name, with its value
    #[test]
    fn transpose_renames_known_filters(filters in arb_filters()) {
        let wire = DCS_INSTANCE
            .filters
            .transpose(DCS_INSTANCE.kind, &filters, false)
            .unwrap();

        prop_assert_eq!(wire.len(), filters.len());
        for (name, value) in &filters {
            let expected = wire_name(name).unwrap();
            prop_assert!(wire.iter().any(|(k, v)| k == expected && v == value));
        }
    }

    /// An undeclared name fails unless pass-through is allowed
    #[test]
    fn transpose_unknown_filter(
        filters in arb_filters(),
        unknown in "x_[a-z]{1,10}",
        value in "[a-z0-9]{0,8}",
    ) {
        let mut filters = filters;
        filters.insert(unknown.clone(), value.clone());

        let strict = DCS_INSTANCE.filters.transpose(DCS_INSTANCE.kind, &filters, false);
        let is_unknown = matches!(
            strict,
            Err(OtcError::UnknownFilter { ref name, .. }) if *name == unknown
        );
        prop_assert!(is_unknown);

        let lenient = DCS_INSTANCE
            .filters
            .transpose(DCS_INSTANCE.kind, &filters, true)
            .unwrap();
        prop_assert!(lenient.contains(&(unknown, value)));
    }

    /// Rendering leaves no placeholder behind and keeps values in one segment
    #[test]
    fn template_render_fills_every_placeholder(
        project in "[a-z0-9]{1,32}",
        instance in "\\PC{1,24}",
    ) {
        let params: BTreeMap<String, String> = [
            ("project_id".to_string(), project.clone()),
            ("instance_id".to_string(), instance.clone()),
        ]
        .into_iter()
        .collect();

        let path = DCS_BACKUP.list_path.render(&params).unwrap();

        prop_assert!(
            !path.contains('{') && !path.contains('}'),
            "leftover brace in {}",
            path
        );
        let segments: Vec<&str> = path.split('/').collect();
        prop_assert_eq!(segments.len(), 6);
        prop_assert_eq!(segments[2], project.as_str());
        let decoded = urlencoding::decode(segments[4]).unwrap();
        prop_assert_eq!(decoded.as_ref(), instance.as_str());
    }

    /// A missing placeholder value always errors
    #[test]
    fn template_missing_param_errors(project in "[a-z0-9]{1,32}") {
        let template = PathTemplate::new("/v1.0/{project_id}/instances/{instance_id}/backups");
        let params: BTreeMap<String, String> =
            [("project_id".to_string(), project)].into_iter().collect();

        let missing = matches!(
            template.render(&params),
            Err(OtcError::MissingPathParam { ref name, .. }) if name == "instance_id"
        );
        prop_assert!(missing);
    }

    /// Binding then re-emitting gives back the wire object
    #[test]
    fn bind_then_to_wire_is_identity(raw in arb_sample()) {
        let record = SAMPLE.bind_value(&raw).unwrap();

        prop_assert_eq!(record.id(), raw["sample_id"].as_str().map(str::to_string));
        prop_assert_eq!(record.to_wire(), raw);
    }

    /// An offset walk returns every record once, in order, with the fewest
    /// requests the continuation rules allow
    #[test]
    fn offset_walk_returns_each_record_once(
        count in 0usize..60,
        limit in 1u32..12,
        report_total in any::<bool>(),
    ) {
        let records: Vec<Value> = (0..count)
            .map(|i| json!({"id": format!("rds-{i}"), "name": format!("db-{i}")}))
            .collect();
        let server = OffsetServer {
            records,
            report_total,
            requests: AtomicUsize::new(0),
        };

        let walked = tokio_test::block_on(async {
            RDS_INSTANCE
                .pager(&server, ListOptions::new().limit(limit))
                .unwrap()
                .try_collect()
                .await
        })
        .unwrap();

        let ids: Vec<String> = walked.iter().filter_map(|r| r.id()).collect();
        let expected: Vec<String> = (0..count).map(|i| format!("rds-{i}")).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(
            server.requests.load(Ordering::SeqCst),
            expected_requests(count, limit as usize, report_total)
        );
    }
}
