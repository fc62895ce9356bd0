//! Distributed message service resources.

use crate::binder::Ambient;
use crate::container::Container;
use crate::filter::{FilterParam, FilterSpec};
use crate::pagination::Pagination;
use crate::resource::{Resource, ResourceDef};
use crate::schema::{FieldDecl, FieldType, Schema};
use crate::template::PathTemplate;
use crate::traits::{Delete, Get, List};
use crate::transport::Service;

static QUEUE_SCHEMA: Schema = Schema {
    name: "dms.queue",
    fields: &[
        FieldDecl::new("id", FieldType::String),
        FieldDecl::new("name", FieldType::String),
        FieldDecl::new("description", FieldType::String),
        FieldDecl::new("queue_mode", FieldType::String),
        FieldDecl::new("redrive_policy", FieldType::String),
        FieldDecl::new("max_consume_count", FieldType::Integer),
        FieldDecl::new("retention_hours", FieldType::Integer),
        FieldDecl::new("reservation", FieldType::Integer),
        FieldDecl::new("max_msg_size_byte", FieldType::Integer),
        FieldDecl::new("produced_messages", FieldType::Integer),
        FieldDecl::new("group_count", FieldType::Integer),
        // Milliseconds since the epoch.
        FieldDecl::new("created", FieldType::Integer),
    ],
};

pub static DMS_QUEUE: ResourceDef = ResourceDef {
    kind: "dms.queue",
    service: Service::Dms,
    schema: &QUEUE_SCHEMA,
    list_path: PathTemplate::new("/v1.0/{project_id}/queues"),
    get_path: Some(PathTemplate::new("/v1.0/{project_id}/queues/{id}")),
    delete_path: Some(PathTemplate::new("/v1.0/{project_id}/queues/{id}")),
    item_key: None,
    container: Container::Keyed("queues"),
    pagination: Pagination::Single,
    total_key: None,
    filters: FilterSpec {
        params: &[FilterParam::same("include_deadletter")],
    },
    ambient: &[],
    columns: &["id", "name", "queue_mode", "produced_messages", "group_count"],
};

static QUOTA_SCHEMA: Schema = Schema {
    name: "dms.quota",
    fields: &[
        FieldDecl::new("type", FieldType::String),
        FieldDecl::new("quota", FieldType::Integer),
        FieldDecl::new("used", FieldType::Integer),
        FieldDecl::new("min", FieldType::Integer),
        FieldDecl::new("max", FieldType::Integer),
    ],
};

/// Quotas live under `quotas.resources` in the response.
pub static DMS_QUOTA: ResourceDef = ResourceDef {
    kind: "dms.quota",
    service: Service::Dms,
    schema: &QUOTA_SCHEMA,
    list_path: PathTemplate::new("/v1.0/{project_id}/quotas/dms"),
    get_path: None,
    delete_path: None,
    item_key: None,
    container: Container::Dotted("quotas.resources"),
    pagination: Pagination::Single,
    total_key: None,
    filters: FilterSpec::NONE,
    ambient: &[],
    columns: &["type", "quota", "used", "min", "max"],
};

static GROUP_SCHEMA: Schema = Schema {
    name: "dms.group",
    fields: &[
        FieldDecl::new("id", FieldType::String),
        FieldDecl::new("name", FieldType::String),
        FieldDecl::new("queue_id", FieldType::String).path(),
        FieldDecl::new("produced_messages", FieldType::Integer),
        FieldDecl::new("consumed_messages", FieldType::Integer),
        FieldDecl::new("available_messages", FieldType::Integer),
        FieldDecl::new("produced_deadletters", FieldType::Integer),
        FieldDecl::new("available_deadletters", FieldType::Integer),
    ],
};

/// Consumer groups of one queue. The queue is named once per response and
/// copied onto every group.
pub static DMS_GROUP: ResourceDef = ResourceDef {
    kind: "dms.group",
    service: Service::Dms,
    schema: &GROUP_SCHEMA,
    list_path: PathTemplate::new("/v1.0/{project_id}/queues/{queue_id}/groups"),
    get_path: None,
    delete_path: Some(PathTemplate::new(
        "/v1.0/{project_id}/queues/{queue_id}/groups/{id}",
    )),
    item_key: None,
    container: Container::Keyed("groups"),
    pagination: Pagination::Single,
    total_key: None,
    filters: FilterSpec {
        params: &[FilterParam::same("include_deadletter")],
    },
    ambient: &[
        Ambient {
            name: "queue_id",
            path: "queue_id",
        },
        Ambient {
            name: "queue_name",
            path: "queue_name",
        },
    ],
    columns: &["id", "name", "consumed_messages", "available_messages"],
};

/// A message queue.
#[derive(Debug, Clone, Copy)]
pub struct DmsQueue;

impl Resource for DmsQueue {
    fn def() -> &'static ResourceDef {
        &DMS_QUEUE
    }
}
impl List for DmsQueue {}
impl Get for DmsQueue {}
impl Delete for DmsQueue {}

#[derive(Debug, Clone, Copy)]
pub struct DmsQuota;

impl Resource for DmsQuota {
    fn def() -> &'static ResourceDef {
        &DMS_QUOTA
    }
}
impl List for DmsQuota {}

/// A consumer group of a queue.
#[derive(Debug, Clone, Copy)]
pub struct DmsGroup;

impl Resource for DmsGroup {
    fn def() -> &'static ResourceDef {
        &DMS_GROUP
    }
}
impl List for DmsGroup {}
impl Delete for DmsGroup {}
