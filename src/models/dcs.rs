//! Distributed cache service resources.

use crate::binder::Ambient;
use crate::container::Container;
use crate::filter::{FilterParam, FilterSpec};
use crate::pagination::{OffsetUnit, Pagination};
use crate::resource::{Resource, ResourceDef};
use crate::schema::{FieldDecl, FieldType, Schema};
use crate::template::PathTemplate;
use crate::traits::{Delete, Get, List};
use crate::transport::Service;

const DCS_PAGING: Pagination = Pagination::Offset {
    offset_param: "start",
    limit_param: "limit",
    unit: OffsetUnit::Records { first: 1 },
};

static TAG: Schema = Schema {
    name: "dcs.tag",
    fields: &[
        FieldDecl::new("key", FieldType::String),
        FieldDecl::new("value", FieldType::String),
    ],
};

static BACKUP_POLICY: Schema = Schema {
    name: "dcs.backup_policy",
    fields: &[
        FieldDecl::new("backup_type", FieldType::String),
        FieldDecl::new("save_days", FieldType::Integer),
        FieldDecl::new("periodical_backup_plan", FieldType::Dict),
    ],
};

static INSTANCE_SCHEMA: Schema = Schema {
    name: "dcs.instance",
    fields: &[
        FieldDecl::renamed("instance_id", "id", FieldType::String).alternate_id(),
        FieldDecl::new("name", FieldType::String),
        FieldDecl::new("description", FieldType::String),
        FieldDecl::new("engine", FieldType::String),
        FieldDecl::new("engine_version", FieldType::String),
        FieldDecl::new("capacity", FieldType::Integer),
        FieldDecl::new("status", FieldType::String),
        FieldDecl::new("ip", FieldType::String),
        FieldDecl::new("port", FieldType::Integer),
        FieldDecl::new("domain_name", FieldType::String),
        FieldDecl::new("max_memory", FieldType::Integer),
        FieldDecl::new("used_memory", FieldType::Integer),
        FieldDecl::new("resource_spec_code", FieldType::String),
        FieldDecl::new("product_id", FieldType::String),
        FieldDecl::new("vpc_id", FieldType::String),
        FieldDecl::new("vpc_name", FieldType::String),
        FieldDecl::new("subnet_id", FieldType::String),
        FieldDecl::new("subnet_name", FieldType::String),
        FieldDecl::new("subnet_cidr", FieldType::String),
        FieldDecl::new("security_group_id", FieldType::String),
        FieldDecl::new("security_group_name", FieldType::String),
        FieldDecl::new("available_zones", FieldType::List(&FieldType::String)),
        FieldDecl::new("user_id", FieldType::String),
        FieldDecl::new("user_name", FieldType::String),
        FieldDecl::new("order_id", FieldType::String),
        FieldDecl::new("charging_mode", FieldType::Integer),
        FieldDecl::new("maintain_begin", FieldType::String),
        FieldDecl::new("maintain_end", FieldType::String),
        FieldDecl::renamed("enable_publicip", "is_public_ip_enabled", FieldType::Boolean),
        FieldDecl::new("public_ip_id", FieldType::String),
        FieldDecl::new("public_ip_address", FieldType::String),
        FieldDecl::renamed("enable_ssl", "is_ssl_enabled", FieldType::Boolean),
        FieldDecl::new("error_code", FieldType::String),
        FieldDecl::new("created_at", FieldType::Timestamp),
        FieldDecl::renamed("instance_backup_policy", "backup_policy", FieldType::Nested(&BACKUP_POLICY)),
        FieldDecl::new("tags", FieldType::NestedList(&TAG)),
    ],
};

/// `GET /v1.0/{project_id}/instances`, paged by a 1-based record offset.
pub static DCS_INSTANCE: ResourceDef = ResourceDef {
    kind: "dcs.instance",
    service: Service::Dcs,
    schema: &INSTANCE_SCHEMA,
    list_path: PathTemplate::new("/v1.0/{project_id}/instances"),
    get_path: Some(PathTemplate::new("/v1.0/{project_id}/instances/{id}")),
    delete_path: Some(PathTemplate::new("/v1.0/{project_id}/instances/{id}")),
    item_key: None,
    container: Container::Keyed("instances"),
    pagination: DCS_PAGING,
    total_key: Some("instance_num"),
    filters: FilterSpec {
        params: &[
            FilterParam::same("id"),
            FilterParam::same("name"),
            FilterParam::same("status"),
            FilterParam::same("ip"),
            FilterParam::same("include_failure"),
            FilterParam::renamed("exact_match", "is_exact_match"),
            FilterParam::same("tags"),
        ],
    },
    ambient: &[],
    columns: &["id", "name", "engine", "engine_version", "capacity", "status", "ip"],
};

static BACKUP_SCHEMA: Schema = Schema {
    name: "dcs.backup",
    fields: &[
        FieldDecl::renamed("backup_id", "id", FieldType::String).alternate_id(),
        FieldDecl::renamed("backup_name", "name", FieldType::String),
        FieldDecl::new("instance_id", FieldType::String).path(),
        FieldDecl::new("size", FieldType::Integer),
        FieldDecl::new("period", FieldType::String),
        FieldDecl::new("description", FieldType::String),
        FieldDecl::new("progress", FieldType::String),
        FieldDecl::new("status", FieldType::String),
        FieldDecl::new("backup_type", FieldType::String),
        FieldDecl::new("backup_format", FieldType::String),
        // Sent as "TRUE"/"FALSE".
        FieldDecl::new("is_support_restore", FieldType::Boolean),
        FieldDecl::new("error_code", FieldType::String),
        FieldDecl::new("created_at", FieldType::Timestamp),
        FieldDecl::new("updated_at", FieldType::Timestamp),
    ],
};

/// Backups of one instance; needs the `instance_id` path parameter.
pub static DCS_BACKUP: ResourceDef = ResourceDef {
    kind: "dcs.backup",
    service: Service::Dcs,
    schema: &BACKUP_SCHEMA,
    list_path: PathTemplate::new("/v1.0/{project_id}/instances/{instance_id}/backups"),
    get_path: None,
    delete_path: Some(PathTemplate::new(
        "/v1.0/{project_id}/instances/{instance_id}/backups/{id}",
    )),
    item_key: None,
    container: Container::Keyed("backup_record_response"),
    pagination: DCS_PAGING,
    total_key: Some("total_num"),
    filters: FilterSpec {
        params: &[
            FilterParam::renamed("begin", "beginTime"),
            FilterParam::renamed("end", "endTime"),
        ],
    },
    ambient: &[],
    columns: &["id", "name", "instance_id", "status", "size", "created_at"],
};

static PRODUCT_SCHEMA: Schema = Schema {
    name: "dcs.product",
    fields: &[
        FieldDecl::renamed("product_id", "id", FieldType::String).alternate_id(),
        FieldDecl::new("spec_code", FieldType::String),
        FieldDecl::new("engine", FieldType::String),
        FieldDecl::new("engine_versions", FieldType::String),
        FieldDecl::new("cache_mode", FieldType::String),
        FieldDecl::new("cpu_type", FieldType::String),
        FieldDecl::new("charging_type", FieldType::String),
        FieldDecl::new("price", FieldType::Float),
        FieldDecl::new("currency", FieldType::String),
        FieldDecl::new("spec_details", FieldType::String),
    ],
};

pub static DCS_PRODUCT: ResourceDef = ResourceDef {
    kind: "dcs.product",
    service: Service::Dcs,
    schema: &PRODUCT_SCHEMA,
    list_path: PathTemplate::new("/v1.0/products"),
    get_path: None,
    delete_path: None,
    item_key: None,
    container: Container::Keyed("products"),
    pagination: Pagination::Single,
    total_key: None,
    filters: FilterSpec::NONE,
    ambient: &[],
    columns: &["id", "spec_code", "engine", "engine_versions", "cache_mode"],
};

static AVAILABLE_ZONE_SCHEMA: Schema = Schema {
    name: "dcs.available_zone",
    fields: &[
        FieldDecl::new("id", FieldType::String),
        FieldDecl::new("code", FieldType::String),
        FieldDecl::new("name", FieldType::String),
        FieldDecl::new("port", FieldType::String),
        FieldDecl::renamed("resource_availability", "has_available_resources", FieldType::Boolean),
    ],
};

/// Availability zones; the response names the region once for all zones.
pub static DCS_AVAILABLE_ZONE: ResourceDef = ResourceDef {
    kind: "dcs.available_zone",
    service: Service::Dcs,
    schema: &AVAILABLE_ZONE_SCHEMA,
    list_path: PathTemplate::new("/v1.0/availableZones"),
    get_path: None,
    delete_path: None,
    item_key: None,
    container: Container::Keyed("available_zones"),
    pagination: Pagination::Single,
    total_key: None,
    filters: FilterSpec::NONE,
    ambient: &[Ambient {
        name: "region",
        path: "region_id",
    }],
    columns: &["id", "code", "name", "has_available_resources"],
};

/// A cache instance.
#[derive(Debug, Clone, Copy)]
pub struct DcsInstance;

impl Resource for DcsInstance {
    fn def() -> &'static ResourceDef {
        &DCS_INSTANCE
    }
}
impl List for DcsInstance {}
impl Get for DcsInstance {}
impl Delete for DcsInstance {}

/// A backup of a cache instance.
#[derive(Debug, Clone, Copy)]
pub struct DcsBackup;

impl Resource for DcsBackup {
    fn def() -> &'static ResourceDef {
        &DCS_BACKUP
    }
}
impl List for DcsBackup {}
impl Delete for DcsBackup {}

/// An orderable cache product.
#[derive(Debug, Clone, Copy)]
pub struct DcsProduct;

impl Resource for DcsProduct {
    fn def() -> &'static ResourceDef {
        &DCS_PRODUCT
    }
}
impl List for DcsProduct {}

#[derive(Debug, Clone, Copy)]
pub struct DcsAvailableZone;

impl Resource for DcsAvailableZone {
    fn def() -> &'static ResourceDef {
        &DCS_AVAILABLE_ZONE
    }
}
impl List for DcsAvailableZone {}
