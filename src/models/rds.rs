//! Relational database service resources.

use crate::container::Container;
use crate::filter::{FilterParam, FilterSpec};
use crate::pagination::{OffsetUnit, Pagination};
use crate::resource::{Resource, ResourceDef};
use crate::schema::{FieldDecl, FieldType, Schema};
use crate::template::PathTemplate;
use crate::traits::{Delete, List};
use crate::transport::Service;

const RECORD_OFFSET: Pagination = Pagination::Offset {
    offset_param: "offset",
    limit_param: "limit",
    unit: OffsetUnit::Records { first: 0 },
};

static DATASTORE: Schema = Schema {
    name: "rds.datastore",
    fields: &[
        FieldDecl::new("type", FieldType::String),
        FieldDecl::new("version", FieldType::String),
    ],
};

static VOLUME: Schema = Schema {
    name: "rds.volume",
    fields: &[
        FieldDecl::new("type", FieldType::String),
        FieldDecl::new("size", FieldType::Integer),
    ],
};

static BACKUP_STRATEGY: Schema = Schema {
    name: "rds.backup_strategy",
    fields: &[
        FieldDecl::new("start_time", FieldType::String),
        FieldDecl::new("keep_days", FieldType::Integer),
    ],
};

static NODE: Schema = Schema {
    name: "rds.node",
    fields: &[
        FieldDecl::new("id", FieldType::String),
        FieldDecl::new("name", FieldType::String),
        FieldDecl::new("role", FieldType::String),
        FieldDecl::new("status", FieldType::String),
        FieldDecl::new("availability_zone", FieldType::String),
    ],
};

static INSTANCE_SCHEMA: Schema = Schema {
    name: "rds.instance",
    fields: &[
        FieldDecl::new("id", FieldType::String),
        FieldDecl::new("name", FieldType::String),
        FieldDecl::new("status", FieldType::String),
        FieldDecl::new("type", FieldType::String),
        FieldDecl::new("port", FieldType::Integer),
        FieldDecl::new("private_ips", FieldType::List(&FieldType::String)),
        FieldDecl::new("public_ips", FieldType::List(&FieldType::String)),
        FieldDecl::new("region", FieldType::String),
        FieldDecl::new("flavor_ref", FieldType::String),
        FieldDecl::new("datastore", FieldType::Nested(&DATASTORE)),
        FieldDecl::new("volume", FieldType::Nested(&VOLUME)),
        FieldDecl::new("backup_strategy", FieldType::Nested(&BACKUP_STRATEGY)),
        FieldDecl::new("nodes", FieldType::NestedList(&NODE)),
        FieldDecl::new("ha", FieldType::Dict),
        FieldDecl::new("charge_info", FieldType::Dict),
        FieldDecl::new("vpc_id", FieldType::String),
        FieldDecl::new("subnet_id", FieldType::String),
        FieldDecl::new("security_group_id", FieldType::String),
        FieldDecl::new("switch_strategy", FieldType::String),
        FieldDecl::new("maintenance_window", FieldType::String),
        FieldDecl::new("time_zone", FieldType::String),
        FieldDecl::new("enterprise_project_id", FieldType::String),
        FieldDecl::new("disk_encryption_id", FieldType::String),
        FieldDecl::new("created", FieldType::Timestamp),
        FieldDecl::new("updated", FieldType::Timestamp),
    ],
};

pub static RDS_INSTANCE: ResourceDef = ResourceDef {
    kind: "rds.instance",
    service: Service::Rds,
    schema: &INSTANCE_SCHEMA,
    list_path: PathTemplate::new("/v3/{project_id}/instances"),
    get_path: None,
    delete_path: Some(PathTemplate::new("/v3/{project_id}/instances/{id}")),
    item_key: None,
    container: Container::Keyed("instances"),
    pagination: RECORD_OFFSET,
    total_key: Some("total_count"),
    filters: FilterSpec {
        params: &[
            FilterParam::same("id"),
            FilterParam::same("name"),
            FilterParam::renamed("instance_type", "type"),
            FilterParam::same("datastore_type"),
            FilterParam::same("vpc_id"),
            FilterParam::same("subnet_id"),
        ],
    },
    ambient: &[],
    columns: &["id", "name", "type", "status", "port", "created"],
};

static BACKUP_SCHEMA: Schema = Schema {
    name: "rds.backup",
    fields: &[
        FieldDecl::new("id", FieldType::String),
        FieldDecl::new("name", FieldType::String),
        FieldDecl::new("instance_id", FieldType::String),
        FieldDecl::new("type", FieldType::String),
        FieldDecl::new("size", FieldType::Integer),
        FieldDecl::new("status", FieldType::String),
        FieldDecl::new("datastore", FieldType::Nested(&DATASTORE)),
        FieldDecl::new("databases", FieldType::List(&FieldType::Dict)),
        FieldDecl::new("begin_time", FieldType::Timestamp),
        FieldDecl::new("end_time", FieldType::Timestamp),
    ],
};

/// Backups; the provider requires the `instance_id` filter.
pub static RDS_BACKUP: ResourceDef = ResourceDef {
    kind: "rds.backup",
    service: Service::Rds,
    schema: &BACKUP_SCHEMA,
    list_path: PathTemplate::new("/v3/{project_id}/backups"),
    get_path: None,
    delete_path: Some(PathTemplate::new("/v3/{project_id}/backups/{id}")),
    item_key: None,
    container: Container::Keyed("backups"),
    pagination: RECORD_OFFSET,
    total_key: Some("total_count"),
    filters: FilterSpec {
        params: &[
            FilterParam::same("instance_id"),
            FilterParam::same("backup_id"),
            FilterParam::same("backup_type"),
            FilterParam::same("begin_time"),
            FilterParam::same("end_time"),
        ],
    },
    ambient: &[],
    columns: &["id", "name", "instance_id", "type", "status", "size"],
};

static FLAVOR_SCHEMA: Schema = Schema {
    name: "rds.flavor",
    fields: &[
        FieldDecl::new("spec_code", FieldType::String).alternate_id(),
        FieldDecl::new("vcpus", FieldType::String),
        FieldDecl::new("ram", FieldType::Integer),
        FieldDecl::new("instance_mode", FieldType::String),
        FieldDecl::new("az_status", FieldType::Dict),
    ],
};

/// Flavors for one database engine (`database_name` path parameter).
pub static RDS_FLAVOR: ResourceDef = ResourceDef {
    kind: "rds.flavor",
    service: Service::Rds,
    schema: &FLAVOR_SCHEMA,
    list_path: PathTemplate::new("/v3/{project_id}/flavors/{database_name}"),
    get_path: None,
    delete_path: None,
    item_key: None,
    container: Container::Keyed("flavors"),
    pagination: Pagination::Single,
    total_key: None,
    filters: FilterSpec {
        params: &[
            FilterParam::same("version_name"),
            FilterParam::same("spec_code"),
        ],
    },
    ambient: &[],
    columns: &["spec_code", "vcpus", "ram", "instance_mode"],
};

/// A database instance.
#[derive(Debug, Clone, Copy)]
pub struct RdsInstance;

impl Resource for RdsInstance {
    fn def() -> &'static ResourceDef {
        &RDS_INSTANCE
    }
}
impl List for RdsInstance {}
impl Delete for RdsInstance {}

/// A database backup.
#[derive(Debug, Clone, Copy)]
pub struct RdsBackup;

impl Resource for RdsBackup {
    fn def() -> &'static ResourceDef {
        &RDS_BACKUP
    }
}
impl List for RdsBackup {}
impl Delete for RdsBackup {}

#[derive(Debug, Clone, Copy)]
pub struct RdsFlavor;

impl Resource for RdsFlavor {
    fn def() -> &'static ResourceDef {
        &RDS_FLAVOR
    }
}
impl List for RdsFlavor {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instance_nested_fields() {
        let record = INSTANCE_SCHEMA
            .bind_value(&json!({
                "id": "ed7cc6166ec24360a5ed5c5c9c2ed726in01",
                "name": "mysql-0820",
                "status": "ACTIVE",
                "port": 3306,
                "private_ips": ["192.168.0.142"],
                "datastore": {"type": "MySQL", "version": "8.0"},
                "volume": {"type": "ULTRAHIGH", "size": 100},
                "nodes": [{"id": "n1", "role": "master", "status": "ACTIVE"}],
                "created": "2018-08-20T02:33:49+0800"
            }))
            .unwrap();

        let datastore = record.get_record("datastore").unwrap();
        assert_eq!(datastore.get_str("type"), Some("MySQL"));
        assert_eq!(record.get_list("nodes").map(<[_]>::len), Some(1));
        assert_eq!(record.to_wire()["volume"], json!({"type": "ULTRAHIGH", "size": 100}));
    }

    #[test]
    fn test_instance_type_filter_renamed() {
        let filters = [("instance_type".to_string(), "Ha".to_string())].into();
        let query = RDS_INSTANCE
            .filters
            .transpose(RDS_INSTANCE.kind, &filters, false)
            .unwrap();
        assert_eq!(query, vec![("type".to_string(), "Ha".to_string())]);
    }
}
