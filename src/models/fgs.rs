//! FunctionGraph resources.

use crate::container::Container;
use crate::filter::{FilterParam, FilterSpec};
use crate::pagination::Pagination;
use crate::resource::{Resource, ResourceDef};
use crate::schema::{FieldDecl, FieldType, Schema};
use crate::template::PathTemplate;
use crate::traits::{Delete, Get, List};
use crate::transport::Service;

static DEPENDENCY_SCHEMA: Schema = Schema {
    name: "fgs.dependency",
    fields: &[
        FieldDecl::new("id", FieldType::String),
        FieldDecl::new("name", FieldType::String),
        FieldDecl::new("runtime", FieldType::String),
        FieldDecl::new("link", FieldType::String),
        FieldDecl::new("file_name", FieldType::String),
    ],
};

static FUNCTION_SCHEMA: Schema = Schema {
    name: "fgs.function",
    fields: &[
        FieldDecl::renamed("func_urn", "id", FieldType::String).alternate_id(),
        FieldDecl::renamed("func_name", "name", FieldType::String),
        FieldDecl::new("domain_id", FieldType::String),
        FieldDecl::new("namespace", FieldType::String),
        FieldDecl::new("project_name", FieldType::String),
        FieldDecl::new("package", FieldType::String),
        FieldDecl::new("runtime", FieldType::String),
        FieldDecl::new("timeout", FieldType::Integer),
        FieldDecl::new("handler", FieldType::String),
        FieldDecl::new("memory_size", FieldType::Integer),
        FieldDecl::new("cpu", FieldType::Integer),
        FieldDecl::new("code_type", FieldType::String),
        FieldDecl::new("code_url", FieldType::String),
        FieldDecl::new("code_filename", FieldType::String),
        FieldDecl::new("code_size", FieldType::Integer),
        FieldDecl::new("digest", FieldType::String),
        FieldDecl::new("version", FieldType::String),
        FieldDecl::new("image_name", FieldType::String),
        FieldDecl::new("xrole", FieldType::String),
        FieldDecl::new("app_xrole", FieldType::String),
        FieldDecl::new("description", FieldType::String),
        FieldDecl::new("initializer_handler", FieldType::String),
        FieldDecl::new("initializer_timeout", FieldType::Integer),
        FieldDecl::new("enterprise_project_id", FieldType::String),
        FieldDecl::new("strategy_config", FieldType::Dict),
        FieldDecl::new("dependencies", FieldType::NestedList(&DEPENDENCY_SCHEMA)),
        // Reported in the provider's local format, kept verbatim.
        FieldDecl::new("last_modified", FieldType::String),
    ],
};

/// Functions page by marker; the response carries the next marker itself.
pub static FGS_FUNCTION: ResourceDef = ResourceDef {
    kind: "fgs.function",
    service: Service::FunctionGraph,
    schema: &FUNCTION_SCHEMA,
    list_path: PathTemplate::new("/v2/{project_id}/fgs/functions"),
    get_path: Some(PathTemplate::new("/v2/{project_id}/fgs/functions/{id}/config")),
    delete_path: Some(PathTemplate::new("/v2/{project_id}/fgs/functions/{id}")),
    item_key: None,
    container: Container::Keyed("functions"),
    pagination: Pagination::Marker {
        marker_param: "marker",
        limit_param: "maxitems",
        next_marker: Some("next_marker"),
    },
    total_key: Some("count"),
    filters: FilterSpec {
        params: &[FilterParam::renamed("package", "package_name")],
    },
    ambient: &[],
    columns: &["name", "runtime", "memory_size", "timeout", "package", "last_modified"],
};

static TRIGGER_SCHEMA: Schema = Schema {
    name: "fgs.trigger",
    fields: &[
        FieldDecl::renamed("trigger_id", "id", FieldType::String).alternate_id(),
        FieldDecl::renamed("trigger_type_code", "type", FieldType::String),
        FieldDecl::renamed("trigger_status", "status", FieldType::String),
        FieldDecl::new("event_type_code", FieldType::String),
        FieldDecl::new("event_data", FieldType::Dict),
        FieldDecl::new("last_updated_time", FieldType::String),
        FieldDecl::new("created_time", FieldType::String),
    ],
};

/// Triggers of one function; the response is a bare array.
pub static FGS_TRIGGER: ResourceDef = ResourceDef {
    kind: "fgs.trigger",
    service: Service::FunctionGraph,
    schema: &TRIGGER_SCHEMA,
    list_path: PathTemplate::new("/v2/{project_id}/fgs/triggers/{function_urn}"),
    get_path: None,
    delete_path: None,
    item_key: None,
    container: Container::TopLevel,
    pagination: Pagination::Single,
    total_key: None,
    filters: FilterSpec::NONE,
    ambient: &[],
    columns: &["id", "type", "status", "created_time"],
};

static RESERVED_INSTANCE_SCHEMA: Schema = Schema {
    name: "fgs.reserved_instance",
    fields: &[
        FieldDecl::renamed("func_urn", "id", FieldType::String).alternate_id(),
        FieldDecl::new("qualifier_name", FieldType::String),
        FieldDecl::new("qualifier_type", FieldType::String),
        FieldDecl::new("min_count", FieldType::Integer),
    ],
};

pub static FGS_RESERVED_INSTANCE: ResourceDef = ResourceDef {
    kind: "fgs.reserved_instance",
    service: Service::FunctionGraph,
    schema: &RESERVED_INSTANCE_SCHEMA,
    list_path: PathTemplate::new("/v2/{project_id}/fgs/functions/reservedinstances"),
    get_path: None,
    delete_path: None,
    item_key: None,
    container: Container::Keyed("reservedinstances"),
    pagination: Pagination::Marker {
        marker_param: "marker",
        limit_param: "limit",
        next_marker: Some("page_info.next_marker"),
    },
    total_key: Some("count"),
    filters: FilterSpec {
        params: &[FilterParam::renamed("function", "urn")],
    },
    ambient: &[],
    columns: &["id", "qualifier_type", "qualifier_name", "min_count"],
};

/// A function.
#[derive(Debug, Clone, Copy)]
pub struct FgsFunction;

impl Resource for FgsFunction {
    fn def() -> &'static ResourceDef {
        &FGS_FUNCTION
    }
}
impl List for FgsFunction {}
impl Get for FgsFunction {}
impl Delete for FgsFunction {}

/// A trigger of a function.
#[derive(Debug, Clone, Copy)]
pub struct FgsTrigger;

impl Resource for FgsTrigger {
    fn def() -> &'static ResourceDef {
        &FGS_TRIGGER
    }
}
impl List for FgsTrigger {}

/// Reserved instances configured for a function.
#[derive(Debug, Clone, Copy)]
pub struct FgsReservedInstance;

impl Resource for FgsReservedInstance {
    fn def() -> &'static ResourceDef {
        &FGS_RESERVED_INSTANCE
    }
}
impl List for FgsReservedInstance {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::binder::{BinderConfig, ResponseBinder};

    #[test]
    fn test_function_page_signals() {
        let body = json!({
            "functions": [
                {"func_urn": "urn:fss:eu-de:p1:function:default:a:latest", "func_name": "a", "memory_size": 128},
                {"func_urn": "urn:fss:eu-de:p1:function:default:b:latest", "func_name": "b", "memory_size": 256}
            ],
            "next_marker": 2,
            "count": 5
        });
        let page = ResponseBinder::new(&FGS_FUNCTION, BinderConfig::new())
            .bind_page(&body)
            .unwrap();
        assert_eq!(page.raw_count, 2);
        assert_eq!(page.total, Some(5));
        assert_eq!(page.next_marker.as_deref(), Some("2"));
        let first = page.records[0].as_ref().unwrap();
        assert_eq!(first.get_str("name"), Some("a"));
    }

    #[test]
    fn test_reserved_instance_nested_marker() {
        let body = json!({
            "reservedinstances": [{"func_urn": "urn:x", "qualifier_type": "version", "qualifier_name": "latest", "min_count": 1}],
            "page_info": {"next_marker": 1, "previous_marker": 0},
            "count": 3
        });
        let page = ResponseBinder::new(&FGS_RESERVED_INSTANCE, BinderConfig::new())
            .bind_page(&body)
            .unwrap();
        assert_eq!(page.next_marker.as_deref(), Some("1"));
    }
}
