//! ModelArts resources.
//!
//! Both list endpoints take the index of the page as `offset`, starting at 0.

use crate::container::Container;
use crate::filter::{FilterParam, FilterSpec};
use crate::pagination::{OffsetUnit, Pagination};
use crate::resource::{Resource, ResourceDef};
use crate::schema::{FieldDecl, FieldType, Schema};
use crate::template::PathTemplate;
use crate::traits::{Delete, Get, List};
use crate::transport::Service;

const PAGE_INDEX: Pagination = Pagination::Offset {
    offset_param: "offset",
    limit_param: "limit",
    unit: OffsetUnit::Pages { first: 0 },
};

static MODEL_SCHEMA: Schema = Schema {
    name: "modelarts.model",
    fields: &[
        FieldDecl::renamed("model_id", "id", FieldType::String).alternate_id(),
        FieldDecl::renamed("model_name", "name", FieldType::String),
        FieldDecl::renamed("model_version", "version", FieldType::String),
        FieldDecl::renamed("model_type", "type", FieldType::String),
        FieldDecl::renamed("model_status", "status", FieldType::String),
        FieldDecl::renamed("model_size", "size", FieldType::Integer),
        FieldDecl::new("model_source", FieldType::String),
        FieldDecl::new("source_type", FieldType::String),
        FieldDecl::new("description", FieldType::String),
        FieldDecl::new("tenant", FieldType::String),
        FieldDecl::new("project", FieldType::String),
        FieldDecl::new("owner", FieldType::String),
        FieldDecl::new("execution_code", FieldType::String),
        FieldDecl::new("image_address", FieldType::String),
        FieldDecl::new("workspace_id", FieldType::String),
        // Milliseconds since the epoch.
        FieldDecl::renamed("create_at", "created_at", FieldType::Integer),
    ],
};

pub static MODELARTS_MODEL: ResourceDef = ResourceDef {
    kind: "modelarts.model",
    service: Service::ModelArts,
    schema: &MODEL_SCHEMA,
    list_path: PathTemplate::new("/v1/{project_id}/models"),
    get_path: Some(PathTemplate::new("/v1/{project_id}/models/{id}")),
    delete_path: Some(PathTemplate::new("/v1/{project_id}/models/{id}")),
    item_key: None,
    container: Container::Keyed("models"),
    pagination: PAGE_INDEX,
    total_key: Some("total_count"),
    filters: FilterSpec {
        params: &[
            FilterParam::renamed("name", "model_name"),
            FilterParam::renamed("version", "model_version"),
            FilterParam::renamed("status", "model_status"),
            FilterParam::renamed("type", "model_type"),
            FilterParam::same("description"),
            FilterParam::same("workspace_id"),
            FilterParam::same("sort_by"),
            FilterParam::same("order"),
        ],
    },
    ambient: &[],
    columns: &["id", "name", "version", "type", "status"],
};

static SERVICE_SCHEMA: Schema = Schema {
    name: "modelarts.service",
    fields: &[
        FieldDecl::renamed("service_id", "id", FieldType::String).alternate_id(),
        FieldDecl::renamed("service_name", "name", FieldType::String),
        FieldDecl::new("description", FieldType::String),
        FieldDecl::new("tenant", FieldType::String),
        FieldDecl::new("project", FieldType::String),
        FieldDecl::new("owner", FieldType::String),
        FieldDecl::new("infer_type", FieldType::String),
        FieldDecl::new("status", FieldType::String),
        FieldDecl::new("progress", FieldType::Integer),
        FieldDecl::new("invocation_times", FieldType::Integer),
        FieldDecl::new("failed_times", FieldType::Integer),
        FieldDecl::new("is_shared", FieldType::Boolean),
        FieldDecl::new("shared_count", FieldType::Integer),
        FieldDecl::new("workspace_id", FieldType::String),
        FieldDecl::new("access_address", FieldType::String),
        // Milliseconds since the epoch.
        FieldDecl::renamed("publish_at", "published_at", FieldType::Integer),
    ],
};

pub static MODELARTS_SERVICE: ResourceDef = ResourceDef {
    kind: "modelarts.service",
    service: Service::ModelArts,
    schema: &SERVICE_SCHEMA,
    list_path: PathTemplate::new("/v1/{project_id}/services"),
    get_path: Some(PathTemplate::new("/v1/{project_id}/services/{id}")),
    delete_path: Some(PathTemplate::new("/v1/{project_id}/services/{id}")),
    item_key: None,
    container: Container::Keyed("services"),
    pagination: PAGE_INDEX,
    total_key: Some("total_count"),
    filters: FilterSpec {
        params: &[
            FilterParam::renamed("name", "service_name"),
            FilterParam::same("model_name"),
            FilterParam::same("infer_type"),
            FilterParam::same("status"),
            FilterParam::same("workspace_id"),
            FilterParam::same("sort_by"),
            FilterParam::same("order"),
        ],
    },
    ambient: &[],
    columns: &["id", "name", "infer_type", "status", "invocation_times"],
};

/// A model registered with ModelArts.
#[derive(Debug, Clone, Copy)]
pub struct ModelArtsModel;

impl Resource for ModelArtsModel {
    fn def() -> &'static ResourceDef {
        &MODELARTS_MODEL
    }
}
impl List for ModelArtsModel {}
impl Get for ModelArtsModel {}
impl Delete for ModelArtsModel {}

/// A deployed inference service.
#[derive(Debug, Clone, Copy)]
pub struct ModelArtsService;

impl Resource for ModelArtsService {
    fn def() -> &'static ResourceDef {
        &MODELARTS_SERVICE
    }
}
impl List for ModelArtsService {}
impl Get for ModelArtsService {}
impl Delete for ModelArtsService {}
