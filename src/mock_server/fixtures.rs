//! Test data fixtures for the mock server.
//!
//! Provides factory functions for realistic provider payloads.

use serde_json::{json, Value};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The data a default mock server starts with.
pub struct DefaultScenario {
    pub dcs_instances: Vec<Value>,
    pub dms_queues: Vec<Value>,
    pub dms_groups: Vec<(String, Vec<Value>)>,
    pub dms_quotas: Vec<Value>,
    pub fgs_functions: Vec<Value>,
    pub rds_instances: Vec<Value>,
}

impl Fixtures {
    // =========================================================================
    // DCS Fixtures
    // =========================================================================

    pub fn dcs_instance(id: &str, name: &str) -> Value {
        json!({
            "instance_id": id,
            "name": name,
            "engine": "Redis",
            "engine_version": "6.0",
            "capacity": 1,
            "status": "RUNNING",
            "ip": "192.168.0.10",
            "port": 6379,
            "available_zones": ["eu-de-01"],
            "enable_publicip": false,
            "created_at": "2024-05-02T09:15:00.000Z"
        })
    }

    // =========================================================================
    // DMS Fixtures
    // =========================================================================

    pub fn dms_queue(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": "",
            "queue_mode": "NORMAL",
            "redrive_policy": "disable",
            "retention_hours": 72,
            "produced_messages": 0,
            "group_count": 0,
            "created": 1_714_640_100_000_i64
        })
    }

    pub fn dms_group(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "produced_messages": 10,
            "consumed_messages": 7,
            "available_messages": 3
        })
    }

    pub fn dms_quota(kind: &str, quota: i64, used: i64) -> Value {
        json!({"type": kind, "quota": quota, "used": used, "min": 0, "max": 100})
    }

    // =========================================================================
    // FunctionGraph Fixtures
    // =========================================================================

    pub fn fgs_function(project_id: &str, name: &str) -> Value {
        json!({
            "func_urn": format!("urn:fss:eu-de:{project_id}:function:default:{name}:latest"),
            "func_name": name,
            "package": "default",
            "runtime": "Python3.9",
            "timeout": 30,
            "handler": "index.handler",
            "memory_size": 128,
            "code_type": "inline",
            "last_modified": "2024-05-02 11:15:00"
        })
    }

    // =========================================================================
    // RDS Fixtures
    // =========================================================================

    pub fn rds_instance(id: &str, name: &str, instance_type: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "status": "ACTIVE",
            "type": instance_type,
            "port": 3306,
            "private_ips": ["192.168.0.42"],
            "datastore": {"type": "MySQL", "version": "8.0"},
            "volume": {"type": "ULTRAHIGH", "size": 40},
            "created": "2024-05-02T09:15:00+0000"
        })
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Enough records that list walks need several pages at small limits.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            dcs_instances: (1..=5)
                .map(|i| Self::dcs_instance(&format!("dcs-{i}"), &format!("cache-{i}")))
                .collect(),
            dms_queues: vec![
                Self::dms_queue("q-1", "orders"),
                Self::dms_queue("q-2", "invoices"),
            ],
            dms_groups: vec![(
                "q-1".to_string(),
                vec![
                    Self::dms_group("g-1", "billing"),
                    Self::dms_group("g-2", "audit"),
                ],
            )],
            dms_quotas: vec![
                Self::dms_quota("queue", 25, 2),
                Self::dms_quota("group", 100, 2),
            ],
            fgs_functions: (1..=5)
                .map(|i| Self::fgs_function("p1", &format!("fn-{i}")))
                .collect(),
            rds_instances: vec![
                Self::rds_instance("rds-1", "orders-db", "Single"),
                Self::rds_instance("rds-2", "billing-db", "Ha"),
                Self::rds_instance("rds-3", "audit-db", "Single"),
            ],
        }
    }
}
