//! Mock server state management.
//!
//! Records are kept as raw wire JSON, the way the provider would return them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

/// Shared state for the mock server.
#[derive(Debug, Default)]
pub struct MockState {
    /// Cache instances, in creation order.
    pub dcs_instances: Vec<Value>,

    /// Message queues.
    pub dms_queues: Vec<Value>,

    /// Consumer groups indexed by queue ID.
    pub dms_groups: HashMap<String, Vec<Value>>,

    /// Entries of the `quotas.resources` array.
    pub dms_quotas: Vec<Value>,

    /// Functions, in the order the marker walks them.
    pub fgs_functions: Vec<Value>,

    /// Database instances.
    pub rds_instances: Vec<Value>,

    /// Optional authentication token. If set, requests must carry it in
    /// `X-Auth-Token`.
    pub required_token: Option<String>,

    /// Requests served so far.
    pub requests: AtomicU64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_dcs_instance(mut self, instance: Value) -> Self {
        self.dcs_instances.push(instance);
        self
    }

    pub fn with_dms_queue(mut self, queue: Value) -> Self {
        self.dms_queues.push(queue);
        self
    }

    /// Add consumer groups for a queue.
    pub fn with_dms_groups(mut self, queue_id: &str, groups: Vec<Value>) -> Self {
        self.dms_groups
            .entry(queue_id.to_string())
            .or_default()
            .extend(groups);
        self
    }

    pub fn with_dms_quota(mut self, quota: Value) -> Self {
        self.dms_quotas.push(quota);
        self
    }

    pub fn with_fgs_function(mut self, function: Value) -> Self {
        self.fgs_functions.push(function);
        self
    }

    pub fn with_rds_instance(mut self, instance: Value) -> Self {
        self.rds_instances.push(instance);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    pub(crate) fn count_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of requests served.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Remove the record whose `key` equals `id`. Returns whether one was
    /// found.
    pub fn remove(records: &mut Vec<Value>, key: &str, id: &str) -> bool {
        let before = records.len();
        records.retain(|r| r.get(key).and_then(Value::as_str) != Some(id));
        records.len() != before
    }

    /// Find the record whose `key` equals `id`.
    pub fn find<'a>(records: &'a [Value], key: &str, id: &str) -> Option<&'a Value> {
        records
            .iter()
            .find(|r| r.get(key).and_then(Value::as_str) == Some(id))
    }
}

/// Whether every `(key, value)` filter matches the record's string field.
pub fn matches_filters(record: &Value, filters: &[(&str, Option<&str>)]) -> bool {
    filters.iter().all(|(key, wanted)| match wanted {
        Some(wanted) => record.get(*key).and_then(Value::as_str) == Some(*wanted),
        None => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remove_by_key() {
        let mut records = vec![json!({"id": "a"}), json!({"id": "b"})];
        assert!(MockState::remove(&mut records, "id", "a"));
        assert!(!MockState::remove(&mut records, "id", "a"));
        assert_eq!(records, vec![json!({"id": "b"})]);
    }

    #[test]
    fn test_filters() {
        let record = json!({"name": "q1", "status": "ACTIVE"});
        assert!(matches_filters(&record, &[("name", Some("q1")), ("status", None)]));
        assert!(!matches_filters(&record, &[("status", Some("FROZEN"))]));
    }

    #[test]
    fn test_request_counter() {
        let state = MockState::new();
        state.count_request();
        state.count_request();
        assert_eq!(state.request_count(), 2);
    }
}
