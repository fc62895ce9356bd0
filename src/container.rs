//! Locating the record array inside a response body.

use serde_json::Value;

/// Where a list response keeps its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// The body itself is the array.
    TopLevel,
    /// `{"instances": [...]}`
    Keyed(&'static str),
    /// `{"quotas": {"resources": [...]}}` as `"quotas.resources"`.
    Dotted(&'static str),
}

impl Container {
    /// Find the record array in `body`.
    ///
    /// Returns a description of what was wrong when the array is missing.
    pub fn extract<'v>(&self, body: &'v Value) -> Result<&'v [Value], String> {
        let (found, location) = match self {
            Container::TopLevel => (Some(body), "response body"),
            Container::Keyed(key) => (body.get(*key), *key),
            Container::Dotted(path) => (lookup(body, path), *path),
        };
        match found {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(format!("'{location}' is {}, expected an array", kind(other))),
            None => Err(format!("'{location}' not found")),
        }
    }
}

/// Follow a dotted path of object keys.
pub fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.')
        .try_fold(value, |current, key| current.as_object()?.get(key))
}

/// Read a count that may arrive as a number or a numeric string.
pub fn lookup_u64(value: &Value, path: &str) -> Option<u64> {
    match lookup(value, path)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a marker that may arrive as a string or a number. Empty strings count
/// as absent.
pub fn lookup_marker(value: &Value, path: &str) -> Option<String> {
    match lookup(value, path)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level() {
        let body = json!([{"a": 1}, {"a": 2}]);
        assert_eq!(Container::TopLevel.extract(&body).unwrap().len(), 2);
    }

    #[test]
    fn test_keyed() {
        let body = json!({"instances": [{"instance_id": "a"}], "instance_num": 1});
        let items = Container::Keyed("instances").extract(&body).unwrap();
        assert_eq!(items[0]["instance_id"], "a");
    }

    #[test]
    fn test_dotted() {
        let body = json!({"quotas": {"resources": [{"type": "queue", "quota": 25}]}});
        let items = Container::Dotted("quotas.resources").extract(&body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["quota"], 25);
    }

    #[test]
    fn test_missing_key_reported() {
        let body = json!({"queues": []});
        let err = Container::Keyed("instances").extract(&body).unwrap_err();
        assert!(err.contains("instances"));
    }

    #[test]
    fn test_non_array_reported() {
        let body = json!({"quotas": {"resources": {"type": "queue"}}});
        let err = Container::Dotted("quotas.resources").extract(&body).unwrap_err();
        assert!(err.contains("an object"));
    }

    #[test]
    fn test_lookup_helpers() {
        let body = json!({"count": "12", "page_info": {"next_marker": 400}, "empty": ""});
        assert_eq!(lookup_u64(&body, "count"), Some(12));
        assert_eq!(lookup_marker(&body, "page_info.next_marker").as_deref(), Some("400"));
        assert_eq!(lookup_marker(&body, "empty"), None);
        assert_eq!(lookup_marker(&body, "missing"), None);
    }
}
