//! Bound records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::schema::{FieldKind, Schema};

/// A coerced attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Dict(Map<String, Value>),
    Record(Record),
    List(Vec<AttrValue>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Wire representation, using each nested record's wire keys.
    pub fn to_wire(&self) -> Value {
        match self {
            AttrValue::String(s) => Value::String(s.clone()),
            AttrValue::Integer(n) => Value::from(*n),
            AttrValue::Float(f) => Value::from(*f),
            AttrValue::Boolean(b) => Value::Bool(*b),
            AttrValue::Timestamp(ts) => {
                Value::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            AttrValue::Dict(map) => Value::Object(map.clone()),
            AttrValue::Record(record) => record.to_wire(),
            AttrValue::List(items) => Value::Array(items.iter().map(AttrValue::to_wire).collect()),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => f.write_str(s),
            AttrValue::Integer(n) => write!(f, "{n}"),
            AttrValue::Float(x) => write!(f, "{x}"),
            AttrValue::Boolean(b) => write!(f, "{b}"),
            AttrValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S UTC")),
            AttrValue::Dict(map) => write!(f, "{}", Value::Object(map.clone())),
            AttrValue::Record(record) => write!(f, "{}", record.to_wire()),
            AttrValue::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttrValue::String(s) => serializer.serialize_str(s),
            AttrValue::Integer(n) => serializer.serialize_i64(*n),
            AttrValue::Float(x) => serializer.serialize_f64(*x),
            AttrValue::Boolean(b) => serializer.serialize_bool(*b),
            AttrValue::Timestamp(ts) => ts.serialize(serializer),
            AttrValue::Dict(map) => map.serialize(serializer),
            AttrValue::Record(record) => record.serialize(serializer),
            AttrValue::List(items) => items.serialize(serializer),
        }
    }
}

/// A typed view over one raw JSON object.
///
/// Attributes keep the order of the schema's field table. The context map
/// holds ambient values that were not part of the object itself, such as the
/// region of the session or the parent queue of a consumer group.
#[derive(Debug, Clone)]
pub struct Record {
    schema: &'static Schema,
    values: Vec<(&'static str, AttrValue)>,
    context: BTreeMap<String, Value>,
}

impl Record {
    pub(crate) fn from_parts(schema: &'static Schema, values: Vec<(&'static str, AttrValue)>) -> Self {
        Self {
            schema,
            values,
            context: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// The resolved identifier, or `None` if the payload omitted it.
    pub fn id(&self) -> Option<String> {
        let field = self.schema.id_field()?;
        match self.get(field.attr)? {
            AttrValue::String(s) => Some(s.clone()),
            AttrValue::Integer(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn get(&self, attr: &str) -> Option<&AttrValue> {
        self.values
            .iter()
            .find(|(name, _)| *name == attr)
            .map(|(_, value)| value)
    }

    pub fn get_str(&self, attr: &str) -> Option<&str> {
        self.get(attr).and_then(AttrValue::as_str)
    }

    pub fn get_i64(&self, attr: &str) -> Option<i64> {
        self.get(attr).and_then(AttrValue::as_i64)
    }

    pub fn get_bool(&self, attr: &str) -> Option<bool> {
        self.get(attr).and_then(AttrValue::as_bool)
    }

    pub fn get_record(&self, attr: &str) -> Option<&Record> {
        match self.get(attr)? {
            AttrValue::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn get_list(&self, attr: &str) -> Option<&[AttrValue]> {
        match self.get(attr)? {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Set attributes in field-table order.
    pub fn attrs(&self) -> impl Iterator<Item = (&'static str, &AttrValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Number of set attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// An ambient value attached at bind time.
    pub fn context(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    pub fn context_map(&self) -> &BTreeMap<String, Value> {
        &self.context
    }

    pub(crate) fn set_context(&mut self, key: impl Into<String>, value: Value) {
        self.context.insert(key.into(), value);
    }

    /// Values of fields declared as path parameters, keyed by attribute.
    pub fn path_params(&self) -> BTreeMap<String, String> {
        self.schema
            .fields
            .iter()
            .filter(|decl| decl.kind == FieldKind::Path)
            .filter_map(|decl| {
                self.get(decl.attr)
                    .map(|value| (decl.attr.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Re-emit the set attributes under their wire keys.
    pub fn to_wire(&self) -> Value {
        let mut map = Map::new();
        for decl in self.schema.fields {
            if let Some(value) = self.get(decl.attr) {
                map.insert(decl.wire.to_string(), value.to_wire());
            }
        }
        Value::Object(map)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name == other.schema.name
            && self.values == other.values
            && self.context == other.context
    }
}

/// Serializes attributes by attribute name, followed by context entries whose
/// keys are not already used by an attribute.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra: Vec<_> = self
            .context
            .iter()
            .filter(|(key, _)| self.get(key).is_none())
            .collect();
        let mut map = serializer.serialize_map(Some(self.values.len() + extra.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        for (key, value) in extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDecl, FieldType};
    use serde_json::json;

    static BACKUP: Schema = Schema {
        name: "backup",
        fields: &[
            FieldDecl::renamed("backup_id", "id", FieldType::String).alternate_id(),
            FieldDecl::new("instance_id", FieldType::String).path(),
            FieldDecl::new("size", FieldType::Integer),
            FieldDecl::new("is_support_restore", FieldType::Boolean),
        ],
    };

    static QUOTA: Schema = Schema {
        name: "quota",
        fields: &[
            FieldDecl::new("type", FieldType::String),
            FieldDecl::new("quota", FieldType::Integer),
        ],
    };

    #[test]
    fn test_alternate_id_resolves() {
        let record = BACKUP
            .bind_value(&json!({"backup_id": "b-1", "instance_id": "i-1"}))
            .unwrap();
        assert_eq!(record.id().as_deref(), Some("b-1"));
    }

    #[test]
    fn test_record_without_id_field() {
        let record = QUOTA
            .bind_value(&json!({"type": "queue", "quota": 25}))
            .unwrap();
        assert!(record.id().is_none());
    }

    #[test]
    fn test_to_wire_uses_wire_keys() {
        let record = BACKUP
            .bind_value(&json!({
                "backup_id": "b-1",
                "instance_id": "i-1",
                "size": "1024",
                "is_support_restore": "TRUE",
                "ignored": true
            }))
            .unwrap();
        assert_eq!(
            record.to_wire(),
            json!({
                "backup_id": "b-1",
                "instance_id": "i-1",
                "size": 1024,
                "is_support_restore": true
            })
        );
    }

    #[test]
    fn test_path_params() {
        let record = BACKUP
            .bind_value(&json!({"backup_id": "b-1", "instance_id": "i-1"}))
            .unwrap();
        let params = record.path_params();
        assert_eq!(params.get("instance_id").map(String::as_str), Some("i-1"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_serialize_includes_context() {
        let mut record = QUOTA
            .bind_value(&json!({"type": "queue", "quota": 25}))
            .unwrap();
        record.set_context("region", json!("eu-de"));
        record.set_context("type", json!("shadowed"));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"type": "queue", "quota": 25, "region": "eu-de"}));
    }
}
