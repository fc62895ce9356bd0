//! Static field tables and the field mapper.
//!
//! A [`Schema`] lists, for one record type, which wire keys become which
//! attributes and how each value is coerced. Tables are declared as statics
//! next to the resource definitions and checked once with
//! [`Schema::validate`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{OtcError, Result};
use crate::record::{AttrValue, Record};

/// Declared type of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    String,
    Integer,
    Float,
    /// `true`/`false`, also accepted as strings in any letter case.
    Boolean,
    /// RFC 3339 timestamp, with or without a colon in the offset.
    Timestamp,
    /// Free-form JSON object kept as is.
    Dict,
    List(&'static FieldType),
    Nested(&'static Schema),
    NestedList(&'static Schema),
}

impl FieldType {
    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Timestamp => "timestamp",
            FieldType::Dict => "object",
            FieldType::List(_) | FieldType::NestedList(_) => "array",
            FieldType::Nested(_) => "record",
        }
    }
}

/// Where a field travels in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Body,
    Path,
    Query,
}

/// One row of a field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl {
    pub wire: &'static str,
    pub attr: &'static str,
    pub ty: FieldType,
    pub kind: FieldKind,
    pub alternate_id: bool,
}

impl FieldDecl {
    /// A body field whose attribute has the same name as the wire key.
    pub const fn new(wire: &'static str, ty: FieldType) -> Self {
        Self {
            wire,
            attr: wire,
            ty,
            kind: FieldKind::Body,
            alternate_id: false,
        }
    }

    /// A body field exposed under a different attribute name.
    pub const fn renamed(wire: &'static str, attr: &'static str, ty: FieldType) -> Self {
        Self {
            wire,
            attr,
            ty,
            kind: FieldKind::Body,
            alternate_id: false,
        }
    }

    /// Mark this field as the record identifier.
    pub const fn alternate_id(mut self) -> Self {
        self.alternate_id = true;
        self
    }

    /// Mark this field as a path parameter of item requests.
    pub const fn path(mut self) -> Self {
        self.kind = FieldKind::Path;
        self
    }

    /// Mark this field as echoing a query parameter.
    pub const fn query(mut self) -> Self {
        self.kind = FieldKind::Query;
        self
    }
}

/// Field table for one record type.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldDecl],
}

impl Schema {
    /// Look up a field by attribute name.
    pub fn field(&self, attr: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.attr == attr)
    }

    /// The identifier field: the one flagged as alternate id, else `id`.
    pub fn id_field(&self) -> Option<&FieldDecl> {
        self.fields
            .iter()
            .find(|f| f.alternate_id)
            .or_else(|| self.field("id"))
    }

    /// Check the table: unique attribute and wire names, at most one
    /// identifier, scalar path fields, valid nested tables.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| OtcError::InvalidSchema {
            schema: self.name,
            reason,
        };

        for (i, decl) in self.fields.iter().enumerate() {
            let rest = &self.fields[i + 1..];
            if rest.iter().any(|f| f.attr == decl.attr) {
                return Err(invalid(format!("duplicate attribute '{}'", decl.attr)));
            }
            if rest.iter().any(|f| f.wire == decl.wire) {
                return Err(invalid(format!("duplicate wire key '{}'", decl.wire)));
            }
            if decl.kind == FieldKind::Path
                && !matches!(decl.ty, FieldType::String | FieldType::Integer)
            {
                return Err(invalid(format!("path field '{}' must be scalar", decl.attr)));
            }
            validate_type(&decl.ty)?;
        }

        if self.fields.iter().filter(|f| f.alternate_id).count() > 1 {
            return Err(invalid("more than one alternate id".to_string()));
        }
        if let Some(id) = self.id_field() {
            if !matches!(id.ty, FieldType::String | FieldType::Integer) {
                return Err(invalid(format!("identifier '{}' must be scalar", id.attr)));
            }
        }
        Ok(())
    }

    /// Bind a raw JSON value, which must be an object.
    pub fn bind_value(&'static self, raw: &Value) -> Result<Record> {
        match raw {
            Value::Object(map) => self.bind(map),
            other => Err(OtcError::Coercion {
                field: self.name,
                expected: "object",
                found: describe(other),
            }),
        }
    }

    /// Build a record from a raw JSON object.
    ///
    /// Absent and `null` keys leave the attribute unset. Unknown keys are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OtcError::Coercion`] when a present value does not match its
    /// declared type.
    pub fn bind(&'static self, raw: &Map<String, Value>) -> Result<Record> {
        let mut values = Vec::with_capacity(self.fields.len());
        for decl in self.fields {
            match raw.get(decl.wire) {
                None | Some(Value::Null) => {}
                Some(value) => values.push((decl.attr, coerce(decl.attr, &decl.ty, value)?)),
            }
        }
        Ok(Record::from_parts(self, values))
    }
}

fn validate_type(ty: &FieldType) -> Result<()> {
    match ty {
        FieldType::List(inner) => validate_type(inner),
        FieldType::Nested(schema) | FieldType::NestedList(schema) => schema.validate(),
        _ => Ok(()),
    }
}

// Whole floats inside these bounds convert to i64 exactly.
const I64_LOW: f64 = i64::MIN as f64;
const I64_HIGH: f64 = i64::MAX as f64;

fn coerce(field: &'static str, ty: &FieldType, value: &Value) -> Result<AttrValue> {
    let mismatch = || OtcError::Coercion {
        field,
        expected: ty.name(),
        found: describe(value),
    };

    match ty {
        FieldType::String => match value {
            Value::String(s) => Ok(AttrValue::String(s.clone())),
            Value::Number(n) => Ok(AttrValue::String(n.to_string())),
            Value::Bool(b) => Ok(AttrValue::String(b.to_string())),
            _ => Err(mismatch()),
        },
        FieldType::Integer => match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && (I64_LOW..I64_HIGH).contains(f))
                        .map(|f| f as i64)
                })
                .map(AttrValue::Integer)
                .ok_or_else(mismatch),
            Value::String(s) => s
                .trim()
                .parse()
                .map(AttrValue::Integer)
                .map_err(|_| mismatch()),
            _ => Err(mismatch()),
        },
        FieldType::Float => match value {
            Value::Number(n) => n.as_f64().map(AttrValue::Float).ok_or_else(mismatch),
            Value::String(s) => s
                .trim()
                .parse()
                .map(AttrValue::Float)
                .map_err(|_| mismatch()),
            _ => Err(mismatch()),
        },
        FieldType::Boolean => match value {
            Value::Bool(b) => Ok(AttrValue::Boolean(*b)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(AttrValue::Boolean(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(AttrValue::Boolean(false)),
            _ => Err(mismatch()),
        },
        FieldType::Timestamp => match value {
            Value::String(s) => parse_timestamp(s)
                .map(AttrValue::Timestamp)
                .ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
        FieldType::Dict => match value {
            Value::Object(map) => Ok(AttrValue::Dict(map.clone())),
            _ => Err(mismatch()),
        },
        FieldType::List(inner) => match value {
            Value::Array(items) => items
                .iter()
                .map(|item| coerce(field, inner, item))
                .collect::<Result<Vec<_>>>()
                .map(AttrValue::List),
            _ => Err(mismatch()),
        },
        FieldType::Nested(schema) => match value {
            Value::Object(map) => schema.bind(map).map(AttrValue::Record),
            _ => Err(mismatch()),
        },
        FieldType::NestedList(schema) => match value {
            Value::Array(items) => items
                .iter()
                .map(|item| schema.bind_value(item).map(AttrValue::Record))
                .collect::<Result<Vec<_>>>()
                .map(AttrValue::List),
            _ => Err(mismatch()),
        },
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
}

/// Short rendering of an offending value for error messages.
fn describe(value: &Value) -> String {
    let text = value.to_string();
    if text.len() > 64 {
        let mut end = 64;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    } else {
        text
    }
}
