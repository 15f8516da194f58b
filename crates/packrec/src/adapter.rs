// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Views over the codec's ordered values.
//!
//! - [`Mapping`]: field name -> value
//! - [`Record`]: ordered values with by-name access
//! - any serde struct, bridged through `serde_json`
//!
//! Every conversion follows the layout's field order and names; nothing is
//! reordered or renamed.

use crate::error::AdapterError;
use crate::schema::{Layout, LayoutField};
use crate::value::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Field-name keyed view of a record.
pub type Mapping = HashMap<String, Value>;

fn check_arity(layout: &Layout, found: usize) -> Result<(), AdapterError> {
    if found != layout.len() {
        return Err(AdapterError::ArityMismatch {
            expected: layout.len(),
            found,
        });
    }
    Ok(())
}

/// Zip layout field names with ordered values.
pub fn to_mapping(layout: &Layout, values: Vec<Value>) -> Result<Mapping, AdapterError> {
    check_arity(layout, values.len())?;
    Ok(layout
        .field_names()
        .map(str::to_string)
        .zip(values)
        .collect())
}

/// Ordered values for `pack`, looked up by layout field name.
///
/// Extra keys in `map` are ignored.
pub fn from_mapping(layout: &Layout, map: &Mapping) -> Result<Vec<Value>, AdapterError> {
    layout
        .field_names()
        .map(|name| {
            map.get(name)
                .cloned()
                .ok_or_else(|| AdapterError::MissingField {
                    field: name.to_string(),
                })
        })
        .collect()
}

/// Named-field view of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    layout: Arc<Layout>,
    values: Vec<Value>,
}

impl Record {
    /// Values must be in layout order, one per field.
    pub fn new(layout: Arc<Layout>, values: Vec<Value>) -> Result<Self, AdapterError> {
        check_arity(&layout, values.len())?;
        Ok(Self { layout, values })
    }

    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// Schema name.
    pub fn name(&self) -> &str {
        self.layout.name()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.layout.position(name).map(|i| &self.values[i])
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// `(name, value)` pairs in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.layout.field_names().zip(self.values.iter())
    }

    /// Copy of this record with one field replaced.
    pub fn with(&self, name: &str, value: impl Into<Value>) -> Result<Self, AdapterError> {
        let position = self
            .layout
            .position(name)
            .ok_or_else(|| AdapterError::MissingField {
                field: name.to_string(),
            })?;
        let mut values = self.values.clone();
        values[position] = value.into();
        Ok(Self {
            layout: Arc::clone(&self.layout),
            values,
        })
    }
}

/// Wrap ordered values into a [`Record`].
pub fn to_structure(layout: &Arc<Layout>, values: Vec<Value>) -> Result<Record, AdapterError> {
    Record::new(Arc::clone(layout), values)
}

/// Ordered values for `pack`, read from a [`Record`] by field name.
///
/// The record may come from a different layout as long as it carries every
/// field name of `layout`.
pub fn from_structure(layout: &Layout, record: &Record) -> Result<Vec<Value>, AdapterError> {
    layout
        .field_names()
        .map(|name| {
            record
                .get(name)
                .cloned()
                .ok_or_else(|| AdapterError::MissingField {
                    field: name.to_string(),
                })
        })
        .collect()
}

/// Deserialize ordered values into a serde struct with matching field names.
///
/// Fixed bytes fields become byte sequences (`Vec<u8>`, `[u8; N]`).
pub fn to_struct<T: DeserializeOwned>(
    layout: &Layout,
    values: Vec<Value>,
) -> Result<T, AdapterError> {
    check_arity(layout, values.len())?;
    let mut object = serde_json::Map::with_capacity(values.len());
    for (field, value) in layout.fields().iter().zip(values) {
        object.insert(field.name().to_string(), to_json(field, value)?);
    }
    Ok(serde_json::from_value(JsonValue::Object(object))?)
}

/// Serialize a serde struct into ordered values for `pack`.
///
/// Fixed bytes fields accept strings as well as byte sequences.
pub fn from_struct<T: Serialize>(
    layout: &Layout,
    value: &T,
) -> Result<Vec<Value>, AdapterError> {
    let JsonValue::Object(mut object) = serde_json::to_value(value)? else {
        return Err(AdapterError::NotAStruct);
    };
    layout
        .fields()
        .iter()
        .map(|field| {
            let json = object
                .remove(field.name())
                .ok_or_else(|| AdapterError::MissingField {
                    field: field.name().to_string(),
                })?;
            from_json(field, json)
        })
        .collect()
}

fn unrepresentable(field: &LayoutField, reason: impl Into<String>) -> AdapterError {
    AdapterError::Unrepresentable {
        field: field.name().to_string(),
        reason: reason.into(),
    }
}

fn to_json(field: &LayoutField, value: Value) -> Result<JsonValue, AdapterError> {
    match value {
        Value::Int(v) => {
            if let Ok(v) = i64::try_from(v) {
                Ok(JsonValue::from(v))
            } else if let Ok(v) = u64::try_from(v) {
                Ok(JsonValue::from(v))
            } else {
                Err(unrepresentable(field, "integer wider than 64 bits"))
            }
        }
        Value::Float(v) => serde_json::Number::from_f64(v)
            .map(JsonValue::Number)
            .ok_or_else(|| unrepresentable(field, "non-finite float")),
        Value::Bytes(bytes) => Ok(JsonValue::Array(
            bytes.into_iter().map(JsonValue::from).collect(),
        )),
    }
}

fn from_json(field: &LayoutField, json: JsonValue) -> Result<Value, AdapterError> {
    let kind = field.kind();
    match json {
        JsonValue::Number(n) if kind.is_integer() => n
            .as_i64()
            .map(Value::from)
            .or_else(|| n.as_u64().map(Value::from))
            .ok_or_else(|| unrepresentable(field, "expected an integer")),
        JsonValue::Number(n) if kind.is_float() => n
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| unrepresentable(field, "expected a number")),
        JsonValue::String(s) if kind.is_bytes() => Ok(Value::from(s)),
        JsonValue::Array(items) if kind.is_bytes() => items
            .iter()
            .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()
            .map(Value::Bytes)
            .ok_or_else(|| unrepresentable(field, "expected a byte sequence")),
        other => Err(unrepresentable(
            field,
            format!("{} field cannot hold {}", kind, other),
        )),
    }
}
