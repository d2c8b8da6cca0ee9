// src/source.rs

//! Source data loading
//!
//! Import files are JSON arrays of objects. Shapes vary by content type
//! and are not validated here beyond that; individual importers pull the
//! fields they need through `Record`'s typed accessors.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// One source record: an untyped field mapping
#[derive(Debug, Clone)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// A required string field
    pub fn str_field(&self, name: &str) -> Result<&str> {
        match self.fields.get(name) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(Error::InvalidField {
                field: name.to_string(),
                reason: format!("expected a string, got {}", value_kind(other)),
            }),
            None => Err(Error::MissingField(name.to_string())),
        }
    }

    /// An optional string field; absent and null both map to None
    pub fn opt_str_field(&self, name: &str) -> Result<Option<&str>> {
        match self.fields.get(name) {
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Null) | None => Ok(None),
            Some(other) => Err(Error::InvalidField {
                field: name.to_string(),
                reason: format!("expected a string, got {}", value_kind(other)),
            }),
        }
    }

    /// A required identifier field; legacy systems emit these as strings
    /// or bare integers, so both are accepted.
    pub fn id_field(&self, name: &str) -> Result<String> {
        match self.fields.get(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(Error::InvalidField {
                field: name.to_string(),
                reason: format!("expected a string or number, got {}", value_kind(other)),
            }),
            None => Err(Error::MissingField(name.to_string())),
        }
    }
}

/// Load source records from a JSON file
///
/// The file must decode to an array of objects; anything else is a
/// `SourceData` error before any record is touched.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let bytes = std::fs::read(path)?;
    let value: Value = serde_json::from_slice(&bytes)?;
    records_from_value(value)
}

/// Validate a decoded JSON value as a record list
pub fn records_from_value(value: Value) -> Result<Vec<Record>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(Error::SourceData(format!(
                "source data is not a list, is {}",
                value_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(Record::new(fields)),
            other => Err(Error::SourceData(format!(
                "record {} is not an object, is {}",
                index,
                value_kind(&other)
            ))),
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
