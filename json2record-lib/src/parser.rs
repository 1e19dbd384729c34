use crate::types::*;
use serde_json::{Map, Value};
use std::io::Read;

/// Parses JSON text into a loosely-typed value tree.
pub fn parse_input(input: &str) -> Result<Value, Json2RecordError> {
    Ok(serde_json::from_str(input.trim())?)
}

pub fn read_input<R: Read>(mut reader: R) -> Result<Value, Json2RecordError> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    parse_input(&buffer)
}

/// Builds a mapping from `KEY=VALUE` pairs.
///
/// Values that parse as JSON keep their JSON type (`age=30` is a number);
/// anything else is taken as a plain string. Later keys overwrite earlier ones.
pub fn parse_assignments<S: AsRef<str>>(pairs: &[S]) -> Result<Value, Json2RecordError> {
    let mut object = Map::new();

    for pair in pairs {
        let pair = pair.as_ref();
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| Json2RecordError::Assignment(pair.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Json2RecordError::Assignment(pair.to_string()));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        object.insert(key.to_string(), value);
    }

    Ok(Value::Object(object))
}
