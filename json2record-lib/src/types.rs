use crate::error::ValidationErrors;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    CollectAll, // Report every issue in the input (default)
    FailFast,   // Stop at the first issue
}

impl From<&str> for Strategy {
    fn from(s: &str) -> Self {
        match s {
            "fail-fast" => Strategy::FailFast,
            _ => Strategy::CollectAll,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtraFields {
    #[default]
    Ignore,
    Forbid,
}

/// Knobs that change how a mapping is checked, not what a shape accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    pub strategy: Strategy,
    pub extra: ExtraFields,
}

impl ValidationOptions {
    pub fn fail_fast() -> Self {
        Self {
            strategy: Strategy::FailFast,
            ..Self::default()
        }
    }

    pub fn with_extra(mut self, extra: ExtraFields) -> Self {
        self.extra = extra;
        self
    }
}

/// Declared type of a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Integer,
    Number,
    Boolean,
    Email,
    Optional { inner: Box<FieldType> },
    List {
        element: Box<FieldType>,
        min: usize,
        max: usize,
    },
    Record { shape: &'static str },
}

impl FieldType {
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional {
            inner: Box::new(inner),
        }
    }

    pub fn list(element: FieldType, min: usize, max: usize) -> Self {
        FieldType::List {
            element: Box::new(element),
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldSchema {
    pub fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
            default: None,
        }
    }

    /// An optional field whose absence means null.
    pub fn optional(name: &'static str, inner: FieldType) -> Self {
        Self {
            name,
            field_type: FieldType::optional(inner),
            required: false,
            default: Some(Value::Null),
        }
    }
}

/// Declarative description of a record: its name and fields in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSchema {
    pub name: &'static str,
    pub fields: Vec<FieldSchema>,
}

impl ShapeSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

#[derive(Debug, Error)]
pub enum Json2RecordError {
    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Invalid assignment '{0}': expected KEY=VALUE")]
    Assignment(String),

    #[error("Unknown shape '{0}'")]
    UnknownShape(String),

    #[error("Unknown error policy '{0}': expected recover or abort")]
    UnknownPolicy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}
