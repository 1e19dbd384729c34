use crate::path::FieldPath;
use crate::record::{read_list, Context, FieldValue};
use crate::types::FieldType;
use serde::Serialize;
use serde_json::Value;
use std::ops::Deref;

/// A list whose length is constrained to `MIN..=MAX` items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoundedList<T, const MIN: usize, const MAX: usize>(Vec<T>);

impl<T, const MIN: usize, const MAX: usize> Deref for BoundedList<T, MIN, MAX> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T: FieldValue, const MIN: usize, const MAX: usize> FieldValue for BoundedList<T, MIN, MAX> {
    fn field_type() -> FieldType {
        FieldType::list(T::field_type(), MIN, MAX)
    }

    fn from_field(value: &Value, path: &FieldPath, ctx: &mut Context) -> Option<Self> {
        read_list(value, path, ctx, MIN, MAX).map(Self)
    }
}
