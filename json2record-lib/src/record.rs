use crate::coerce::{coerce_bool, coerce_integer, coerce_number, coerce_text};
use crate::email::EmailAddress;
use crate::error::{
    CollectionBoundError, FieldErrorKind, FieldValidationError, ValidationErrors, ValidationIssue,
};
use crate::parser::parse_input;
use crate::path::FieldPath;
use crate::types::*;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Validation state shared by every field of one record build.
#[derive(Debug)]
pub struct Context {
    options: ValidationOptions,
    issues: Vec<ValidationIssue>,
}

impl Context {
    pub fn new(options: ValidationOptions) -> Self {
        Self {
            options,
            issues: Vec::new(),
        }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// True once a fail-fast build has seen its first issue.
    pub fn should_stop(&self) -> bool {
        self.options.strategy == Strategy::FailFast && !self.issues.is_empty()
    }

    pub fn field_error(&mut self, path: &FieldPath, kind: FieldErrorKind, input: Option<&Value>) {
        trace!(path = %path, code = kind.code(), "field rejected");
        self.issues.push(ValidationIssue::Field(FieldValidationError {
            path: path.clone(),
            kind,
            input: input.cloned(),
        }));
    }

    pub fn bound_error(&mut self, path: &FieldPath, min: usize, max: usize, actual: usize) {
        trace!(path = %path, min, max, actual, "list length out of bounds");
        self.issues
            .push(ValidationIssue::CollectionBound(CollectionBoundError {
                path: path.clone(),
                min,
                max,
                actual,
            }));
    }

    /// Records the error of a failed coercion, passing successes through.
    pub fn check<T>(
        &mut self,
        path: &FieldPath,
        input: &Value,
        result: Result<T, FieldErrorKind>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(kind) => {
                self.field_error(path, kind, Some(input));
                None
            }
        }
    }

    fn finish<T>(self, title: &'static str, record: Option<T>) -> Result<T, ValidationErrors> {
        match record {
            Some(record) if self.issues.is_empty() => Ok(record),
            // A rejected field always records its issue first.
            _ => Err(ValidationErrors::new(title, self.issues)),
        }
    }
}

/// A strict type that a field can be declared as.
pub trait FieldValue: Sized {
    fn field_type() -> FieldType;

    /// Converts `value`, recording any issue in `ctx`. `None` means rejected.
    fn from_field(value: &Value, path: &FieldPath, ctx: &mut Context) -> Option<Self>;
}

impl FieldValue for String {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn from_field(value: &Value, path: &FieldPath, ctx: &mut Context) -> Option<Self> {
        ctx.check(path, value, coerce_text(value))
    }
}

impl FieldValue for i64 {
    fn field_type() -> FieldType {
        FieldType::Integer
    }

    fn from_field(value: &Value, path: &FieldPath, ctx: &mut Context) -> Option<Self> {
        ctx.check(path, value, coerce_integer(value))
    }
}

impl FieldValue for f64 {
    fn field_type() -> FieldType {
        FieldType::Number
    }

    fn from_field(value: &Value, path: &FieldPath, ctx: &mut Context) -> Option<Self> {
        ctx.check(path, value, coerce_number(value))
    }
}

impl FieldValue for bool {
    fn field_type() -> FieldType {
        FieldType::Boolean
    }

    fn from_field(value: &Value, path: &FieldPath, ctx: &mut Context) -> Option<Self> {
        ctx.check(path, value, coerce_bool(value))
    }
}

impl FieldValue for EmailAddress {
    fn field_type() -> FieldType {
        FieldType::Email
    }

    fn from_field(value: &Value, path: &FieldPath, ctx: &mut Context) -> Option<Self> {
        let text = ctx.check(path, value, coerce_text(value))?;
        ctx.check(path, value, EmailAddress::parse(&text))
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn field_type() -> FieldType {
        FieldType::optional(T::field_type())
    }

    fn from_field(value: &Value, path: &FieldPath, ctx: &mut Context) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_field(other, path, ctx).map(Some),
        }
    }
}

/// Reads the declared fields out of one JSON object.
pub struct ObjectReader<'a> {
    object: &'a Map<String, Value>,
    path: &'a FieldPath,
    ctx: &'a mut Context,
    declared: Vec<&'static str>,
}

impl<'a> ObjectReader<'a> {
    pub fn new(object: &'a Map<String, Value>, path: &'a FieldPath, ctx: &'a mut Context) -> Self {
        Self {
            object,
            path,
            ctx,
            declared: Vec::new(),
        }
    }

    /// A field that must be present. Presence of `null` is still checked against `T`.
    pub fn required<T: FieldValue>(&mut self, name: &'static str) -> Option<T> {
        self.declared.push(name);
        if self.ctx.should_stop() {
            return None;
        }
        let path = self.path.key(name);
        match self.object.get(name) {
            Some(value) => T::from_field(value, &path, self.ctx),
            None => {
                self.ctx.field_error(&path, FieldErrorKind::Missing, None);
                None
            }
        }
    }

    /// A field that may be absent or null, both meaning `None`.
    pub fn optional<T: FieldValue>(&mut self, name: &'static str) -> Option<Option<T>> {
        self.with_default(name, || None)
    }

    /// A field that falls back to `default` when absent.
    pub fn with_default<T: FieldValue>(
        &mut self,
        name: &'static str,
        default: impl FnOnce() -> T,
    ) -> Option<T> {
        self.declared.push(name);
        if self.ctx.should_stop() {
            return None;
        }
        match self.object.get(name) {
            Some(value) => T::from_field(value, &self.path.key(name), self.ctx),
            None => Some(default()),
        }
    }

    /// Reports undeclared keys when the options forbid them.
    pub fn finish(mut self) {
        if self.ctx.options().extra != ExtraFields::Forbid {
            return;
        }
        for (key, value) in self.object {
            if self.ctx.should_stop() {
                break;
            }
            if !self.declared.contains(&key.as_str()) {
                let path = self.path.key(key.as_str());
                self.ctx
                    .field_error(&path, FieldErrorKind::ExtraForbidden, Some(value));
            }
        }
    }
}

/// A record type built from a loosely-typed mapping.
pub trait Shape: Sized + Serialize {
    const NAME: &'static str;

    fn schema() -> ShapeSchema;

    /// Pulls every declared field from `fields`. Returns `None` if any was rejected.
    fn read(fields: &mut ObjectReader<'_>) -> Option<Self>;

    fn validate(value: &Value) -> Result<Self, ValidationErrors> {
        Self::validate_with(value, &ValidationOptions::default())
    }

    fn validate_with(value: &Value, options: &ValidationOptions) -> Result<Self, ValidationErrors> {
        debug!(shape = Self::NAME, strategy = ?options.strategy, "validating record");
        let mut ctx = Context::new(*options);
        let record = read_record::<Self>(value, &FieldPath::root(), &mut ctx);
        let result = ctx.finish(Self::NAME, record);
        match &result {
            Ok(_) => debug!(shape = Self::NAME, "record valid"),
            Err(errors) => debug!(shape = Self::NAME, issues = errors.len(), "record rejected"),
        }
        result
    }

    /// Parses JSON text and validates it in one step.
    fn validate_json(json: &str) -> Result<Self, Json2RecordError> {
        let value = parse_input(json)?;
        Ok(Self::validate(&value)?)
    }

    fn to_value(&self) -> Result<Value, Json2RecordError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Builds a nested record at `path`, rejecting anything that is not an object.
pub fn read_record<S: Shape>(value: &Value, path: &FieldPath, ctx: &mut Context) -> Option<S> {
    match value {
        Value::Object(object) => {
            let mut reader = ObjectReader::new(object, path, ctx);
            let record = S::read(&mut reader);
            reader.finish();
            record
        }
        other => {
            ctx.field_error(path, FieldErrorKind::RecordType { shape: S::NAME }, Some(other));
            None
        }
    }
}

/// Validates a list element-wise after checking its length against `[min, max]`.
pub fn read_list<T: FieldValue>(
    value: &Value,
    path: &FieldPath,
    ctx: &mut Context,
    min: usize,
    max: usize,
) -> Option<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            ctx.field_error(path, FieldErrorKind::ListType, Some(other));
            return None;
        }
    };
    if items.len() < min || items.len() > max {
        ctx.bound_error(path, min, max, items.len());
        return None;
    }

    let mut out = Vec::with_capacity(items.len());
    let mut rejected = false;
    for (i, item) in items.iter().enumerate() {
        if ctx.should_stop() {
            return None;
        }
        match T::from_field(item, &path.index(i), ctx) {
            Some(v) => out.push(v),
            None => rejected = true,
        }
    }
    if rejected {
        None
    } else {
        Some(out)
    }
}
