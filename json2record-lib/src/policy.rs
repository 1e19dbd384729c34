use crate::error::ValidationErrors;
use crate::record::Shape;
use crate::types::*;
use serde_json::Value;
use std::io::Write;
use std::str::FromStr;
use tracing::warn;

/// What to do with a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Print `Validation error: ...` and carry on without a record.
    Recover,
    /// Hand the failure back to the caller.
    #[default]
    Abort,
}

impl FromStr for ErrorPolicy {
    type Err = Json2RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recover" => Ok(ErrorPolicy::Recover),
            "abort" => Ok(ErrorPolicy::Abort),
            other => Err(Json2RecordError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Applies `policy` to a finished validation.
///
/// `Ok(None)` means the failure was recovered and reported to `out`.
pub fn apply_policy<T, W: Write>(
    policy: ErrorPolicy,
    result: Result<T, ValidationErrors>,
    out: &mut W,
) -> Result<Option<T>, Json2RecordError> {
    match (result, policy) {
        (Ok(record), _) => Ok(Some(record)),
        (Err(errors), ErrorPolicy::Recover) => {
            warn!(shape = errors.title(), issues = errors.len(), "recovered from validation failure");
            writeln!(out, "Validation error: {}", errors)?;
            Ok(None)
        }
        (Err(errors), ErrorPolicy::Abort) => Err(errors.into()),
    }
}

pub fn run_with_policy<S: Shape, W: Write>(
    policy: ErrorPolicy,
    value: &Value,
    options: &ValidationOptions,
    out: &mut W,
) -> Result<Option<S>, Json2RecordError> {
    apply_policy(policy, S::validate_with(value, options), out)
}
