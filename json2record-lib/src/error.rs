use crate::analyzer::{analyze_value, render_input};
use crate::path::FieldPath;
use serde_json::{json, Value};
use std::fmt;

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    Missing,
    StringType,
    IntType,
    IntFromFloat,
    IntParsing,
    FloatType,
    FloatParsing,
    FiniteNumber,
    BoolType,
    BoolParsing,
    ListType,
    RecordType { shape: &'static str },
    Email { reason: String },
    ExtraForbidden,
}

impl FieldErrorKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorKind::Missing => "missing",
            FieldErrorKind::StringType => "string_type",
            FieldErrorKind::IntType => "int_type",
            FieldErrorKind::IntFromFloat => "int_from_float",
            FieldErrorKind::IntParsing => "int_parsing",
            FieldErrorKind::FloatType => "float_type",
            FieldErrorKind::FloatParsing => "float_parsing",
            FieldErrorKind::FiniteNumber => "finite_number",
            FieldErrorKind::BoolType => "bool_type",
            FieldErrorKind::BoolParsing => "bool_parsing",
            FieldErrorKind::ListType => "list_type",
            FieldErrorKind::RecordType { .. } => "model_type",
            FieldErrorKind::Email { .. } => "value_error",
            FieldErrorKind::ExtraForbidden => "extra_forbidden",
        }
    }

    pub fn message(&self) -> String {
        match self {
            FieldErrorKind::Missing => "Field required".to_string(),
            FieldErrorKind::StringType => "Input should be a valid string".to_string(),
            FieldErrorKind::IntType => "Input should be a valid integer".to_string(),
            FieldErrorKind::IntFromFloat => {
                "Input should be a valid integer, got a number with a fractional part".to_string()
            }
            FieldErrorKind::IntParsing => {
                "Input should be a valid integer, unable to parse string as an integer".to_string()
            }
            FieldErrorKind::FloatType => "Input should be a valid number".to_string(),
            FieldErrorKind::FloatParsing => {
                "Input should be a valid number, unable to parse string as a number".to_string()
            }
            FieldErrorKind::FiniteNumber => "Input should be a finite number".to_string(),
            FieldErrorKind::BoolType => "Input should be a valid boolean".to_string(),
            FieldErrorKind::BoolParsing => {
                "Input should be a valid boolean, unable to interpret input".to_string()
            }
            FieldErrorKind::ListType => "Input should be a valid list".to_string(),
            FieldErrorKind::RecordType { shape } => {
                format!("Input should be a valid dictionary or instance of {}", shape)
            }
            FieldErrorKind::Email { reason } => {
                format!("value is not a valid email address: {}", reason)
            }
            FieldErrorKind::ExtraForbidden => "Extra inputs are not permitted".to_string(),
        }
    }
}

/// A field (possibly nested) that failed a type, format or presence constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValidationError {
    pub path: FieldPath,
    pub kind: FieldErrorKind,
    /// The offending input; `None` when the field was absent.
    pub input: Option<Value>,
}

/// A list whose length falls outside its declared `[min, max]` bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionBoundError {
    pub path: FieldPath,
    pub min: usize,
    pub max: usize,
    pub actual: usize,
}

impl CollectionBoundError {
    pub fn code(&self) -> &'static str {
        if self.actual > self.max {
            "too_long"
        } else {
            "too_short"
        }
    }

    pub fn message(&self) -> String {
        if self.actual > self.max {
            format!(
                "List should have at most {} item{} after validation, not {}",
                self.max,
                plural(self.max),
                self.actual
            )
        } else {
            format!(
                "List should have at least {} item{} after validation, not {}",
                self.min,
                plural(self.min),
                self.actual
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    Field(FieldValidationError),
    CollectionBound(CollectionBoundError),
}

impl ValidationIssue {
    pub fn path(&self) -> &FieldPath {
        match self {
            ValidationIssue::Field(e) => &e.path,
            ValidationIssue::CollectionBound(e) => &e.path,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::Field(e) => e.kind.code(),
            ValidationIssue::CollectionBound(e) => e.code(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationIssue::Field(e) => e.kind.message(),
            ValidationIssue::CollectionBound(e) => e.message(),
        }
    }

    fn context(&self) -> String {
        match self {
            ValidationIssue::Field(FieldValidationError {
                input: Some(input),
                kind,
                ..
            }) => format!(
                "[type={}, input_value={}, input_type={}]",
                kind.code(),
                render_input(input),
                analyze_value(input)
            ),
            ValidationIssue::Field(FieldValidationError { kind, .. }) => {
                format!("[type={}]", kind.code())
            }
            ValidationIssue::CollectionBound(e) => {
                format!("[type={}, input_length={}]", e.code(), e.actual)
            }
        }
    }
}

/// Every issue found while building one record. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    title: &'static str,
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub(crate) fn new(title: &'static str, issues: Vec<ValidationIssue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { title, issues }
    }

    /// Name of the shape that failed to build.
    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn field_errors(&self) -> impl Iterator<Item = &FieldValidationError> {
        self.issues.iter().filter_map(|issue| match issue {
            ValidationIssue::Field(e) => Some(e),
            ValidationIssue::CollectionBound(_) => None,
        })
    }

    pub fn bound_errors(&self) -> impl Iterator<Item = &CollectionBoundError> {
        self.issues.iter().filter_map(|issue| match issue {
            ValidationIssue::CollectionBound(e) => Some(e),
            ValidationIssue::Field(_) => None,
        })
    }

    /// First issue whose dotted path equals `path`.
    pub fn at(&self, path: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.path().to_string() == path)
    }

    /// Machine-readable form of the report.
    pub fn to_json(&self) -> Value {
        let issues: Vec<Value> = self
            .issues
            .iter()
            .map(|issue| {
                let mut entry = json!({
                    "path": issue.path().to_string(),
                    "type": issue.code(),
                    "message": issue.message(),
                });
                match issue {
                    ValidationIssue::Field(FieldValidationError {
                        input: Some(input), ..
                    }) => {
                        entry["input"] = input.clone();
                    }
                    ValidationIssue::CollectionBound(e) => {
                        entry["input_length"] = json!(e.actual);
                    }
                    ValidationIssue::Field(_) => {}
                }
                entry
            })
            .collect();
        json!({ "title": self.title, "errors": issues })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} validation error{} for {}",
            self.issues.len(),
            plural(self.issues.len()),
            self.title
        )?;
        for issue in &self.issues {
            if !issue.path().is_root() {
                write!(f, "\n{}", issue.path())?;
            }
            write!(f, "\n  {} {}", issue.message(), issue.context())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(path: FieldPath) -> ValidationIssue {
        ValidationIssue::Field(FieldValidationError {
            path,
            kind: FieldErrorKind::Missing,
            input: None,
        })
    }

    #[test]
    fn test_single_error_rendering() {
        let errors = ValidationErrors::new("User", vec![missing(FieldPath::root().key("age"))]);
        assert_eq!(
            errors.to_string(),
            "1 validation error for User\nage\n  Field required [type=missing]"
        );
    }

    #[test]
    fn test_multiple_errors_rendering() {
        let errors = ValidationErrors::new(
            "ProductResponse",
            vec![
                ValidationIssue::Field(FieldValidationError {
                    path: FieldPath::root().key("products").index(0).key("price"),
                    kind: FieldErrorKind::FloatParsing,
                    input: Some(json!("abc")),
                }),
                missing(FieldPath::root().key("products").index(1).key("name")),
            ],
        );
        let rendered = errors.to_string();
        assert!(rendered.starts_with("2 validation errors for ProductResponse\n"));
        assert!(rendered.contains(
            "products.0.price\n  Input should be a valid number, unable to parse string as a number [type=float_parsing, input_value=\"abc\", input_type=string]"
        ));
        assert!(rendered.contains("products.1.name\n  Field required [type=missing]"));
    }

    #[test]
    fn test_root_error_has_no_path_line() {
        let errors = ValidationErrors::new(
            "User",
            vec![ValidationIssue::Field(FieldValidationError {
                path: FieldPath::root(),
                kind: FieldErrorKind::RecordType { shape: "User" },
                input: Some(json!([1])),
            })],
        );
        assert_eq!(
            errors.to_string(),
            "1 validation error for User\n  Input should be a valid dictionary or instance of User [type=model_type, input_value=[1], input_type=array]"
        );
    }

    #[test]
    fn test_bound_error_messages() {
        let too_long = CollectionBoundError {
            path: FieldPath::root().key("products"),
            min: 0,
            max: 100,
            actual: 101,
        };
        assert_eq!(too_long.code(), "too_long");
        assert_eq!(
            too_long.message(),
            "List should have at most 100 items after validation, not 101"
        );

        let too_short = CollectionBoundError {
            path: FieldPath::root().key("tags"),
            min: 1,
            max: 3,
            actual: 0,
        };
        assert_eq!(too_short.code(), "too_short");
        assert_eq!(
            too_short.message(),
            "List should have at least 1 item after validation, not 0"
        );
    }

    #[test]
    fn test_json_report() {
        let errors = ValidationErrors::new("User", vec![missing(FieldPath::root().key("email"))]);
        let report = errors.to_json();
        assert_eq!(report["title"], "User");
        assert_eq!(report["errors"][0]["path"], "email");
        assert_eq!(report["errors"][0]["type"], "missing");
        assert!(report["errors"][0].get("input").is_none());
    }
}
