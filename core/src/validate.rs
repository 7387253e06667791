//! Record validation against a [`RecordSpec`].
//!
//! [`validate`] walks the spec's fields in declaration order, coerces each
//! raw value to the declared kind and applies its bounds. Every failing field
//! is reported; nothing short-circuits on the first error.
//!
//! # Examples
//!
//! ```
//! use request_schema_core::*;
//! use serde_json::json;
//!
//! let spec = RecordSpec::new("person_query")
//!     .with_field(FieldSpec::string("name").optional().with_length(1, 50))
//!     .with_field(FieldSpec::integer("age").gt(17));
//!
//! let raw = json!({"age": 25});
//! let record = validate(&spec, raw.as_object().unwrap()).unwrap();
//! assert_eq!(record.get("name"), Some(&FieldValue::Null));
//! assert_eq!(record.get("age"), Some(&FieldValue::Integer(25)));
//!
//! let raw = json!({"age": 15});
//! let errors = validate(&spec, raw.as_object().unwrap()).unwrap_err();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].kind(), ErrorKind::ConstraintViolation);
//! assert_eq!(errors[0].detail(), "min_value");
//! ```

use std::fmt;
use std::ops::Index;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::debug;

use crate::formats::TextFormat;
use crate::{FieldKind, FieldSpec, FieldValue, Record, RecordSpec};

/// Raw, already-decoded input: field name to JSON value.
pub type RawRecord = Map<String, Value>;

/// Outcome of validating one record.
pub type ValidationResult = Result<Record, FieldErrors>;

/// Field name used when the input as a whole is malformed.
pub const ROOT_FIELD: &str = "__root__";

/// Top-level classification of a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field without a default was absent or null.
    MissingField,
    /// The value could not be coerced to the declared kind.
    TypeMismatch,
    /// The value has the right kind but breaks a declared bound.
    ConstraintViolation,
}

impl ErrorKind {
    /// Returns the stable error code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::MissingField => "missing_field",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::ConstraintViolation => "constraint_violation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The specific bound a value breached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Shorter than the minimum length.
    MinLength { limit: usize },
    /// Longer than the maximum length.
    MaxLength { limit: usize },
    /// Below the lower bound (`inclusive` for `ge`, exclusive for `gt`).
    MinValue { limit: i64, inclusive: bool },
    /// Above the upper bound (`inclusive` for `le`, exclusive for `lt`).
    MaxValue { limit: i64, inclusive: bool },
    /// Not one of the enum's declared values.
    EnumMembership { allowed: Vec<String> },
    /// Not a well-formed email or URL.
    Format { format: TextFormat },
}

impl Constraint {
    /// Returns the sub-reason code (`min_length`, `format`, ...).
    pub fn reason(&self) -> &'static str {
        match self {
            Constraint::MinLength { .. } => "min_length",
            Constraint::MaxLength { .. } => "max_length",
            Constraint::MinValue { .. } => "min_value",
            Constraint::MaxValue { .. } => "max_value",
            Constraint::EnumMembership { .. } => "enum_membership",
            Constraint::Format { .. } => "format",
        }
    }

    /// Returns the bound parameters as a JSON object.
    pub fn context(&self) -> Value {
        match self {
            Constraint::MinLength { limit } | Constraint::MaxLength { limit } => {
                json!({ "limit_value": limit })
            }
            Constraint::MinValue { limit, inclusive } | Constraint::MaxValue { limit, inclusive } => {
                json!({ "limit_value": limit, "inclusive": inclusive })
            }
            Constraint::EnumMembership { allowed } => json!({ "enum_values": allowed }),
            Constraint::Format { format } => json!({ "format": format.name() }),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::MinLength { limit } => {
                write!(f, "ensure this value has at least {limit} characters")
            }
            Constraint::MaxLength { limit } => {
                write!(f, "ensure this value has at most {limit} characters")
            }
            Constraint::MinValue { limit, inclusive: true } => {
                write!(f, "ensure this value is greater than or equal to {limit}")
            }
            Constraint::MinValue { limit, inclusive: false } => {
                write!(f, "ensure this value is greater than {limit}")
            }
            Constraint::MaxValue { limit, inclusive: true } => {
                write!(f, "ensure this value is less than or equal to {limit}")
            }
            Constraint::MaxValue { limit, inclusive: false } => {
                write!(f, "ensure this value is less than {limit}")
            }
            Constraint::EnumMembership { allowed } => {
                let quoted: Vec<String> = allowed.iter().map(|v| format!("'{v}'")).collect();
                write!(
                    f,
                    "value is not a valid enumeration member; permitted: {}",
                    quoted.join(", ")
                )
            }
            Constraint::Format { format } => write!(f, "value is not a valid {}", format.name()),
        }
    }
}

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Required field absent.
    #[error("field required")]
    MissingField,
    /// Value not coercible to `expected`.
    #[error("value is not a valid {expected}")]
    TypeMismatch { expected: &'static str },
    /// Bound breached.
    #[error("{0}")]
    Constraint(Constraint),
}

/// One field-level validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {violation}")]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// The rule that failed.
    pub violation: Violation,
    /// The offending raw value, when one was present.
    pub value: Option<Value>,
}

impl FieldError {
    /// Creates an error for `field`.
    pub fn new(field: impl Into<String>, violation: Violation, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            violation,
            value,
        }
    }

    /// Creates a `missing_field` error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, Violation::MissingField, None)
    }

    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self.violation {
            Violation::MissingField => ErrorKind::MissingField,
            Violation::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Violation::Constraint(_) => ErrorKind::ConstraintViolation,
        }
    }

    /// Returns the detail code: the breached bound for constraint
    /// violations, the expected kind for type mismatches and `required` for
    /// missing fields.
    pub fn detail(&self) -> &'static str {
        match &self.violation {
            Violation::MissingField => "required",
            Violation::TypeMismatch { expected } => *expected,
            Violation::Constraint(constraint) => constraint.reason(),
        }
    }

    /// Returns the breached constraint, if any.
    pub fn constraint(&self) -> Option<&Constraint> {
        match &self.violation {
            Violation::Constraint(constraint) => Some(constraint),
            _ => None,
        }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> String {
        self.violation.to_string()
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldError", 6)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("detail", self.detail())?;
        state.serialize_field("message", &self.message())?;
        match &self.value {
            Some(value) => state.serialize_field("value", value)?,
            None => state.skip_field("value")?,
        }
        match self.constraint() {
            Some(constraint) => state.serialize_field("ctx", &constraint.context())?,
            None => state.skip_field("ctx")?,
        }
        state.end()
    }
}

/// Non-empty, ordered list of field errors.
///
/// Errors appear in the order their fields are declared in the spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Wraps `errors`, returning `None` when the list is empty.
    pub fn new(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Wraps a single error.
    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    /// Iterates over the errors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Returns the number of errors (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the names of the failing fields in order.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    /// Returns the first error for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    /// Unwraps into the underlying vector.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl Index<usize> for FieldErrors {
    type Output = FieldError;

    fn index(&self, index: usize) -> &FieldError {
        &self.0[index]
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.0.len() == 1 { "error" } else { "errors" };
        write!(f, "{} validation {noun}", self.0.len())?;
        for (index, error) in self.0.iter().enumerate() {
            let sep = if index == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validates a raw record against `spec`.
///
/// Undeclared keys in `raw` are ignored. Returns the populated record, or
/// every field error in declaration order.
pub fn validate(spec: &RecordSpec, raw: &RawRecord) -> ValidationResult {
    let mut record = Record::with_capacity(spec.len());
    let mut errors = Vec::new();

    for field in &spec.fields {
        match validate_field(field, raw.get(&field.name)) {
            Ok(value) => record.insert(field.name.clone(), value),
            Err(error) => errors.push(error),
        }
    }

    match FieldErrors::new(errors) {
        None => Ok(record),
        Some(errors) => {
            debug!(
                spec = %spec.name,
                errors = errors.len(),
                fields = ?errors.fields(),
                "Record failed validation"
            );
            Err(errors)
        }
    }
}

/// Validates an arbitrary JSON value, which must be an object.
///
/// A non-object input yields a single `type_mismatch` on [`ROOT_FIELD`].
pub fn validate_value(spec: &RecordSpec, raw: &Value) -> ValidationResult {
    match raw.as_object() {
        Some(object) => validate(spec, object),
        None => Err(FieldErrors::single(FieldError::new(
            ROOT_FIELD,
            Violation::TypeMismatch { expected: "object" },
            Some(raw.clone()),
        ))),
    }
}

/// Validates one field's raw value (`None` when absent).
///
/// A JSON `null` counts as absent.
pub fn validate_field(field: &FieldSpec, raw: Option<&Value>) -> Result<FieldValue, FieldError> {
    match raw.filter(|value| !value.is_null()) {
        Some(value) => check_value(field, value)
            .map_err(|violation| FieldError::new(&field.name, violation, Some(value.clone()))),
        None => match &field.default {
            Some(Value::Null) => Ok(FieldValue::Null),
            Some(default) => check_value(field, default)
                .map_err(|violation| FieldError::new(&field.name, violation, Some(default.clone()))),
            None if field.required => Err(FieldError::missing(&field.name)),
            None => Ok(FieldValue::Null),
        },
    }
}

/// Coerces `value` to the field's kind and applies its bounds.
pub(crate) fn check_value(field: &FieldSpec, value: &Value) -> Result<FieldValue, Violation> {
    let coerced = coerce(&field.kind, value)?;
    check_bounds(field, &coerced).map_err(Violation::Constraint)?;
    Ok(coerced)
}

fn coerce(kind: &FieldKind, value: &Value) -> Result<FieldValue, Violation> {
    let mismatch = || Violation::TypeMismatch {
        expected: kind.type_name(),
    };
    match kind {
        FieldKind::String | FieldKind::Enum { .. } | FieldKind::Email | FieldKind::Url => value
            .as_str()
            .map(|text| FieldValue::Text(text.to_string()))
            .ok_or_else(mismatch),
        FieldKind::Integer | FieldKind::PositiveInteger => {
            coerce_integer(value).map(FieldValue::Integer).ok_or_else(mismatch)
        }
        FieldKind::Boolean => coerce_bool(value).map(FieldValue::Bool).ok_or_else(mismatch),
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            let float = number.as_f64()?;
            // i64::MAX is not exactly representable; stay strictly inside.
            let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
            (float.fract() == 0.0 && in_range).then_some(float as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn check_bounds(field: &FieldSpec, value: &FieldValue) -> Result<(), Constraint> {
    match (&field.kind, value) {
        (FieldKind::Enum { choices }, FieldValue::Text(text)) => {
            if choices.iter().any(|choice| choice == text) {
                Ok(())
            } else {
                Err(Constraint::EnumMembership {
                    allowed: choices.clone(),
                })
            }
        }
        (kind, FieldValue::Text(text)) => {
            check_length(field, text)?;
            let format = match kind {
                FieldKind::Email => Some(TextFormat::Email),
                FieldKind::Url => Some(TextFormat::HttpUrl),
                _ => None,
            };
            match format {
                Some(format) if !format.matches(text) => Err(Constraint::Format { format }),
                _ => Ok(()),
            }
        }
        (kind, FieldValue::Integer(n)) => {
            if *kind == FieldKind::PositiveInteger && *n <= 0 {
                return Err(Constraint::MinValue {
                    limit: 0,
                    inclusive: false,
                });
            }
            check_range(field, *n)
        }
        _ => Ok(()),
    }
}

fn check_length(field: &FieldSpec, text: &str) -> Result<(), Constraint> {
    let bounds = &field.bounds;
    if !bounds.has_length() {
        return Ok(());
    }
    let len = text.chars().count();
    if let Some(limit) = bounds.min_length {
        if len < limit {
            return Err(Constraint::MinLength { limit });
        }
    }
    if let Some(limit) = bounds.max_length {
        if len > limit {
            return Err(Constraint::MaxLength { limit });
        }
    }
    Ok(())
}

fn check_range(field: &FieldSpec, n: i64) -> Result<(), Constraint> {
    let bounds = &field.bounds;
    if let Some(limit) = bounds.gt {
        if n <= limit {
            return Err(Constraint::MinValue {
                limit,
                inclusive: false,
            });
        }
    }
    if let Some(limit) = bounds.ge {
        if n < limit {
            return Err(Constraint::MinValue {
                limit,
                inclusive: true,
            });
        }
    }
    if let Some(limit) = bounds.lt {
        if n >= limit {
            return Err(Constraint::MaxValue {
                limit,
                inclusive: false,
            });
        }
    }
    if let Some(limit) = bounds.le {
        if n > limit {
            return Err(Constraint::MaxValue {
                limit,
                inclusive: true,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    fn person_query() -> RecordSpec {
        RecordSpec::new("person_query")
            .with_field(FieldSpec::string("name").optional().with_length(1, 50))
            .with_field(FieldSpec::integer("age").gt(17))
    }

    fn person_base() -> RecordSpec {
        RecordSpec::new("person_base")
            .with_field(FieldSpec::string("first_name").with_length(1, 50))
            .with_field(FieldSpec::string("last_name").with_length(1, 50))
            .with_field(FieldSpec::integer("age").gt(17).le(115))
            .with_field(
                FieldSpec::enumeration("hair_color", &["white", "brown", "black", "blonde", "red"])
                    .optional(),
            )
            .with_field(FieldSpec::boolean("is_married").optional())
            .with_field(FieldSpec::email("email"))
            .with_field(FieldSpec::url("web_page").optional())
            .with_field(FieldSpec::positive_integer("identity").optional())
    }

    #[test]
    fn test_exclusive_lower_bound_rejects_15() {
        let errors = validate(&person_query(), &raw(json!({"age": 15}))).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "age");
        assert_eq!(errors[0].kind(), ErrorKind::ConstraintViolation);
        assert_eq!(errors[0].detail(), "min_value");
        assert_eq!(errors[0].value, Some(json!(15)));
    }

    #[test]
    fn test_exclusive_lower_bound_is_exclusive() {
        let errors = validate(&person_query(), &raw(json!({"age": 17}))).unwrap_err();
        assert_eq!(
            errors[0].violation,
            Violation::Constraint(Constraint::MinValue {
                limit: 17,
                inclusive: false
            })
        );
        assert!(validate(&person_query(), &raw(json!({"age": 18}))).is_ok());
    }

    #[test]
    fn test_inclusive_upper_bound() {
        let spec = RecordSpec::new("r").with_field(FieldSpec::integer("age").gt(17).le(115));
        assert!(validate(&spec, &raw(json!({"age": 115}))).is_ok());
        let errors = validate(&spec, &raw(json!({"age": 116}))).unwrap_err();
        assert_eq!(errors[0].detail(), "max_value");
    }

    #[test]
    fn test_optional_field_defaults_to_null() {
        let record = validate(&person_query(), &raw(json!({"age": 25}))).unwrap();
        assert_eq!(record.field_names(), vec!["name", "age"]);
        assert_eq!(record.get("name"), Some(&FieldValue::Null));
        assert_eq!(record.get("age"), Some(&FieldValue::Integer(25)));
    }

    #[test]
    fn test_missing_required_field() {
        let errors = validate(&person_query(), &raw(json!({"name": "Rocio"}))).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "age");
        assert_eq!(errors[0].kind(), ErrorKind::MissingField);
        assert_eq!(errors[0].value, None);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let errors = validate(&person_query(), &raw(json!({"age": null}))).unwrap_err();
        assert_eq!(errors[0].kind(), ErrorKind::MissingField);
    }

    #[test]
    fn test_required_field_with_default_uses_default() {
        let spec = RecordSpec::new("login_out")
            .with_field(FieldSpec::string("username").max_length(20))
            .with_field(FieldSpec::string("message").with_default("Login Succesfuly!"));
        let record = validate(&spec, &raw(json!({"username": "miguel2021"}))).unwrap();
        assert_eq!(
            record.get("message"),
            Some(&FieldValue::Text("Login Succesfuly!".into()))
        );
    }

    #[test]
    fn test_collects_all_errors_in_declaration_order() {
        let input = json!({
            "first_name": "",
            "last_name": "x".repeat(51),
            "age": "old",
            "hair_color": "green",
            "is_married": "maybe",
            "email": "nope",
            "web_page": "ftp://example.com",
            "identity": 0
        });
        let errors = validate(&person_base(), &raw(input)).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                "first_name",
                "last_name",
                "age",
                "hair_color",
                "is_married",
                "email",
                "web_page",
                "identity"
            ]
        );
        let details: Vec<&str> = errors.iter().map(FieldError::detail).collect();
        assert_eq!(
            details,
            vec![
                "min_length",
                "max_length",
                "integer",
                "enum_membership",
                "boolean",
                "format",
                "format",
                "min_value"
            ]
        );
    }

    #[test]
    fn test_textual_integers_are_coerced() {
        let record = validate(&person_query(), &raw(json!({"age": " 25 "}))).unwrap();
        assert_eq!(record.get("age"), Some(&FieldValue::Integer(25)));

        let record = validate(&person_query(), &raw(json!({"age": 30.0}))).unwrap();
        assert_eq!(record.get("age"), Some(&FieldValue::Integer(30)));

        let errors = validate(&person_query(), &raw(json!({"age": 30.5}))).unwrap_err();
        assert_eq!(errors[0].kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_strings_are_not_coerced_from_numbers() {
        let spec = RecordSpec::new("r").with_field(FieldSpec::string("name"));
        let errors = validate(&spec, &raw(json!({"name": 12}))).unwrap_err();
        assert_eq!(errors[0].kind(), ErrorKind::TypeMismatch);
        assert_eq!(errors[0].detail(), "string");
    }

    #[test]
    fn test_boolean_text_forms() {
        let spec = RecordSpec::new("r").with_field(FieldSpec::boolean("flag"));
        for (input, expected) in [("true", true), ("OFF", false), ("1", true), ("no", false)] {
            let record = validate(&spec, &raw(json!({ "flag": input }))).unwrap();
            assert_eq!(record.get("flag"), Some(&FieldValue::Bool(expected)));
        }
    }

    #[test]
    fn test_enum_membership_lists_allowed_values() {
        let errors =
            validate(&person_base(), &raw(json!({"hair_color": "green"}))).unwrap_err();
        let err = errors.for_field("hair_color").unwrap();
        assert_eq!(
            err.message(),
            "value is not a valid enumeration member; permitted: 'white', 'brown', 'black', 'blonde', 'red'"
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let spec = RecordSpec::new("r").with_field(FieldSpec::string("city").max_length(3));
        assert!(validate(&spec, &raw(json!({"city": "Añé"}))).is_ok());
    }

    #[test]
    fn test_undeclared_keys_are_ignored() {
        let record =
            validate(&person_query(), &raw(json!({"age": 20, "extra": true}))).unwrap();
        assert!(!record.contains("extra"));
    }

    #[test]
    fn test_validate_value_rejects_non_object() {
        let errors = validate_value(&person_query(), &json!([1, 2])).unwrap_err();
        assert_eq!(errors[0].field, ROOT_FIELD);
        assert_eq!(errors[0].detail(), "object");
    }

    #[test]
    fn test_field_error_serialization() {
        let errors = validate(&person_query(), &raw(json!({"age": 15}))).unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            json!([{
                "field": "age",
                "kind": "constraint_violation",
                "detail": "min_value",
                "message": "ensure this value is greater than 17",
                "value": 15,
                "ctx": {"limit_value": 17, "inclusive": false}
            }])
        );
    }

    #[test]
    fn test_display_summarizes_errors() {
        let errors = validate(&person_query(), &raw(json!({"name": ""}))).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "2 validation errors: name: ensure this value has at least 1 characters; age: field required"
        );
    }
}
