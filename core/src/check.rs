//! Structural checks for specs and spec packages.
//!
//! Catches authoring mistakes such as duplicate field names, inverted bounds
//! and defaults that could never validate, before a spec is used to validate
//! requests.
//!
//! # Examples
//!
//! ```
//! use request_schema_core::*;
//!
//! let spec = RecordSpec::new("person")
//!     .with_field(FieldSpec::string("first_name").with_length(1, 50));
//! assert!(check_record_spec(&spec).is_empty());
//!
//! // Invalid: minimum length above maximum
//! let bad = RecordSpec::new("person")
//!     .with_field(FieldSpec::string("first_name").with_length(50, 1));
//! assert!(!check_record_spec(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::validate::check_value;
use crate::{FieldSpec, RecordSpec, SpecPackage};

/// Spec/package authoring errors.
///
/// Each variant describes a specific structural problem. The `Display` impl
/// provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Package version string is empty.
    #[error("package version cannot be empty")]
    EmptyPackageVersion,
    /// Two specs in the same package share a name.
    #[error("duplicate spec in package: {0}")]
    DuplicateSpec(String),
    /// Spec name is empty or whitespace-only.
    #[error("spec name cannot be empty")]
    EmptySpecName,
    /// Field name is empty or whitespace-only.
    #[error("field name cannot be empty in spec {0}")]
    EmptyFieldName(String),
    /// Two fields in the same spec share a name.
    #[error("duplicate field in spec {spec}: {field}")]
    DuplicateField { spec: String, field: String },
    /// Length bounds on a kind that has no length.
    #[error("length bounds not allowed on {kind} field {field}")]
    LengthBoundsOnNonText { field: String, kind: &'static str },
    /// Value bounds on a non-integer kind.
    #[error("value bounds not allowed on {kind} field {field}")]
    RangeBoundsOnNonInteger { field: String, kind: &'static str },
    /// `min_length` greater than `max_length`.
    #[error("min_length {min} exceeds max_length {max} on field {field}")]
    InvertedLengthBounds { field: String, min: usize, max: usize },
    /// Lower and upper value bounds admit no integer.
    #[error("value bounds on field {0} admit no value")]
    EmptyRange(String),
    /// Enum field declares no choices.
    #[error("enum field {0} has no choices")]
    EmptyEnum(String),
    /// Enum field declares the same choice twice.
    #[error("enum field {field} repeats choice {choice}")]
    DuplicateChoice { field: String, choice: String },
    /// The default value does not satisfy the field's own rules.
    #[error("default for field {field} is invalid: {reason}")]
    InvalidDefault { field: String, reason: String },
}

/// Checks a full spec package.
///
/// Checks for an empty version string and duplicate spec names, then checks
/// each spec individually. Stops at the first spec with problems.
///
/// # Examples
///
/// ```
/// use request_schema_core::*;
///
/// let mut package = SpecPackage::new("1.0.0", "2024-01-01T00:00:00Z");
/// package.specs.push(RecordSpec::new("location"));
/// assert!(check_package(&package).is_empty());
///
/// // Duplicate spec → error
/// package.specs.push(RecordSpec::new("location"));
/// let errors = check_package(&package);
/// assert!(errors.iter().any(|e| matches!(e, SpecError::DuplicateSpec(_))));
/// ```
pub fn check_package(package: &SpecPackage) -> Vec<SpecError> {
    let mut errors = Vec::new();

    if package.version.trim().is_empty() {
        errors.push(SpecError::EmptyPackageVersion);
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for spec in &package.specs {
        if !seen.insert(spec.name.as_str()) {
            errors.push(SpecError::DuplicateSpec(spec.name.clone()));
            return errors;
        }
        errors.extend(check_record_spec(spec));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

/// Checks one record spec, returning every problem found.
pub fn check_record_spec(spec: &RecordSpec) -> Vec<SpecError> {
    let mut errors = Vec::new();

    if spec.name.trim().is_empty() {
        errors.push(SpecError::EmptySpecName);
        return errors;
    }

    let mut seen = HashSet::new();
    for field in &spec.fields {
        if field.name.trim().is_empty() {
            errors.push(SpecError::EmptyFieldName(spec.name.clone()));
            continue;
        }
        if !seen.insert(field.name.as_str()) {
            errors.push(SpecError::DuplicateField {
                spec: spec.name.clone(),
                field: field.name.clone(),
            });
            continue;
        }
        errors.extend(check_field(field));
    }

    errors
}

fn check_field(field: &FieldSpec) -> Vec<SpecError> {
    let mut errors = Vec::new();
    let bounds = &field.bounds;
    let kind = field.kind.type_name();

    if bounds.has_length() && !field.kind.accepts_length_bounds() {
        errors.push(SpecError::LengthBoundsOnNonText {
            field: field.name.clone(),
            kind,
        });
    }
    if bounds.has_range() && !field.kind.is_integer() {
        errors.push(SpecError::RangeBoundsOnNonInteger {
            field: field.name.clone(),
            kind,
        });
    }
    if let (Some(min), Some(max)) = (bounds.min_length, bounds.max_length) {
        if min > max {
            errors.push(SpecError::InvertedLengthBounds {
                field: field.name.clone(),
                min,
                max,
            });
        }
    }
    if field.kind.is_integer() && range_is_empty(field) {
        errors.push(SpecError::EmptyRange(field.name.clone()));
    }

    if let crate::FieldKind::Enum { choices } = &field.kind {
        if choices.is_empty() {
            errors.push(SpecError::EmptyEnum(field.name.clone()));
        }
        let mut seen = HashSet::new();
        for choice in choices {
            if !seen.insert(choice.as_str()) {
                errors.push(SpecError::DuplicateChoice {
                    field: field.name.clone(),
                    choice: choice.clone(),
                });
            }
        }
    }

    if let Some(default) = field.default.as_ref().filter(|d| !d.is_null()) {
        if errors.is_empty() {
            if let Err(violation) = check_value(field, default) {
                errors.push(SpecError::InvalidDefault {
                    field: field.name.clone(),
                    reason: violation.to_string(),
                });
            }
        }
    }

    errors
}

fn range_is_empty(field: &FieldSpec) -> bool {
    let bounds = &field.bounds;
    let implicit_floor = match field.kind {
        crate::FieldKind::PositiveInteger => Some(1),
        _ => None,
    };
    let lower = [
        bounds.gt.map(|n| n.saturating_add(1)),
        bounds.ge,
        implicit_floor,
    ]
    .into_iter()
    .flatten()
    .max();
    let upper = [bounds.lt.map(|n| n.saturating_sub(1)), bounds.le]
        .into_iter()
        .flatten()
        .min();
    matches!((lower, upper), (Some(lo), Some(hi)) if lo > hi)
}
