//! Spec composition: extension, subsets and omission.
//!
//! Output shapes are derived from input shapes by copying fields, not by a
//! type hierarchy. [`extend_spec`] appends fields to a base (a "person" is a
//! "person base" plus a password), [`subset_spec`] keeps named fields (a
//! "person out" is the person minus anything not listed) and [`omit_fields`]
//! drops named fields.
//!
//! # Example
//!
//! ```
//! use request_schema_core::*;
//!
//! let base = RecordSpec::new("person_base")
//!     .with_field(FieldSpec::string("first_name"))
//!     .with_field(FieldSpec::email("email"));
//!
//! let person = extend_spec(&base, "person", vec![FieldSpec::string("password").min_length(8)])
//!     .unwrap();
//! assert_eq!(person.field_names(), vec!["first_name", "email", "password"]);
//!
//! let person_out = omit_fields(&person, "person_out", &["password"]).unwrap();
//! assert_eq!(person_out.field_names(), base.field_names());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{FieldSpec, RecordSpec};

/// Composition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// A named field does not exist on the base spec.
    #[error("spec '{spec}' has no field '{field}'")]
    UnknownField {
        /// Base spec name.
        spec: String,
        /// Requested field.
        field: String,
    },
    /// An appended field collides with an existing one.
    #[error("spec '{spec}' already declares field '{field}'")]
    DuplicateField {
        /// Base spec name.
        spec: String,
        /// Colliding field.
        field: String,
    },
}

/// Returns a spec named `name` with the base's fields followed by `extra`.
///
/// # Errors
///
/// Returns [`ComposeError::DuplicateField`] if an extra field's name is
/// already declared by the base or appears twice in `extra`.
pub fn extend_spec(
    base: &RecordSpec,
    name: &str,
    extra: Vec<FieldSpec>,
) -> Result<RecordSpec, ComposeError> {
    let mut seen: HashSet<&str> = base.fields.iter().map(|f| f.name.as_str()).collect();
    for field in &extra {
        if !seen.insert(field.name.as_str()) {
            return Err(ComposeError::DuplicateField {
                spec: base.name.clone(),
                field: field.name.clone(),
            });
        }
    }

    let mut extended = base.clone();
    extended.name = name.to_string();
    extended.fields.extend(extra);
    Ok(extended)
}

/// Returns a spec named `name` holding only the listed fields of `base`.
///
/// Fields keep the base's declaration order regardless of the order of
/// `fields`.
///
/// # Errors
///
/// Returns [`ComposeError::UnknownField`] for the first listed field the base
/// does not declare.
pub fn subset_spec(
    base: &RecordSpec,
    name: &str,
    fields: &[&str],
) -> Result<RecordSpec, ComposeError> {
    ensure_known(base, fields)?;
    let keep: HashSet<&str> = fields.iter().copied().collect();
    Ok(RecordSpec {
        name: name.to_string(),
        description: base.description.clone(),
        fields: base
            .fields
            .iter()
            .filter(|f| keep.contains(f.name.as_str()))
            .cloned()
            .collect(),
    })
}

/// Returns a spec named `name` holding `base` minus the listed fields.
///
/// # Errors
///
/// Returns [`ComposeError::UnknownField`] for the first listed field the base
/// does not declare.
pub fn omit_fields(
    base: &RecordSpec,
    name: &str,
    fields: &[&str],
) -> Result<RecordSpec, ComposeError> {
    ensure_known(base, fields)?;
    let drop: HashSet<&str> = fields.iter().copied().collect();
    Ok(RecordSpec {
        name: name.to_string(),
        description: base.description.clone(),
        fields: base
            .fields
            .iter()
            .filter(|f| !drop.contains(f.name.as_str()))
            .cloned()
            .collect(),
    })
}

/// Returns `true` if every field of `subset` is declared by `base`.
pub fn is_subset_of(subset: &RecordSpec, base: &RecordSpec) -> bool {
    subset.fields.iter().all(|f| base.contains(&f.name))
}

fn ensure_known(base: &RecordSpec, fields: &[&str]) -> Result<(), ComposeError> {
    match fields.iter().find(|name| !base.contains(name)) {
        Some(missing) => Err(ComposeError::UnknownField {
            spec: base.name.clone(),
            field: missing.to_string(),
        }),
        None => Ok(()),
    }
}
