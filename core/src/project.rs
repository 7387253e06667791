//! Projection of validated records onto output shapes.
//!
//! [`project`] builds a new record containing exactly the fields of an
//! output [`RecordSpec`], in that spec's order. Fields on the source record
//! that the output shape does not declare are dropped, which is how
//! credentials such as `password` are kept out of responses.
//!
//! # Example
//!
//! ```
//! use request_schema_core::*;
//!
//! let out = RecordSpec::new("person_out").with_field(FieldSpec::string("first_name"));
//!
//! let mut record = Record::new();
//! record.insert("first_name", FieldValue::from("A"));
//! record.insert("password", FieldValue::from("secret123"));
//!
//! let projected = project(&record, &out).unwrap();
//! assert_eq!(projected.field_names(), vec!["first_name"]);
//! assert!(!projected.contains("password"));
//! ```

use thiserror::Error;

use crate::{Record, RecordSpec};

/// Projection failure.
///
/// Output shapes are meant to be subsets of the source spec, so this error
/// means a shape was authored wrongly. Hosts should treat it as an internal
/// fault, not a client error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// The output shape declares a field the source record does not hold.
    #[error("output shape '{shape}' declares field '{field}' missing from the source record")]
    MissingField {
        /// Output spec name.
        shape: String,
        /// Field absent from the record.
        field: String,
    },
}

/// Projects `record` onto `output`.
///
/// # Errors
///
/// Returns [`ProjectionError::MissingField`] for the first output field the
/// record does not hold.
pub fn project(record: &Record, output: &RecordSpec) -> Result<Record, ProjectionError> {
    let mut projected = Record::with_capacity(output.len());
    for field in &output.fields {
        let value = record
            .get(&field.name)
            .ok_or_else(|| ProjectionError::MissingField {
                shape: output.name.clone(),
                field: field.name.clone(),
            })?;
        projected.insert(field.name.clone(), value.clone());
    }
    Ok(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldSpec, FieldValue};

    fn source() -> Record {
        [
            ("first_name", FieldValue::from("A")),
            ("age", FieldValue::Integer(30)),
            ("password", FieldValue::from("secret123")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_project_drops_undeclared_fields() {
        let out = RecordSpec::new("out").with_field(FieldSpec::string("first_name"));
        let projected = project(&source(), &out).unwrap();
        assert_eq!(projected.len(), 1);
        assert_eq!(projected.get("first_name"), Some(&FieldValue::from("A")));
    }

    #[test]
    fn test_project_follows_output_order() {
        let out = RecordSpec::new("out")
            .with_field(FieldSpec::integer("age"))
            .with_field(FieldSpec::string("first_name"));
        let projected = project(&source(), &out).unwrap();
        assert_eq!(projected.field_names(), vec!["age", "first_name"]);
    }

    #[test]
    fn test_project_reports_missing_field() {
        let out = RecordSpec::new("out").with_field(FieldSpec::email("email"));
        let err = project(&source(), &out).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::MissingField {
                shape: "out".into(),
                field: "email".into()
            }
        );
    }

    #[test]
    fn test_project_does_not_mutate_source() {
        let record = source();
        let out = RecordSpec::new("out").with_field(FieldSpec::string("first_name"));
        let _ = project(&record, &out).unwrap();
        assert_eq!(record, source());
    }
}
