//! Declarative request validation and output shape projection.
//!
//! This crate defines the data model and the pure functions behind request
//! handling:
//!
//! - [`FieldSpec`] — one field's kind, required flag, default, bounds and
//!   documentation.
//! - [`RecordSpec`] — an ordered set of fields describing an input or output
//!   shape.
//! - [`validate`] — turns a raw decoded record into a typed [`Record`] or a
//!   complete, ordered list of [`FieldError`]s.
//! - [`project`] — copies exactly the fields of an output shape out of a
//!   validated record.
//! - [`assemble_composite`] — validates several independent parts of one
//!   request and reports every failing part together.
//! - [`extend_spec`], [`subset_spec`], [`omit_fields`] — build output shapes
//!   from input shapes by composition.
//! - [`SpecPackage`] — a versioned bundle of specs for distribution.
//!
//! Structural checks ([`check_record_spec`], [`check_package`]) catch
//! authoring errors such as inverted bounds or duplicate fields.
//!
//! # Example
//!
//! ```
//! use request_schema_core::*;
//! use serde_json::json;
//!
//! let person = RecordSpec::new("person")
//!     .with_field(FieldSpec::string("first_name").with_length(1, 50))
//!     .with_field(FieldSpec::integer("age").gt(17).le(115))
//!     .with_field(FieldSpec::string("password").min_length(8));
//! let person_out = omit_fields(&person, "person_out", &["password"]).unwrap();
//!
//! let raw = json!({"first_name": "Miguel", "age": 21, "password": "secret123"});
//! let record = validate(&person, raw.as_object().unwrap()).unwrap();
//! let output = project(&record, &person_out).unwrap();
//!
//! assert_eq!(output.to_json(), json!({"first_name": "Miguel", "age": 21}));
//! ```

mod check;
mod compose;
mod composite;
mod formats;
mod package;
mod project;
mod record;
mod types;
mod validate;

pub use check::{SpecError, check_package, check_record_spec};
pub use compose::{ComposeError, extend_spec, is_subset_of, omit_fields, subset_spec};
pub use composite::{
    CompositeErrors, CompositePart, CompositeRecord, CompositeResult, PartErrors,
    assemble_composite,
};
pub use formats::{MAX_URL_LENGTH, TextFormat, is_valid_email, is_valid_http_url};
pub use package::SpecPackage;
pub use project::{ProjectionError, project};
pub use record::{FieldValue, Record};
pub use types::*;
pub use validate::{
    Constraint, ErrorKind, FieldError, FieldErrors, ROOT_FIELD, RawRecord, ValidationResult,
    Violation, validate, validate_field, validate_value,
};
