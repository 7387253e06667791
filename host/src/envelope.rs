//! Responses and error-to-response mapping.
//!
//! Field errors become a 422 response whose body lists every problem with
//! its location:
//!
//! ```json
//! {
//!   "detail": [
//!     {
//!       "loc": ["query", "age"],
//!       "msg": "ensure this value is greater than 17",
//!       "type": "constraint_violation.min_value",
//!       "ctx": {"limit_value": 17, "inclusive": false}
//!     }
//!   ]
//! }
//! ```
//!
//! Not-found conditions become 404 `{"detail": "..."}`, malformed input 400
//! and server-side faults 500 `{"detail": "Internal Server Error"}`.

use std::fmt;

use http::StatusCode;
use request_schema_core::{
    CompositeErrors, ErrorKind, FieldError, FieldErrors, ProjectionError, ROOT_FIELD,
};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, error};

use crate::decode::DecodeError;

/// Body of every 5xx response.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

/// Where in the request a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Path parameter.
    Path,
    /// Query string parameter.
    Query,
    /// JSON body or form field.
    Body,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl Source {
    /// Returns the name used as the first `loc` element.
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Path => "path",
            Source::Query => "query",
            Source::Body => "body",
            Source::Header => "header",
            Source::Cookie => "cookie",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation's result: a status code and a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status.
    pub status: StatusCode,
    /// JSON body.
    pub body: Value,
}

impl Response {
    /// Creates a response.
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// `200 OK` with `body`.
    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// `201 Created` with `body`.
    pub fn created(body: Value) -> Self {
        Self::new(StatusCode::CREATED, body)
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Response", 2)?;
        state.serialize_field("status", &self.status.as_u16())?;
        state.serialize_field("body", &self.body)?;
        state.end()
    }
}

/// One entry of a 422 `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    /// Location: source, optional part name, then field.
    pub loc: Vec<String>,
    /// Human-readable message.
    pub msg: String,
    /// `missing_field`, `type_mismatch` or `constraint_violation.<reason>`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Bound parameters for constraint violations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl ErrorDetail {
    /// Builds the entry for `error` found in `source`, nested under `part`
    /// when the value came from an embedded body part.
    pub fn from_field_error(source: Source, part: Option<&str>, error: &FieldError) -> Self {
        let mut loc = vec![source.as_str().to_string()];
        loc.extend(part.map(str::to_string));
        if error.field != ROOT_FIELD {
            loc.push(error.field.clone());
        }

        let kind = match error.constraint() {
            Some(constraint) => format!("{}.{}", ErrorKind::ConstraintViolation, constraint.reason()),
            None => error.kind().code().to_string(),
        };

        Self {
            loc,
            msg: error.message(),
            kind,
            ctx: error.constraint().map(|c| c.context()),
        }
    }
}

/// Every validation problem of one request, in report order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationFailure {
    details: Vec<ErrorDetail>,
}

impl ValidationFailure {
    /// Creates an empty failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the errors of a single source.
    pub fn from_errors(source: Source, errors: &FieldErrors) -> Self {
        let mut failure = Self::new();
        failure.extend(source, None, errors);
        failure
    }

    /// Wraps the errors of a composite request. `locate` maps each part
    /// name to its source and optional embedded part name.
    pub fn from_composite<'a, F>(errors: &'a CompositeErrors, locate: F) -> Self
    where
        F: Fn(&'a str) -> (Source, Option<&'a str>),
    {
        let mut failure = Self::new();
        for part in errors.iter() {
            let (source, nested) = locate(part.part.as_str());
            failure.extend(source, nested, &part.errors);
        }
        failure
    }

    /// Appends `errors` found in `source`.
    pub fn extend(&mut self, source: Source, part: Option<&str>, errors: &FieldErrors) {
        self.details.extend(
            errors
                .iter()
                .map(|e| ErrorDetail::from_field_error(source, part, e)),
        );
    }

    /// Returns the entries.
    pub fn details(&self) -> &[ErrorDetail] {
        &self.details
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.details.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Renders the 422 body.
    pub fn to_body(&self) -> Value {
        json!({ "detail": self.details })
    }
}

/// Everything an operation can fail with.
#[derive(Debug, Error)]
pub enum HostError {
    /// Request inputs broke their specs.
    #[error("request validation failed with {} errors", .0.len())]
    Validation(ValidationFailure),

    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Inputs too malformed to validate.
    #[error("malformed request: {0}")]
    BadRequest(#[from] DecodeError),

    /// A spec the operation needs is not loaded.
    #[error("spec '{0}' is not loaded")]
    MissingSpec(String),

    /// A validated record lacks a field of its output shape.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// A response record broke its own output spec.
    #[error("response does not fit {spec}: {errors}")]
    InvalidOutput {
        /// Output spec name.
        spec: String,
        /// What broke.
        errors: FieldErrors,
    },
}

impl HostError {
    /// Returns the response status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            HostError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            HostError::NotFound(_) => StatusCode::NOT_FOUND,
            HostError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HostError::MissingSpec(_) | HostError::Projection(_) | HostError::InvalidOutput { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts into a response. Server-side faults are logged and their
    /// details withheld from the body.
    pub fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            HostError::Validation(failure) => {
                debug!(errors = failure.len(), "rejected request");
                failure.to_body()
            }
            HostError::NotFound(detail) => json!({ "detail": detail }),
            HostError::BadRequest(err) => {
                debug!(error = %err, "malformed request");
                json!({ "detail": err.to_string() })
            }
            fault => {
                error!(status = status.as_u16(), error = %fault, "request failed");
                json!({ "detail": INTERNAL_ERROR_DETAIL })
            }
        };
        Response::new(status, body)
    }
}

impl From<HostError> for Response {
    fn from(err: HostError) -> Self {
        err.into_response()
    }
}

#[cfg(test)]
mod tests {
    use request_schema_core::{FieldSpec, RecordSpec, validate};

    use super::*;

    fn query_spec() -> RecordSpec {
        RecordSpec::new("person_query")
            .with_field(FieldSpec::string("name").optional().with_length(1, 50))
            .with_field(FieldSpec::integer("age").gt(17))
    }

    fn errors_for(raw: Value) -> FieldErrors {
        validate(&query_spec(), raw.as_object().unwrap()).unwrap_err()
    }

    #[test]
    fn test_constraint_detail() {
        let errors = errors_for(json!({"age": "15"}));
        let failure = ValidationFailure::from_errors(Source::Query, &errors);
        assert_eq!(
            failure.to_body(),
            json!({"detail": [{
                "loc": ["query", "age"],
                "msg": "ensure this value is greater than 17",
                "type": "constraint_violation.min_value",
                "ctx": {"limit_value": 17, "inclusive": false}
            }]})
        );
    }

    #[test]
    fn test_missing_and_mismatch_details_have_no_ctx() {
        let errors = errors_for(json!({"name": 7}));
        let failure = ValidationFailure::from_errors(Source::Query, &errors);
        let kinds: Vec<&str> = failure.details().iter().map(|d| d.kind.as_str()).collect();
        assert_eq!(kinds, vec!["type_mismatch", "missing_field"]);
        assert!(failure.details().iter().all(|d| d.ctx.is_none()));
        assert_eq!(failure.details()[1].msg, "field required");
    }

    #[test]
    fn test_nested_part_location() {
        let error = FieldError::missing("city");
        let detail = ErrorDetail::from_field_error(Source::Body, Some("location"), &error);
        assert_eq!(detail.loc, vec!["body", "location", "city"]);

        let root = FieldError::missing(ROOT_FIELD);
        let detail = ErrorDetail::from_field_error(Source::Body, Some("person"), &root);
        assert_eq!(detail.loc, vec!["body", "person"]);
    }

    #[test]
    fn test_host_error_statuses() {
        let validation = HostError::Validation(ValidationFailure::new());
        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let not_found = HostError::NotFound("This person doesn't exists".into()).into_response();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.body, json!({"detail": "This person doesn't exists"}));

        let missing: Response = HostError::MissingSpec("person".into()).into();
        assert_eq!(missing.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(missing.body, json!({"detail": "Internal Server Error"}));
    }

    #[test]
    fn test_response_serializes_numeric_status() {
        let response = Response::created(json!({"ok": true}));
        assert!(response.is_success());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"status": 201, "body": {"ok": true}})
        );
    }
}
