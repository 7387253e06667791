//! The people API operations.
//!
//! Each operation takes the shared [`AppContext`] plus its decoded inputs
//! and always returns a [`Response`]: validation failures become 422,
//! unknown people 404, and spec faults 500.
//!
//! # Examples
//!
//! ```
//! use request_schema_host::AppContext;
//! use request_schema_host::api::{create_person, show_person_by_id};
//! use request_schema_host::decode::parse_query;
//! use serde_json::json;
//!
//! let ctx = AppContext::builtin().unwrap();
//!
//! let response = create_person(&ctx, &json!({
//!     "first_name": "Miguel",
//!     "last_name": "Torres",
//!     "age": 25,
//!     "email": "miguel@example.com",
//!     "password": "supersecret",
//! }));
//! assert_eq!(response.status.as_u16(), 201);
//! assert!(response.body.get("password").is_none());
//!
//! let response = show_person_by_id(&ctx, &parse_query("person_id=9"));
//! assert_eq!(response.status.as_u16(), 404);
//! ```

use std::fmt;
use std::str::FromStr;

use http::Method;
use request_schema_core::{
    CompositePart, FieldError, FieldErrors, FieldValue, ProjectionError, ROOT_FIELD, RawRecord,
    Record, assemble_composite, project, validate, validate_value,
};
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::debug;

use crate::context::AppContext;
use crate::decode::{UploadedFile, embedded_parts};
use crate::envelope::{HostError, Response, Source, ValidationFailure};
use crate::shapes::{
    CONTACT_COOKIES, CONTACT_FORM, CONTACT_HEADERS, IMAGE_UPLOAD, LOCATION, LOGIN_FORM, LOGIN_OUT,
    PERSON, PERSON_OUT, PERSON_PATH, PERSON_QUERY,
};

/// Detail of the 404 for an unknown person id.
pub const PERSON_NOT_FOUND: &str = "This person doesn't exists";

/// Form field `post_image` reads the upload from.
pub const IMAGE_FIELD: &str = "image";

/// The operations of the people API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Home,
    CreatePerson,
    ShowPersonQuery,
    ShowPersonById,
    UpdatePerson,
    Login,
    Contact,
    PostImage,
}

impl Operation {
    /// Every operation, in route table order.
    pub const ALL: [Operation; 8] = [
        Operation::Home,
        Operation::CreatePerson,
        Operation::ShowPersonQuery,
        Operation::ShowPersonById,
        Operation::UpdatePerson,
        Operation::Login,
        Operation::Contact,
        Operation::PostImage,
    ];

    /// Returns the snake_case operation name.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Home => "home",
            Operation::CreatePerson => "create_person",
            Operation::ShowPersonQuery => "show_person_query",
            Operation::ShowPersonById => "show_person_by_id",
            Operation::UpdatePerson => "update_person",
            Operation::Login => "login",
            Operation::Contact => "contact",
            Operation::PostImage => "post_image",
        }
    }

    /// Returns the HTTP method the operation is served under.
    pub fn method(self) -> Method {
        match self {
            Operation::Home | Operation::ShowPersonQuery | Operation::ShowPersonById => Method::GET,
            Operation::UpdatePerson => Method::PUT,
            Operation::CreatePerson
            | Operation::Login
            | Operation::Contact
            | Operation::PostImage => Method::POST,
        }
    }

    /// Returns the route's path template.
    pub fn path_template(self) -> &'static str {
        match self {
            Operation::Home => "/",
            Operation::CreatePerson => "/person/new",
            Operation::ShowPersonQuery => "/person/detail",
            Operation::ShowPersonById => "/person/detail/{person_id}",
            Operation::UpdatePerson => "/person/{person_id}",
            Operation::Login => "/login",
            Operation::Contact => "/contact",
            Operation::PostImage => "/post-image",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized operation name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation '{0}'")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Decoded inputs of one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    /// Path parameters.
    pub path: RawRecord,
    /// Query parameters.
    pub query: RawRecord,
    /// JSON body, if one was sent.
    pub body: Option<Value>,
    /// Form fields.
    pub form: RawRecord,
    /// Headers keyed by snake_case name.
    pub headers: RawRecord,
    /// Cookies.
    pub cookies: RawRecord,
    /// Uploaded files.
    pub files: Vec<UploadedFile>,
}

/// Runs `operation` against `request`.
pub fn dispatch(ctx: &AppContext, operation: Operation, request: &Request) -> Response {
    let response = match operation {
        Operation::Home => home(ctx),
        Operation::CreatePerson => match &request.body {
            Some(body) => create_person(ctx, body),
            None => missing_body(),
        },
        Operation::ShowPersonQuery => show_person_query(ctx, &request.query),
        Operation::ShowPersonById => show_person_by_id(ctx, &request.path),
        Operation::UpdatePerson => match &request.body {
            Some(body) => update_person(ctx, &request.path, body),
            None => missing_body(),
        },
        Operation::Login => login(ctx, &request.form),
        Operation::Contact => contact(ctx, &request.form, &request.headers, &request.cookies),
        Operation::PostImage => post_image(ctx, &request.files),
    };
    debug!(
        operation = operation.name(),
        status = response.status.as_u16(),
        "handled request"
    );
    response
}

/// `GET /`
pub fn home(_ctx: &AppContext) -> Response {
    Response::ok(json!({ "hello": "Hola mundo" }))
}

/// `POST /person/new`: validates a person and echoes it without its
/// password.
pub fn create_person(ctx: &AppContext, body: &Value) -> Response {
    respond(try_create_person(ctx, body))
}

fn try_create_person(ctx: &AppContext, body: &Value) -> Result<Response, HostError> {
    let record = validate_value(ctx.spec(PERSON)?, body).map_err(|e| rejected(Source::Body, &e))?;
    let output = project(&record, ctx.spec(PERSON_OUT)?)?;
    Ok(Response::created(output.to_json()))
}

/// `GET /person/detail?name=&age=`: answers `{name: age}`, with the key
/// `"null"` when no name was given.
pub fn show_person_query(ctx: &AppContext, query: &RawRecord) -> Response {
    respond(try_show_person_query(ctx, query))
}

fn try_show_person_query(ctx: &AppContext, query: &RawRecord) -> Result<Response, HostError> {
    let record =
        validate(ctx.spec(PERSON_QUERY)?, query).map_err(|e| rejected(Source::Query, &e))?;
    let name = record
        .get("name")
        .and_then(FieldValue::as_str)
        .unwrap_or("null")
        .to_string();
    let age = record.get("age").map(FieldValue::to_json).unwrap_or(Value::Null);

    let mut body = Map::new();
    body.insert(name, age);
    Ok(Response::ok(Value::Object(body)))
}

/// `GET /person/detail/{person_id}`: 404 unless the id is a known person.
pub fn show_person_by_id(ctx: &AppContext, path: &RawRecord) -> Response {
    respond(try_show_person_by_id(ctx, path))
}

fn try_show_person_by_id(ctx: &AppContext, path: &RawRecord) -> Result<Response, HostError> {
    let record = validate(ctx.spec(PERSON_PATH)?, path).map_err(|e| rejected(Source::Path, &e))?;
    let id = integer_field(&record, PERSON_PATH, "person_id")?;
    if !ctx.people().is_known(id) {
        return Err(HostError::NotFound(PERSON_NOT_FOUND.to_string()));
    }

    let mut body = Map::new();
    body.insert(id.to_string(), json!("It exists!"));
    Ok(Response::ok(Value::Object(body)))
}

/// `PUT /person/{person_id}` with body `{"person": {...}, "location":
/// {...}}`. The path and both body parts are validated together.
pub fn update_person(ctx: &AppContext, path: &RawRecord, body: &Value) -> Response {
    respond(try_update_person(ctx, path, body))
}

fn try_update_person(
    ctx: &AppContext,
    path: &RawRecord,
    body: &Value,
) -> Result<Response, HostError> {
    let path_spec = ctx.spec(PERSON_PATH)?;
    let person_spec = ctx.spec(PERSON)?;
    let location_spec = ctx.spec(LOCATION)?;

    let parts = match embedded_parts(body, &[PERSON, LOCATION]) {
        Ok(parts) => parts,
        Err(body_errors) => {
            let mut failure = ValidationFailure::new();
            if let Err(errors) = validate(path_spec, path) {
                failure.extend(Source::Path, None, &errors);
            }
            failure.extend(Source::Body, None, &body_errors);
            return Err(HostError::Validation(failure));
        }
    };

    let result = assemble_composite(&[
        CompositePart::new("path", path_spec, path),
        CompositePart::new(PERSON, person_spec, &parts[0]),
        CompositePart::new(LOCATION, location_spec, &parts[1]),
    ]);
    let mut records = result.into_result().map_err(|errors| {
        HostError::Validation(ValidationFailure::from_composite(&errors, |part| {
            match part {
                "path" => (Source::Path, None),
                nested => (Source::Body, Some(nested)),
            }
        }))
    })?;

    let person = records.take(PERSON).unwrap_or_default();
    let location = records.take(LOCATION).unwrap_or_default();
    let person = project(&person, ctx.spec(PERSON_OUT)?)?;
    Ok(Response::created(json!({
        "person": person.to_json(),
        "location": location.to_json(),
    })))
}

/// `POST /login` (form): answers with the username and a greeting.
///
/// A username longer than the response shape allows is a server fault.
pub fn login(ctx: &AppContext, form: &RawRecord) -> Response {
    respond(try_login(ctx, form))
}

fn try_login(ctx: &AppContext, form: &RawRecord) -> Result<Response, HostError> {
    let credentials =
        validate(ctx.spec(LOGIN_FORM)?, form).map_err(|e| rejected(Source::Body, &e))?;

    let mut raw = RawRecord::new();
    if let Some(username) = credentials.get("username") {
        raw.insert("username".to_string(), username.to_json());
    }
    let output = validate(ctx.spec(LOGIN_OUT)?, &raw).map_err(|errors| HostError::InvalidOutput {
        spec: LOGIN_OUT.to_string(),
        errors,
    })?;
    Ok(Response::ok(output.to_json()))
}

/// `POST /contact` (form + `User-Agent` header + `ads` cookie): answers
/// with the user agent, or null.
pub fn contact(
    ctx: &AppContext,
    form: &RawRecord,
    headers: &RawRecord,
    cookies: &RawRecord,
) -> Response {
    respond(try_contact(ctx, form, headers, cookies))
}

fn try_contact(
    ctx: &AppContext,
    form: &RawRecord,
    headers: &RawRecord,
    cookies: &RawRecord,
) -> Result<Response, HostError> {
    let result = assemble_composite(&[
        CompositePart::new(Source::Body.as_str(), ctx.spec(CONTACT_FORM)?, form),
        CompositePart::new(Source::Header.as_str(), ctx.spec(CONTACT_HEADERS)?, headers),
        CompositePart::new(Source::Cookie.as_str(), ctx.spec(CONTACT_COOKIES)?, cookies),
    ]);
    let records = result.into_result().map_err(|errors| {
        HostError::Validation(ValidationFailure::from_composite(&errors, |part| {
            match part {
                "header" => (Source::Header, None),
                "cookie" => (Source::Cookie, None),
                _ => (Source::Body, None),
            }
        }))
    })?;

    let user_agent = records
        .get(Source::Header.as_str())
        .and_then(|headers| headers.get("user_agent"))
        .map(FieldValue::to_json)
        .unwrap_or(Value::Null);
    Ok(Response::ok(user_agent))
}

/// `POST /post-image` (multipart): reports the name, content type and size
/// in kilobytes (two decimals) of the `image` upload.
pub fn post_image(ctx: &AppContext, files: &[UploadedFile]) -> Response {
    respond(try_post_image(ctx, files))
}

fn try_post_image(ctx: &AppContext, files: &[UploadedFile]) -> Result<Response, HostError> {
    let spec = ctx.spec(IMAGE_UPLOAD)?;
    let Some(image) = files.iter().find(|f| f.field == IMAGE_FIELD) else {
        let missing = FieldErrors::single(FieldError::missing(IMAGE_FIELD));
        return Err(rejected(Source::Body, &missing));
    };

    let mut raw = RawRecord::new();
    raw.insert("filename".to_string(), json!(image.filename));
    raw.insert("content_type".to_string(), json!(image.content_type));
    raw.insert("size".to_string(), json!(image.len()));
    let record = validate(spec, &raw).map_err(|errors| {
        let mut failure = ValidationFailure::new();
        failure.extend(Source::Body, Some(IMAGE_FIELD), &errors);
        HostError::Validation(failure)
    })?;

    let size = integer_field(&record, IMAGE_UPLOAD, "size")?;
    Ok(Response::ok(json!({
        "Filename": record.get("filename").map(FieldValue::to_json),
        "Format": record.get("content_type").map(FieldValue::to_json),
        "Size(kb)": kilobytes(size),
    })))
}

fn kilobytes(bytes: i64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}

fn missing_body() -> Response {
    rejected(Source::Body, &FieldErrors::single(FieldError::missing(ROOT_FIELD))).into_response()
}

fn rejected(source: Source, errors: &FieldErrors) -> HostError {
    HostError::Validation(ValidationFailure::from_errors(source, errors))
}

fn integer_field(record: &Record, spec: &str, field: &str) -> Result<i64, HostError> {
    record
        .get(field)
        .and_then(FieldValue::as_i64)
        .ok_or_else(|| {
            HostError::Projection(ProjectionError::MissingField {
                shape: spec.to_string(),
                field: field.to_string(),
            })
        })
}

fn respond(result: Result<Response, HostError>) -> Response {
    result.unwrap_or_else(HostError::into_response)
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    fn ctx() -> AppContext {
        AppContext::builtin().unwrap()
    }

    fn raw(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_operation_names_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
        assert_eq!(
            "delete_person".parse::<Operation>(),
            Err(UnknownOperation("delete_person".into()))
        );
        assert_eq!(Operation::UpdatePerson.method(), Method::PUT);
        assert_eq!(Operation::ShowPersonById.path_template(), "/person/detail/{person_id}");
    }

    #[test]
    fn test_home() {
        let response = home(&ctx());
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({"hello": "Hola mundo"}));
    }

    #[test]
    fn test_show_person_query_without_name() {
        let response = show_person_query(&ctx(), &raw(json!({"age": "25"})));
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({"null": 25}));
    }

    #[test]
    fn test_show_person_by_id_known_and_unknown() {
        let response = show_person_by_id(&ctx(), &raw(json!({"person_id": "3"})));
        assert_eq!(response.body, json!({"3": "It exists!"}));

        let response = show_person_by_id(&ctx(), &raw(json!({"person_id": "6"})));
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, json!({"detail": PERSON_NOT_FOUND}));

        let response = show_person_by_id(&ctx(), &raw(json!({"person_id": "0"})));
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.body["detail"][0]["loc"], json!(["path", "person_id"]));
    }

    #[test]
    fn test_login_username_too_long_is_server_fault() {
        let form = raw(json!({"username": "a".repeat(21), "password": "x"}));
        let response = login(&ctx(), &form);
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, json!({"detail": "Internal Server Error"}));
    }

    #[test]
    fn test_post_image_requires_upload() {
        let response = post_image(&ctx(), &[]);
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.body["detail"][0]["loc"], json!(["body", "image"]));
        assert_eq!(response.body["detail"][0]["type"], json!("missing_field"));
    }

    #[test]
    fn test_kilobytes_rounding() {
        assert_eq!(kilobytes(2048), 2.0);
        assert_eq!(kilobytes(1500), 1.46);
        assert_eq!(kilobytes(0), 0.0);
    }

    #[test]
    fn test_dispatch_without_body() {
        let response = dispatch(&ctx(), Operation::CreatePerson, &Request::default());
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.body,
            json!({"detail": [{"loc": ["body"], "msg": "field required", "type": "missing_field"}]})
        );
    }
}
