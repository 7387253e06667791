//! Request input decoding.
//!
//! Turns the textual pieces of a request into [`RawRecord`]s the validator
//! understands. Every decoded value is a JSON string except JSON bodies,
//! which keep their own types; coercion to integers and booleans is left to
//! the validator.
//!
//! # Examples
//!
//! ```
//! use request_schema_host::decode::{match_path, parse_cookies, parse_query};
//! use serde_json::json;
//!
//! let query = parse_query("name=Ana%20Mar%C3%ADa&age=25");
//! assert_eq!(query["name"], json!("Ana María"));
//! assert_eq!(query["age"], json!("25"));
//!
//! let path = match_path("/person/detail/{person_id}", "/person/detail/3").unwrap();
//! assert_eq!(path["person_id"], json!("3"));
//!
//! let cookies = parse_cookies("ads=off; theme=dark");
//! assert_eq!(cookies["ads"], json!("off"));
//! ```

use std::convert::Infallible;

use bytes::Bytes;
use futures::executor::block_on;
use futures::stream;
use multer::Multipart;
use percent_encoding::percent_decode_str;
use request_schema_core::{FieldError, FieldErrors, ROOT_FIELD, RawRecord, Violation};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors raised while decoding request inputs.
///
/// These describe inputs too malformed to validate at all; field-level
/// problems are reported by the validator instead.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Body is not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Header line without a `:` separator or with an empty name.
    #[error("malformed header line: {0}")]
    MalformedHeader(String),

    /// Request target that is not a valid URI path.
    #[error("invalid request target: {0}")]
    InvalidTarget(String),

    /// Concrete path does not fit the route's template.
    #[error("path {path} does not match {template}")]
    PathMismatch {
        /// Route template, e.g. `/person/{person_id}`.
        template: String,
        /// Concrete request path.
        path: String,
    },

    /// Content type that is not `multipart/form-data` or has no `boundary`.
    #[error("multipart body has no boundary")]
    MissingBoundary,

    /// Multipart body that does not follow the boundary framing.
    #[error("malformed multipart body: {0}")]
    MalformedMultipart(String),
}

/// A file received in a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Form field the file was sent under.
    pub field: String,
    /// Client-supplied file name.
    pub filename: String,
    /// Declared content type, if the part had one.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Creates an upload for `field`.
    pub fn new(
        field: impl Into<String>,
        filename: impl Into<String>,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            filename: filename.into(),
            content_type: content_type.map(str::to_string),
            bytes,
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for an empty file.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decoded `multipart/form-data` body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    /// Plain form fields (parts without a file name).
    pub fields: RawRecord,
    /// File parts, in body order.
    pub files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Returns the first file sent under `field`.
    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field == field)
    }
}

/// Decodes an `application/x-www-form-urlencoded` string (a query string or
/// a form body). Repeated keys keep the last value.
pub fn parse_query(query: &str) -> RawRecord {
    parse_form(query.as_bytes())
}

/// Decodes an `application/x-www-form-urlencoded` body.
pub fn parse_form(body: &[u8]) -> RawRecord {
    url::form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}

/// Splits a request target such as `/person/detail?age=25` into its path
/// and decoded query.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidTarget`] if `target` is not a valid URI.
pub fn split_target(target: &str) -> Result<(String, RawRecord), DecodeError> {
    let uri: http::Uri = target
        .parse()
        .map_err(|e: http::uri::InvalidUri| DecodeError::InvalidTarget(e.to_string()))?;
    let query = uri.query().map(parse_query).unwrap_or_default();
    Ok((uri.path().to_string(), query))
}

/// Normalizes a header name to the snake_case key used in specs:
/// `User-Agent` becomes `user_agent`.
pub fn header_key(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

/// Decodes `Name: value` header lines into a record keyed by
/// [`header_key`]. Later lines replace earlier ones with the same name.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedHeader`] for a line without `:` or with
/// an empty name.
pub fn parse_headers<'a, I>(lines: I) -> Result<RawRecord, DecodeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut headers = RawRecord::new();
    for line in lines {
        let (name, value) = line
            .split_once(':')
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| DecodeError::MalformedHeader(line.to_string()))?;
        headers.insert(header_key(name), Value::String(value.trim().to_string()));
    }
    Ok(headers)
}

/// Decodes a `Cookie` header value (`a=1; b=2`).
///
/// Pairs without `=` are kept with an empty value.
pub fn parse_cookies(line: &str) -> RawRecord {
    line.split(';')
        .filter_map(|pair| {
            let mut parts = pair.trim().splitn(2, '=');
            let name = parts.next()?.trim();
            if name.is_empty() {
                return None;
            }
            let value = parts.next().unwrap_or("").trim();
            Some((name.to_string(), Value::String(value.to_string())))
        })
        .collect()
}

/// Matches a concrete path against a template with `{name}` segments and
/// returns the captured parameters, percent-decoded.
///
/// Returns `None` when the literal segments or the segment count differ.
pub fn match_path(template: &str, path: &str) -> Option<RawRecord> {
    let template_segments: Vec<&str> = template.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if template_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = RawRecord::new();
    for (expected, actual) in template_segments.iter().zip(&path_segments) {
        match expected.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => {
                let value = percent_decode_str(actual).decode_utf8_lossy();
                params.insert(name.to_string(), Value::String(value.into_owned()));
            }
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}

/// Like [`match_path`], but reports a mismatch as an error.
///
/// # Errors
///
/// Returns [`DecodeError::PathMismatch`] when `path` does not fit.
pub fn path_params(template: &str, path: &str) -> Result<RawRecord, DecodeError> {
    match_path(template, path).ok_or_else(|| DecodeError::PathMismatch {
        template: template.to_string(),
        path: path.to_string(),
    })
}

/// Parses a JSON body.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidJson`] if `bytes` is not valid JSON.
pub fn parse_json_body(bytes: &[u8]) -> Result<Value, DecodeError> {
    let value = serde_json::from_slice(bytes)?;
    Ok(value)
}

/// Splits an embedded JSON body (`{"person": {...}, "location": {...}}`)
/// into one raw record per named part, in `names` order.
///
/// Every structural problem is reported together: a non-object body is a
/// single `type_mismatch` on the root, a missing or null part is
/// `missing_field`, a non-object part is `type_mismatch`.
pub fn embedded_parts(body: &Value, names: &[&str]) -> Result<Vec<RawRecord>, FieldErrors> {
    let Value::Object(object) = body else {
        return Err(FieldErrors::single(object_expected(ROOT_FIELD, body)));
    };

    let mut parts = Vec::with_capacity(names.len());
    let mut errors = Vec::new();
    for name in names {
        match object.get(*name) {
            Some(Value::Object(part)) => parts.push(part.clone()),
            None | Some(Value::Null) => errors.push(FieldError::missing(*name)),
            Some(other) => errors.push(object_expected(name, other)),
        }
    }

    match FieldErrors::new(errors) {
        Some(errors) => Err(errors),
        None => Ok(parts),
    }
}

fn object_expected(field: &str, value: &Value) -> FieldError {
    FieldError::new(
        field,
        Violation::TypeMismatch { expected: "object" },
        Some(value.clone()),
    )
}

/// Decodes a `multipart/form-data` body.
///
/// `content_type` is the full header value, including the `boundary`
/// parameter. Parts with a file name become [`UploadedFile`]s, the others
/// plain text fields.
///
/// # Errors
///
/// Returns [`DecodeError::MissingBoundary`] if the content type is not
/// `multipart/form-data` or has no boundary, or
/// [`DecodeError::MalformedMultipart`] if the body framing or a part's
/// headers are broken.
pub fn parse_multipart(content_type: &str, body: &[u8]) -> Result<MultipartForm, DecodeError> {
    let boundary = multer::parse_boundary(content_type).map_err(|err| {
        debug!(error = %err, "rejected multipart content type");
        DecodeError::MissingBoundary
    })?;
    let stream = stream::iter([Ok::<Bytes, Infallible>(Bytes::copy_from_slice(body))]);
    let multipart = Multipart::new(stream, boundary);

    let form = block_on(read_parts(multipart))?;
    debug!(
        fields = form.fields.len(),
        files = form.files.len(),
        "decoded multipart body"
    );
    Ok(form)
}

async fn read_parts(mut multipart: Multipart<'_>) -> Result<MultipartForm, DecodeError> {
    let mut form = MultipartForm::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field
            .name()
            .map(str::to_string)
            .ok_or_else(|| DecodeError::MalformedMultipart("part without a name".to_string()))?;
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(malformed)?;
                form.files.push(UploadedFile {
                    field: name,
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            None => {
                let text = field.text().await.map_err(malformed)?;
                form.fields.insert(name, Value::String(text));
            }
        }
    }
    Ok(form)
}

fn malformed(err: multer::Error) -> DecodeError {
    DecodeError::MalformedMultipart(err.to_string())
}

#[cfg(test)]
mod tests {
    use request_schema_core::ErrorKind;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_query_decodes_and_keeps_last() {
        let query = parse_query("name=Ana+Mar%C3%ADa&age=20&age=25");
        assert_eq!(query.len(), 2);
        assert_eq!(query["name"], json!("Ana María"));
        assert_eq!(query["age"], json!("25"));
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_split_target() {
        let (path, query) = split_target("/person/detail?name=Ana&age=30").unwrap();
        assert_eq!(path, "/person/detail");
        assert_eq!(query["age"], json!("30"));

        let (path, query) = split_target("/").unwrap();
        assert_eq!(path, "/");
        assert!(query.is_empty());

        assert!(matches!(
            split_target("/bad path"),
            Err(DecodeError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_parse_headers_normalizes_names() {
        let headers = parse_headers(["User-Agent: curl/8.0", "X-Request-Id:  abc "]).unwrap();
        assert_eq!(headers["user_agent"], json!("curl/8.0"));
        assert_eq!(headers["x_request_id"], json!("abc"));

        assert!(matches!(
            parse_headers(["no separator"]),
            Err(DecodeError::MalformedHeader(_))
        ));
        assert!(parse_headers([": value"]).is_err());
    }

    #[test]
    fn test_parse_cookies() {
        let cookies = parse_cookies(" ads=on ;flag; =skip; theme=a=b");
        assert_eq!(cookies["ads"], json!("on"));
        assert_eq!(cookies["flag"], json!(""));
        assert_eq!(cookies["theme"], json!("a=b"));
        assert_eq!(cookies.len(), 3);
    }

    #[test]
    fn test_match_path() {
        let params = match_path("/person/{person_id}", "/person/42/").unwrap();
        assert_eq!(params["person_id"], json!("42"));
        assert!(match_path("/person/{person_id}", "/people/42").is_none());
        assert!(match_path("/person/{person_id}", "/person/42/extra").is_none());
        assert!(match_path("/", "/").unwrap().is_empty());

        let params = match_path("/person/detail/{person_id}", "/person/detail/%33").unwrap();
        assert_eq!(params["person_id"], json!("3"));
        let params = match_path("/files/{name}", "/files/cat%20pic%C3%A9").unwrap();
        assert_eq!(params["name"], json!("cat pic\u{e9}"));
        assert!(matches!(
            path_params("/login", "/logout"),
            Err(DecodeError::PathMismatch { .. })
        ));
    }

    #[test]
    fn test_embedded_parts() {
        let body = json!({"person": {"first_name": "Ana"}, "location": {"city": "Lima"}});
        let parts = embedded_parts(&body, &["person", "location"]).unwrap();
        assert_eq!(parts[0]["first_name"], json!("Ana"));
        assert_eq!(parts[1]["city"], json!("Lima"));
    }

    #[test]
    fn test_embedded_parts_reports_every_problem() {
        let body = json!({"person": "Ana", "location": null});
        let errors = embedded_parts(&body, &["person", "location"]).unwrap_err();
        assert_eq!(errors.fields(), vec!["person", "location"]);
        assert_eq!(errors[0].kind(), ErrorKind::TypeMismatch);
        assert_eq!(errors[1].kind(), ErrorKind::MissingField);

        let errors = embedded_parts(&json!([1, 2]), &["person"]).unwrap_err();
        assert_eq!(errors.fields(), vec![ROOT_FIELD]);
    }

    #[test]
    fn test_parse_json_body() {
        assert_eq!(parse_json_body(br#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert!(matches!(
            parse_json_body(b"{oops"),
            Err(DecodeError::InvalidJson(_))
        ));
    }

    fn multipart_body() -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(b"--XyZ\r\n");
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"caption\"\r\n\r\n");
        body.extend_from_slice(b"sunset\r\n");
        body.extend_from_slice(b"--XyZ\r\n");
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"image\"; filename=\"beach.png\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(&[0x89, b'P', b'N', b'G', b'\r', b'\n']);
        body.extend_from_slice(b"\r\n--XyZ--\r\n");
        body
    }

    #[test]
    fn test_parse_multipart() {
        let form = parse_multipart("multipart/form-data; boundary=\"XyZ\"", &multipart_body())
            .unwrap();
        assert_eq!(form.fields["caption"], json!("sunset"));

        let image = form.file("image").unwrap();
        assert_eq!(image.filename, "beach.png");
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
        assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G', b'\r', b'\n']);
        assert_eq!(image.len(), 6);
        assert!(form.file("other").is_none());
    }

    #[test]
    fn test_parse_multipart_quoted_parameters() {
        let mut body = Vec::new();
        body.extend_from_slice(b"--b\r\n");
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"image\"; filename=\"a;b.png\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(b"data");
        body.extend_from_slice(b"\r\n--b--\r\n");

        let form = parse_multipart("multipart/form-data; boundary=b", &body).unwrap();
        let image = form.file("image").unwrap();
        assert_eq!(image.filename, "a;b.png");
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
        assert_eq!(image.bytes, b"data".to_vec());
    }

    #[test]
    fn test_parse_multipart_errors() {
        assert!(matches!(
            parse_multipart("multipart/form-data", b""),
            Err(DecodeError::MissingBoundary)
        ));
        assert!(matches!(
            parse_multipart("application/json; boundary=XyZ", b""),
            Err(DecodeError::MissingBoundary)
        ));

        let truncated = b"--XyZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nvalue";
        assert!(matches!(
            parse_multipart("multipart/form-data; boundary=XyZ", truncated),
            Err(DecodeError::MalformedMultipart(_))
        ));
    }
}
