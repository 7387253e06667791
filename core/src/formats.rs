//! Format checks for email and URL fields.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

/// Longest URL accepted by [`is_valid_http_url`].
pub const MAX_URL_LENGTH: usize = 2083;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("static regex must compile")
});

/// Text format a field value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextFormat {
    /// Email address.
    Email,
    /// Absolute `http`/`https` URL.
    HttpUrl,
}

impl TextFormat {
    /// Returns `true` if `value` satisfies this format.
    pub fn matches(self, value: &str) -> bool {
        match self {
            TextFormat::Email => is_valid_email(value),
            TextFormat::HttpUrl => is_valid_http_url(value),
        }
    }

    /// Returns the format name used in error output.
    pub fn name(self) -> &'static str {
        match self {
            TextFormat::Email => "email",
            TextFormat::HttpUrl => "url",
        }
    }
}

/// Returns `true` if `value` looks like a deliverable email address.
///
/// The local part is at most 64 characters; the domain needs at least one
/// dot.
///
/// # Examples
///
/// ```
/// use request_schema_core::is_valid_email;
///
/// assert!(is_valid_email("miguel@example.com"));
/// assert!(!is_valid_email("miguel@localhost"));
/// assert!(!is_valid_email("not-an-email"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, _domain)) = value.rsplit_once('@') else {
        return false;
    };
    local.len() <= 64 && EMAIL_RE.is_match(value)
}

/// Returns `true` if `value` is an absolute `http` or `https` URL with a
/// host.
///
/// # Examples
///
/// ```
/// use request_schema_core::is_valid_http_url;
///
/// assert!(is_valid_http_url("https://platzi.com/cursos"));
/// assert!(!is_valid_http_url("ftp://example.com"));
/// assert!(!is_valid_http_url("example.com"));
/// ```
pub fn is_valid_http_url(value: &str) -> bool {
    if value.len() > MAX_URL_LENGTH {
        return false;
    }
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
