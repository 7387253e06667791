//! Field and record spec definitions.
//!
//! This module defines the declarative data model used to describe request
//! inputs and response shapes. The types serialize with [`serde`] so spec
//! files can be authored in JSON or YAML and loaded at startup.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version of the spec file contract (semver).
///
/// Embedded in every [`SpecPackage`](crate::SpecPackage) to track
/// compatibility across releases.
pub const SPEC_CONTRACT_VERSION: &str = "1.0.0";

/// Kind of value a field accepts.
///
/// `Enum` carries its closed set of allowed string constants; membership is
/// checked explicitly during validation.
///
/// # Examples
///
/// ```
/// use request_schema_core::FieldKind;
///
/// let color = FieldKind::Enum { choices: vec!["black".into(), "red".into()] };
/// assert_eq!(color.type_name(), "enum");
/// assert!(color.is_textual());
/// assert!(FieldKind::PositiveInteger.is_integer());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// UTF-8 text.
    String,
    /// 64-bit signed integer.
    Integer,
    /// Boolean.
    Boolean,
    /// One of a fixed set of string constants.
    Enum {
        /// Allowed values, in declaration order.
        choices: Vec<String>,
    },
    /// Email address.
    Email,
    /// Absolute `http`/`https` URL.
    Url,
    /// Integer strictly greater than zero.
    PositiveInteger,
}

impl FieldKind {
    /// Returns the type name used in error messages and spec files.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum { .. } => "enum",
            FieldKind::Email => "email",
            FieldKind::Url => "url",
            FieldKind::PositiveInteger => "positive_integer",
        }
    }

    /// Returns `true` for kinds whose values are strings.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldKind::String | FieldKind::Enum { .. } | FieldKind::Email | FieldKind::Url
        )
    }

    /// Returns `true` for integer kinds.
    pub fn is_integer(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::PositiveInteger)
    }

    /// Returns `true` for kinds that accept length bounds.
    pub fn accepts_length_bounds(&self) -> bool {
        matches!(self, FieldKind::String | FieldKind::Email | FieldKind::Url)
    }
}

/// Length and value bounds for a field.
///
/// Length bounds are inclusive and counted in characters. Value bounds
/// mirror the usual `gt`/`ge`/`lt`/`le` comparison helpers: `gt` and `lt`
/// are exclusive, `ge` and `le` inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBounds {
    /// Minimum length (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum length (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Exclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<i64>,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge: Option<i64>,
    /// Exclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<i64>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub le: Option<i64>,
}

impl FieldBounds {
    /// Returns `true` when no bound is set.
    pub fn is_empty(&self) -> bool {
        !self.has_length() && !self.has_range()
    }

    /// Returns `true` when a length bound is set.
    pub fn has_length(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some()
    }

    /// Returns `true` when a value bound is set.
    pub fn has_range(&self) -> bool {
        self.gt.is_some() || self.ge.is_some() || self.lt.is_some() || self.le.is_some()
    }
}

/// Documentation metadata. Advisory only; never affects validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDocs {
    /// Short human title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl FieldDocs {
    /// Returns `true` when no documentation is attached.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.example.is_none()
    }
}

fn required_by_default() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Declarative description of one record field.
///
/// Fields are required unless marked [`optional`](FieldSpec::optional). Use
/// the kind constructors ([`string`](FieldSpec::string),
/// [`integer`](FieldSpec::integer), ...) and chain builder methods to add
/// bounds and documentation.
///
/// # Examples
///
/// ```
/// use request_schema_core::FieldSpec;
///
/// let age = FieldSpec::integer("age")
///     .gt(17)
///     .le(115)
///     .with_title("Person Age")
///     .with_example(25);
/// assert!(age.required);
/// assert_eq!(age.bounds.gt, Some(17));
///
/// let name = FieldSpec::string("name").optional().with_length(1, 50);
/// assert!(!name.required);
/// assert_eq!(name.bounds.max_length, Some(50));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears in raw input.
    pub name: String,
    /// Accepted value kind.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Whether the field must be present.
    #[serde(default = "required_by_default", skip_serializing_if = "is_true")]
    pub required: bool,
    /// Value used when the field is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Length and value bounds.
    #[serde(default, skip_serializing_if = "FieldBounds::is_empty")]
    pub bounds: FieldBounds,
    /// Documentation metadata.
    #[serde(default, skip_serializing_if = "FieldDocs::is_empty")]
    pub docs: FieldDocs,
}

impl FieldSpec {
    /// Creates a required field of the given kind.
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
            default: None,
            bounds: FieldBounds::default(),
            docs: FieldDocs::default(),
        }
    }

    /// Creates a required string field.
    pub fn string(name: &str) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Creates a required integer field.
    pub fn integer(name: &str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Creates a required boolean field.
    pub fn boolean(name: &str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Creates a required email field.
    pub fn email(name: &str) -> Self {
        Self::new(name, FieldKind::Email)
    }

    /// Creates a required URL field.
    pub fn url(name: &str) -> Self {
        Self::new(name, FieldKind::Url)
    }

    /// Creates a required positive integer field.
    pub fn positive_integer(name: &str) -> Self {
        Self::new(name, FieldKind::PositiveInteger)
    }

    /// Creates a required enum field over `choices`.
    ///
    /// # Examples
    ///
    /// ```
    /// use request_schema_core::{FieldKind, FieldSpec};
    ///
    /// let color = FieldSpec::enumeration("hair_color", &["white", "brown"]);
    /// assert_eq!(
    ///     color.kind,
    ///     FieldKind::Enum { choices: vec!["white".into(), "brown".into()] }
    /// );
    /// ```
    pub fn enumeration(name: &str, choices: &[&str]) -> Self {
        Self::new(
            name,
            FieldKind::Enum {
                choices: choices.iter().map(|c| c.to_string()).collect(),
            },
        )
    }

    /// Marks the field as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the value used when the field is absent.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets both inclusive length bounds.
    pub fn with_length(self, min: usize, max: usize) -> Self {
        self.min_length(min).max_length(max)
    }

    /// Sets the inclusive minimum length.
    pub fn min_length(mut self, min: usize) -> Self {
        self.bounds.min_length = Some(min);
        self
    }

    /// Sets the inclusive maximum length.
    pub fn max_length(mut self, max: usize) -> Self {
        self.bounds.max_length = Some(max);
        self
    }

    /// Sets an exclusive lower bound.
    pub fn gt(mut self, limit: i64) -> Self {
        self.bounds.gt = Some(limit);
        self
    }

    /// Sets an inclusive lower bound.
    pub fn ge(mut self, limit: i64) -> Self {
        self.bounds.ge = Some(limit);
        self
    }

    /// Sets an exclusive upper bound.
    pub fn lt(mut self, limit: i64) -> Self {
        self.bounds.lt = Some(limit);
        self
    }

    /// Sets an inclusive upper bound.
    pub fn le(mut self, limit: i64) -> Self {
        self.bounds.le = Some(limit);
        self
    }

    /// Adds a title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.docs.title = Some(title.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.docs.description = Some(desc.to_string());
        self
    }

    /// Adds an example value.
    pub fn with_example(mut self, example: impl Into<Value>) -> Self {
        self.docs.example = Some(example.into());
        self
    }

    /// Returns `true` if absence of this field is a validation error.
    pub fn is_mandatory(&self) -> bool {
        self.required && self.default.is_none()
    }
}

/// Ordered collection of fields describing one input or output shape.
///
/// Declaration order is significant: validation visits fields and reports
/// errors in this order, and projected records keep it.
///
/// # Examples
///
/// ```
/// use request_schema_core::{FieldSpec, RecordSpec};
///
/// let location = RecordSpec::new("location")
///     .with_field(FieldSpec::string("city").with_length(1, 35))
///     .with_field(FieldSpec::string("country").with_length(1, 35));
///
/// assert_eq!(location.field_names(), vec!["city", "country"]);
/// assert!(location.field("city").is_some());
/// assert!(location.field("zip").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSpec {
    /// Spec name, unique within a package.
    pub name: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl RecordSpec {
    /// Creates an empty spec with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Appends a field.
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Finds a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns `true` if the spec declares a field called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Gets all field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the spec has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
