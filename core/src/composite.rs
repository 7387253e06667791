//! Validation of requests that carry several independent records.
//!
//! A request such as "update person" carries a person body, a location body
//! and a path parameter. Each part has its own spec and is validated on its
//! own; the request succeeds only when every part does, and failures from
//! all parts are reported together.
//!
//! # Example
//!
//! ```
//! use request_schema_core::*;
//! use serde_json::json;
//!
//! let person = RecordSpec::new("person").with_field(FieldSpec::string("first_name"));
//! let location = RecordSpec::new("location").with_field(FieldSpec::string("city"));
//!
//! let person_raw = json!({"first_name": "Miguel"});
//! let location_raw = json!({});
//!
//! let result = assemble_composite(&[
//!     CompositePart::new("person", &person, person_raw.as_object().unwrap()),
//!     CompositePart::new("location", &location, location_raw.as_object().unwrap()),
//! ]);
//!
//! assert!(result.get("person").unwrap().is_ok());
//! let errors = result.into_result().unwrap_err();
//! assert_eq!(errors.part_names(), vec!["location"]);
//! ```

use std::fmt;

use serde::Serialize;

use crate::validate::{FieldErrors, RawRecord, ValidationResult, validate};
use crate::{Record, RecordSpec};

/// One named part of a composite request.
#[derive(Debug, Clone, Copy)]
pub struct CompositePart<'a> {
    /// Part name (e.g. `person`, `location`, `path`).
    pub name: &'a str,
    /// Spec for this part.
    pub spec: &'a RecordSpec,
    /// Raw decoded input for this part.
    pub raw: &'a RawRecord,
}

impl<'a> CompositePart<'a> {
    /// Creates a part.
    pub fn new(name: &'a str, spec: &'a RecordSpec, raw: &'a RawRecord) -> Self {
        Self { name, spec, raw }
    }
}

/// Per-part validation outcomes, in part order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeResult {
    parts: Vec<(String, ValidationResult)>,
}

impl CompositeResult {
    /// Returns the outcome for the part called `name`.
    pub fn get(&self, name: &str) -> Option<&ValidationResult> {
        self.parts
            .iter()
            .find(|(part, _)| part == name)
            .map(|(_, result)| result)
    }

    /// Iterates over `(part name, outcome)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationResult)> {
        self.parts.iter().map(|(name, result)| (name.as_str(), result))
    }

    /// Returns `true` if every part validated.
    pub fn is_ok(&self) -> bool {
        self.parts.iter().all(|(_, result)| result.is_ok())
    }

    /// Collapses into all records or all failing parts.
    pub fn into_result(self) -> Result<CompositeRecord, CompositeErrors> {
        let mut records = Vec::with_capacity(self.parts.len());
        let mut failures = Vec::new();

        for (name, result) in self.parts {
            match result {
                Ok(record) => records.push((name, record)),
                Err(errors) => failures.push(PartErrors { part: name, errors }),
            }
        }

        if failures.is_empty() {
            Ok(CompositeRecord { parts: records })
        } else {
            Err(CompositeErrors { parts: failures })
        }
    }
}

/// Validated records of a successful composite request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeRecord {
    parts: Vec<(String, Record)>,
}

impl CompositeRecord {
    /// Returns the record for the part called `name`.
    pub fn get(&self, name: &str) -> Option<&Record> {
        self.parts
            .iter()
            .find(|(part, _)| part == name)
            .map(|(_, record)| record)
    }

    /// Removes and returns the record for `name`.
    pub fn take(&mut self, name: &str) -> Option<Record> {
        let index = self.parts.iter().position(|(part, _)| part == name)?;
        Some(self.parts.remove(index).1)
    }

    /// Iterates over `(part name, record)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.parts.iter().map(|(name, record)| (name.as_str(), record))
    }
}

/// Errors of one failing part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartErrors {
    /// Part name.
    pub part: String,
    /// The part's field errors.
    pub errors: FieldErrors,
}

/// Every failing part of a composite request, in part order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompositeErrors {
    parts: Vec<PartErrors>,
}

impl CompositeErrors {
    /// Iterates over failing parts.
    pub fn iter(&self) -> std::slice::Iter<'_, PartErrors> {
        self.parts.iter()
    }

    /// Returns the names of the failing parts.
    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.part.as_str()).collect()
    }

    /// Returns the errors for part `name`, if it failed.
    pub fn for_part(&self, name: &str) -> Option<&FieldErrors> {
        self.parts
            .iter()
            .find(|p| p.part == name)
            .map(|p| &p.errors)
    }

    /// Total number of field errors across parts.
    pub fn error_count(&self) -> usize {
        self.parts.iter().map(|p| p.errors.len()).sum()
    }
}

impl fmt::Display for CompositeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .parts
            .iter()
            .map(|p| format!("{}: {}", p.part, p.errors))
            .collect();
        f.write_str(&rendered.join(" | "))
    }
}

impl std::error::Error for CompositeErrors {}

/// Validates every part independently.
///
/// Part outcomes are kept in input order and keyed by part name.
pub fn assemble_composite(parts: &[CompositePart<'_>]) -> CompositeResult {
    CompositeResult {
        parts: parts
            .iter()
            .map(|part| (part.name.to_string(), validate(part.spec, part.raw)))
            .collect(),
    }
}
