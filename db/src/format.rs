//! Spec file formats.
//!
//! Spec and package files are JSON or YAML, chosen by file extension.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{DatabaseError, Result};

/// On-disk format of a spec or package file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFileFormat {
    /// `*.json`
    Json,
    /// `*.yaml` / `*.yml`
    Yaml,
}

impl SpecFileFormat {
    /// Detects the format from `path`'s extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use request_schema_db::SpecFileFormat;
    ///
    /// assert_eq!(SpecFileFormat::from_path("specs/person.yml"), Some(SpecFileFormat::Yaml));
    /// assert_eq!(SpecFileFormat::from_path("bundle.json"), Some(SpecFileFormat::Json));
    /// assert_eq!(SpecFileFormat::from_path("notes.txt"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Reads and deserializes `path` using the format implied by its extension.
///
/// # Errors
///
/// Returns [`DatabaseError::UnsupportedFormat`] for unknown extensions,
/// [`DatabaseError::IoError`] if the file cannot be opened, or a JSON/YAML
/// error if parsing fails.
pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = SpecFileFormat::from_path(path)
        .ok_or_else(|| DatabaseError::UnsupportedFormat(path.display().to_string()))?;
    let reader = BufReader::new(File::open(path)?);
    let value = match format {
        SpecFileFormat::Json => serde_json::from_reader(reader)?,
        SpecFileFormat::Yaml => serde_yaml::from_reader(reader)?,
    };
    Ok(value)
}

/// Serializes `value` to `path` using the format implied by its extension.
///
/// JSON output is pretty-printed.
///
/// # Errors
///
/// Returns [`DatabaseError::UnsupportedFormat`] for unknown extensions,
/// [`DatabaseError::IoError`] if the file cannot be created, or a JSON/YAML
/// error if serialization fails.
pub fn write_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let format = SpecFileFormat::from_path(path)
        .ok_or_else(|| DatabaseError::UnsupportedFormat(path.display().to_string()))?;
    let writer = BufWriter::new(File::create(path)?);
    match format {
        SpecFileFormat::Json => serde_json::to_writer_pretty(writer, value)?,
        SpecFileFormat::Yaml => serde_yaml::to_writer(writer, value)?,
    }
    Ok(())
}
