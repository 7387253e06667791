//! Spec database loading with builder pattern and fallback chains.
//!
//! Provides [`SpecDatabase`] for in-memory spec lookup and
//! [`DatabaseBuilder`] for constructing a database from multiple sources with
//! automatic fallback.
//!
//! # Loading patterns
//!
//! ```no_run
//! use request_schema_db::SpecDatabase;
//!
//! // Load from a directory of JSON/YAML spec files
//! let db = SpecDatabase::from_dir("specs/").unwrap();
//! assert!(db.get("person").is_some());
//!
//! // Load from a single SpecPackage bundle
//! let db = SpecDatabase::from_bundle("specs.json").unwrap();
//!
//! // Use the builder for a fallback chain
//! let db = SpecDatabase::builder()
//!     .from_dir("specs/")
//!     .from_bundle("specs.json")
//!     .build()
//!     .unwrap();
//! ```
//!
//! Every spec is structurally checked on load; a spec with authoring errors
//! is rejected with [`DatabaseError::InvalidSpec`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use request_schema_core::{RecordSpec, SpecPackage, check_package, check_record_spec};
use tracing::{debug, info, warn};

use crate::bundle::read_bundle;
use crate::error::{DatabaseError, Result};
use crate::format::{SpecFileFormat, read_file};

/// Describes where a [`SpecDatabase`] was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseSource {
    /// Loaded from a directory of individual spec files.
    Directory(PathBuf),
    /// Loaded from a single [`SpecPackage`] file.
    Bundle(PathBuf),
    /// Built from an in-memory package.
    Package(String),
    /// Loaded via a fallback chain of multiple sources.
    Multiple(Vec<DatabaseSource>),
}

/// In-memory collection of record specs with O(1) lookup by name.
///
/// # Examples
///
/// ```
/// use request_schema_core::{FieldSpec, RecordSpec, SpecPackage};
/// use request_schema_db::SpecDatabase;
///
/// let mut package = SpecPackage::new("1.0.0", "2026-01-01T00:00:00Z");
/// package.specs.push(
///     RecordSpec::new("location").with_field(FieldSpec::string("city").with_length(1, 35)),
/// );
///
/// let db = SpecDatabase::from_package(package).unwrap();
/// assert_eq!(db.len(), 1);
/// assert!(db.get("location").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SpecDatabase {
    specs: HashMap<String, RecordSpec>,
    source: DatabaseSource,
}

impl SpecDatabase {
    /// Returns a new [`DatabaseBuilder`] for configuring a fallback chain.
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Loads specs from a directory of `*.json`, `*.yaml` and `*.yml` files.
    ///
    /// Each file holds one [`RecordSpec`] and is indexed by its `name`.
    /// Files with other extensions are skipped. When two files declare the
    /// same name, the later one (by file name order) wins and a warning is
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::IoError`] if the directory or a file cannot be
    /// read, a JSON/YAML error if a file does not parse, or
    /// [`DatabaseError::InvalidSpec`] if a spec fails its structural checks.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let file_path = entry?.path();
            if file_path.is_file() && SpecFileFormat::from_path(&file_path).is_some() {
                files.push(file_path);
            }
        }
        files.sort();

        let mut specs = HashMap::new();
        for file_path in files {
            let spec: RecordSpec = read_file(&file_path)?;
            ensure_valid(&spec)?;
            debug!(spec = %spec.name, file = %file_path.display(), "loaded spec file");
            if let Some(previous) = specs.insert(spec.name.clone(), spec) {
                warn!(spec = %previous.name, dir = %path.display(), "spec declared twice, keeping last");
            }
        }

        info!(dir = %path.display(), specs = specs.len(), "loaded spec directory");
        Ok(Self {
            specs,
            source: DatabaseSource::Directory(path.to_path_buf()),
        })
    }

    /// Loads specs from a single [`SpecPackage`] file (JSON or YAML by
    /// extension).
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::IoError`] if the file cannot be read, a
    /// JSON/YAML error if parsing fails, [`DatabaseError::InvalidChecksum`]
    /// if the specs no longer match the recorded `bundle_hash`, or
    /// [`DatabaseError::InvalidSpec`] if the package fails its structural
    /// checks.
    pub fn from_bundle(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let package = read_bundle(path)?;
        let mut db = Self::from_package(package)?;
        db.source = DatabaseSource::Bundle(path.to_path_buf());
        info!(bundle = %path.display(), specs = db.len(), "loaded spec bundle");
        Ok(db)
    }

    /// Builds a database from an in-memory package.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::InvalidSpec`] if the package fails its
    /// structural checks.
    pub fn from_package(package: SpecPackage) -> Result<Self> {
        let problems = check_package(&package);
        if !problems.is_empty() {
            return Err(DatabaseError::InvalidSpec {
                name: package.name.unwrap_or_else(|| "package".to_string()),
                problems,
            });
        }

        let label = package.name.unwrap_or_else(|| package.version.clone());
        let specs = package
            .specs
            .into_iter()
            .map(|spec| (spec.name.clone(), spec))
            .collect();
        Ok(Self {
            specs,
            source: DatabaseSource::Package(label),
        })
    }

    /// Looks up a spec by name in O(1) time.
    pub fn get(&self, name: &str) -> Option<&RecordSpec> {
        self.specs.get(name)
    }

    /// Inserts a spec, replacing any existing entry with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::InvalidSpec`] if the spec fails its
    /// structural checks; the database is left unchanged.
    pub fn insert(&mut self, spec: RecordSpec) -> Result<()> {
        ensure_valid(&spec)?;
        self.specs.insert(spec.name.clone(), spec);
        Ok(())
    }

    /// Returns `true` if the database contains a spec named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Returns the number of specs in the database.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if the database contains no specs.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Returns spec names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.specs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns a reference to the source metadata.
    pub fn source(&self) -> &DatabaseSource {
        &self.source
    }

    /// Packs every spec into a [`SpecPackage`], sorted by name.
    pub fn to_package(&self, version: &str, generated_at: &str) -> SpecPackage {
        let mut package = SpecPackage::new(version, generated_at);
        package.specs = self
            .names()
            .into_iter()
            .filter_map(|name| self.specs.get(name).cloned())
            .collect();
        package
    }
}

fn ensure_valid(spec: &RecordSpec) -> Result<()> {
    let problems = check_record_spec(spec);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(DatabaseError::InvalidSpec {
            name: spec.name.clone(),
            problems,
        })
    }
}

/// Builder for constructing a [`SpecDatabase`] with a fallback chain.
///
/// Sources are tried in the order they are added. The first successful load
/// wins; if all fail, [`DatabaseError::NoSourcesAvailable`] is returned.
///
/// # Example
///
/// ```no_run
/// use request_schema_db::SpecDatabase;
///
/// let db = SpecDatabase::builder()
///     .from_dir("/etc/people-api/specs/")
///     .from_bundle("/etc/people-api/specs.json")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    sources: Vec<DatabaseSource>,
    package: Option<SpecPackage>,
}

impl DatabaseBuilder {
    /// Creates a new builder with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory of spec files as a source.
    pub fn from_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(DatabaseSource::Directory(path.into()));
        self
    }

    /// Adds a [`SpecPackage`] bundle file as a source.
    pub fn from_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(DatabaseSource::Bundle(path.into()));
        self
    }

    /// Adds an in-memory package as the last-resort source.
    ///
    /// Only one fallback package is kept; a later call replaces it.
    pub fn with_fallback(mut self, package: SpecPackage) -> Self {
        let label = package.name.clone().unwrap_or_else(|| package.version.clone());
        self.sources.retain(|s| !matches!(s, DatabaseSource::Package(_)));
        self.sources.push(DatabaseSource::Package(label));
        self.package = Some(package);
        self
    }

    /// Attempts to load specs from configured sources in order.
    ///
    /// Returns the first successfully loaded database. If all sources fail,
    /// returns [`DatabaseError::NoSourcesAvailable`].
    pub fn build(mut self) -> Result<SpecDatabase> {
        if self.sources.is_empty() {
            return Err(DatabaseError::NoSourcesAvailable);
        }

        let all_sources = self.sources.clone();

        for source in &self.sources {
            let result = match source {
                DatabaseSource::Directory(path) => SpecDatabase::from_dir(path),
                DatabaseSource::Bundle(path) => SpecDatabase::from_bundle(path),
                DatabaseSource::Package(_) => match self.package.take() {
                    Some(package) => SpecDatabase::from_package(package),
                    None => continue,
                },
                DatabaseSource::Multiple(_) => continue,
            };

            match result {
                Ok(mut db) => {
                    debug!(source = ?source, "spec source loaded");
                    db.source = DatabaseSource::Multiple(all_sources);
                    return Ok(db);
                }
                Err(err) => warn!(source = ?source, error = %err, "spec source failed"),
            }
        }

        Err(DatabaseError::NoSourcesAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use request_schema_core::FieldSpec;

    fn test_spec(name: &str) -> RecordSpec {
        RecordSpec::new(name).with_field(FieldSpec::string("city").with_length(1, 35))
    }

    fn write_json(dir: &Path, spec: &RecordSpec) {
        let path = dir.join(format!("{}.json", spec.name));
        std::fs::write(path, serde_json::to_string_pretty(spec).unwrap()).unwrap();
    }

    fn fresh_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_from_dir_reads_json_and_yaml() {
        let dir = fresh_dir("rs_db_test_from_dir");
        write_json(&dir, &test_spec("location"));
        std::fs::write(
            dir.join("login_out.yml"),
            "name: login_out\nfields:\n  - name: username\n    type: string\n    bounds:\n      max_length: 20\n",
        )
        .unwrap();
        std::fs::write(dir.join("README.md"), "not a spec").unwrap();

        let db = SpecDatabase::from_dir(&dir).unwrap();
        assert_eq!(db.names(), vec!["location", "login_out"]);
        assert_eq!(db.source(), &DatabaseSource::Directory(dir.clone()));
        assert_eq!(
            db.get("login_out").unwrap().field("username").unwrap().bounds.max_length,
            Some(20)
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_dir_rejects_invalid_spec() {
        let dir = fresh_dir("rs_db_test_invalid_dir");
        let bad = RecordSpec::new("bad").with_field(FieldSpec::string("city").with_length(9, 1));
        write_json(&dir, &bad);

        let err = SpecDatabase::from_dir(&dir).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidSpec { ref name, .. } if name == "bad"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_bundle_json() {
        let dir = fresh_dir("rs_db_test_from_bundle");
        let path = dir.join("bundle.json");

        let mut package = SpecPackage::new("1.0.0", "2026-01-01T00:00:00Z");
        package.specs.push(test_spec("location"));
        package.specs.push(test_spec("address"));
        std::fs::write(&path, serde_json::to_string(&package).unwrap()).unwrap();

        let db = SpecDatabase::from_bundle(&path).unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.source(), &DatabaseSource::Bundle(path.clone()));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_package_rejects_duplicates() {
        let mut package = SpecPackage::new("1.0.0", "2026-01-01T00:00:00Z");
        package.specs.push(test_spec("location"));
        package.specs.push(test_spec("location"));
        assert!(matches!(
            SpecDatabase::from_package(package),
            Err(DatabaseError::InvalidSpec { .. })
        ));
    }

    #[test]
    fn test_builder_fallback_to_package() {
        let mut package = SpecPackage::new("1.0.0", "2026-01-01T00:00:00Z");
        package.name = Some("builtin".into());
        package.specs.push(test_spec("location"));

        let db = SpecDatabase::builder()
            .from_dir("/nonexistent/specs/")
            .from_bundle("/nonexistent/specs.json")
            .with_fallback(package)
            .build()
            .unwrap();
        assert!(db.contains("location"));
        match db.source() {
            DatabaseSource::Multiple(sources) => assert_eq!(sources.len(), 3),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_builder_first_success_wins() {
        let dir = fresh_dir("rs_db_test_builder_first");
        write_json(&dir, &test_spec("from_dir"));

        let mut package = SpecPackage::new("1.0.0", "2026-01-01T00:00:00Z");
        package.specs.push(test_spec("from_package"));

        let db = SpecDatabase::builder()
            .from_dir(&dir)
            .with_fallback(package)
            .build()
            .unwrap();
        assert!(db.contains("from_dir"));
        assert!(!db.contains("from_package"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_builder_all_fail() {
        let result = SpecDatabase::builder()
            .from_dir("/nonexistent/dir1/")
            .from_bundle("/nonexistent/bundle1.json")
            .build();
        assert!(matches!(result, Err(DatabaseError::NoSourcesAvailable)));
        assert!(matches!(
            DatabaseBuilder::new().build(),
            Err(DatabaseError::NoSourcesAvailable)
        ));
    }

    #[test]
    fn test_insert_checks_spec() {
        let mut db = SpecDatabase::from_package(SpecPackage::new("1", "now")).unwrap();
        assert!(db.is_empty());
        db.insert(test_spec("location")).unwrap();
        assert!(db.insert(RecordSpec::new(" ")).is_err());
        assert_eq!(db.len(), 1);

        let package = db.to_package("2.0.0", "2026-01-01T00:00:00Z");
        assert_eq!(package.spec_count(), 1);
        assert_eq!(package.version, "2.0.0");
    }
}
