//! Service configuration.
//!
//! Defines the YAML-serializable configuration that tells a host where to
//! load its specs from and which people records exist.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! specs:
//!   dirs:
//!     - specs/
//!   bundles:
//!     - specs.json
//!   builtin_fallback: true
//! people:
//!   known_ids: [1, 2, 3, 4, 5]
//! ```
//!
//! Every section is optional; missing sections take their defaults.

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loader::DatabaseBuilder;

/// Where specs are loaded from.
///
/// Directories are tried before bundles, each in listed order.
///
/// # Examples
///
/// ```
/// # use request_schema_db::SpecSourcesConfig;
/// let sources = SpecSourcesConfig::default();
/// assert!(sources.dirs.is_empty());
/// assert!(sources.builtin_fallback);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecSourcesConfig {
    /// Directories of individual spec files.
    pub dirs: Vec<PathBuf>,
    /// Package bundle files.
    pub bundles: Vec<PathBuf>,
    /// Fall back to the host's built-in specs when no source loads.
    pub builtin_fallback: bool,
}

impl Default for SpecSourcesConfig {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            bundles: Vec::new(),
            builtin_fallback: true,
        }
    }
}

impl SpecSourcesConfig {
    /// Returns `true` if no directory or bundle is configured.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.bundles.is_empty()
    }

    /// Returns a [`DatabaseBuilder`] with every configured source added in
    /// order.
    pub fn builder(&self) -> DatabaseBuilder {
        let builder = self
            .dirs
            .iter()
            .fold(DatabaseBuilder::new(), |b, dir| b.from_dir(dir));
        self.bundles
            .iter()
            .fold(builder, |b, bundle| b.from_bundle(bundle))
    }
}

/// People records known to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeopleConfig {
    /// Ids that `show_person_by_id` reports as existing.
    pub known_ids: Vec<i64>,
}

impl Default for PeopleConfig {
    fn default() -> Self {
        Self {
            known_ids: (1..=5).collect(),
        }
    }
}

impl PeopleConfig {
    /// Returns `true` if `id` is a known person id.
    pub fn is_known(&self, id: i64) -> bool {
        self.known_ids.contains(&id)
    }
}

/// Top-level service configuration.
///
/// Loaded from a YAML file (typically `request-schema.yml` next to the
/// service).
///
/// # Examples
///
/// ```
/// use request_schema_db::ServiceConfig;
///
/// let config: ServiceConfig = serde_yaml::from_str("version: \"1.0\"").unwrap();
/// assert!(config.specs.builtin_fallback);
/// assert!(config.people.is_known(3));
/// assert!(!config.people.is_known(6));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Configuration format version (e.g., `"1.0"`).
    #[serde(default = "default_version")]
    pub version: String,
    /// Spec sources.
    #[serde(default)]
    pub specs: SpecSourcesConfig,
    /// Known people.
    #[serde(default)]
    pub people: PeopleConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            specs: SpecSourcesConfig::default(),
            people: PeopleConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DatabaseError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::DatabaseError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DatabaseError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::DatabaseError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
specs:
  dirs:
    - /srv/specs
  bundles:
    - /srv/specs.json
    - /srv/specs.yml
  builtin_fallback: false
people:
  known_ids: [10, 20]
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: ServiceConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.specs.dirs, vec![PathBuf::from("/srv/specs")]);
        assert_eq!(config.specs.bundles.len(), 2);
        assert!(!config.specs.builtin_fallback);
        assert_eq!(config.people.known_ids, vec![10, 20]);
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let config: ServiceConfig = serde_yaml::from_str("specs:\n  dirs: [specs]\n").unwrap();
        assert_eq!(config.version, "1.0");
        assert!(config.specs.bundles.is_empty());
        assert!(config.specs.builtin_fallback);
        assert_eq!(config.people.known_ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_builder_orders_dirs_before_bundles() {
        let dir = std::env::temp_dir().join("rs_db_test_config_order");
        std::fs::remove_dir_all(&dir).ok();
        let specs_dir = dir.join("specs");
        std::fs::create_dir_all(&specs_dir).unwrap();
        std::fs::write(specs_dir.join("from_dir.json"), r#"{"name": "from_dir"}"#).unwrap();
        let bundle = dir.join("specs.json");
        std::fs::write(
            &bundle,
            r#"{"version": "1.0.0", "generated_at": "2026-01-01T00:00:00Z", "specs": [{"name": "from_bundle"}]}"#,
        )
        .unwrap();

        let sources = SpecSourcesConfig {
            dirs: vec![specs_dir],
            bundles: vec![bundle],
            builtin_fallback: false,
        };
        let db = sources.builder().build().unwrap();
        assert!(db.contains("from_dir"));
        assert!(!db.contains("from_bundle"));
        assert!(ServiceConfig::default().specs.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = std::env::temp_dir().join("rs_db_test_config_rt");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yml");

        let original: ServiceConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = ServiceConfig::load(&path).unwrap();
        assert_eq!(loaded, original);

        std::fs::remove_dir_all(&dir).ok();
    }
}
