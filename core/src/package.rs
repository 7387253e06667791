use serde::{Deserialize, Serialize};

use crate::RecordSpec;

/// Serializable spec bundle used for distribution and startup loading.
///
/// A package groups multiple [`RecordSpec`] values with version metadata so
/// a service can load every shape it validates from a single file.
///
/// # Examples
///
/// ```
/// use request_schema_core::*;
///
/// let mut package = SpecPackage::new("1.0.0", "2024-01-15T10:30:00Z");
/// package.name = Some("people-api".into());
/// package.specs.push(RecordSpec::new("location"));
/// package.specs.push(RecordSpec::new("person"));
///
/// assert_eq!(package.spec_count(), 2);
/// assert!(package.get("person").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecPackage {
    /// Spec contract version (populated from
    /// [`SPEC_CONTRACT_VERSION`](crate::SPEC_CONTRACT_VERSION)).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_version: Option<String>,
    /// Package format version (semver string).
    pub version: String,
    /// Optional package name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional package description.
    #[serde(default)]
    pub description: Option<String>,
    /// ISO-8601 timestamp for package creation.
    pub generated_at: String,
    /// Optional hash of the package's specs.
    #[serde(default)]
    pub bundle_hash: Option<String>,
    /// Record specs included in this package.
    #[serde(default)]
    pub specs: Vec<RecordSpec>,
}

impl SpecPackage {
    /// Creates a package with required fields.
    pub fn new(version: impl Into<String>, generated_at: impl Into<String>) -> Self {
        Self {
            contract_version: Some(crate::SPEC_CONTRACT_VERSION.to_string()),
            version: version.into(),
            name: None,
            description: None,
            generated_at: generated_at.into(),
            bundle_hash: None,
            specs: Vec::new(),
        }
    }

    /// Returns the number of specs in this package.
    pub fn spec_count(&self) -> usize {
        self.specs.len()
    }

    /// Finds a spec by name.
    pub fn get(&self, name: &str) -> Option<&RecordSpec> {
        self.specs.iter().find(|s| s.name == name)
    }
}
