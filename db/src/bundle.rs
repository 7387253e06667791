//! Spec package bundles and their content hash.
//!
//! A bundle is a [`SpecPackage`] written to disk as JSON or YAML. Its
//! `bundle_hash` is the SHA-256 hex digest of the canonical JSON encoding of
//! the package's specs, so editing any spec after sealing is detectable.
//!
//! # Examples
//!
//! ```
//! use request_schema_core::{FieldSpec, RecordSpec, SpecPackage};
//! use request_schema_db::{compute_bundle_hash, seal_package, verify_bundle_hash};
//!
//! let mut package = SpecPackage::new("1.0.0", "2026-01-01T00:00:00Z");
//! package.specs.push(RecordSpec::new("login_out").with_field(FieldSpec::string("username")));
//!
//! let package = seal_package(package).unwrap();
//! assert_eq!(package.bundle_hash.as_deref(), Some(compute_bundle_hash(&package).unwrap().as_str()));
//! assert!(verify_bundle_hash(&package).is_ok());
//! ```

use std::path::Path;

use request_schema_core::{SpecPackage, check_package};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{DatabaseError, Result};
use crate::format::{read_file, write_file};

/// Computes the SHA-256 hex digest of the package's specs.
///
/// Only `specs` contribute; version, name and timestamp do not.
///
/// # Errors
///
/// Returns [`DatabaseError::JsonError`] if the specs cannot be serialized.
pub fn compute_bundle_hash(package: &SpecPackage) -> Result<String> {
    let bytes = serde_json::to_vec(&package.specs)?;
    let hash = Sha256::digest(&bytes);
    Ok(format!("{:x}", hash))
}

/// Checks the package's recorded `bundle_hash` against its specs.
///
/// A package without a recorded hash passes.
///
/// # Errors
///
/// Returns [`DatabaseError::InvalidChecksum`] when the recorded and computed
/// hashes differ.
pub fn verify_bundle_hash(package: &SpecPackage) -> Result<()> {
    let Some(recorded) = package.bundle_hash.as_deref() else {
        return Ok(());
    };
    let computed = compute_bundle_hash(package)?;
    if recorded == computed {
        Ok(())
    } else {
        Err(DatabaseError::InvalidChecksum(format!(
            "recorded {recorded}, computed {computed}"
        )))
    }
}

/// Structurally checks the package and stamps its `bundle_hash`.
///
/// # Errors
///
/// Returns [`DatabaseError::InvalidSpec`] if the package fails its
/// structural checks.
pub fn seal_package(mut package: SpecPackage) -> Result<SpecPackage> {
    let problems = check_package(&package);
    if !problems.is_empty() {
        return Err(DatabaseError::InvalidSpec {
            name: package.name.clone().unwrap_or_else(|| "package".to_string()),
            problems,
        });
    }
    let hash = compute_bundle_hash(&package)?;
    debug!(specs = package.spec_count(), hash = %hash, "sealed spec package");
    package.bundle_hash = Some(hash);
    Ok(package)
}

/// Reads a bundle file and verifies its hash.
///
/// # Errors
///
/// Returns an I/O or parse error if the file cannot be read, or
/// [`DatabaseError::InvalidChecksum`] if the specs were edited after sealing.
pub fn read_bundle(path: impl AsRef<Path>) -> Result<SpecPackage> {
    let package: SpecPackage = read_file(path.as_ref())?;
    verify_bundle_hash(&package)?;
    Ok(package)
}

/// Seals `package` and writes it to `path` (JSON or YAML by extension).
///
/// Returns the sealed package.
///
/// # Errors
///
/// Returns [`DatabaseError::InvalidSpec`] if the package fails its checks,
/// or an I/O or serialization error if the file cannot be written.
pub fn write_bundle(path: impl AsRef<Path>, package: SpecPackage) -> Result<SpecPackage> {
    let path = path.as_ref();
    let package = seal_package(package)?;
    write_file(path, &package)?;
    info!(
        bundle = %path.display(),
        specs = package.spec_count(),
        "wrote spec bundle"
    );
    Ok(package)
}

#[cfg(test)]
mod tests {
    use request_schema_core::{FieldSpec, RecordSpec};

    use super::*;

    fn sample_package() -> SpecPackage {
        let mut package = SpecPackage::new("1.0.0", "2026-01-01T00:00:00Z");
        package.specs.push(
            RecordSpec::new("location")
                .with_field(FieldSpec::string("city").with_length(1, 35))
                .with_field(FieldSpec::string("state").with_length(1, 35)),
        );
        package
    }

    #[test]
    fn test_hash_ignores_metadata() {
        let a = sample_package();
        let mut b = sample_package();
        b.version = "9.9.9".into();
        b.generated_at = "2030-01-01T00:00:00Z".into();
        b.name = Some("renamed".into());
        assert_eq!(compute_bundle_hash(&a).unwrap(), compute_bundle_hash(&b).unwrap());
        assert_eq!(compute_bundle_hash(&a).unwrap().len(), 64);
    }

    #[test]
    fn test_verify_detects_edit() {
        let mut package = seal_package(sample_package()).unwrap();
        package.specs[0].fields[0].bounds.max_length = Some(80);
        assert!(matches!(
            verify_bundle_hash(&package),
            Err(DatabaseError::InvalidChecksum(_))
        ));
    }

    #[test]
    fn test_unsealed_package_passes_verification() {
        assert!(verify_bundle_hash(&sample_package()).is_ok());
    }

    #[test]
    fn test_seal_rejects_invalid_package() {
        let mut package = sample_package();
        package.specs.push(RecordSpec::new("location"));
        assert!(matches!(
            seal_package(package),
            Err(DatabaseError::InvalidSpec { .. })
        ));
    }

    #[test]
    fn test_write_and_read_yaml_bundle() {
        let dir = std::env::temp_dir().join("rs_db_test_bundle_yaml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("specs.yaml");

        let written = write_bundle(&path, sample_package()).unwrap();
        let read = read_bundle(&path).unwrap();
        assert_eq!(read, written);
        assert!(read.bundle_hash.is_some());

        std::fs::remove_dir_all(&dir).ok();
    }
}
