//! Spec database loading, bundle hashing and service configuration.
//!
//! This crate provides infrastructure for loading record specs from various
//! sources (directories, bundle files, in-memory packages), sealing bundles
//! with a content hash, and reading the service configuration that ties the
//! two together.
//!
//! # Quick start
//!
//! ```no_run
//! use request_schema_db::{ServiceConfig, SpecDatabase};
//!
//! // Load specs from a directory
//! let db = SpecDatabase::from_dir("specs/").unwrap();
//! if let Some(spec) = db.get("person") {
//!     println!("person has {} fields", spec.len());
//! }
//!
//! // Or follow the sources listed in a config file
//! let config = ServiceConfig::load("request-schema.yml").unwrap();
//! let db = config.specs.builder().build().unwrap();
//! ```

mod bundle;
mod config;
mod error;
mod format;
mod loader;

pub use bundle::{compute_bundle_hash, read_bundle, seal_package, verify_bundle_hash, write_bundle};
pub use config::{PeopleConfig, ServiceConfig, SpecSourcesConfig};
pub use error::{DatabaseError, Result};
pub use format::{SpecFileFormat, read_file, write_file};
pub use loader::{DatabaseBuilder, DatabaseSource, SpecDatabase};
