//! Shared state of the people API.

use request_schema_core::{ComposeError, RecordSpec};
use request_schema_db::{DatabaseError, PeopleConfig, ServiceConfig, SpecDatabase};
use thiserror::Error;
use tracing::{debug, info};

use crate::envelope::HostError;
use crate::shapes::builtin_package;

/// Errors raised while building an [`AppContext`].
#[derive(Debug, Error)]
pub enum ContextError {
    /// Spec loading failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// A built-in derived shape could not be composed.
    #[error("built-in specs are inconsistent: {0}")]
    Compose(#[from] ComposeError),
}

/// Everything an operation needs besides its request: the loaded specs and
/// the known people.
///
/// Built once at startup and shared by reference.
///
/// # Examples
///
/// ```
/// use request_schema_host::AppContext;
///
/// let ctx = AppContext::builtin().unwrap();
/// assert!(ctx.specs().contains("person_out"));
/// assert!(ctx.people().is_known(1));
/// ```
#[derive(Debug, Clone)]
pub struct AppContext {
    specs: SpecDatabase,
    people: PeopleConfig,
}

impl AppContext {
    /// Creates a context from already loaded parts.
    pub fn new(specs: SpecDatabase, people: PeopleConfig) -> Self {
        Self { specs, people }
    }

    /// Builds a context from the built-in specs and default people.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError`] if the built-in specs are broken.
    pub fn builtin() -> Result<Self, ContextError> {
        Self::from_config(&ServiceConfig::default())
    }

    /// Builds a context from a service configuration.
    ///
    /// Configured directories and bundles are tried in order and the first
    /// that loads wins. With `builtin_fallback`, the built-in specs are used
    /// when nothing loads and fill in any name the loaded source lacks.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NoSourcesAvailable`] when no source loads and
    /// the fallback is disabled.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ContextError> {
        let sources = &config.specs;
        let loaded = if sources.is_empty() {
            Err(DatabaseError::NoSourcesAvailable)
        } else {
            sources.builder().build()
        };

        let specs = match (loaded, sources.builtin_fallback) {
            (Ok(mut db), true) => {
                for spec in builtin_package()?.specs {
                    if !db.contains(&spec.name) {
                        debug!(spec = %spec.name, "filling in built-in spec");
                        db.insert(spec)?;
                    }
                }
                db
            }
            (Ok(db), false) => db,
            (Err(err), true) => {
                debug!(error = %err, "no spec source loaded, using built-in specs");
                SpecDatabase::from_package(builtin_package()?)?
            }
            (Err(err), false) => return Err(err.into()),
        };

        info!(
            specs = specs.len(),
            known_people = config.people.known_ids.len(),
            "built application context"
        );
        Ok(Self::new(specs, config.people.clone()))
    }

    /// Returns the loaded specs.
    pub fn specs(&self) -> &SpecDatabase {
        &self.specs
    }

    /// Returns the known people.
    pub fn people(&self) -> &PeopleConfig {
        &self.people
    }

    /// Looks up a spec an operation depends on.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::MissingSpec`] (a 500) when it is not loaded.
    pub fn spec(&self, name: &str) -> Result<&RecordSpec, HostError> {
        self.specs
            .get(name)
            .ok_or_else(|| HostError::MissingSpec(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use request_schema_core::{FieldSpec, RecordSpec};
    use request_schema_db::{SpecSourcesConfig, write_file};

    use super::*;
    use crate::shapes::{LOCATION, PERSON};

    #[test]
    fn test_builtin_context() {
        let ctx = AppContext::builtin().unwrap();
        assert_eq!(ctx.specs().len(), 12);
        assert!(ctx.spec(PERSON).is_ok());
        assert!(matches!(ctx.spec("nope"), Err(HostError::MissingSpec(_))));
    }

    #[test]
    fn test_no_sources_without_fallback() {
        let config = ServiceConfig {
            specs: SpecSourcesConfig {
                builtin_fallback: false,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            AppContext::from_config(&config),
            Err(ContextError::Database(DatabaseError::NoSourcesAvailable))
        ));
    }

    #[test]
    fn test_loaded_specs_override_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let location = RecordSpec::new(LOCATION).with_field(FieldSpec::string("city").max_length(10));
        write_file(&dir.path().join("location.json"), &location).unwrap();

        let mut config = ServiceConfig::default();
        config.specs.dirs.push(dir.path().to_path_buf());

        let ctx = AppContext::from_config(&config).unwrap();
        assert_eq!(ctx.spec(LOCATION).unwrap(), &location);
        assert!(ctx.spec(PERSON).is_ok());

        config.specs.builtin_fallback = false;
        let ctx = AppContext::from_config(&config).unwrap();
        assert_eq!(ctx.specs().names(), vec![LOCATION]);
    }
}
