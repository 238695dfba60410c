//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::RosterService;
use crate::application::SchemaValidator;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraResult;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Roster loading and validation
    pub roster: RosterService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    ///
    /// Fails if a configured schema file cannot be read or compiled.
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> InfraResult<Self> {
        let validator = match &settings.schema {
            Some(path) => {
                debug!("using schema {}", path.display());
                SchemaValidator::from_file(fs.as_ref(), path)?
            }
            None => SchemaValidator::default_schema(),
        };
        let roster =
            RosterService::new(Arc::clone(&fs), validator).with_strict_orphans(settings.strict_orphans);

        Ok(Self {
            settings: Arc::new(settings),
            fs,
            roster,
        })
    }
}
