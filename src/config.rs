//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Local config: `<project_dir>/.orgtree.toml`
//! 4. Environment variables: `ORGTREE_*` prefix
//!
//! Command line flags are applied on top by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::DEFAULT_TAB_WIDTH;
use crate::util::path::PathExt;

/// Name of the per-project config file.
pub const LOCAL_CONFIG_FILE: &str = ".orgtree.toml";

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Roster file (default: employees.yml)
    pub roster: PathBuf,
    /// Schema file; the built-in roster schema when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,
    /// Spaces per hierarchy level in the plain listing
    pub tab_width: usize,
    /// Fail when an employee cannot be reached from any root
    pub strict_orphans: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roster: PathBuf::from("employees.yml"),
            schema: None,
            tab_width: DEFAULT_TAB_WIDTH,
            strict_orphans: false,
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// `None` means "not specified here, keep the lower layer".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub roster: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    pub tab_width: Option<usize>,
    pub strict_orphans: Option<bool>,
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Get the path to the local config file of a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// `None` for an unset key, an error for a value of the wrong type.
fn present<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            roster: overlay.roster.clone().unwrap_or_else(|| self.roster.clone()),
            schema: overlay.schema.clone().or_else(|| self.schema.clone()),
            tab_width: overlay.tab_width.unwrap_or(self.tab_width),
            strict_orphans: overlay.strict_orphans.unwrap_or(self.strict_orphans),
        }
    }

    /// Load settings with layered precedence, using the XDG global config.
    ///
    /// Relative paths are resolved against `project_dir` when given.
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), project_dir)
    }

    /// Load settings from an explicit global config file.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. `global` config file, if it exists
    /// 3. `<project_dir>/.orgtree.toml`, if it exists
    /// 4. Environment variables: `ORGTREE_*` prefix
    pub fn load_from(
        global: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        if let Some(dir) = project_dir {
            current.resolve_paths(dir);
        }

        Ok(current)
    }

    /// Apply ORGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        Self::apply_env_source(
            settings,
            Environment::with_prefix("ORGTREE").prefix_separator("_"),
        )
    }

    /// A variable that is set but does not parse is an error, not a default.
    fn apply_env_source(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = present(config.get_string("roster"))? {
            settings.roster = PathBuf::from(val);
        }
        if let Some(val) = present(config.get_string("schema"))? {
            settings.schema = Some(PathBuf::from(val));
        }
        if let Some(val) = present(config.get_int("tab_width"))? {
            settings.tab_width = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("ORGTREE_TAB_WIDTH must not be negative: {}", val),
            })?;
        }
        if let Some(val) = present(config.get_bool("strict_orphans"))? {
            settings.strict_orphans = val;
        }

        Ok(settings)
    }

    /// Expand shell variables and tilde in path fields.
    fn expand_paths(&mut self) {
        self.roster = self.roster.expanded();
        self.schema = self.schema.as_deref().map(Path::expanded);
    }

    /// Make relative path fields relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        self.roster = self.roster.resolved_against(base);
        self.schema = self.schema.as_deref().map(|p| p.resolved_against(base));
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
