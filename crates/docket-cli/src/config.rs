//! CLI configuration.
//!
//! The config file is TOML, resolved in order from `--config`,
//! `DOCKET_CONFIG`, then `<config dir>/docket/config.toml`. A missing file
//! yields [`DocketConfig::default`].

use std::path::{Path, PathBuf};

use docket_acl::{PolicyConfig, RolePolicy};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Project name, used for config and data directories.
pub const PROJECT_NAME: &str = "docket";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocketConfig {
    /// The resource the CLI operates on.
    pub resource: ResourceConfig,
    /// Log output.
    pub logging: LoggingConfig,
    /// Who may do what.
    pub policy: PolicyConfig,
}

/// `[resource]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Resource name, used in log records.
    pub name: String,
    /// JSON file the documents live in. Defaults to
    /// `<data dir>/docket/<name>.json`.
    pub data_file: Option<PathBuf>,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            name: "documents".to_string(),
            data_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Default for DocketConfig {
    /// An `admin` role with full access, and an `editor` role that reads
    /// everything but only modifies documents it owns.
    fn default() -> Self {
        let all = || vec!["*".to_string()];
        let names = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        Self {
            resource: ResourceConfig::default(),
            logging: LoggingConfig::default(),
            policy: PolicyConfig {
                owner_attribute: Some("ownerId".to_string()),
                roles: vec![
                    RolePolicy {
                        name: "admin".to_string(),
                        collection_actions: all(),
                        document_actions: all(),
                        owned_document_actions: Vec::new(),
                        readable: all(),
                        writable: all(),
                    },
                    RolePolicy {
                        name: "editor".to_string(),
                        collection_actions: names(&["create", "list"]),
                        document_actions: names(&["read"]),
                        owned_document_actions: names(&["create", "replace", "patch", "destroy"]),
                        readable: all(),
                        writable: all(),
                    },
                ],
            },
        }
    }
}

impl DocketConfig {
    /// The default config file location, if the platform has one.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
    }

    /// An explicit path if given, otherwise the default location.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(p) => Some(PathBuf::from(p)),
            None => Self::default_config_path(),
        }
    }

    /// Load configuration; a missing file gives the defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// The data file, falling back to the platform data directory.
    pub fn data_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.resource.data_file {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|d| {
                d.join(PROJECT_NAME)
                    .join(format!("{}.json", self.resource.name))
            })
            .ok_or_else(|| Error::config("Could not determine data directory for this platform"))
    }
}
