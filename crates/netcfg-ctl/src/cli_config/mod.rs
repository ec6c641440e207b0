//! CLI configuration: default paths and the section registry.
//!
//! Separate from the change-management connection settings, which come from
//! flags or the environment.

pub(crate) mod loader;

pub(crate) use loader::{discovery_candidates, home_dir, resolve_config, LoadedConfig};

use std::path::PathBuf;

use netcfg_render::{RegistryError, SectionEntry, SectionRegistry};
use serde::Deserialize;

pub(crate) const DEFAULT_TEMPLATES_DIR: &str = "templates/arista";
pub(crate) const DEFAULT_DEVICE_NAME: &str = "device";

/// CLI-specific configuration from `.netcfg.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// Root for resolving section template identifiers.
    pub templates_dir: Option<String>,

    /// Default directory for rendered artifacts.
    pub output_dir: Option<String>,

    /// Default device name used for the artifact filename.
    pub device_name: Option<String>,

    /// Ordered section list replacing the built-in registry when non-empty.
    #[serde(default)]
    pub sections: Vec<SectionEntry>,
}

impl CliConfig {
    /// Configured templates directory with `~/` expanded.
    pub fn templates_path(&self) -> Option<PathBuf> {
        self.templates_dir
            .as_deref()
            .map(|dir| loader::expand_home(dir, home_dir().as_deref()))
    }

    /// Configured output directory with `~/` expanded.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output_dir
            .as_deref()
            .map(|dir| loader::expand_home(dir, home_dir().as_deref()))
    }

    /// The effective registry: configured sections, or the built-in set.
    pub fn registry(&self) -> Result<SectionRegistry, RegistryError> {
        if self.sections.is_empty() {
            Ok(SectionRegistry::default())
        } else {
            SectionRegistry::new(self.sections.clone())
        }
    }
}
