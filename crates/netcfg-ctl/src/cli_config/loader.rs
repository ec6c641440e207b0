//! Resolving which `.netcfg.toml` applies to a run.
//!
//! `--config` names a file outright and any problem with it is fatal. Without
//! it the first existing candidate is used: `./.netcfg.toml`, then
//! `~/.config/netcfg.toml`. A discovered file that cannot be read or parsed is
//! reported and the built-in defaults apply.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::CliConfig;

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    /// Named with `--config`.
    Explicit(PathBuf),
    /// First existing discovery candidate.
    Discovered(PathBuf),
    /// No usable file.
    BuiltIn,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "{} (--config)", path.display()),
            Self::Discovered(path) => write!(f, "{}", path.display()),
            Self::BuiltIn => f.write_str("built-in defaults"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct LoadedConfig {
    pub config: CliConfig,
    pub source: ConfigSource,
}

/// Discovery candidates in precedence order.
pub(crate) fn discovery_candidates(home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(".netcfg.toml")];
    if let Some(home) = home {
        candidates.push(home.join(".config").join("netcfg.toml"));
    }
    candidates
}

/// Pick the configuration for this run from `--config` or the candidates.
pub(crate) fn resolve_config(
    explicit: Option<&Path>,
    candidates: &[PathBuf],
) -> anyhow::Result<LoadedConfig> {
    if let Some(path) = explicit {
        return Ok(LoadedConfig {
            config: read_config(path)?,
            source: ConfigSource::Explicit(path.to_path_buf()),
        });
    }

    let Some(found) = candidates.iter().find(|p| p.is_file()) else {
        return Ok(LoadedConfig {
            config: CliConfig::default(),
            source: ConfigSource::BuiltIn,
        });
    };

    match read_config(found) {
        Ok(config) => {
            tracing::debug!(path = %found.display(), "Loaded config file");
            Ok(LoadedConfig {
                config,
                source: ConfigSource::Discovered(found.clone()),
            })
        }
        Err(e) => {
            tracing::warn!(
                error = %format!("{e:#}"),
                "Ignoring config file, using built-in defaults"
            );
            Ok(LoadedConfig {
                config: CliConfig::default(),
                source: ConfigSource::BuiltIn,
            })
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<CliConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

pub(crate) fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Resolve a leading `~/` in a configured path against `home`.
pub(crate) fn expand_home(value: &str, home: Option<&Path>) -> PathBuf {
    match (value.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(value),
    }
}
