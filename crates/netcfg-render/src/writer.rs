//! Persist a composed configuration.

use std::path::{Path, PathBuf};

const ARTIFACT_SUFFIX: &str = "_config.txt";

/// Default artifact location for a device.
///
/// `<output_dir>/<device>_config.txt` when an output directory is given,
/// otherwise next to the input file.
pub fn output_path(device: &str, input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let filename = format!("{device}{ARTIFACT_SUFFIX}");
    match output_dir {
        Some(dir) => dir.join(filename),
        None => input
            .parent()
            .map(|parent| parent.join(&filename))
            .unwrap_or_else(|| PathBuf::from(&filename)),
    }
}

/// Write `text` to `path`, creating the parent directory if needed.
///
/// Existing content is overwritten. The bytes written are exactly `text`.
pub fn write(text: &str, path: &Path) -> Result<(), WriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, text).map_err(|e| WriteError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), bytes = text.len(), "Wrote configuration");
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
