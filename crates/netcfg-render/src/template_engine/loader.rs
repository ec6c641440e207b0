//! Load section template sources from a templates directory into Tera.

use std::collections::BTreeMap;
use std::path::Path;

use tera::Tera;
use walkdir::WalkDir;

/// Templates that compiled, plus the compile error for each one that did not.
#[derive(Debug)]
pub(crate) struct LoadedTemplates {
    pub tera: Tera,
    pub broken: BTreeMap<String, String>,
}

/// Read every file under `dir` (recursively), keyed by its path relative to
/// `dir` with `/` separators.
///
/// Symlinked directories are not descended into; symlinks to files are read.
/// A missing directory yields no sources, so every section resolves as absent.
pub(crate) fn read_sources(dir: &Path) -> Vec<(String, String)> {
    let mut sources = Vec::new();
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "Templates directory does not exist");
        return sources;
    }

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable templates directory entry");
                continue;
            }
        };
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        match std::fs::read_to_string(entry.path()) {
            Ok(content) => sources.push((name, content)),
            Err(e) => {
                tracing::warn!(
                    path = %entry.path().display(),
                    error = %e,
                    "Skipping unreadable template file"
                );
            }
        }
    }

    sources.sort_by(|a, b| a.0.cmp(&b.0));
    tracing::debug!(dir = %dir.display(), count = sources.len(), "Read template sources");
    sources
}

/// Compile sources into a single Tera instance.
///
/// The whole set is compiled in one batch first so that `extends`/`include`
/// relationships resolve regardless of order. If that fails, templates are
/// admitted one at a time and any that cannot compile against the admitted
/// set are recorded in `broken` instead of poisoning the rest.
pub(crate) fn compile(sources: Vec<(String, String)>) -> LoadedTemplates {
    let mut tera = new_tera();
    if tera.add_raw_templates(sources.clone()).is_ok() {
        return LoadedTemplates {
            tera,
            broken: BTreeMap::new(),
        };
    }

    let mut admitted: Vec<(String, String)> = Vec::new();
    let mut pending = sources;
    let mut failures = BTreeMap::new();

    // Retry until a pass admits nothing new, so children listed before
    // their parent still get in.
    loop {
        let mut progressed = false;
        let mut still_pending = Vec::new();
        for (name, content) in pending {
            let mut candidate = admitted.clone();
            candidate.push((name.clone(), content.clone()));
            match new_tera().add_raw_templates(candidate) {
                Ok(()) => {
                    failures.remove(&name);
                    admitted.push((name, content));
                    progressed = true;
                }
                Err(e) => {
                    failures.insert(name.clone(), error_chain(&e));
                    still_pending.push((name, content));
                }
            }
        }
        pending = still_pending;
        if !progressed || pending.is_empty() {
            break;
        }
    }

    let mut tera = new_tera();
    if let Err(e) = tera.add_raw_templates(admitted) {
        // Every admitted template compiled together in the last successful
        // candidate, so this is not expected.
        tracing::error!(error = %error_chain(&e), "Failed to rebuild template set");
    }

    for (name, reason) in &failures {
        tracing::warn!(template = %name, error = %reason, "Template failed to compile");
    }

    LoadedTemplates {
        tera,
        broken: failures,
    }
}

fn new_tera() -> Tera {
    let mut tera = Tera::default();
    // Device configuration is plain text, never HTML.
    tera.autoescape_on(vec![]);
    tera
}

/// Flatten a Tera error and its causes into one line.
pub(crate) fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
