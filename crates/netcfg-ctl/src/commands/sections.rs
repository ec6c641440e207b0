//! `netcfg sections`: show the effective registry and whether each template resolves.

use std::path::PathBuf;
use std::process::ExitCode;

use netcfg_render::SectionRenderer;

use crate::cli_config::{LoadedConfig, DEFAULT_TEMPLATES_DIR};
use crate::output;

pub(crate) fn handle_sections_command(
    templates_dir: Option<PathBuf>,
    loaded: &LoadedConfig,
) -> anyhow::Result<ExitCode> {
    let cli_config = &loaded.config;
    let registry = cli_config.registry()?;
    let templates_dir = templates_dir
        .or_else(|| cli_config.templates_path())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR));
    let renderer = SectionRenderer::from_dir(&templates_dir);

    let source = if cli_config.sections.is_empty() {
        "built-in"
    } else {
        "config file"
    };
    output::header(format!("Sections ({source}), in render order:"));
    output::label("Config", &loaded.source);
    output::label("Templates", templates_dir.display());
    for (idx, entry) in registry.iter().enumerate() {
        let found = renderer.contains(&entry.template);
        output::section_status(
            found,
            format!(
                "{}. {} [{}]{}",
                idx + 1,
                entry.name,
                entry.template,
                if found { "" } else { " (template not found)" }
            ),
        );
    }

    Ok(ExitCode::SUCCESS)
}
