//! `netcfg render`: load input, compose sections, write, optionally validate.

use std::path::PathBuf;
use std::process::ExitCode;

use netcfg_render::{compose_detailed, output_path, validate, write, Document, SectionRenderer};

use super::validate::report_validation;
use crate::cli_config::{CliConfig, DEFAULT_DEVICE_NAME, DEFAULT_TEMPLATES_DIR};
use crate::output;
use crate::RenderArgs;

pub(crate) fn handle_render_command(
    args: RenderArgs,
    cli_config: &CliConfig,
) -> anyhow::Result<ExitCode> {
    // Flags win over config, config wins over built-in defaults.
    let templates_dir = args
        .templates_dir
        .or_else(|| cli_config.templates_path())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR));
    let output_dir = args.output_dir.or_else(|| cli_config.output_path());
    let device_name = args
        .device_name
        .or_else(|| cli_config.device_name.clone())
        .unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string());
    let registry = cli_config.registry()?;

    let document = Document::load(&args.input)?;
    output::success(format!("Loaded input file: {}", args.input.display()));

    let renderer = SectionRenderer::from_dir(&templates_dir);
    output::header("Rendering configuration sections...");
    let composition = compose_detailed(&document, &registry, &renderer);
    for (entry, outcome) in registry.iter().zip(&composition.sections) {
        let note = if outcome.is_included() { "" } else { " (empty, omitted)" };
        output::section_status(
            outcome.is_included(),
            format!("{} [{}]{note}", entry.name, entry.template),
        );
    }

    let destination = output_path(&device_name, &args.input, output_dir.as_deref());
    write(&composition.text, &destination)?;
    output::success(format!("Configuration rendered: {}", destination.display()));

    if args.validate && !report_validation(&validate(&composition.text)) {
        return Ok(ExitCode::FAILURE);
    }

    output::success("Configuration rendering complete");
    Ok(ExitCode::SUCCESS)
}
