//! `netcfg validate`: check an existing rendered configuration.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use netcfg_render::{validate, ValidationResult};

use crate::output;

pub(crate) fn handle_validate_command(file: &Path, json: bool) -> anyhow::Result<ExitCode> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let result = validate(&text);

    let passed = if json {
        output::plain(serde_json::to_string_pretty(&result)?);
        result.passed
    } else {
        report_validation(&result)
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print a validation result. Returns whether it passed.
pub(crate) fn report_validation(result: &ValidationResult) -> bool {
    if result.passed {
        output::success("Configuration validation passed");
        return true;
    }

    output::error("Validation errors found:");
    for finding in &result.findings {
        output::item(finding);
    }
    false
}
