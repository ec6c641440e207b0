//! Change-management commands: status update and record lookup.

use std::process::ExitCode;

use netcfg_client::{ChangeClient, Integration, PipelineOutcome};

use crate::output;
use crate::{ChangeCommands, ConnectionArgs};

const DEFAULT_CHANGE_NUMBER: &str = "CHG0000000";

pub(crate) async fn handle_change_command(cmd: ChangeCommands) -> anyhow::Result<ExitCode> {
    match cmd {
        ChangeCommands::Update {
            change_number,
            status,
            connection,
        } => {
            let head_ref = std::env::var("GITHUB_HEAD_REF").ok();
            let change_number = resolve_change_number(change_number, head_ref);
            update_change(&change_number, &status, connection).await
        }

        ChangeCommands::Show {
            number,
            json,
            connection,
        } => show_change(&number, json, connection).await,
    }
}

/// Flag or `CHANGE_NUMBER` first, then the CI head ref (change branches carry
/// the change request number), then the placeholder.
fn resolve_change_number(flag: Option<String>, head_ref: Option<String>) -> String {
    flag.into_iter()
        .chain(head_ref)
        .find(|number| !number.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CHANGE_NUMBER.to_string())
}

fn integration(connection: ConnectionArgs) -> anyhow::Result<Integration> {
    Ok(Integration::from_parts(
        connection.instance_url,
        connection.username,
        connection.password,
    )?)
}

async fn update_change(
    change_number: &str,
    status: &str,
    connection: ConnectionArgs,
) -> anyhow::Result<ExitCode> {
    let config = match integration(connection)? {
        Integration::Enabled(config) => config,
        Integration::Disabled { missing } => {
            output::warning("Change-management credentials not configured - skipping integration");
            output::dim(format!("  missing: {}", missing.join(", ")));
            output::dim(format!("  change request: {change_number}"));
            return Ok(ExitCode::SUCCESS);
        }
    };

    let client = ChangeClient::new(config)?;
    let outcome: PipelineOutcome = status.parse()?;
    let applied = client.report_outcome(change_number, &outcome).await?;

    output::success(format!(
        "Updated change request {change_number} to '{applied}' (pipeline status: {outcome})"
    ));
    Ok(ExitCode::SUCCESS)
}

async fn show_change(
    number: &str,
    json: bool,
    connection: ConnectionArgs,
) -> anyhow::Result<ExitCode> {
    let config = match integration(connection)? {
        Integration::Enabled(config) => config,
        Integration::Disabled { missing } => {
            anyhow::bail!(
                "change-management credentials not configured (missing: {})",
                missing.join(", ")
            );
        }
    };

    let client = ChangeClient::new(config)?;
    let Some(record) = client.find_change_request(number).await? else {
        output::error(format!("Change request {number} not found"));
        return Ok(ExitCode::FAILURE);
    };

    if json {
        output::plain(serde_json::to_string_pretty(&record)?);
        return Ok(ExitCode::SUCCESS);
    }

    output::header(format!("Change request {number}"));
    output::label("sys_id", &record.sys_id);
    for field in ["state", "short_description", "assigned_to", "opened_at"] {
        if let Some(value) = record.field(field) {
            output::label(field, value);
        }
    }
    Ok(ExitCode::SUCCESS)
}
