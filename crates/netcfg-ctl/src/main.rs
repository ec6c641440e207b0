//! netcfg CLI
//!
//! Renders network device configurations from YAML input by composing section
//! templates, validates rendered output, and reports pipeline outcomes to the
//! change-management system.

mod cli_config;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "netcfg", version, about = "Render network configurations from YAML input")]
#[command(styles = output::clap_styles())]
pub(crate) struct Cli {
    /// Config file to use instead of discovering `.netcfg.toml`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Render a device configuration from a YAML input file
    Render(RenderArgs),

    /// Validate an already rendered configuration file
    Validate {
        /// Rendered configuration file
        file: PathBuf,

        /// Print the validation result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the configured sections in render order
    Sections {
        /// Templates directory to check identifiers against
        #[arg(long)]
        templates_dir: Option<PathBuf>,
    },

    /// Change-management integration
    #[command(subcommand)]
    Change(ChangeCommands),
}

#[derive(Debug, Args)]
pub(crate) struct RenderArgs {
    /// Path to YAML input file
    pub input: PathBuf,

    /// Device name for the output file (`<device>_config.txt`)
    #[arg(long)]
    pub device_name: Option<String>,

    /// Templates directory
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,

    /// Output directory (defaults to the input file's directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Validate the rendered configuration; exit non-zero if it fails
    #[arg(long)]
    pub validate: bool,
}

/// Change-management connection settings.
#[derive(Debug, Args)]
pub(crate) struct ConnectionArgs {
    /// Instance base URL
    #[arg(long, env = "SERVICENOW_INSTANCE_URL")]
    pub instance_url: Option<String>,

    /// API username
    #[arg(long, env = "SERVICENOW_USERNAME")]
    pub username: Option<String>,

    /// API password
    #[arg(long, env = "SERVICENOW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ChangeCommands {
    /// Move a change request to the state matching a pipeline outcome
    Update {
        /// Change request number [default: $GITHUB_HEAD_REF, then CHG0000000]
        #[arg(long, env = "CHANGE_NUMBER")]
        change_number: Option<String>,

        /// Pipeline outcome: success, failure, cancelled, or anything else
        #[arg(long, env = "WORKFLOW_STATUS", default_value = "unknown")]
        status: String,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Show a change request
    Show {
        /// Change request number
        number: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let candidates = cli_config::discovery_candidates(cli_config::home_dir().as_deref());
    let loaded = cli_config::resolve_config(cli.config.as_deref(), &candidates)?;

    match cli.command {
        Commands::Render(args) => commands::handle_render_command(args, &loaded.config),
        Commands::Validate { file, json } => commands::handle_validate_command(&file, json),
        Commands::Sections { templates_dir } => {
            commands::handle_sections_command(templates_dir, &loaded)
        }
        Commands::Change(cmd) => commands::handle_change_command(cmd).await,
    }
}
