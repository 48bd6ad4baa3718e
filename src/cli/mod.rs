//! Command line interface for appdrop.
//!
//! This module provides the CLI for release operations, with argument
//! parsing, command execution, and user feedback.

mod args;
pub mod commands;
pub mod exec;
mod output;

pub use args::{Args, Command, DoctorArgs, ProjectArgs, PublishArgs, ReleaseArgs, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    // Loaded before parsing so clap's env fallbacks see .env values.
    crate::secrets::load_dotenv();

    let args = Args::parse_args();
    init_logging(&args);
    validate_args(&args)?;

    let config = create_runtime_config(&args);
    match args.resolved_command() {
        Command::Release(release) => commands::run_release(&release, &config).await?,
        Command::Doctor(doctor) => commands::run_doctor(&doctor, &config)?,
        Command::Publish(publish) => commands::run_publish(&publish, &config).await?,
    }
    Ok(0)
}

fn init_logging(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Validate arguments without executing (for testing)
pub fn validate_args(args: &Args) -> std::result::Result<(), CliError> {
    args.validate()
}

/// Create runtime configuration from arguments
pub fn create_runtime_config(args: &Args) -> RuntimeConfig {
    RuntimeConfig::from(args)
}
