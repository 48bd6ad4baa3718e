//! External tool invocation.
//!
//! Tools run to completion with captured output. A non-zero exit becomes
//! [`CliError::ExecutionFailed`] carrying stderr; nothing is retried.

use std::path::{Path, PathBuf};
use std::process::Output;

use crate::error::{CliError, Result};

/// Run `program` with `args`, failing on a non-zero exit status.
pub async fn run_tool(program: &str, args: &[String], cwd: Option<&Path>) -> Result<Output> {
    log::debug!("Running {} {}", program, args.join(" "));

    let mut command = tokio::process::Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output().await.map_err(|e| CliError::ExecutionFailed {
        command: program.to_string(),
        reason: format!("failed to execute: {}", e),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CliError::ExecutionFailed {
            command: format!("{} {}", program, args.first().map(String::as_str).unwrap_or("")),
            reason: format!("exit status {:?}: {}", output.status.code(), stderr.trim()),
        }
        .into());
    }

    Ok(output)
}

/// Run `program` and return its trimmed stdout.
pub async fn capture(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let output = run_tool(program, &args, cwd).await?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Locate `tool` on `PATH`.
pub fn require_tool(tool: &str, hint: &str) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool, e);
            Err(CliError::ToolMissing {
                tool: tool.to_string(),
                hint: hint.to_string(),
            }
            .into())
        }
    }
}

/// Whether `tool` is on `PATH`.
pub fn has_tool(tool: &str) -> bool {
    which::which(tool).is_ok()
}
