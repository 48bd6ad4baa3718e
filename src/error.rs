//! Error types for release planning and invocation.
//!
//! Every failure is local and synchronous. Resolution is pure, so a failed
//! resolution never leaves artifacts behind, and nothing here is retried.

use std::path::Path;
use thiserror::Error;

/// Result type alias for appdrop operations
pub type Result<T> = std::result::Result<T, AppdropError>;

/// Main error type for all appdrop operations
#[derive(Error, Debug)]
pub enum AppdropError {
    /// No buildable project, or an explicit path that does not exist
    #[error("{message}")]
    NotFound {
        /// Operator-facing description
        message: String,
    },

    /// Required project artifacts are still missing after overrides
    #[error("{message}")]
    Configuration {
        /// Operator-facing description
        message: String,
        /// Where the operator should go to fix it
        hint: String,
    },

    /// Malformed input to an argument builder
    #[error("{message}")]
    Validation {
        /// Operator-facing description
        message: String,
    },

    /// A required secret is not present in the environment
    #[error("Missing {name}")]
    MissingEnv {
        /// Environment variable name
        name: String,
    },

    /// CLI argument and invocation errors
    #[error(transparent)]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Property list errors
    #[error("Property list error: {0}")]
    Plist(#[from] plist::Error),

    /// Generic errors from anyhow
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Conflicting arguments
    #[error("Conflicting arguments: {arguments:?}")]
    ConflictingArguments {
        /// Arguments that conflict
        arguments: Vec<String>,
    },

    /// An external tool could not be started or exited unsuccessfully
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },

    /// A required external tool is not installed
    #[error("{tool} not found: {hint}")]
    ToolMissing {
        /// Tool binary name
        tool: String,
        /// Installation hint
        hint: String,
    },
}

impl AppdropError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Project path given explicitly on the command line but absent on disk.
    pub fn project_missing(path: &Path) -> Self {
        Self::not_found(format!("Project not found at {}", path.display()))
    }

    /// Process exit code for this error.
    ///
    /// Usage-class errors exit with 2, missing secrets with 3, anything
    /// else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } | Self::Configuration { .. } | Self::Validation { .. } => 2,
            Self::Cli(CliError::InvalidArguments { .. })
            | Self::Cli(CliError::ConflictingArguments { .. }) => 2,
            Self::MissingEnv { .. } => 3,
            _ => 1,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Self::Configuration { hint, .. } => vec![hint.clone()],
            Self::MissingEnv { name } => vec![format!(
                "Export {name} or add it to a .env file in the working directory"
            )],
            Self::NotFound { .. } => vec![
                "Run appdrop from a directory containing Package.swift or an .xcodeproj".to_string(),
                "Or pass --project <path/to/App.xcodeproj>".to_string(),
            ],
            Self::Cli(CliError::ToolMissing { hint, .. }) => vec![hint.clone()],
            _ => Vec::new(),
        }
    }
}
