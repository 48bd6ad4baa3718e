//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap. Environment
//! fallbacks (`SPARKLE_BIN`, `GITHUB_REF_NAME`) are resolved here so the
//! planning code never reads the process environment itself.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::CliError;
use crate::pipeline::Override;
use crate::project::ProjectOverrides;

/// Zero-config macOS release CLI
#[derive(Parser, Debug)]
#[command(
    name = "appdrop",
    version,
    about = "Zero-config macOS release CLI",
    long_about = "Builds, signs, notarizes and packages macOS apps and Swift command-line tools.

The release plan is derived from the checkout: an Xcode project gets the app
pipeline (archive, sign, notarize, DMG, Sparkle appcast), a Swift package gets the
CLI pipeline (universal build, sign, zip, notarize).

Usage:
  appdrop --dry-run
  appdrop release --no-sparkle --output dist
  appdrop doctor
  appdrop publish --tag v1.2.0 --asset build/release/Char.dmg",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for the default `release` command
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// Top-level commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build, sign, notarize, and package your macOS app or CLI
    Release(ReleaseArgs),

    /// Check project configuration for issues
    Doctor(DoctorArgs),

    /// Create a GitHub release with assets
    Publish(PublishArgs),
}

/// Project selection shared by commands that detect a project
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Override scheme
    #[arg(long, value_name = "NAME")]
    pub scheme: Option<String>,

    /// Override xcodeproj
    #[arg(long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Override CLI executable name (Swift Package only)
    #[arg(long, value_name = "NAME")]
    pub executable: Option<String>,
}

impl ProjectArgs {
    pub fn overrides(&self) -> ProjectOverrides<'_> {
        ProjectOverrides {
            scheme: self.scheme.as_deref(),
            project_path: self.project.as_deref(),
            executable: self.executable.as_deref(),
        }
    }
}

/// Arguments for `appdrop release`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Intermediate build directory
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Directory containing sign_update and generate_appcast
    #[arg(long, env = "SPARKLE_BIN", value_name = "DIR")]
    pub sparkle_bin: Option<PathBuf>,

    /// Skip DMG creation
    #[arg(long)]
    pub no_dmg: bool,

    /// Skip Sparkle signing + appcast
    #[arg(long)]
    pub no_sparkle: bool,

    /// Skip notarization
    #[arg(long)]
    pub no_notarize: bool,

    /// Print pipeline only
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl ReleaseArgs {
    /// Requested downgrades, in application order.
    pub fn overrides(&self) -> Vec<Override> {
        let requested = [self.no_dmg, self.no_sparkle, self.no_notarize];
        Override::ALL
            .into_iter()
            .zip(requested)
            .filter_map(|(directive, on)| on.then_some(directive))
            .collect()
    }
}

/// Arguments for `appdrop doctor`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DoctorArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Directory containing sign_update and generate_appcast
    #[arg(long, env = "SPARKLE_BIN", value_name = "DIR")]
    pub sparkle_bin: Option<PathBuf>,
}

/// Arguments for `appdrop publish`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PublishArgs {
    /// Release tag
    #[arg(long)]
    pub tag: Option<String>,

    /// CI ref name, used as the tag when --tag is absent
    #[arg(long = "ref-name", env = "GITHUB_REF_NAME", hide = true)]
    pub ref_name: Option<String>,

    /// Release title
    #[arg(long)]
    pub title: Option<String>,

    /// Release notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Release notes file
    #[arg(long, value_name = "PATH")]
    pub notes_file: Option<PathBuf>,

    /// Release asset (repeatable)
    #[arg(long = "asset", value_name = "PATH")]
    pub assets: Vec<PathBuf>,

    /// Create a draft release
    #[arg(long)]
    pub draft: bool,

    /// Mark release as prerelease
    #[arg(long)]
    pub prerelease: bool,

    /// Print the gh invocation only
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run; `release` when none was named.
    pub fn resolved_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Release(self.release.clone()))
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        if self.quiet && self.verbose {
            return Err(CliError::ConflictingArguments {
                arguments: vec!["--quiet".to_string(), "--verbose".to_string()],
            });
        }
        match &self.root {
            Some(root) if !root.is_dir() => Err(CliError::InvalidArguments {
                reason: format!("Project root is not a directory: {}", root.display()),
            }),
            _ => Ok(()),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
    /// Absolute or relative project root
    root: PathBuf,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet, args.json);
        let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));

        Self { output, root }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Project root to detect from
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print info message if not in quiet mode
    pub fn info(&self, message: &str) -> std::io::Result<()> {
        self.output.info(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("appdrop").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_release() {
        let args = parse(&[]);
        assert!(matches!(args.resolved_command(), Command::Release(_)));
    }

    #[test]
    fn bare_flags_configure_default_release() {
        let args = parse(&["--dry-run", "--executable", "custom-name"]);
        match args.resolved_command() {
            Command::Release(release) => {
                assert!(release.dry_run);
                assert_eq!(release.project.executable.as_deref(), Some("custom-name"));
            }
            other => panic!("expected release, got {other:?}"),
        }
    }

    #[test]
    fn release_overrides_in_fixed_order() {
        let args = parse(&["release", "--no-notarize", "--no-dmg"]);
        let Command::Release(release) = args.resolved_command() else {
            panic!("expected release");
        };
        assert_eq!(
            release.overrides(),
            vec![Override::DisablePackaging, Override::DisableNotarization]
        );
    }

    #[test]
    fn publish_collects_repeated_assets() {
        let args = parse(&["publish", "--tag", "v1.0.0", "--asset", "a.dmg", "--asset", "b.zip", "--draft"]);
        let Command::Publish(publish) = args.resolved_command() else {
            panic!("expected publish");
        };
        assert_eq!(publish.tag.as_deref(), Some("v1.0.0"));
        assert_eq!(publish.assets, vec![PathBuf::from("a.dmg"), PathBuf::from("b.zip")]);
        assert!(publish.draft && !publish.prerelease);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = parse(&["doctor", "--verbose", "--json"]);
        assert!(args.verbose && args.json);
        assert!(matches!(args.resolved_command(), Command::Doctor(_)));
    }

    #[test]
    fn quiet_and_verbose_rejected() {
        let args = parse(&["release", "-q", "-v"]);
        match args.validate() {
            Err(CliError::ConflictingArguments { arguments }) => {
                assert_eq!(arguments, ["--quiet", "--verbose"]);
            }
            other => panic!("expected conflicting arguments, got {other:?}"),
        }
    }

    #[test]
    fn root_must_be_a_directory() {
        let args = parse(&["-C", "/nonexistent/appdrop-root", "doctor"]);
        assert!(matches!(
            args.validate(),
            Err(CliError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(Args::try_parse_from(["appdrop", "release", "--bogus"]).is_err());
    }
}
