//! `appdrop doctor`: report what the release plan found and what it lacks.

use serde::Serialize;
use std::path::Path;

use crate::cli::{DoctorArgs, RuntimeConfig, exec};
use crate::error::Result;
use crate::pipeline::requirements::OPTIONAL_ENV_VARS;
use crate::pipeline::{self, DetectionOptions, PipelineDescriptor, ToolchainRoots, required_secrets};
use crate::project::{self, ProjectDescriptor};
use crate::secrets;

/// One diagnostic line.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
    /// Failures that block a release, as opposed to advisories
    pub blocking: bool,
}

impl Check {
    fn new(name: &'static str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed,
            detail: detail.into(),
            blocking: false,
        }
    }

    fn blocking(mut self) -> Self {
        self.blocking = true;
        self
    }
}

/// What doctor observed outside the project tree.
#[derive(Debug, Default)]
pub struct Environment<'a> {
    /// Required secrets that are unset
    pub missing_secrets: Vec<&'a str>,
    /// Optional variables that are set
    pub optional_set: Vec<&'a str>,
    pub gh_available: bool,
    /// Directory given through `--sparkle-bin` or `SPARKLE_BIN`
    pub update_tools_dir: Option<&'a Path>,
}

/// Diagnostics for a resolved plan.
pub fn collect_checks(
    project: &ProjectDescriptor,
    pipeline: &PipelineDescriptor,
    env: &Environment<'_>,
) -> Vec<Check> {
    let mut checks = vec![Check::new(
        "project",
        true,
        format!("{} ({})", project.project_path.display(), project.kind),
    )];

    if pipeline.is_xcode_app() {
        checks.push(
            Check::new(
                "entitlements",
                !pipeline.missing_entitlements,
                match &pipeline.entitlements_path {
                    Some(path) => path.display().to_string(),
                    None => format!("{}.entitlements not found", project.name),
                },
            )
            .blocking(),
        );
        checks.push(
            Check::new(
                "info-plist",
                !pipeline.missing_info_plist,
                match &pipeline.info_plist_path {
                    Some(path) => path.display().to_string(),
                    None => "Info.plist not found".to_string(),
                },
            )
            .blocking(),
        );
        checks.push(Check::new(
            "update-feed",
            true,
            if pipeline.sparkle_signing_enabled {
                "SUFeedURL and SUPublicEDKey declared"
            } else {
                "not declared"
            },
        ));
        checks.push(Check::new(
            "update-tools",
            !pipeline.sparkle_signing_enabled || pipeline.sparkle_tools_available,
            match (&pipeline.update_toolchain, env.update_tools_dir) {
                (Some(tools), _) => tools.sign_tool.display().to_string(),
                (None, Some(dir)) => {
                    format!("sign_update / generate_appcast not found in {}", dir.display())
                }
                (None, None) => {
                    "sign_update / generate_appcast not found (set SPARKLE_BIN)".to_string()
                }
            },
        ));
    } else if let Some(executable) = &pipeline.executable_name {
        checks.push(Check::new("executable", true, executable.clone()));
    }

    checks.push(Check::new(
        "secrets",
        env.missing_secrets.is_empty(),
        if env.missing_secrets.is_empty() {
            "all required variables set".to_string()
        } else {
            format!("missing {}", env.missing_secrets.join(", "))
        },
    ));
    checks.push(Check::new(
        "optional-env",
        true,
        if env.optional_set.is_empty() {
            "none set".to_string()
        } else {
            format!("set {}", env.optional_set.join(", "))
        },
    ));
    checks.push(Check::new(
        "gh",
        env.gh_available,
        if env.gh_available {
            "GitHub CLI available"
        } else {
            "GitHub CLI not found (needed for publish)"
        },
    ));
    checks
}

pub fn run_doctor(args: &DoctorArgs, config: &RuntimeConfig) -> Result<()> {
    let project = project::resolve_project(config.root(), &args.project.overrides())?;
    let options = DetectionOptions {
        update_tools_path_override: args.sparkle_bin.clone(),
        toolchain_roots: ToolchainRoots::system(),
        ..Default::default()
    };
    let pipeline = pipeline::resolve_pipeline(&project, &options)?;
    let missing_optional = secrets::missing_from_process(&OPTIONAL_ENV_VARS);
    let env = Environment {
        missing_secrets: secrets::missing_from_process(&required_secrets(&pipeline)),
        optional_set: OPTIONAL_ENV_VARS
            .into_iter()
            .filter(|name| !missing_optional.contains(name))
            .collect(),
        gh_available: exec::has_tool("gh"),
        update_tools_dir: args.sparkle_bin.as_deref(),
    };
    let checks = collect_checks(&project, &pipeline, &env);

    if config.output().is_json() {
        config.output().json(&checks)?;
    } else {
        for check in &checks {
            let mark = if check.passed { "✓" } else { "✗" };
            config.info(&format!("{mark} {:<13} {}", check.name, check.detail))?;
        }
    }

    pipeline::validate(&pipeline)
}
