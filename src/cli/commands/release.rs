//! `appdrop release`: plan, validate, and run the build stage.

use anyhow::Context;
use serde::Serialize;

use crate::cli::{ReleaseArgs, RuntimeConfig, exec};
use crate::error::Result;
use crate::pipeline::{
    self, DetectionOptions, PipelineDescriptor, ToolchainRoots, apply_overrides, required_secrets,
    requirements::SIGNING_IDENTITY,
};
use crate::project::{self, ProjectDescriptor, ProjectType};
use crate::release::{self, SigningStyle, xcode};
use crate::secrets;

#[derive(Serialize)]
struct PlanReport<'a> {
    project: &'a ProjectDescriptor,
    pipeline: &'a PipelineDescriptor,
}

/// Detect, resolve and apply overrides.
pub fn plan_release(
    args: &ReleaseArgs,
    config: &RuntimeConfig,
) -> Result<(ProjectDescriptor, PipelineDescriptor)> {
    let project = project::resolve_project(config.root(), &args.project.overrides())?;
    let options = DetectionOptions {
        output_dir: args.output.clone(),
        build_dir: args.build_dir.clone(),
        update_tools_path_override: args.sparkle_bin.clone(),
        toolchain_roots: ToolchainRoots::system(),
    };
    let resolved = pipeline::resolve_pipeline(&project, &options)?;
    Ok((project, apply_overrides(resolved, args.overrides())))
}

pub async fn run_release(args: &ReleaseArgs, config: &RuntimeConfig) -> Result<()> {
    let (project, pipeline) = plan_release(args, config)?;
    report_plan(&project, &pipeline, config)?;

    if args.dry_run {
        return Ok(());
    }

    pipeline::validate(&pipeline)?;
    let secrets = secrets::load_from_process(&required_secrets(&pipeline))?;
    let identity = secrets.get(SIGNING_IDENTITY).map(String::as_str);

    match project.kind {
        ProjectType::XcodeApp => build_app(&project, &pipeline, identity, config).await?,
        ProjectType::SwiftCli => build_cli(&project, &pipeline, config).await?,
    }

    let remaining: Vec<_> = pipeline
        .planned_stages()
        .into_iter()
        .filter(|stage| !matches!(*stage, "build-app" | "build-cli"))
        .collect();
    if !remaining.is_empty() {
        config.info(&format!("Remaining stages: {}", remaining.join(", ")))?;
    }
    Ok(())
}

fn report_plan(
    project: &ProjectDescriptor,
    pipeline: &PipelineDescriptor,
    config: &RuntimeConfig,
) -> Result<()> {
    if config.output().is_json() {
        return config.output().json(&PlanReport { project, pipeline });
    }

    config.info(&format!("Project: {}", project.project_path.display()))?;
    config.info(&format!("Scheme: {}", project.scheme))?;
    config.info(&format!("Type: {}", project.kind))?;
    config.info(&format!(
        "Pipeline: build={} dmg={} sparkle={} notarize={}",
        pipeline.build_app || pipeline.build_cli,
        pipeline.create_dmg,
        pipeline.sparkle,
        pipeline.notarizes()
    ))?;
    config.verbose_println(&format!("Stages: {}", pipeline.planned_stages().join(", ")))?;
    config.verbose_println(&format!("Output: {}", pipeline.output_dir.display()))?;

    if pipeline.missing_entitlements {
        config.warn(&format!("Warning: {}.entitlements not found", project.name))?;
    }
    if pipeline.missing_info_plist {
        config.warn("Warning: Info.plist not found but the update feed is enabled")?;
    }
    if pipeline.sparkle_signing_enabled && !pipeline.sparkle_tools_available {
        config.warn("Warning: Sparkle tools not found; skipping update signing and appcast")?;
    }
    Ok(())
}

async fn build_app(
    project: &ProjectDescriptor,
    pipeline: &PipelineDescriptor,
    identity: Option<&str>,
    config: &RuntimeConfig,
) -> Result<()> {
    if !pipeline.build_app {
        return Ok(());
    }
    exec::require_tool("xcodebuild", "Install Xcode and run `xcode-select --install`")?;

    std::fs::create_dir_all(&pipeline.build_dir)
        .with_context(|| format!("creating build directory {}", pipeline.build_dir.display()))?;
    std::fs::create_dir_all(&pipeline.output_dir)
        .with_context(|| format!("creating output directory {}", pipeline.output_dir.display()))?;

    let derived_data = pipeline.build_dir.join("DerivedData");
    let archive = xcode::archive_path(&pipeline.build_dir, &project.name);
    let export_options = pipeline.build_dir.join("ExportOptions.plist");
    let style = if identity.is_some() {
        SigningStyle::Manual
    } else {
        SigningStyle::Automatic
    };
    release::write_export_options(&export_options, style)?;

    log::info!("Archiving {}", project.scheme);
    config.info(&format!("Archiving {}...", project.scheme))?;
    let archive_args = release::archive_args(project, &derived_data, &archive, identity);
    exec::run_tool("xcodebuild", &archive_args, Some(&project.root)).await?;

    config.info("Exporting archive...")?;
    let export_args = release::export_args(&archive, &pipeline.output_dir, &export_options);
    exec::run_tool("xcodebuild", &export_args, Some(&project.root)).await?;

    let app = xcode::exported_app_path(&pipeline.output_dir, &project.name);
    config.success(&format!("Exported {}", app.display()))?;
    Ok(())
}

async fn build_cli(
    project: &ProjectDescriptor,
    pipeline: &PipelineDescriptor,
    config: &RuntimeConfig,
) -> Result<()> {
    if !pipeline.build_cli {
        return Ok(());
    }
    let Some(executable) = pipeline.executable_name.as_deref() else {
        return Ok(());
    };
    exec::require_tool("swift", "Install Xcode or the Swift toolchain")?;

    for arch in &pipeline.architectures {
        log::info!("Building {} for {}", executable, arch);
        config.info(&format!("Building {executable} ({arch})..."))?;
        let args = release::swift_build_args(executable, *arch);
        exec::run_tool("swift", &args, Some(&project.root)).await?;

        let binary = project::swift_package::built_binary_path(&project.root, *arch, executable);
        config.success(&format!("Built {}", binary.display()))?;
    }
    Ok(())
}
