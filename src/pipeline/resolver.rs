//! Pipeline resolution.

use std::path::Path;

use path_absolutize::Absolutize;

use super::descriptor::{DEFAULT_BUILD_DIR, DEFAULT_OUTPUT_DIR, DetectionOptions, PipelineDescriptor};
use super::{locator, toolchain};
use crate::error::Result;
use crate::project::{Architecture, ProjectDescriptor, ProjectType};

/// Resolve the full release plan for `project`.
///
/// Depends only on its arguments and on the filesystem at call time.
/// The default plan runs every applicable stage; downgrades are applied
/// afterwards with [`Override`](super::Override).
pub fn resolve_pipeline(
    project: &ProjectDescriptor,
    options: &DetectionOptions,
) -> Result<PipelineDescriptor> {
    let output_dir = resolve_dir(&project.root, options.output_dir.as_deref(), DEFAULT_OUTPUT_DIR)?;
    let build_dir = resolve_dir(&project.root, options.build_dir.as_deref(), DEFAULT_BUILD_DIR)?;
    let base = PipelineDescriptor {
        project_type: project.kind,
        output_dir,
        build_dir,
        build_app: false,
        sign_app: false,
        notarize_app: false,
        create_dmg: false,
        notarize_dmg: false,
        sparkle_signing_enabled: false,
        sparkle_tools_available: false,
        sparkle: false,
        generate_appcast: false,
        entitlements_path: None,
        info_plist_path: None,
        missing_entitlements: false,
        missing_info_plist: false,
        build_cli: false,
        sign_cli: false,
        create_zip: false,
        notarize_zip: false,
        executable_name: None,
        architectures: Vec::new(),
        update_toolchain: None,
    };

    let pipeline = match project.kind {
        ProjectType::SwiftCli => PipelineDescriptor {
            build_cli: true,
            sign_cli: true,
            create_zip: true,
            notarize_zip: true,
            executable_name: project.executable_name.clone(),
            architectures: Architecture::RELEASE.to_vec(),
            ..base
        },
        ProjectType::XcodeApp => resolve_app(project, options, base)?,
    };

    log::debug!("Resolved {} pipeline: {:?}", project.kind, pipeline.planned_stages());
    Ok(pipeline)
}

fn resolve_app(
    project: &ProjectDescriptor,
    options: &DetectionOptions,
    base: PipelineDescriptor,
) -> Result<PipelineDescriptor> {
    let info_plist_path = locator::locate_info_plist(&project.root);
    let entitlements_file = format!("{}.entitlements", project.name);
    let entitlements_path = locator::locate_entitlements(&project.root, &entitlements_file);

    let sparkle_signing_enabled = match &info_plist_path {
        Some(path) => locator::has_update_feed_keys(path)?,
        None => false,
    };
    let update_toolchain = toolchain::locate_update_toolchain(
        options.update_tools_path_override.as_deref(),
        &options.toolchain_roots,
    );
    let sparkle_tools_available = update_toolchain.is_some();
    let sparkle = sparkle_signing_enabled && sparkle_tools_available;

    if sparkle_signing_enabled && !sparkle_tools_available {
        log::warn!("Info.plist declares an update feed but Sparkle tools were not found");
    }
    if entitlements_path.is_none() {
        log::debug!("No {} found under {}", entitlements_file, project.root.display());
    }

    let pipeline = PipelineDescriptor {
        build_app: true,
        sign_app: true,
        notarize_app: true,
        create_dmg: true,
        notarize_dmg: true,
        sparkle_signing_enabled,
        sparkle_tools_available,
        sparkle,
        generate_appcast: sparkle,
        entitlements_path,
        info_plist_path,
        update_toolchain,
        ..base
    };
    Ok(pipeline.rederive_missing())
}

fn resolve_dir(root: &Path, dir: Option<&Path>, default: &str) -> Result<std::path::PathBuf> {
    let dir = dir.unwrap_or_else(|| Path::new(default));
    Ok(dir.absolutize_from(root)?.to_path_buf())
}
