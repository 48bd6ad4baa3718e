//! Resolved release plan types.

use std::path::PathBuf;

use serde::Serialize;

use super::toolchain::{ToolchainRoots, UpdateToolchain};
use crate::project::{Architecture, ProjectType};

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "build/release";

/// Default build directory, relative to the project root.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Inputs to pipeline resolution besides the project itself.
///
/// Everything the resolver would otherwise read from the process
/// environment is passed in here.
#[derive(Clone, Debug, Default)]
pub struct DetectionOptions {
    /// Output directory; relative paths resolve against the project root
    pub output_dir: Option<PathBuf>,
    /// Build directory; relative paths resolve against the project root
    pub build_dir: Option<PathBuf>,
    /// Only look for the update toolchain here when set
    pub update_tools_path_override: Option<PathBuf>,
    /// Fallback probe locations when no override is given
    pub toolchain_roots: ToolchainRoots,
}

/// The resolved execution plan.
///
/// Produced by [`resolve_pipeline`](super::resolve_pipeline) and only ever
/// downgraded afterwards by [`Override`](super::Override)s. Exactly one of
/// the two stage groups is active, chosen by `project_type`; every flag of
/// the other group is `false`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineDescriptor {
    pub project_type: ProjectType,

    // Common
    pub output_dir: PathBuf,
    pub build_dir: PathBuf,

    // Xcode app pipeline
    pub build_app: bool,
    pub sign_app: bool,
    pub notarize_app: bool,
    pub create_dmg: bool,
    pub notarize_dmg: bool,
    /// Info.plist declares an update feed
    pub sparkle_signing_enabled: bool,
    pub sparkle_tools_available: bool,
    /// `sparkle_signing_enabled && sparkle_tools_available`
    pub sparkle: bool,
    pub generate_appcast: bool,
    pub entitlements_path: Option<PathBuf>,
    pub info_plist_path: Option<PathBuf>,
    pub missing_entitlements: bool,
    pub missing_info_plist: bool,

    // CLI pipeline
    pub build_cli: bool,
    pub sign_cli: bool,
    pub create_zip: bool,
    pub notarize_zip: bool,
    pub executable_name: Option<String>,
    pub architectures: Vec<Architecture>,

    pub update_toolchain: Option<UpdateToolchain>,
}

impl PipelineDescriptor {
    pub fn is_xcode_app(&self) -> bool {
        self.project_type == ProjectType::XcodeApp
    }

    /// Any notarization stage remains in the plan.
    pub fn notarizes(&self) -> bool {
        self.notarize_app || self.notarize_dmg || self.notarize_zip
    }

    /// Blocking-artifact flags derived from the current stage set.
    ///
    /// Entitlements are required while an Xcode app is still signed; an
    /// Info.plist is required while an update feed is declared.
    pub(crate) fn rederive_missing(mut self) -> Self {
        let app = self.is_xcode_app();
        self.missing_entitlements = app && self.sign_app && self.entitlements_path.is_none();
        self.missing_info_plist =
            app && self.sparkle_signing_enabled && self.info_plist_path.is_none();
        self
    }

    /// Stage names in execution order, for plan display.
    pub fn planned_stages(&self) -> Vec<&'static str> {
        let stages = [
            (self.build_app, "build-app"),
            (self.sign_app, "sign-app"),
            (self.notarize_app, "notarize-app"),
            (self.create_dmg, "create-dmg"),
            (self.notarize_dmg, "notarize-dmg"),
            (self.sparkle, "sign-update"),
            (self.generate_appcast, "generate-appcast"),
            (self.build_cli, "build-cli"),
            (self.sign_cli, "sign-cli"),
            (self.create_zip, "create-zip"),
            (self.notarize_zip, "notarize-zip"),
        ];
        stages
            .into_iter()
            .filter_map(|(enabled, name)| enabled.then_some(name))
            .collect()
    }
}
