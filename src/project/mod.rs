//! Project detection.
//!
//! Resolves exactly one [`ProjectDescriptor`] for a checkout. Precedence:
//!
//! 1. an explicit `--project <App.xcodeproj>` always wins
//! 2. a `Package.swift` at the root
//! 3. the first `*.xcodeproj` among the root's immediate children

pub mod swift_package;

use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;
use serde::Serialize;

use crate::error::{AppdropError, Result};

pub use swift_package::{Architecture, PackageManifest};

/// Extension of an Xcode project bundle.
pub const XCODE_PROJECT_EXTENSION: &str = "xcodeproj";

/// Swift Package manifest file name.
pub const SWIFT_PACKAGE_MANIFEST: &str = "Package.swift";

/// Kind of buildable unit.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ProjectType {
    /// Xcode application project
    #[serde(rename = "xcode-app")]
    XcodeApp,
    /// Swift Package executable
    #[serde(rename = "swift-cli")]
    SwiftCli,
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ProjectType::XcodeApp => "xcode-app",
            ProjectType::SwiftCli => "swift-cli",
        })
    }
}

/// The buildable unit for this run. Created once, read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    /// Absolute project root
    pub root: PathBuf,
    /// Absolute path of the `.xcodeproj` or `Package.swift`
    pub project_path: PathBuf,
    /// Scheme passed to `xcodebuild -scheme`
    pub scheme: String,
    /// Product name; also names the `<name>.entitlements` file
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    /// Executable product, only set for [`ProjectType::SwiftCli`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable_name: Option<String>,
}

impl ProjectDescriptor {
    pub fn is_xcode_app(&self) -> bool {
        self.kind == ProjectType::XcodeApp
    }
}

/// Explicit overrides from the command line.
#[derive(Clone, Debug, Default)]
pub struct ProjectOverrides<'a> {
    pub scheme: Option<&'a str>,
    pub project_path: Option<&'a Path>,
    pub executable: Option<&'a str>,
}

/// Detect the project rooted at `root`.
///
/// # Errors
///
/// [`AppdropError::NotFound`] when the explicit project path is absent, or
/// when neither a Swift package nor an Xcode project exists at the root.
pub fn resolve_project(root: &Path, overrides: &ProjectOverrides<'_>) -> Result<ProjectDescriptor> {
    let root = root.absolutize()?.to_path_buf();

    if let Some(explicit) = overrides.project_path {
        if has_extension(explicit, XCODE_PROJECT_EXTENSION) {
            let resolved = explicit.absolutize_from(&root)?.to_path_buf();
            if !resolved.exists() {
                return Err(AppdropError::project_missing(&resolved));
            }
            log::debug!("Using explicit Xcode project {}", resolved.display());
            return Ok(xcode_descriptor(root, resolved, overrides.scheme));
        }
        log::warn!(
            "Ignoring --project {}: not an .{} bundle",
            explicit.display(),
            XCODE_PROJECT_EXTENSION
        );
    }

    if !root.is_dir() {
        return Err(AppdropError::not_found(format!(
            "Project root not found at {}",
            root.display()
        )));
    }

    let package_swift = root.join(SWIFT_PACKAGE_MANIFEST);
    if package_swift.is_file() {
        return swift_descriptor(root, package_swift, overrides.executable);
    }

    let project = find_xcode_project(&root)?.ok_or_else(|| {
        AppdropError::not_found("No Package.swift or .xcodeproj found in repo root")
    })?;
    log::debug!("Detected Xcode project {}", project.display());
    Ok(xcode_descriptor(root, project, overrides.scheme))
}

fn swift_descriptor(
    root: PathBuf,
    manifest_path: PathBuf,
    executable_override: Option<&str>,
) -> Result<ProjectDescriptor> {
    let content = std::fs::read_to_string(&manifest_path)?;
    let fallback = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let manifest = swift_package::parse_manifest(&content, &fallback);
    log::debug!(
        "Detected Swift package {} (executable {})",
        manifest.name,
        manifest.executable
    );

    let executable = executable_override
        .map(str::to_string)
        .unwrap_or(manifest.executable);

    Ok(ProjectDescriptor {
        root,
        project_path: manifest_path,
        scheme: manifest.name.clone(),
        name: manifest.name,
        kind: ProjectType::SwiftCli,
        executable_name: Some(executable),
    })
}

fn xcode_descriptor(root: PathBuf, project_path: PathBuf, scheme: Option<&str>) -> ProjectDescriptor {
    let name = scheme.map(str::to_string).unwrap_or_else(|| {
        project_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    ProjectDescriptor {
        root,
        project_path,
        scheme: name.clone(),
        name,
        kind: ProjectType::XcodeApp,
        executable_name: None,
    }
}

/// First `*.xcodeproj` child of `root`, by file name.
fn find_xcode_project(root: &Path) -> Result<Option<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if has_extension(&path, XCODE_PROJECT_EXTENSION) {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates.into_iter().next())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
