//! `xcodebuild` archive and export invocations.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::project::ProjectDescriptor;

/// Export method written to the export options manifest.
pub const EXPORT_METHOD: &str = "developer-id";

/// Arguments for `xcodebuild ... archive`.
///
/// Signing settings are only passed when an identity is supplied; otherwise
/// the project's own signing configuration applies.
pub fn archive_args(
    project: &ProjectDescriptor,
    derived_data_path: &Path,
    archive_path: &Path,
    signing_identity: Option<&str>,
) -> Vec<String> {
    let mut args = vec![
        "-project".to_string(),
        path_arg(&project.project_path),
        "-scheme".to_string(),
        project.scheme.clone(),
        "-configuration".to_string(),
        "Release".to_string(),
        "-destination".to_string(),
        "generic/platform=macOS".to_string(),
        "-derivedDataPath".to_string(),
        path_arg(derived_data_path),
        "-archivePath".to_string(),
        path_arg(archive_path),
    ];

    if let Some(identity) = signing_identity {
        args.push("CODE_SIGN_STYLE=Manual".to_string());
        args.push(format!("CODE_SIGN_IDENTITY={identity}"));
        args.push("OTHER_CODE_SIGN_FLAGS=--timestamp".to_string());
    }

    args.push("archive".to_string());
    args
}

/// Arguments for `xcodebuild -exportArchive`.
pub fn export_args(archive_path: &Path, export_dir: &Path, export_options_plist: &Path) -> Vec<String> {
    vec![
        "-exportArchive".to_string(),
        "-archivePath".to_string(),
        path_arg(archive_path),
        "-exportPath".to_string(),
        path_arg(export_dir),
        "-exportOptionsPlist".to_string(),
        path_arg(export_options_plist),
    ]
}

/// Write the export options manifest consumed by `-exportOptionsPlist`.
pub fn write_export_options(path: &Path, signing_style: SigningStyle) -> Result<()> {
    let mut options = plist::Dictionary::new();
    options.insert("method".to_string(), plist::Value::String(EXPORT_METHOD.to_string()));
    options.insert(
        "signingStyle".to_string(),
        plist::Value::String(signing_style.as_str().to_string()),
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    plist::Value::Dictionary(options).to_file_xml(path)?;
    log::debug!("Wrote export options to {}", path.display());
    Ok(())
}

/// `signingStyle` in the export options manifest.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SigningStyle {
    Manual,
    Automatic,
}

impl SigningStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningStyle::Manual => "manual",
            SigningStyle::Automatic => "automatic",
        }
    }
}

/// Where the `.xcarchive` lands inside the build directory.
pub fn archive_path(build_dir: &Path, name: &str) -> PathBuf {
    build_dir.join(format!("{name}.xcarchive"))
}

/// Where the exported `.app` lands inside the output directory.
pub fn exported_app_path(export_dir: &Path, name: &str) -> PathBuf {
    export_dir.join(format!("{name}.app"))
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectType;
    use tempfile::TempDir;

    fn project() -> ProjectDescriptor {
        ProjectDescriptor {
            root: PathBuf::from("/tmp"),
            project_path: PathBuf::from("/tmp/char.xcodeproj"),
            scheme: "char".to_string(),
            name: "char".to_string(),
            kind: ProjectType::XcodeApp,
            executable_name: None,
        }
    }

    #[test]
    fn archive_without_identity() {
        let args = archive_args(
            &project(),
            Path::new("/tmp/derived"),
            Path::new("/tmp/char.xcarchive"),
            None,
        );

        assert!(args.contains(&"archive".to_string()));
        assert!(!args.contains(&"build".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("CODE_SIGN")));
        assert_eq!(&args[..4], ["-project", "/tmp/char.xcodeproj", "-scheme", "char"]);
    }

    #[test]
    fn archive_with_identity() {
        let args = archive_args(
            &project(),
            Path::new("/tmp/derived"),
            Path::new("/tmp/char.xcarchive"),
            Some("Developer ID Application: Example (TEAMID)"),
        );

        assert!(args.contains(&"CODE_SIGN_STYLE=Manual".to_string()));
        assert!(args.contains(&"CODE_SIGN_IDENTITY=Developer ID Application: Example (TEAMID)".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("archive"));
    }

    #[test]
    fn export_arguments() {
        let args = export_args(
            Path::new("/tmp/char.xcarchive"),
            Path::new("/tmp/export"),
            Path::new("/tmp/export.plist"),
        );
        assert_eq!(args[0], "-exportArchive");
        assert!(args.contains(&"/tmp/char.xcarchive".to_string()));
        assert!(args.contains(&"/tmp/export.plist".to_string()));
    }

    #[test]
    fn export_options_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/ExportOptions.plist");
        write_export_options(&path, SigningStyle::Manual).unwrap();

        let value = plist::Value::from_file(&path).unwrap();
        let dict = value.as_dictionary().unwrap();
        assert_eq!(dict.get("method").and_then(|v| v.as_string()), Some("developer-id"));
        assert_eq!(dict.get("signingStyle").and_then(|v| v.as_string()), Some("manual"));
    }

    #[test]
    fn artifact_paths() {
        assert_eq!(
            archive_path(Path::new("/repo/build"), "Char"),
            Path::new("/repo/build/Char.xcarchive")
        );
        assert_eq!(
            exported_app_path(Path::new("/repo/build/release"), "Char"),
            Path::new("/repo/build/release/Char.app")
        );
    }
}
