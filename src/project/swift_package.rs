//! Swift Package manifest scraping and build-output layout.
//!
//! The manifest is matched textually rather than evaluated: a `name:` literal
//! anywhere in `Package.swift` is taken as the package name, and the first
//! `.executableTarget(name:` literal as the executable. Literals inside
//! comments or unrelated strings match too.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"name:\s*["']([^"']+)["']"#).expect("package name pattern is valid")
});

static EXECUTABLE_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\.executableTarget\s*\(\s*name:\s*["']([^"']+)["']"#)
        .expect("executable target pattern is valid")
});

/// CPU architecture a Swift CLI is built for.
///
/// Release builds always cover both slices, in this order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Architecture {
    /// Apple Silicon
    #[serde(rename = "arm64")]
    Arm64,
    /// Intel
    #[serde(rename = "x86_64")]
    X86_64,
}

impl Architecture {
    /// The fixed release architecture set.
    pub const RELEASE: [Architecture; 2] = [Architecture::Arm64, Architecture::X86_64];

    /// Name as understood by `swift build --arch`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Arm64 => "arm64",
            Architecture::X86_64 => "x86_64",
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names scraped from a `Package.swift`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageManifest {
    /// Package name, or the root directory name when no literal matched
    pub name: String,
    /// First executable target, or the package name when none matched
    pub executable: String,
}

/// Scrape a manifest's contents. `fallback_name` is used when no `name:`
/// literal is present.
pub fn parse_manifest(content: &str, fallback_name: &str) -> PackageManifest {
    let name = PACKAGE_NAME
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| fallback_name.to_string());

    let executable = EXECUTABLE_TARGET
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| name.clone());

    PackageManifest { name, executable }
}

/// `swift build` release output directory for one architecture.
pub fn swift_build_dir(root: &Path, arch: Architecture) -> PathBuf {
    root.join(".build")
        .join(format!("{}-apple-macosx", arch.as_str()))
        .join("release")
}

/// Path of the built executable for one architecture.
pub fn built_binary_path(root: &Path, arch: Architecture, executable: &str) -> PathBuf {
    swift_build_dir(root, arch).join(executable)
}
