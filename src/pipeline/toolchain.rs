//! Sparkle update-toolchain discovery.
//!
//! The toolchain is a directory holding both `sign_update` and
//! `generate_appcast`. It is only located, never invoked, here.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Signing tool file name.
pub const SIGN_TOOL: &str = "sign_update";

/// Feed generator file name.
pub const FEED_TOOL: &str = "generate_appcast";

/// Homebrew cask roots; each version directory contributes `<version>/bin`.
pub const INSTALL_ROOTS: [&str; 2] = [
    "/opt/homebrew/Caskroom/sparkle",
    "/usr/local/Caskroom/sparkle",
];

/// Absolute paths of a located toolchain. Both files exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateToolchain {
    pub sign_tool: PathBuf,
    pub feed_tool: PathBuf,
}

/// Where to probe when no explicit directory is given.
///
/// The default probes nothing; [`ToolchainRoots::system`] builds the real
/// search list.
#[derive(Clone, Debug, Default)]
pub struct ToolchainRoots {
    /// User-local tool directory, checked first
    pub user_dir: Option<PathBuf>,
    /// Installation roots holding version-named subdirectories
    pub install_roots: Vec<PathBuf>,
}

impl ToolchainRoots {
    /// `~/.local/bin` plus the Homebrew cask roots.
    pub fn system() -> Self {
        Self {
            user_dir: dirs::home_dir().map(|home| home.join(".local").join("bin")),
            install_roots: INSTALL_ROOTS.iter().map(PathBuf::from).collect(),
        }
    }

    /// Candidate directories in probe order.
    ///
    /// Within an installation root, versions are visited in descending
    /// lexicographic order so the greatest version wins.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = self.user_dir.iter().cloned().collect();

        for root in &self.install_roots {
            let Ok(entries) = std::fs::read_dir(root) else {
                continue;
            };
            let mut versions: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .collect();
            versions.sort();
            candidates.extend(versions.into_iter().rev().map(|v| v.join("bin")));
        }

        candidates
    }
}

/// Locate the update toolchain.
///
/// With `explicit_dir` set, only that directory is checked.
pub fn locate_update_toolchain(
    explicit_dir: Option<&Path>,
    roots: &ToolchainRoots,
) -> Option<UpdateToolchain> {
    let candidates = match explicit_dir {
        Some(dir) => vec![dir.to_path_buf()],
        None => roots.candidates(),
    };

    let found = candidates.iter().find_map(|dir| toolchain_in(dir));
    match &found {
        Some(tools) => log::debug!("Found Sparkle tools: {}", tools.sign_tool.display()),
        None => log::debug!(
            "Sparkle tools not found in {} candidate directories",
            candidates.len()
        ),
    }
    found
}

fn toolchain_in(dir: &Path) -> Option<UpdateToolchain> {
    let sign_tool = dir.join(SIGN_TOOL);
    let feed_tool = dir.join(FEED_TOOL);
    (sign_tool.is_file() && feed_tool.is_file()).then_some(UpdateToolchain {
        sign_tool,
        feed_tool,
    })
}
