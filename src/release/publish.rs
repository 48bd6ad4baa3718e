//! GitHub release creation through the `gh` CLI.

use std::path::{Path, PathBuf};

use crate::error::{AppdropError, Result};

/// Options for `gh release create`.
#[derive(Clone, Debug, Default)]
pub struct PublishOptions {
    /// Release title; defaults to the tag
    pub title: Option<String>,
    /// Inline release notes
    pub notes: Option<String>,
    /// Release notes file, mutually exclusive with `notes`
    pub notes_file: Option<PathBuf>,
    /// Files attached to the release, in upload order
    pub assets: Vec<PathBuf>,
    pub draft: bool,
    pub prerelease: bool,
}

/// Arguments for `gh` creating release `tag`.
///
/// # Errors
///
/// [`AppdropError::Validation`] when no assets are given, or when both
/// `notes` and `notes_file` are set.
pub fn publish_args(tag: &str, options: &PublishOptions) -> Result<Vec<String>> {
    if options.assets.is_empty() {
        return Err(AppdropError::validation("At least one --asset is required."));
    }
    if options.notes.is_some() && options.notes_file.is_some() {
        return Err(AppdropError::validation(
            "Use either --notes or --notes-file, not both.",
        ));
    }

    let mut args = vec![
        "release".to_string(),
        "create".to_string(),
        tag.to_string(),
        "--title".to_string(),
        options.title.clone().unwrap_or_else(|| tag.to_string()),
    ];

    match (&options.notes_file, &options.notes) {
        (Some(file), _) => {
            args.push("--notes-file".to_string());
            args.push(file.to_string_lossy().into_owned());
        }
        (None, notes) => {
            args.push("--notes".to_string());
            args.push(notes.clone().unwrap_or_else(|| format!("Release {tag}")));
        }
    }

    if options.draft {
        args.push("--draft".to_string());
    }
    if options.prerelease {
        args.push("--prerelease".to_string());
    }

    args.extend(options.assets.iter().map(|a| a.to_string_lossy().into_owned()));
    Ok(args)
}

/// File names picked up from the release directory when no asset is named.
fn is_release_asset(file_name: &str) -> bool {
    file_name == "appcast.xml"
        || [".dmg", ".pkg", ".zip"]
            .iter()
            .any(|ext| file_name.ends_with(ext))
}

/// Explicit assets, or the release artifacts found in `release_dir`.
///
/// Discovered assets are sorted by file name. A missing directory yields no
/// assets.
pub fn resolve_publish_assets(assets: Vec<PathBuf>, release_dir: &Path) -> Result<Vec<PathBuf>> {
    if !assets.is_empty() {
        return Ok(assets);
    }
    if !release_dir.is_dir() {
        log::debug!("No release directory at {}", release_dir.display());
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(release_dir)? {
        let entry = entry?;
        if is_release_asset(&entry.file_name().to_string_lossy()) {
            found.push(entry.path());
        }
    }
    found.sort();
    log::debug!("Discovered {} release assets", found.len());
    Ok(found)
}

/// Pick the release tag: explicit, then CI ref name, then the tag at HEAD.
pub fn resolve_tag(
    explicit: Option<&str>,
    ref_name: Option<&str>,
    head_tag: Option<&str>,
) -> Result<String> {
    [explicit, ref_name, head_tag]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|tag| !tag.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AppdropError::validation("Missing release tag. Pass --tag or set GITHUB_REF_NAME.")
        })
}
