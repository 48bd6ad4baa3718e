//! Project artifact search.
//!
//! Walks the project tree depth-first and returns the first matching file.
//! Siblings are visited in file-name order so the same tree always yields
//! the same match; which match wins among several candidates is otherwise
//! unspecified.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;

/// Directory names never descended into: version control, dependency
/// checkouts, and SwiftPM or Xcode build output.
pub const SKIPPED_DIRS: [&str; 4] = [".git", "node_modules", ".build", "DerivedData"];

/// Generated bundles under the build directory carry their own Info.plist.
const SKIPPED_DIR_EXTENSION: &str = "xcarchive";

/// Info.plist keys that together declare a Sparkle update feed.
pub const UPDATE_FEED_KEYS: [&str; 2] = ["SUFeedURL", "SUPublicEDKey"];

/// First file whose path ends in `Info.plist`.
pub fn locate_info_plist(root: &Path) -> Option<PathBuf> {
    find_file(root, |name| name.ends_with("Info.plist"))
}

/// First file whose name ends in `file_name`, typically `<App>.entitlements`.
pub fn locate_entitlements(root: &Path, file_name: &str) -> Option<PathBuf> {
    find_file(root, |name| name.ends_with(file_name))
}

/// Whether the manifest declares an update feed.
///
/// This is a substring check on the raw file, not a plist parse: both keys
/// anywhere in the file count, comments included. Content that is not
/// UTF-8 is decoded lossily, so a binary plist simply reports `false`.
pub fn has_update_feed_keys(info_plist_path: &Path) -> Result<bool> {
    let bytes = std::fs::read(info_plist_path)?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(UPDATE_FEED_KEYS.iter().all(|key| content.contains(key)))
}

fn find_file(root: &Path, matches: impl Fn(&str) -> bool) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping unreadable entry during artifact search: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| matches(&entry.file_name().to_string_lossy()))
        .map(DirEntry::into_path)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && (SKIPPED_DIRS
            .iter()
            .any(|skipped| entry.file_name() == *skipped)
            || entry
                .path()
                .extension()
                .is_some_and(|ext| ext == SKIPPED_DIR_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn finds_nested_info_plist() {
        let dir = TempDir::new().unwrap();
        let plist = dir.path().join("Char/Resources/Info.plist");
        touch(&plist, "<plist/>");

        assert_eq!(locate_info_plist(dir.path()), Some(plist));
    }

    #[test]
    fn skips_vcs_and_dependency_dirs() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join(".git/Info.plist"), "");
        touch(&dir.path().join("node_modules/pkg/Info.plist"), "");

        assert_eq!(locate_info_plist(dir.path()), None);
    }

    #[test]
    fn skips_generated_build_output() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join(".build/checkouts/Sparkle/Info.plist"), "");
        touch(&dir.path().join("build/DerivedData/Info.plist"), "");
        touch(&dir.path().join("app/build/Char.xcarchive/Info.plist"), "");
        let wanted = dir.path().join("app/src/Info.plist");
        touch(&wanted, "");

        assert_eq!(locate_info_plist(dir.path()), Some(wanted));
    }

    #[test]
    fn entitlements_match_by_file_name() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("Other/Other.entitlements"), "");
        let wanted = dir.path().join("Char/Char.entitlements");
        touch(&wanted, "");

        assert_eq!(locate_entitlements(dir.path(), "Char.entitlements"), Some(wanted));
        assert_eq!(locate_entitlements(dir.path(), "Missing.entitlements"), None);
    }

    #[test]
    fn directories_named_like_targets_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Info.plist")).unwrap();

        assert_eq!(locate_info_plist(dir.path()), None);
    }

    #[test]
    fn first_match_is_stable_by_name() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("A/Info.plist");
        touch(&first, "");
        touch(&dir.path().join("B/Info.plist"), "");

        assert_eq!(locate_info_plist(dir.path()), Some(first));
    }

    #[test]
    fn update_feed_requires_both_keys() {
        let dir = TempDir::new().unwrap();
        let both = dir.path().join("both.plist");
        touch(
            &both,
            "<key>SUFeedURL</key><string>https://example.com/appcast.xml</string>\n<key>SUPublicEDKey</key><string>abc</string>",
        );
        let one = dir.path().join("one.plist");
        touch(&one, "<key>SUFeedURL</key>");

        assert!(has_update_feed_keys(&both).unwrap());
        assert!(!has_update_feed_keys(&one).unwrap());
    }

    #[test]
    fn binary_plist_has_no_update_feed() {
        let dir = TempDir::new().unwrap();
        let plist = dir.path().join("Info.plist");
        fs::write(&plist, b"bplist00\xd1\x01\x02\xff\xfeSUFeedURL").unwrap();

        assert!(!has_update_feed_keys(&plist).unwrap());
    }

    #[test]
    fn update_feed_keys_in_comments_still_count() {
        let dir = TempDir::new().unwrap();
        let plist = dir.path().join("Info.plist");
        touch(&plist, "<!-- SUFeedURL SUPublicEDKey -->");

        assert!(has_update_feed_keys(&plist).unwrap());
    }
}
