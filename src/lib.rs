//! Release pipeline planner for macOS apps and Swift command line tools
//!
//! This library detects what kind of Swift project lives in a repository
//! and derives the release stages it needs:
//! - Xcode apps: archive, sign, DMG, notarization, Sparkle update feed
//! - Swift packages: release builds, signing, zip, notarization
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod project;
pub mod release;
pub mod secrets;

// Re-export commonly used types
pub use error::{AppdropError, CliError, Result};
