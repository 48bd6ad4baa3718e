//! Argument vectors for the external release tools.
//!
//! The builders are pure functions of their inputs. Spawning the tools is
//! left to the CLI layer; the only file written here is the export options
//! manifest.

pub mod publish;
pub mod swift;
pub mod xcode;

pub use publish::{PublishOptions, publish_args, resolve_publish_assets, resolve_tag};
pub use swift::swift_build_args;
pub use xcode::{SigningStyle, archive_args, export_args, write_export_options};
