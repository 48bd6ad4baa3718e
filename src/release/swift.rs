//! `swift build` invocations for the CLI pipeline.

use crate::project::Architecture;

/// Arguments for a release `swift build` of one product and architecture.
pub fn swift_build_args(executable: &str, arch: Architecture) -> Vec<String> {
    vec![
        "build".to_string(),
        "-c".to_string(),
        "release".to_string(),
        "--arch".to_string(),
        arch.as_str().to_string(),
        "--product".to_string(),
        executable.to_string(),
    ]
}
