//! appdrop - release pipeline for macOS apps and Swift CLIs.
//!
//! This binary plans a release from the repository layout, validates the
//! required artifacts and secrets, and drives xcodebuild, swift and gh.

use std::process;

#[tokio::main]
async fn main() {
    // Run CLI and get exit code
    let exit_code = match appdrop::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
