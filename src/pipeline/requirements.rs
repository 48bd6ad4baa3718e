//! Plan validation and secret requirements.

use super::descriptor::PipelineDescriptor;
use crate::error::{AppdropError, Result};

/// Code-signing identity, needed by every plan.
pub const SIGNING_IDENTITY: &str = "DEVELOPER_ID_APPLICATION";

/// App Store Connect API key id, needed for notarization.
pub const NOTARY_KEY_ID: &str = "APP_STORE_CONNECT_KEY_ID";

/// App Store Connect API private key, needed for notarization.
pub const NOTARY_PRIVATE_KEY: &str = "APP_STORE_CONNECT_PRIVATE_KEY";

/// Sparkle EdDSA private key, needed to sign updates.
pub const UPDATE_FEED_KEY: &str = "SPARKLE_PRIVATE_KEY";

/// Every secret a plan can require, in canonical order.
pub const REQUIRED_ENV_VARS: [&str; 4] = [
    SIGNING_IDENTITY,
    NOTARY_KEY_ID,
    NOTARY_PRIVATE_KEY,
    UPDATE_FEED_KEY,
];

/// Read when present, never required.
pub const OPTIONAL_ENV_VARS: [&str; 3] = ["APP_STORE_CONNECT_ISSUER_ID", "SPARKLE_BIN", "XCODE_PATH"];

/// Check that an Xcode app plan has every artifact it still needs.
///
/// Swift CLI plans always pass.
///
/// # Errors
///
/// [`AppdropError::Configuration`] naming the missing artifacts.
pub fn validate(pipeline: &PipelineDescriptor) -> Result<()> {
    if !pipeline.is_xcode_app() {
        return Ok(());
    }

    let mut missing = Vec::new();
    let mut fixes = Vec::new();
    if pipeline.missing_entitlements {
        missing.push("entitlements file");
        fixes.push("Add a <Scheme>.entitlements file to the project.");
    }
    if pipeline.missing_info_plist {
        missing.push("Info.plist (required by the update feed)");
        fixes.push("Add an Info.plist or pass --no-sparkle to skip the update feed.");
    }
    if missing.is_empty() {
        return Ok(());
    }

    Err(AppdropError::Configuration {
        message: format!("Missing project configuration: {}.", missing.join(", ")),
        hint: fixes.join(" "),
    })
}

/// Names of the secrets the plan needs, in canonical order.
pub fn required_secrets(pipeline: &PipelineDescriptor) -> Vec<&'static str> {
    let mut names = vec![SIGNING_IDENTITY];
    if pipeline.notarizes() {
        names.extend([NOTARY_KEY_ID, NOTARY_PRIVATE_KEY]);
    }
    if pipeline.sparkle {
        names.push(UPDATE_FEED_KEY);
    }
    names
}
