//! Release pipeline planning.
//!
//! Turns a detected [`ProjectDescriptor`](crate::project::ProjectDescriptor)
//! into a [`PipelineDescriptor`]: the set of stages a release runs and the
//! artifacts and secrets those stages depend on.
//!
//! # Flow
//!
//! 1. [`resolve_pipeline`] inspects the project tree and toolchain
//! 2. [`apply_overrides`] applies operator downgrades
//! 3. [`validate`] rejects app plans with missing artifacts
//! 4. [`required_secrets`] lists the environment the plan needs
//!
//! # Module Organization
//!
//! - [`descriptor`] - plan and detection option types
//! - [`locator`] - Info.plist and entitlements search
//! - [`toolchain`] - Sparkle tool discovery
//! - [`resolver`] - default plan derivation
//! - [`overrides`] - downgrade directives
//! - [`requirements`] - validation and secret names

pub mod descriptor;
pub mod locator;
pub mod overrides;
pub mod requirements;
pub mod resolver;
pub mod toolchain;

pub use descriptor::{DEFAULT_BUILD_DIR, DEFAULT_OUTPUT_DIR, DetectionOptions, PipelineDescriptor};
pub use overrides::{Override, apply_overrides};
pub use requirements::{required_secrets, validate};
pub use resolver::resolve_pipeline;
pub use toolchain::{ToolchainRoots, UpdateToolchain, locate_update_toolchain};
