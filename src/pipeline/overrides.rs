//! Operator downgrade directives.
//!
//! Each override only ever clears flags, so any combination applied in any
//! order, any number of times, produces the same plan.

use super::descriptor::PipelineDescriptor;

/// A downgrade of a resolved plan.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Override {
    /// `--no-dmg`: skip the disk image and everything published from it
    DisablePackaging,
    /// `--no-sparkle`: skip update signing and appcast generation
    DisableUpdateFeed,
    /// `--no-notarize`: skip every notarization stage
    DisableNotarization,
}

impl Override {
    /// Order the CLI applies overrides in.
    pub const ALL: [Override; 3] = [
        Override::DisablePackaging,
        Override::DisableUpdateFeed,
        Override::DisableNotarization,
    ];

    pub fn apply(self, pipeline: PipelineDescriptor) -> PipelineDescriptor {
        match self {
            Override::DisablePackaging => PipelineDescriptor {
                create_dmg: false,
                notarize_dmg: false,
                generate_appcast: false,
                ..pipeline
            },
            Override::DisableUpdateFeed => PipelineDescriptor {
                sparkle: false,
                generate_appcast: false,
                sparkle_signing_enabled: false,
                ..pipeline
            }
            .rederive_missing(),
            Override::DisableNotarization => PipelineDescriptor {
                notarize_app: false,
                notarize_dmg: false,
                notarize_zip: false,
                ..pipeline
            },
        }
    }
}

/// Apply `overrides` left to right.
pub fn apply_overrides(
    pipeline: PipelineDescriptor,
    overrides: impl IntoIterator<Item = Override>,
) -> PipelineDescriptor {
    overrides.into_iter().fold(pipeline, |pipeline, directive| {
        log::debug!("Applying override {:?}", directive);
        directive.apply(pipeline)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::UpdateToolchain;
    use crate::project::{Architecture, ProjectType};
    use std::path::PathBuf;

    fn app_pipeline() -> PipelineDescriptor {
        PipelineDescriptor {
            project_type: ProjectType::XcodeApp,
            output_dir: PathBuf::from("/repo/build/release"),
            build_dir: PathBuf::from("/repo/build"),
            build_app: true,
            sign_app: true,
            notarize_app: true,
            create_dmg: true,
            notarize_dmg: true,
            sparkle_signing_enabled: true,
            sparkle_tools_available: true,
            sparkle: true,
            generate_appcast: true,
            entitlements_path: Some(PathBuf::from("/repo/App/App.entitlements")),
            info_plist_path: Some(PathBuf::from("/repo/App/Info.plist")),
            missing_entitlements: false,
            missing_info_plist: false,
            build_cli: false,
            sign_cli: false,
            create_zip: false,
            notarize_zip: false,
            executable_name: None,
            architectures: Vec::new(),
            update_toolchain: Some(UpdateToolchain {
                sign_tool: PathBuf::from("/tools/sign_update"),
                feed_tool: PathBuf::from("/tools/generate_appcast"),
            }),
        }
    }

    fn cli_pipeline() -> PipelineDescriptor {
        PipelineDescriptor {
            project_type: ProjectType::SwiftCli,
            build_app: false,
            sign_app: false,
            notarize_app: false,
            create_dmg: false,
            notarize_dmg: false,
            sparkle_signing_enabled: false,
            sparkle_tools_available: false,
            sparkle: false,
            generate_appcast: false,
            entitlements_path: None,
            info_plist_path: None,
            build_cli: true,
            sign_cli: true,
            create_zip: true,
            notarize_zip: true,
            executable_name: Some("tool".into()),
            architectures: Architecture::RELEASE.to_vec(),
            update_toolchain: None,
            ..app_pipeline()
        }
    }

    fn flags(p: &PipelineDescriptor) -> [bool; 15] {
        [
            p.build_app,
            p.sign_app,
            p.notarize_app,
            p.create_dmg,
            p.notarize_dmg,
            p.sparkle_signing_enabled,
            p.sparkle,
            p.generate_appcast,
            p.missing_entitlements,
            p.missing_info_plist,
            p.build_cli,
            p.sign_cli,
            p.create_zip,
            p.notarize_zip,
            p.sparkle_tools_available,
        ]
    }

    /// Every subset of overrides, in the canonical order.
    fn subsets() -> Vec<Vec<Override>> {
        (0..8u8)
            .map(|mask| {
                Override::ALL
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, o)| *o)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn disable_packaging() {
        let p = Override::DisablePackaging.apply(app_pipeline());
        assert!(!p.create_dmg && !p.notarize_dmg && !p.generate_appcast);
        assert!(p.sparkle && p.notarize_app && p.build_app);
    }

    #[test]
    fn disable_packaging_is_idempotent() {
        let once = Override::DisablePackaging.apply(app_pipeline());
        let twice = Override::DisablePackaging.apply(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn disable_update_feed() {
        let p = Override::DisableUpdateFeed.apply(app_pipeline());
        assert!(!p.sparkle && !p.generate_appcast && !p.sparkle_signing_enabled);
        assert!(p.create_dmg && p.notarize_dmg);
        assert!(!p.missing_entitlements && !p.missing_info_plist);
    }

    #[test]
    fn disable_update_feed_keeps_missing_entitlements() {
        let pipeline = PipelineDescriptor {
            entitlements_path: None,
            missing_entitlements: true,
            ..app_pipeline()
        };
        let p = Override::DisableUpdateFeed.apply(pipeline);
        assert!(p.missing_entitlements);
    }

    #[test]
    fn disable_update_feed_clears_feed_manifest_requirement() {
        let pipeline = PipelineDescriptor {
            info_plist_path: None,
            missing_info_plist: true,
            ..app_pipeline()
        };
        let p = Override::DisableUpdateFeed.apply(pipeline);
        assert!(!p.missing_info_plist);
    }

    #[test]
    fn disable_notarization() {
        let app = Override::DisableNotarization.apply(app_pipeline());
        assert!(!app.notarize_app && !app.notarize_dmg);
        assert!(app.create_dmg && app.sign_app);

        let cli = Override::DisableNotarization.apply(cli_pipeline());
        assert!(!cli.notarize_zip && cli.create_zip && cli.sign_cli);
        assert!(!cli.notarizes());
    }

    #[test]
    fn feed_then_packaging_equals_packaging_then_feed() {
        let a = apply_overrides(
            app_pipeline(),
            [Override::DisableUpdateFeed, Override::DisablePackaging],
        );
        let b = apply_overrides(
            app_pipeline(),
            [Override::DisablePackaging, Override::DisableUpdateFeed],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn all_orders_agree() {
        let orders = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        for base in [app_pipeline(), cli_pipeline()] {
            let expected = apply_overrides(base.clone(), Override::ALL);
            for order in orders {
                let got = apply_overrides(base.clone(), order.map(|i| Override::ALL[i]));
                assert_eq!(got, expected, "order {order:?}");
            }
        }
    }

    #[test]
    fn overrides_never_raise_a_flag() {
        for base in [app_pipeline(), cli_pipeline()] {
            for subset in subsets() {
                let before = flags(&base);
                let after = flags(&apply_overrides(base.clone(), subset.clone()));
                for (b, a) in before.iter().zip(after.iter()) {
                    assert!(*b || !*a, "override set {subset:?} raised a flag");
                }
            }
        }
    }

    #[test]
    fn notarized_packages_always_exist() {
        for base in [app_pipeline(), cli_pipeline()] {
            for subset in subsets() {
                let p = apply_overrides(base.clone(), subset.clone());
                assert!(!p.notarize_dmg || p.create_dmg, "{subset:?}");
                assert!(!p.notarize_zip || p.create_zip, "{subset:?}");
                assert!(!p.generate_appcast || p.sparkle, "{subset:?}");
                assert!(!p.sparkle || p.sparkle_signing_enabled, "{subset:?}");
            }
        }
    }

    #[test]
    fn reapplying_any_directive_is_a_no_op() {
        for directive in Override::ALL {
            let once = directive.apply(app_pipeline());
            assert_eq!(directive.apply(once.clone()), once);
        }
    }
}
