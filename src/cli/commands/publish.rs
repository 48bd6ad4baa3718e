//! `appdrop publish`: create a GitHub release through `gh`.

use path_absolutize::Absolutize;

use crate::cli::{PublishArgs, RuntimeConfig, exec};
use crate::error::Result;
use crate::pipeline::DEFAULT_OUTPUT_DIR;
use crate::release::{self, PublishOptions};

pub async fn run_publish(args: &PublishArgs, config: &RuntimeConfig) -> Result<()> {
    let root = config.root();

    let head_tag = if args.tag.is_none() && args.ref_name.is_none() {
        exec::capture("git", &["describe", "--tags", "--exact-match"], Some(root))
            .await
            .map_err(|e| log::debug!("No tag at HEAD: {}", e))
            .ok()
    } else {
        None
    };
    let tag = release::resolve_tag(
        args.tag.as_deref(),
        args.ref_name.as_deref(),
        head_tag.as_deref(),
    )?;

    let release_dir = root.absolutize()?.join(DEFAULT_OUTPUT_DIR);
    let assets = release::resolve_publish_assets(args.assets.clone(), &release_dir)?;
    let options = PublishOptions {
        title: args.title.clone(),
        notes: args.notes.clone(),
        notes_file: args.notes_file.clone(),
        assets,
        draft: args.draft,
        prerelease: args.prerelease,
    };
    let gh_args = release::publish_args(&tag, &options)?;

    if args.dry_run {
        if config.output().is_json() {
            return config.output().json(&gh_args);
        }
        config.info(&format!("gh {}", gh_args.join(" ")))?;
        return Ok(());
    }

    exec::require_tool(
        "gh",
        "Install the GitHub CLI (https://cli.github.com) to use appdrop publish",
    )?;
    config.info(&format!("Creating GitHub release {tag}"))?;
    exec::run_tool("gh", &gh_args, Some(root)).await?;
    config.success(&format!("Published {tag}"))?;
    Ok(())
}
