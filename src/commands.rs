//! CLI command implementations

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use repo_ray_core::{check_invariants, render_mermaid, transform, Listing, TransformConfig};
use repo_ray_server::RepoRayServer;

use crate::config::AppConfig;
use crate::TransformArgs;

pub fn render(
    file: Option<PathBuf>,
    args: &TransformArgs,
    json: bool,
    app_config: AppConfig,
) -> anyhow::Result<()> {
    let config = apply_overrides(app_config.transform, args)?;
    let listing = read_listing(file.as_deref())?;
    let result = transform(&listing, &config);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_mermaid(&result, config.direction));
    }
    Ok(())
}

pub fn check(file: Option<PathBuf>, args: &TransformArgs, app_config: AppConfig) -> anyhow::Result<()> {
    let config = apply_overrides(app_config.transform, args)?;
    let listing = read_listing(file.as_deref())?;
    let result = transform(&listing, &config);
    let stats = result.stats;

    println!(
        "{:?} listing: {} listed, {} after filtering, {} placed, {} omitted",
        result.mode, stats.listed, stats.filtered, stats.placed, stats.omitted
    );
    for issue in &result.issues {
        println!("issue: {}", serde_json::to_string(issue)?);
    }

    let violations = check_invariants(&result, config.cap_for(listing.mode));
    for violation in &violations {
        println!("violation: {violation}");
    }
    if !violations.is_empty() {
        bail!("{} invariant violation(s)", violations.len());
    }
    println!("ok: {} nodes, {} edges", result.nodes.len(), result.edges.len());
    Ok(())
}

pub async fn serve(host: Option<String>, port: Option<u16>, app_config: AppConfig) -> anyhow::Result<()> {
    let mut server_config = app_config.server;
    if let Some(host) = host {
        server_config.host = host;
    }
    if let Some(port) = port {
        server_config.port = port;
    }

    tracing::info!("Starting Repo-Ray server on {}:{}", server_config.host, server_config.port);
    RepoRayServer::new(app_config.transform, server_config).start().await
}

fn apply_overrides(mut config: TransformConfig, args: &TransformArgs) -> anyhow::Result<TransformConfig> {
    if let Some(name) = &args.name {
        config.root_label = name.clone();
    }
    if let Some(cap) = args.cap {
        if cap == 0 {
            bail!("--cap must be at least 1");
        }
        config = config.with_cap(cap);
    }
    if args.no_icons {
        config.icons = false;
    }
    if let Some(direction) = args.direction {
        config.direction = direction;
    }
    Ok(config)
}

/// Read a listing from a file, or from stdin for `None` / `-`.
fn read_listing(file: Option<&Path>) -> anyhow::Result<Listing> {
    let input = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading listing {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading listing from stdin")?;
            buf
        }
    };
    Ok(Listing::from_json(&input)?)
}
