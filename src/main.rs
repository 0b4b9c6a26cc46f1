//! Repo-Ray CLI entry point

use clap::{Parser, Subcommand};
use repo_ray_core::Direction;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "repo-ray")]
#[command(about = "Turn repository listings into architecture diagrams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./repo-ray.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Overrides shared by the commands that run the transform.
#[derive(clap::Args, Debug, Default)]
pub struct TransformArgs {
    /// Label for the root node
    #[arg(short, long)]
    pub name: Option<String>,

    /// Cap on placed entries, for both listing modes
    #[arg(long)]
    pub cap: Option<usize>,

    /// Leave icons out of node labels
    #[arg(long)]
    pub no_icons: bool,

    /// Diagram direction
    #[arg(long, value_parser = parse_direction)]
    pub direction: Option<Direction>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a listing as a Mermaid diagram
    Render {
        /// Listing JSON file (reads stdin when omitted or "-")
        file: Option<PathBuf>,

        #[command(flatten)]
        args: TransformArgs,

        /// Print the full transform result as JSON instead of the diagram
        #[arg(long)]
        json: bool,
    },
    /// Transform a listing and report data-quality issues and invariant violations
    Check {
        /// Listing JSON file (reads stdin when omitted or "-")
        file: Option<PathBuf>,

        #[command(flatten)]
        args: TransformArgs,
    },
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },
    /// Show version
    Version,
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    match s.to_ascii_uppercase().as_str() {
        "TD" | "TB" => Ok(Direction::TD),
        "LR" => Ok(Direction::LR),
        "BT" => Ok(Direction::BT),
        "RL" => Ok(Direction::RL),
        other => Err(format!("unknown direction {other}, expected TD, LR, BT or RL")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries only the diagram.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "repo_ray={log_level},repo_ray_core={log_level},repo_ray_server={log_level}"
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Repo-Ray v{}", env!("CARGO_PKG_VERSION"));

    let cwd = std::env::current_dir()?;
    let app_config = config::AppConfig::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Render { file, args, json } => commands::render(file, &args, json, app_config),
        Commands::Check { file, args } => commands::check(file, &args, app_config),
        Commands::Serve { port, host } => commands::serve(host, port, app_config).await,
        Commands::Version => {
            println!("Repo-Ray v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
