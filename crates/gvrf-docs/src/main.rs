//! gvrf-docs CLI - builds and publishes the GVRf documentation site.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod publish;

#[derive(Parser)]
#[command(name = "gvrf-docs")]
#[command(about = "Generate the documentation site for GearVR Framework")]
#[command(version)]
pub struct Cli {
    /// GVRf version to document (a leading "v" is added if missing)
    #[arg(short = 'v', long = "doc-version", value_name = "VERSION")]
    doc_version: Option<String>,

    /// Deploy target; only "github" deploys
    #[arg(short, long, value_name = "TARGET")]
    deploy: Option<String>,

    /// Docs project root (defaults to the current directory)
    #[arg(short = 'C', long)]
    root: Option<PathBuf>,

    /// Path to publish.toml config file (defaults to <root>/publish.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt().with_env_filter(filter).with_target(false).init();

    publish::run(publish::PublishOptions {
        root: cli.root,
        config: cli.config,
        version: cli.doc_version,
        deploy: cli.deploy,
    })
}
