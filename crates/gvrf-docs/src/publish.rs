//! Publish command: resolve configuration once, then run the pipeline.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use gvrf_docs_publish::{
    framework_source, DeployTarget, PublishConfig, Publisher, Version, DEFAULT_VERSION,
    FRAMEWORK_SOURCE_ENV,
};
use gvrf_docs_tools::{ExecutableResolver, SystemRunner};

use crate::config::{load_config, ConfigFile};

/// Options taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub version: Option<String>,
    pub deploy: Option<String>,
}

/// Merge command line, config file and environment into a pipeline config.
///
/// Flags override the file; the file overrides built-in defaults.
pub fn build_config(
    root: PathBuf,
    options: &PublishOptions,
    file: ConfigFile,
    source_env: Option<OsString>,
) -> PublishConfig {
    let mut config = PublishConfig::new(&root);

    let raw_version = options
        .version
        .as_deref()
        .or(file.docs.version.as_deref())
        .unwrap_or(DEFAULT_VERSION);
    config.version = Version::new(raw_version);

    config.framework_source = framework_source(source_env.map(PathBuf::from), &root);
    config.site_dir = file.docs.site_dir;
    config.temp_dir = file.docs.temp_dir;
    config.api_template_dir = file.docs.api_template_dir;
    config.deploy = options.deploy.as_deref().map(DeployTarget::parse);

    if let Some(remote) = file.deploy.remote {
        config.gh_pages.remote = remote;
    }
    if let Some(branch) = file.deploy.branch {
        config.gh_pages.branch = branch;
    }
    if let Some(message) = file.deploy.message {
        config.gh_pages.message = message;
    }

    config
}

/// Run the publish pipeline.
pub fn run(options: PublishOptions) -> Result<()> {
    let root = match &options.root {
        Some(root) => root.clone(),
        None => env::current_dir().context("Failed to read current directory")?,
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("Project root not found: {}", root.display()))?;

    let config_path = options
        .config
        .clone()
        .unwrap_or_else(|| root.join("publish.toml"));
    let file = load_config(&config_path)?;

    let config = build_config(root, &options, file, env::var_os(FRAMEWORK_SOURCE_ENV));

    tracing::info!("Setting up environment");
    tracing::info!("Project root: {}", config.project_root.display());
    tracing::info!("GVRf source: {}", config.framework_source.display());

    let runner = SystemRunner::new();
    let resolver = ExecutableResolver::from_env();
    let report = Publisher::new(config, &runner, resolver).publish()?;

    if report.is_complete() {
        tracing::info!("Published documentation {} in {}ms", report.version, report.duration_ms);
    } else {
        tracing::warn!(
            "Finished documentation {} with missing pieces in {}ms: {:?}",
            report.version,
            report.duration_ms,
            report
        );
    }

    Ok(())
}
