//! Pipeline configuration, resolved once before the pipeline starts.

use std::path::{Path, PathBuf};

use gvrf_docs_tools::GhPagesDeploy;

use crate::version::{DeployTarget, Version};

/// Environment variable naming the framework source checkout.
pub const FRAMEWORK_SOURCE_ENV: &str = "GVRF_SOURCE_PATH";

/// Sibling directory assumed when the variable is unset.
pub const FRAMEWORK_DIR_NAME: &str = "GearVRf";

/// Configuration for one publish run.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Docs project root (where `mkdocs.yml` lives)
    pub project_root: PathBuf,

    /// Root of the framework source checkout
    pub framework_source: PathBuf,

    /// Documentation version
    pub version: Version,

    /// mkdocs output directory
    pub site_dir: PathBuf,

    /// Scratch directory for the generated API reference
    pub temp_dir: PathBuf,

    /// API reference template directory (contains `index2.html` and `template/`)
    pub api_template_dir: PathBuf,

    /// Deploy target, if any
    pub deploy: Option<DeployTarget>,

    /// GitHub Pages settings used when deploying to `github`
    pub gh_pages: GhPagesDeploy,
}

impl PublishConfig {
    /// Defaults for a project rooted at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let framework_source = framework_source(None, &project_root);
        Self {
            project_root,
            framework_source,
            version: Version::default(),
            site_dir: PathBuf::from("site"),
            temp_dir: PathBuf::from("temp"),
            api_template_dir: PathBuf::from("api_reference"),
            deploy: None,
            gh_pages: GhPagesDeploy::default(),
        }
    }

    /// Resolve `path` against the project root unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    pub fn site_path(&self) -> PathBuf {
        self.resolve(&self.site_dir)
    }

    pub fn temp_path(&self) -> PathBuf {
        self.resolve(&self.temp_dir)
    }

    pub fn api_template_path(&self) -> PathBuf {
        self.resolve(&self.api_template_dir)
    }

    /// `<temp>/<version>`, where the sub-project folders are generated.
    pub fn version_path(&self) -> PathBuf {
        self.temp_path().join(self.version.as_str())
    }
}

/// Pick the framework source root.
///
/// An explicit, non-empty value wins; otherwise a `GearVRf` directory next
/// to the project root is assumed.
pub fn framework_source(explicit: Option<PathBuf>, project_root: &Path) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }

    match project_root.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(FRAMEWORK_DIR_NAME),
        _ => project_root.join("..").join(FRAMEWORK_DIR_NAME),
    }
}
