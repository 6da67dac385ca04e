//! Publishing the merged site to GitHub Pages.
//!
//! `mkdocs gh-deploy` would rebuild the site and drop the merged API
//! reference, so the already-merged directory is pushed with `ghp-import`
//! directly, using the same flags mkdocs passes to it.

use std::path::Path;

use crate::runner::{log_output, Invocation, ToolError, ToolOutput, ToolRunner};

/// Where and how to push the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhPagesDeploy {
    /// Git remote to push to
    pub remote: String,

    /// Branch that serves the pages
    pub branch: String,

    /// Commit message for the pages commit
    pub message: String,
}

impl Default for GhPagesDeploy {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "gh-pages".to_string(),
            message: "Deployed documentation".to_string(),
        }
    }
}

impl GhPagesDeploy {
    /// Command line pushing `site_dir` from the repository at `project_root`.
    pub fn invocation(
        &self,
        ghp_import: &Path,
        site_dir: &Path,
        project_root: &Path,
    ) -> Invocation {
        Invocation::new(ghp_import)
            .args(["--no-jekyll", "--push", "--force"])
            .args(["--remote", self.remote.as_str()])
            .args(["--branch", self.branch.as_str()])
            .args(["--message", self.message.as_str()])
            .arg(site_dir)
            .current_dir(project_root)
    }

    /// Push the site.
    pub fn run(
        &self,
        runner: &dyn ToolRunner,
        ghp_import: &Path,
        site_dir: &Path,
        project_root: &Path,
    ) -> Result<ToolOutput, ToolError> {
        tracing::info!(
            "Pushing {} to {}/{}",
            site_dir.display(),
            self.remote,
            self.branch
        );

        let output = runner.run(&self.invocation(ghp_import, site_dir, project_root))?;

        log_output("ghp-import", &output);
        if !output.success {
            tracing::error!("ghp-import exited with {:?}", output.code);
        }

        Ok(output)
    }
}
