//! `mkdocs build` invocation.

use std::path::Path;

use crate::runner::{log_output, Invocation, ToolError, ToolOutput, ToolRunner};

/// Command line for building the site rooted at `project_root`.
pub fn build_invocation(mkdocs: &Path, project_root: &Path) -> Invocation {
    Invocation::new(mkdocs)
        .arg("build")
        .current_dir(project_root)
}

/// Build the base documentation site.
///
/// mkdocs reports progress on stderr, so its output is only surfaced as
/// warnings when the build fails.
pub fn build(
    runner: &dyn ToolRunner,
    mkdocs: &Path,
    project_root: &Path,
) -> Result<ToolOutput, ToolError> {
    let output = runner.run(&build_invocation(mkdocs, project_root))?;

    log_output("mkdocs", &output);
    if !output.success {
        tracing::warn!("mkdocs build exited with {:?}", output.code);
    }

    Ok(output)
}
