//! `javadoc` invocation for one sub-project.

use std::path::{Path, PathBuf};

use crate::runner::{log_output, Invocation, ToolError, ToolOutput, ToolRunner};

/// One javadoc run: a source tree rendered into an output folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavadocJob {
    /// Root of the Java sources (`src/main/java`)
    pub source_dir: PathBuf,

    /// Folder receiving the generated HTML
    pub output_dir: PathBuf,

    /// Package whose subpackages are documented
    pub package: String,
}

impl JavadocJob {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        package: impl Into<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            package: package.into(),
        }
    }

    /// Build the command line for the given javadoc executable.
    ///
    /// The source directory is not checked; javadoc tolerates a missing
    /// tree and produces no pages.
    pub fn invocation(&self, javadoc: &Path) -> Invocation {
        Invocation::new(javadoc)
            .arg("-Xdoclint:none")
            .arg("-d")
            .arg(&self.output_dir)
            .arg("-sourcepath")
            .arg(&self.source_dir)
            .arg("-subpackages")
            .arg(&self.package)
            .args(["-encoding", "UTF-8"])
            .args(["-charset", "UTF-8"])
            .arg("-quiet")
    }

    /// Run javadoc for this job.
    ///
    /// A non-zero exit is logged and returned, not raised.
    pub fn run(&self, runner: &dyn ToolRunner, javadoc: &Path) -> Result<ToolOutput, ToolError> {
        let output = runner.run(&self.invocation(javadoc))?;

        log_output("javadoc", &output);
        if !output.success {
            tracing::warn!(
                "javadoc exited with {:?} for {}",
                output.code,
                self.source_dir.display()
            );
        }

        Ok(output)
    }
}
