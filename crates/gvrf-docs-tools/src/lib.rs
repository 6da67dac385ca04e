//! External tool plumbing for the GVRf documentation publisher.
//!
//! Everything that spawns a process goes through [`ToolRunner`], so the
//! pipeline can be driven against a fake in tests.

pub mod deploy;
pub mod javadoc;
pub mod mkdocs;
pub mod resolver;
pub mod runner;

pub use deploy::GhPagesDeploy;
pub use javadoc::JavadocJob;
pub use resolver::ExecutableResolver;
pub use runner::{Invocation, SystemRunner, ToolError, ToolOutput, ToolRunner};

/// Java API documentation generator.
pub const JAVADOC: &str = "javadoc";

/// Static site generator.
pub const MKDOCS: &str = "mkdocs";

/// Pushes a directory to a git branch; what `mkdocs gh-deploy` uses.
pub const GHP_IMPORT: &str = "ghp-import";
