//! Executable lookup on a configurable search path.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Finds executables the way a shell would, without running them.
///
/// Platform extension suffixes (`PATHEXT` on Windows) are tried by the
/// `which` crate.
#[derive(Debug, Clone)]
pub struct ExecutableResolver {
    /// Search path in the platform's `PATH` format
    search_path: Option<OsString>,

    /// Base for resolving names that contain a directory component
    cwd: PathBuf,
}

impl ExecutableResolver {
    /// Create a resolver over an explicit search path.
    pub fn new(search_path: Option<OsString>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            search_path,
            cwd: cwd.into(),
        }
    }

    /// Create a resolver over a list of directories.
    pub fn with_dirs<I, P>(dirs: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let joined = env::join_paths(dirs.into_iter().map(|d| d.as_ref().to_path_buf())).ok();
        Self::new(joined, cwd)
    }

    /// Create a resolver from the process `PATH` and working directory.
    pub fn from_env() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(env::var_os("PATH"), cwd)
    }

    /// Return the first matching executable, or `None` if there is none.
    pub fn resolve(&self, program: &str) -> Option<PathBuf> {
        match which::which_in(program, self.search_path.as_ref(), &self.cwd) {
            Ok(path) => {
                tracing::debug!("Resolved {} to {}", program, path.display());
                Some(path)
            }
            Err(e) => {
                tracing::debug!("Could not resolve {}: {}", program, e);
                None
            }
        }
    }
}
