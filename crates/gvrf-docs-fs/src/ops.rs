//! Copy and delete operations over the docs output trees.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// What a filesystem operation found at its source path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOutcome {
    /// The operation ran to completion
    Done,

    /// A snapshot copy finished with this many files copied
    Copied(usize),

    /// The source path did not exist; nothing was touched
    NotFound,
}

impl FsOutcome {
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done | Self::Copied(_))
    }
}

/// Errors that can occur while copying or deleting.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

impl FsError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Copy every regular file directly inside `src` into `dst`.
///
/// Subdirectories are ignored. `dst` is created when missing. Returns
/// [`FsOutcome::Copied`] with the number of files copied.
pub fn copy_files(src: &Path, dst: &Path) -> Result<FsOutcome, FsError> {
    if !src.is_dir() {
        return Ok(FsOutcome::NotFound);
    }

    fs::create_dir_all(dst).map_err(|e| FsError::io(dst, e))?;

    let mut copied = 0usize;
    for entry in fs::read_dir(src).map_err(|e| FsError::io(src, e))? {
        let entry = entry.map_err(|e| FsError::io(src, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let target = dst.join(entry.file_name());
        fs::copy(&path, &target).map_err(|e| FsError::io(&path, e))?;
        copied += 1;
    }

    tracing::debug!("Copied {} files from {} to {}", copied, src.display(), dst.display());

    Ok(FsOutcome::Copied(copied))
}

/// Copy a directory tree, or a single file, from `src` to `dst`.
///
/// Directory copies never merge: an existing `dst` is an error. A file
/// copied onto an existing directory lands inside it.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<FsOutcome, FsError> {
    if src.is_dir() {
        if dst.exists() {
            return Err(FsError::DestinationExists(dst.to_path_buf()));
        }

        for entry in WalkDir::new(src) {
            let entry = entry.map_err(|e| FsError::Walk {
                path: src.to_path_buf(),
                message: e.to_string(),
            })?;

            let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
            let target = dst.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| FsError::io(&target, e))?;
            } else {
                fs::copy(entry.path(), &target).map_err(|e| FsError::io(entry.path(), e))?;
            }
        }

        Ok(FsOutcome::Done)
    } else if src.exists() {
        let target = if dst.is_dir() {
            match src.file_name() {
                Some(name) => dst.join(name),
                None => dst.to_path_buf(),
            }
        } else {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent).map_err(|e| FsError::io(parent, e))?;
            }
            dst.to_path_buf()
        };

        fs::copy(src, &target).map_err(|e| FsError::io(src, e))?;
        Ok(FsOutcome::Done)
    } else {
        Ok(FsOutcome::NotFound)
    }
}

/// Remove a directory tree or a single file.
pub fn remove_path(path: &Path) -> Result<FsOutcome, FsError> {
    if path.is_dir() {
        fs::remove_dir_all(path).map_err(|e| FsError::io(path, e))?;
        Ok(FsOutcome::Done)
    } else if path.is_file() {
        fs::remove_file(path).map_err(|e| FsError::io(path, e))?;
        Ok(FsOutcome::Done)
    } else {
        Ok(FsOutcome::NotFound)
    }
}
