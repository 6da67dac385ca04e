//! Version placeholder substitution for the API reference landing pages.
//!
//! Placeholders use `$name` / `${name}` syntax with `$$` as an escaped
//! dollar sign. Only [`VERSION_KEY`] is known; any other placeholder is an
//! error rather than being left in the output.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::ops::FsOutcome;

/// Placeholder name replaced with the documentation version.
pub const VERSION_KEY: &str = "gvrf_version";

/// Errors that can occur while substituting placeholders.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Unknown placeholder ${key} at line {line}, column {column}")]
    UnknownKey {
        key: String,
        line: usize,
        column: usize,
    },

    #[error("Invalid placeholder at line {line}, column {column}")]
    InvalidPlaceholder { line: usize, column: usize },

    #[error("Failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write template {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {inner}")]
    InFile {
        path: PathBuf,
        #[source]
        inner: Box<TemplateError>,
    },
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_a-zA-Z][_a-zA-Z0-9]*)|\{(?P<braced>[_a-zA-Z][_a-zA-Z0-9]*)\}|(?P<invalid>))",
    )
    .expect("placeholder pattern is valid")
});

/// 1-based line and column of a byte offset.
fn position(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(nl) => offset - nl,
        None => offset + 1,
    };
    (line, column)
}

/// Replace every version placeholder in `source` with `version`.
pub fn substitute(source: &str, version: &str) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(source.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(source) {
        let whole = caps.get(0).expect("group 0 always participates");
        output.push_str(&source[last..whole.start()]);
        last = whole.end();

        output.push_str(resolve(source, &caps, whole.start(), version)?);
    }

    output.push_str(&source[last..]);
    Ok(output)
}

fn resolve<'v>(
    source: &str,
    caps: &Captures<'_>,
    start: usize,
    version: &'v str,
) -> Result<&'v str, TemplateError> {
    if caps.name("escaped").is_some() {
        return Ok("$");
    }

    let key = caps.name("named").or_else(|| caps.name("braced"));
    match key {
        Some(key) if key.as_str() == VERSION_KEY => Ok(version),
        Some(key) => {
            let (line, column) = position(source, start);
            Err(TemplateError::UnknownKey {
                key: key.as_str().to_string(),
                line,
                column,
            })
        }
        None => {
            let (line, column) = position(source, start);
            Err(TemplateError::InvalidPlaceholder { line, column })
        }
    }
}

/// Substitute the version into the file at `path`, rewriting it in place.
///
/// A missing file yields [`FsOutcome::NotFound`] and writes nothing.
pub fn apply_version(path: &Path, version: &str) -> Result<FsOutcome, TemplateError> {
    if !path.is_file() {
        return Ok(FsOutcome::NotFound);
    }

    let content = fs::read_to_string(path).map_err(|e| TemplateError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let replaced = substitute(&content, version).map_err(|e| TemplateError::InFile {
        path: path.to_path_buf(),
        inner: Box::new(e),
    })?;

    fs::write(path, replaced).map_err(|e| TemplateError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(FsOutcome::Done)
}
