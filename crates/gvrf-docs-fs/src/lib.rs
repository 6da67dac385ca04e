//! Filesystem helpers for the GVRf documentation publisher.
//!
//! Every operation reports an explicit [`FsOutcome`] so the caller decides
//! whether a missing path is fatal for its stage.

pub mod ops;
pub mod template;

pub use ops::{copy_files, copy_tree, remove_path, FsError, FsOutcome};
pub use template::{apply_version, substitute, TemplateError, VERSION_KEY};
