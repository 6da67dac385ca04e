//! Framework sub-projects that get an API reference.

use std::path::{Path, PathBuf};

/// A Java sub-project of the framework source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubProject {
    /// Output folder name under the versioned API reference
    pub name: &'static str,

    /// Path components of `src/main/java`, relative to the framework root
    pub source: &'static [&'static str],

    /// Root package passed to `-subpackages`
    pub package: &'static str,
}

impl SubProject {
    /// Absolute source directory under `framework_root`.
    pub fn source_dir(&self, framework_root: &Path) -> PathBuf {
        self.source
            .iter()
            .fold(framework_root.to_path_buf(), |path, part| path.join(part))
    }

    /// Output folder under the versioned API reference directory.
    pub fn output_dir(&self, version_dir: &Path) -> PathBuf {
        version_dir.join(self.name)
    }
}

pub const SUBPROJECTS: [SubProject; 6] = [
    SubProject {
        name: "Framework",
        source: &["GVRf", "Framework", "framework", "src", "main", "java"],
        package: "org.gearvrf",
    },
    SubProject {
        name: "3DCursor",
        source: &[
            "GVRf",
            "Extensions",
            "3DCursor",
            "3DCursorLibrary",
            "src",
            "main",
            "java",
        ],
        package: "org.gearvrf",
    },
    SubProject {
        name: "DebugWebServer",
        source: &[
            "GVRf",
            "Extensions",
            "DebugWebServer",
            "debugwebserver",
            "src",
            "main",
            "java",
        ],
        package: "smcl.samsung",
    },
    SubProject {
        name: "SceneSerializer",
        source: &[
            "GVRf",
            "Extensions",
            "SceneSerializer",
            "sceneserializer",
            "src",
            "main",
            "java",
        ],
        package: "org.gearvrf",
    },
    SubProject {
        name: "gvrf-physics",
        source: &["GVRf", "Extensions", "gvrf-physics", "src", "main", "java"],
        package: "org.gearvrf",
    },
    SubProject {
        name: "gvrf-particlesystem",
        source: &[
            "GVRf",
            "Extensions",
            "gvrf-particlesystem",
            "src",
            "main",
            "java",
        ],
        package: "org.gearvrf",
    },
];
