//! Build, merge and deploy pipeline for the GVRf documentation site.
//!
//! Builds the mkdocs site, generates javadoc for each framework
//! sub-project, overlays the API reference template and embeds the result
//! under `site/api_reference`.

pub mod config;
pub mod publisher;
pub mod subprojects;
pub mod version;

pub use config::{framework_source, PublishConfig, FRAMEWORK_DIR_NAME, FRAMEWORK_SOURCE_ENV};
pub use publisher::{DeployOutcome, PublishError, PublishReport, Publisher};
pub use subprojects::{SubProject, SUBPROJECTS};
pub use version::{DeployTarget, Version, DEFAULT_VERSION};
