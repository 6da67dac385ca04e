//! Documentation site publisher.

use std::path::{Path, PathBuf};
use std::time::Instant;

use gvrf_docs_fs::{
    apply_version, copy_files, copy_tree, remove_path, FsError, FsOutcome, TemplateError,
};
use gvrf_docs_tools::{
    mkdocs, ExecutableResolver, JavadocJob, ToolError, ToolRunner, GHP_IMPORT, JAVADOC, MKDOCS,
};

use crate::config::PublishConfig;
use crate::subprojects::SUBPROJECTS;
use crate::version::{DeployTarget, Version};

/// Folder inside the site that receives the API reference.
const SITE_API_DIR: &str = "api_reference";

/// Subfolder of the API reference template overlaid on the versioned output.
const TEMPLATE_SUBDIR: &str = "template";

/// Landing page at the API reference root.
const ROOT_INDEX: &str = "index2.html";

/// Landing page inside the versioned folder.
const VERSION_INDEX: &str = "index.html";

/// Errors that stop a publish run.
///
/// Missing tools, a missing framework checkout and a missing site are not
/// errors; they are recorded in the [`PublishReport`].
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("Failed to update version placeholder: {0}")]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// What happened to the deploy stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// No deploy target was given
    NotRequested,

    /// A target other than `github`; accepted and ignored
    Ignored(String),

    /// `ghp-import` could not be found
    ToolMissing,

    /// The push ran and succeeded
    Pushed,

    /// The push ran and failed
    Failed(Option<i32>),

    /// The pipeline stopped before reaching deploy
    Skipped,
}

/// Result of a publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Version used throughout the run
    pub version: Version,

    /// Required tools that could not be found
    pub missing_tools: Vec<&'static str>,

    /// Whether `mkdocs build` exited successfully
    pub site_built: bool,

    /// Whether the framework source root was missing
    pub source_missing: bool,

    /// Sub-projects whose output folder exists after javadoc ran
    pub generated: Vec<&'static str>,

    /// Whether the template files were overlaid on the versioned output
    pub template_merged: bool,

    /// Whether the API reference was copied into the site
    pub merged: bool,

    /// Whether the site directory was missing at merge time
    pub site_missing: bool,

    /// Deploy stage result
    pub deploy: DeployOutcome,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

impl PublishReport {
    fn new(version: Version) -> Self {
        Self {
            version,
            missing_tools: Vec::new(),
            site_built: false,
            source_missing: false,
            generated: Vec::new(),
            template_merged: false,
            merged: false,
            site_missing: false,
            deploy: DeployOutcome::NotRequested,
            duration_ms: 0,
        }
    }

    /// True when every stage ran and produced its full output.
    pub fn is_complete(&self) -> bool {
        self.missing_tools.is_empty()
            && self.site_built
            && !self.source_missing
            && self.generated.len() == SUBPROJECTS.len()
            && self.template_merged
            && self.merged
            && matches!(
                self.deploy,
                DeployOutcome::NotRequested | DeployOutcome::Ignored(_) | DeployOutcome::Pushed
            )
    }
}

/// Runs the build, merge and deploy pipeline.
pub struct Publisher<'a> {
    config: PublishConfig,
    runner: &'a dyn ToolRunner,
    resolver: ExecutableResolver,
}

impl<'a> Publisher<'a> {
    /// Create a new publisher.
    pub fn new(
        config: PublishConfig,
        runner: &'a dyn ToolRunner,
        resolver: ExecutableResolver,
    ) -> Self {
        Self {
            config,
            runner,
            resolver,
        }
    }

    /// Run every stage in order.
    ///
    /// Without mkdocs there is no site to publish and nothing runs. Without
    /// javadoc only the API reference stages are skipped.
    pub fn publish(&self) -> Result<PublishReport, PublishError> {
        let start = Instant::now();
        let mut report = PublishReport::new(self.config.version.clone());

        tracing::info!("GVRf version: {}", self.config.version);

        let deploy_pending = self.config.deploy.is_some();
        let finish = |mut report: PublishReport| {
            if deploy_pending && report.deploy == DeployOutcome::NotRequested {
                report.deploy = DeployOutcome::Skipped;
            }
            report.duration_ms = start.elapsed().as_millis() as u64;
            report
        };

        let javadoc = self.resolve_tool(
            JAVADOC,
            "Failed to find javadoc, please check your Java setup",
            &mut report,
        );
        let Some(mkdocs_path) = self.resolve_tool(
            MKDOCS,
            "Failed to find mkdocs, please follow the README to set it up",
            &mut report,
        ) else {
            return Ok(finish(report));
        };

        tracing::info!("Generating documentation site");
        let output = mkdocs::build(self.runner, &mkdocs_path, &self.config.project_root)?;
        report.site_built = output.success;

        match javadoc {
            Some(javadoc) => {
                tracing::info!("Generating API reference");
                self.stage_api_reference()?;
                self.generate_api_docs(&javadoc, &mut report)?;
                self.merge_template(&mut report)?;
            }
            None => tracing::warn!("Skipping API reference generation"),
        }

        tracing::info!("Merging API reference with documentation");
        if !self.merge_into_site(&mut report)? {
            return Ok(finish(report));
        }

        report.deploy = self.deploy()?;

        Ok(finish(report))
    }

    /// Find a required tool, recording it as missing when absent.
    fn resolve_tool(
        &self,
        tool: &'static str,
        hint: &str,
        report: &mut PublishReport,
    ) -> Option<PathBuf> {
        let path = self.resolver.resolve(tool);
        if path.is_none() {
            tracing::error!("{}", hint);
            report.missing_tools.push(tool);
        }
        path
    }

    /// Reset the scratch tree to a fresh copy of the API reference template.
    fn stage_api_reference(&self) -> Result<(), PublishError> {
        let temp = self.config.temp_path();
        let template = self.config.api_template_path();

        warn_if_missing(remove_path(&temp)?, &temp);
        warn_if_missing(copy_tree(&template, &temp)?, &template);

        Ok(())
    }

    /// Run javadoc for every sub-project, unless the framework checkout is missing.
    fn generate_api_docs(
        &self,
        javadoc: &Path,
        report: &mut PublishReport,
    ) -> Result<(), PublishError> {
        let source_root = &self.config.framework_source;
        if !source_root.is_dir() {
            tracing::error!("Invalid GVRf path: {}", source_root.display());
            report.source_missing = true;
            return Ok(());
        }

        let version_dir = self.config.version_path();
        warn_if_missing(remove_path(&version_dir)?, &version_dir);

        for project in &SUBPROJECTS {
            tracing::info!("Generating javadoc for {}", project.name);

            let job = JavadocJob::new(
                project.source_dir(source_root),
                project.output_dir(&version_dir),
                project.package,
            );
            job.run(self.runner, javadoc)?;

            if job.output_dir.is_dir() {
                report.generated.push(project.name);
            } else {
                tracing::warn!("No API reference generated for {}", project.name);
            }
        }

        Ok(())
    }

    /// Overlay the template files and stamp the version into both landing pages.
    fn merge_template(&self, report: &mut PublishReport) -> Result<(), PublishError> {
        tracing::info!("Copying API reference template");

        let template = self.config.api_template_path().join(TEMPLATE_SUBDIR);
        let version_dir = self.config.version_path();

        let outcome = copy_files(&template, &version_dir)?;
        warn_if_missing(outcome, &template);
        report.template_merged = outcome.is_done();

        let version = self.config.version.as_str();
        for page in [
            self.config.temp_path().join(ROOT_INDEX),
            version_dir.join(VERSION_INDEX),
        ] {
            warn_if_missing(apply_version(&page, version)?, &page);
        }

        Ok(())
    }

    /// Replace `site/api_reference`; false when there is no site to merge into.
    fn merge_into_site(&self, report: &mut PublishReport) -> Result<bool, PublishError> {
        let site = self.config.site_path();
        if !site.is_dir() {
            tracing::error!(
                "Failed to find site directory {}, please make sure mkdocs is set up correctly",
                site.display()
            );
            report.site_missing = true;
            return Ok(false);
        }

        let target = site.join(SITE_API_DIR);
        warn_if_missing(remove_path(&target)?, &target);

        let temp = self.config.temp_path();
        let outcome = copy_tree(&temp, &target)?;
        warn_if_missing(outcome, &temp);
        report.merged = outcome.is_done();

        if report.merged {
            tracing::info!("Added API reference to {}", target.display());
        }

        Ok(true)
    }

    fn deploy(&self) -> Result<DeployOutcome, PublishError> {
        match &self.config.deploy {
            None => Ok(DeployOutcome::NotRequested),
            Some(DeployTarget::Other(name)) => {
                tracing::debug!("Ignoring unsupported deploy target {}", name);
                Ok(DeployOutcome::Ignored(name.clone()))
            }
            Some(DeployTarget::Github) => {
                tracing::info!("Deploying to GitHub");

                let Some(ghp_import) = self.resolver.resolve(GHP_IMPORT) else {
                    tracing::error!("Failed to find ghp-import, please install it to deploy");
                    return Ok(DeployOutcome::ToolMissing);
                };

                let output = self.config.gh_pages.run(
                    self.runner,
                    &ghp_import,
                    &self.config.site_path(),
                    &self.config.project_root,
                )?;

                if output.success {
                    Ok(DeployOutcome::Pushed)
                } else {
                    Ok(DeployOutcome::Failed(output.code))
                }
            }
        }
    }
}

fn warn_if_missing(outcome: FsOutcome, path: &Path) {
    if outcome == FsOutcome::NotFound {
        tracing::warn!("Invalid path: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gvrf_docs_tools::{Invocation, ToolOutput};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Fakes the external tools by writing what they would produce.
    #[derive(Default)]
    struct FakeRunner {
        calls: RefCell<Vec<Invocation>>,
        mkdocs_creates_site: bool,
        deploy_fails: bool,
    }

    impl FakeRunner {
        fn building_site() -> Self {
            Self {
                mkdocs_creates_site: true,
                ..Default::default()
            }
        }

        fn programs(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .map(|c| c.program_name().to_string())
                .collect()
        }

        fn arg_after(invocation: &Invocation, flag: &str) -> Option<PathBuf> {
            let pos = invocation.args.iter().position(|a| a == flag)?;
            invocation.args.get(pos + 1).map(PathBuf::from)
        }
    }

    impl ToolRunner for FakeRunner {
        fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError> {
            self.calls.borrow_mut().push(invocation.clone());

            match invocation.program_name() {
                "mkdocs" => {
                    if self.mkdocs_creates_site {
                        let site = invocation.cwd.clone().unwrap().join("site");
                        fs::create_dir_all(&site).unwrap();
                        fs::write(site.join("index.html"), "home").unwrap();
                    }
                    Ok(ToolOutput::ok())
                }
                "javadoc" => {
                    let source = Self::arg_after(invocation, "-sourcepath").unwrap();
                    if !source.is_dir() {
                        return Ok(ToolOutput::failed(1, "error: No source files"));
                    }
                    let out = Self::arg_after(invocation, "-d").unwrap();
                    fs::create_dir_all(&out).unwrap();
                    fs::write(out.join("index.html"), "javadoc").unwrap();
                    Ok(ToolOutput::ok())
                }
                "ghp-import" if self.deploy_fails => Ok(ToolOutput::failed(1, "rejected")),
                _ => Ok(ToolOutput::ok()),
            }
        }
    }

    struct Workspace {
        _temp: TempDir,
        root: PathBuf,
        framework: PathBuf,
        bin: PathBuf,
    }

    impl Workspace {
        /// A docs project with an API reference template, next to a framework checkout.
        fn new() -> Self {
            let temp = tempdir().unwrap();
            let root = temp.path().join("docs");
            let framework = temp.path().join("GearVRf");
            let bin = temp.path().join("bin");
            fs::create_dir_all(&bin).unwrap();

            let api = root.join("api_reference");
            fs::create_dir_all(api.join("template")).unwrap();
            fs::write(
                api.join("index2.html"),
                "<a href=\"$gvrf_version/index.html\">GVRf $gvrf_version</a>",
            )
            .unwrap();
            fs::write(
                api.join("template").join("index.html"),
                "<h1>API ${gvrf_version}</h1>",
            )
            .unwrap();
            fs::write(api.join("template").join("style.css"), "body {}").unwrap();

            for project in &SUBPROJECTS {
                let src = project.source_dir(&framework);
                fs::create_dir_all(&src).unwrap();
                fs::write(src.join("Placeholder.java"), "class Placeholder {}").unwrap();
            }

            Self {
                _temp: temp,
                root,
                framework,
                bin,
            }
        }

        #[cfg(unix)]
        fn install(&self, tool: &str) {
            use std::os::unix::fs::PermissionsExt;

            let path = self.bin.join(tool);
            fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        #[cfg(unix)]
        fn install_all(&self) {
            for tool in [JAVADOC, MKDOCS, GHP_IMPORT] {
                self.install(tool);
            }
        }

        fn resolver(&self) -> ExecutableResolver {
            ExecutableResolver::with_dirs([&self.bin], &self.root)
        }

        fn config(&self, version: &str) -> PublishConfig {
            let mut config = PublishConfig::new(&self.root);
            config.framework_source = self.framework.clone();
            config.version = Version::new(version);
            config
        }
    }

    #[test]
    fn missing_tools_abort_before_running_anything() {
        let ws = Workspace::new();
        let runner = FakeRunner::building_site();

        let report = Publisher::new(ws.config("3.3"), &runner, ws.resolver())
            .publish()
            .unwrap();

        assert_eq!(report.missing_tools, vec![JAVADOC, MKDOCS]);
        assert!(runner.calls.borrow().is_empty());
        assert!(!ws.root.join("temp").exists());
        assert!(!report.is_complete());
    }

    #[cfg(unix)]
    #[test]
    fn missing_javadoc_still_builds_merges_and_deploys_site() {
        let ws = Workspace::new();
        ws.install(MKDOCS);
        ws.install(GHP_IMPORT);
        let runner = FakeRunner::building_site();
        let mut config = ws.config("3.3");
        config.deploy = Some(DeployTarget::Github);

        let report = Publisher::new(config, &runner, ws.resolver()).publish().unwrap();

        assert_eq!(report.missing_tools, vec![JAVADOC]);
        assert_eq!(
            runner.programs(),
            vec![MKDOCS.to_string(), GHP_IMPORT.to_string()]
        );
        assert!(report.site_built);
        assert!(report.generated.is_empty());
        assert!(!report.template_merged);
        assert!(!report.site_missing);
        assert_eq!(report.deploy, DeployOutcome::Pushed);
        assert!(ws.root.join("site").join("index.html").is_file());
        assert!(!ws.root.join("temp").exists());
        assert!(!report.is_complete());
    }

    #[cfg(unix)]
    #[test]
    fn missing_mkdocs_alone_aborts() {
        let ws = Workspace::new();
        ws.install(JAVADOC);
        ws.install(GHP_IMPORT);
        let runner = FakeRunner::building_site();
        let mut config = ws.config("3.3");
        config.deploy = Some(DeployTarget::Github);

        let report = Publisher::new(config, &runner, ws.resolver()).publish().unwrap();

        assert_eq!(report.missing_tools, vec![MKDOCS]);
        assert!(runner.calls.borrow().is_empty());
        assert_eq!(report.deploy, DeployOutcome::Skipped);
        assert!(!ws.root.join("temp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn publishes_full_site() {
        let ws = Workspace::new();
        ws.install_all();
        let runner = FakeRunner::building_site();

        let report = Publisher::new(ws.config("3.3"), &runner, ws.resolver())
            .publish()
            .unwrap();

        assert_eq!(report.version.as_str(), "v3.3");
        assert!(report.is_complete(), "{report:?}");
        assert_eq!(
            report.generated,
            SUBPROJECTS.iter().map(|p| p.name).collect::<Vec<_>>()
        );

        let api = ws.root.join("site").join("api_reference");
        assert_eq!(
            fs::read_to_string(api.join("index2.html")).unwrap(),
            "<a href=\"v3.3/index.html\">GVRf v3.3</a>"
        );
        assert_eq!(
            fs::read_to_string(api.join("v3.3").join("index.html")).unwrap(),
            "<h1>API v3.3</h1>"
        );
        assert!(api.join("v3.3").join("style.css").is_file());
        for project in &SUBPROJECTS {
            assert!(api.join("v3.3").join(project.name).join("index.html").is_file());
        }
        assert!(ws.root.join("site").join("index.html").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn normalized_version_is_used_everywhere_and_no_deploy_runs() {
        let ws = Workspace::new();
        ws.install_all();
        let runner = FakeRunner::building_site();

        let report = Publisher::new(ws.config("3.3"), &runner, ws.resolver())
            .publish()
            .unwrap();

        assert_eq!(report.deploy, DeployOutcome::NotRequested);
        assert!(!runner.programs().contains(&GHP_IMPORT.to_string()));

        let version_dir = ws.root.join("temp").join("v3.3");
        for call in runner.calls.borrow().iter().filter(|c| c.program_name() == JAVADOC) {
            let out = FakeRunner::arg_after(call, "-d").unwrap();
            assert_eq!(out.parent().unwrap(), version_dir);
        }
        assert!(!ws.root.join("temp").join("3.3").exists());
    }

    #[cfg(unix)]
    #[test]
    fn runs_tools_in_pipeline_order() {
        let ws = Workspace::new();
        ws.install_all();
        let runner = FakeRunner::building_site();
        let mut config = ws.config("v3.3");
        config.deploy = Some(DeployTarget::Github);

        let report = Publisher::new(config, &runner, ws.resolver()).publish().unwrap();

        let mut expected = vec![MKDOCS.to_string()];
        expected.extend(std::iter::repeat(JAVADOC.to_string()).take(SUBPROJECTS.len()));
        expected.push(GHP_IMPORT.to_string());
        assert_eq!(runner.programs(), expected);
        assert_eq!(report.deploy, DeployOutcome::Pushed);
    }

    #[cfg(unix)]
    #[test]
    fn missing_framework_source_still_merges() {
        let ws = Workspace::new();
        ws.install_all();
        let runner = FakeRunner::building_site();
        let mut config = ws.config("3.3");
        config.framework_source = ws.root.join("..").join("NoSuchCheckout");

        let report = Publisher::new(config, &runner, ws.resolver()).publish().unwrap();

        assert!(report.source_missing);
        assert!(report.generated.is_empty());
        assert!(!runner.programs().contains(&JAVADOC.to_string()));
        assert!(report.merged);

        let version_dir = ws.root.join("site").join("api_reference").join("v3.3");
        for project in &SUBPROJECTS {
            assert!(!version_dir.join(project.name).exists());
        }
        assert_eq!(
            fs::read_to_string(version_dir.join("index.html")).unwrap(),
            "<h1>API v3.3</h1>"
        );
        assert!(!report.is_complete());
    }

    #[cfg(unix)]
    #[test]
    fn missing_site_stops_before_deploy() {
        let ws = Workspace::new();
        ws.install_all();
        let runner = FakeRunner::default();
        let mut config = ws.config("3.3");
        config.framework_source = ws.root.join("missing");
        config.deploy = Some(DeployTarget::Github);

        let report = Publisher::new(config, &runner, ws.resolver()).publish().unwrap();

        assert!(report.site_missing);
        assert!(!report.merged);
        assert_eq!(report.deploy, DeployOutcome::Skipped);
        assert!(!runner.programs().contains(&GHP_IMPORT.to_string()));
        assert!(!ws.root.join("site").exists());
    }

    #[cfg(unix)]
    #[test]
    fn replaces_stale_api_reference() {
        let ws = Workspace::new();
        ws.install_all();
        let stale = ws.root.join("site").join("api_reference").join("v3.2");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("index.html"), "old").unwrap();
        let stale_temp = ws.root.join("temp").join("leftover.html");
        fs::create_dir_all(stale_temp.parent().unwrap()).unwrap();
        fs::write(&stale_temp, "old").unwrap();
        let runner = FakeRunner::building_site();

        Publisher::new(ws.config("3.3"), &runner, ws.resolver())
            .publish()
            .unwrap();

        assert!(!stale.exists());
        assert!(!stale_temp.exists());
        assert!(ws.root.join("site").join("api_reference").join("v3.3").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn other_deploy_targets_are_ignored() {
        let ws = Workspace::new();
        ws.install_all();
        let runner = FakeRunner::building_site();
        let mut config = ws.config("3.3");
        config.deploy = Some(DeployTarget::parse("netlify"));

        let report = Publisher::new(config, &runner, ws.resolver()).publish().unwrap();

        assert_eq!(report.deploy, DeployOutcome::Ignored("netlify".to_string()));
        assert!(!runner.programs().contains(&GHP_IMPORT.to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn deploy_without_ghp_import_is_reported() {
        let ws = Workspace::new();
        ws.install(JAVADOC);
        ws.install(MKDOCS);
        let runner = FakeRunner::building_site();
        let mut config = ws.config("3.3");
        config.deploy = Some(DeployTarget::Github);

        let report = Publisher::new(config, &runner, ws.resolver()).publish().unwrap();

        assert_eq!(report.deploy, DeployOutcome::ToolMissing);
        assert!(report.merged);
    }

    #[cfg(unix)]
    #[test]
    fn failed_push_is_reported() {
        let ws = Workspace::new();
        ws.install_all();
        let runner = FakeRunner {
            mkdocs_creates_site: true,
            deploy_fails: true,
            ..Default::default()
        };
        let mut config = ws.config("3.3");
        config.deploy = Some(DeployTarget::Github);

        let report = Publisher::new(config, &runner, ws.resolver()).publish().unwrap();

        assert_eq!(report.deploy, DeployOutcome::Failed(Some(1)));
        assert!(!report.is_complete());
    }

    #[cfg(unix)]
    #[test]
    fn malformed_placeholder_fails_the_run() {
        let ws = Workspace::new();
        ws.install_all();
        fs::write(
            ws.root.join("api_reference").join("index2.html"),
            "<p>$unknown_key</p>",
        )
        .unwrap();
        let runner = FakeRunner::building_site();

        let result = Publisher::new(ws.config("3.3"), &runner, ws.resolver()).publish();

        assert!(matches!(result, Err(PublishError::Template(_))));
        assert!(!ws.root.join("site").join("api_reference").exists());
    }
}
