use log::{debug, error, info};
use regex::Regex;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::constants::{
    CORE_UI_PACKAGE, DEV_DEPENDENCIES, FRAMEWORK_PACKAGE, MANIFEST_FILE,
    RESERVED_PROJECT_NAMES, TEST_RENDERER_PACKAGE,
};
use crate::error::Result;
use crate::ext::PathExt;
use crate::init::instructions::render_run_instructions;
use crate::init::manifest::patch_manifest;
use crate::init::options::{InitInput, InitOptions};
use crate::init::package_manager::PackageManagerProvider;
use crate::init::template::{TemplateEngine, TemplateRequest};
use crate::ioutils::read_json;
use crate::renderer::TemplateRenderer;

/// The project being created. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    /// Absolute destination directory
    pub root: PathBuf,
    pub name: String,
    pub template: Option<String>,
}

/// Why `init` stopped before touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    MissingProjectName,
    InvalidArguments(String),
    InvalidProjectName(String),
    MissingPeerDependency { manifest: PathBuf },
}

impl Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::MissingProjectName => {
                write!(f, "No project name was given. Usage: init <ProjectName> [--template <name>] [--npm]")
            }
            AbortReason::InvalidArguments(message) => write!(f, "Invalid arguments: {message}"),
            AbortReason::InvalidProjectName(name) => write!(
                f,
                "\"{name}\" is not a valid name for a project. Please use a valid identifier name (alphanumeric) that is not reserved."
            ),
            AbortReason::MissingPeerDependency { manifest } => write!(
                f,
                "Missing `{CORE_UI_PACKAGE}` peer dependency in {}",
                manifest.display()
            ),
        }
    }
}

/// Result of a completed `init` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(ProjectDescriptor),
    Aborted(AbortReason),
}

/// Drives project creation through its collaborators.
pub struct Initializer<'a> {
    templates: &'a dyn TemplateEngine,
    package_managers: &'a dyn PackageManagerProvider,
    renderer: &'a dyn TemplateRenderer,
    framework_manifest: Option<PathBuf>,
}

impl<'a> Initializer<'a> {
    pub fn new(
        templates: &'a dyn TemplateEngine,
        package_managers: &'a dyn PackageManagerProvider,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self { templates, package_managers, renderer, framework_manifest: None }
    }

    /// Overrides where the framework manifest is read from.
    ///
    /// Defaults to `<project_dir>/node_modules/react-native/package.json`.
    pub fn with_framework_manifest<P: Into<PathBuf>>(mut self, manifest: P) -> Self {
        self.framework_manifest = Some(manifest.into());
        self
    }

    /// Creates a project in `project_dir`.
    ///
    /// Usage and peer-dependency problems are logged and reported as
    /// [`InitOutcome::Aborted`] without side effects. I/O and tool failures are
    /// returned as errors; nothing already written is rolled back.
    pub fn init<P: AsRef<Path>>(&self, project_dir: P, input: InitInput) -> Result<InitOutcome> {
        let args = input.into_args();
        if args.is_empty() {
            return Ok(abort(AbortReason::MissingProjectName));
        }

        let options = match InitOptions::parse(&args) {
            Ok(options) => options,
            Err(e) => return Ok(abort(AbortReason::InvalidArguments(e.to_string().trim().to_string()))),
        };
        let Some(name) = options.name.clone() else {
            return Ok(abort(AbortReason::MissingProjectName));
        };
        if !is_valid_project_name(&name)? {
            return Ok(abort(AbortReason::InvalidProjectName(name)));
        }

        let root = project_dir.as_ref().absolutize(&std::env::current_dir()?);
        let framework_manifest = self.framework_manifest.clone().unwrap_or_else(|| {
            root.join("node_modules").join(FRAMEWORK_PACKAGE).join(MANIFEST_FILE)
        });
        let Some(version) = peer_dependency_version(&framework_manifest)? else {
            return Ok(abort(AbortReason::MissingPeerDependency { manifest: framework_manifest }));
        };
        debug!("{CORE_UI_PACKAGE} peer dependency: {version}");

        let project = ProjectDescriptor { root, name, template: options.template };
        let package_manager = self.package_managers.bind(&project.root, options.npm);

        let copy_from = framework_manifest.parent().unwrap_or(Path::new("."));
        self.templates.create_project(
            &TemplateRequest {
                dest_root: &project.root,
                project_name: &project.name,
                template: project.template.as_deref(),
                copy_from,
            },
            package_manager.as_ref(),
        )?;

        info!("Adding required dependencies");
        package_manager.install(&[format!("{CORE_UI_PACKAGE}@{version}")])?;

        info!("Adding required dev dependencies");
        package_manager.install_dev(&dev_dependencies(&version))?;

        patch_manifest(&project.root)?;

        println!("{}", render_run_instructions(self.renderer, &project.root, &project.name)?);
        Ok(InitOutcome::Created(project))
    }
}

fn abort(reason: AbortReason) -> InitOutcome {
    error!("{reason}");
    InitOutcome::Aborted(reason)
}

/// Development dependencies of a new project, with the test renderer pinned to `version`.
pub fn dev_dependencies(version: &str) -> Vec<String> {
    DEV_DEPENDENCIES
        .iter()
        .map(|package| package.to_string())
        .chain(std::iter::once(format!("{TEST_RENDERER_PACKAGE}@{version}")))
        .collect()
}

/// Reads the core UI library's peer dependency range from the framework manifest.
pub fn peer_dependency_version(manifest_path: &Path) -> Result<Option<String>> {
    let manifest = read_json(manifest_path)?;
    Ok(manifest
        .get("peerDependencies")
        .and_then(|peers| peers.get(CORE_UI_PACKAGE))
        .and_then(|version| version.as_str())
        .map(str::to_string))
}

/// Project names must be identifiers and must not shadow the framework itself.
pub fn is_valid_project_name(name: &str) -> Result<bool> {
    let identifier = Regex::new(r"^[$A-Za-z_][0-9A-Za-z_$]*$")?;
    Ok(identifier.is_match(name) && !RESERVED_PROJECT_NAMES.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_project_names() {
        assert!(is_valid_project_name("AwesomeProject").unwrap());
        assert!(is_valid_project_name("_app$2").unwrap());
        assert!(!is_valid_project_name("awesome-project").unwrap());
        assert!(!is_valid_project_name("2fast").unwrap());
        assert!(!is_valid_project_name("React").unwrap());
        assert!(!is_valid_project_name("react").unwrap());
    }

    #[test]
    fn dev_dependencies_pin_test_renderer() {
        assert_eq!(
            dev_dependencies("16.6.1"),
            vec![
                "@babel/core",
                "babel-jest",
                "jest",
                "metro-react-native-babel-preset",
                "react-test-renderer@16.6.1"
            ]
        );
    }

    #[test]
    fn reads_peer_dependency() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join("package.json");
        std::fs::write(&manifest, r#"{"peerDependencies": {"react": "16.6.1"}}"#).unwrap();
        assert_eq!(peer_dependency_version(&manifest).unwrap().as_deref(), Some("16.6.1"));

        std::fs::write(&manifest, r#"{"dependencies": {"react": "16.6.1"}}"#).unwrap();
        assert_eq!(peer_dependency_version(&manifest).unwrap(), None);
    }
}
