//! Template engine collaborator: materializes a project from a template directory.

use indexmap::IndexMap;
use log::{debug, info};
use std::fmt::Display;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::{TEMPLATE_PACKAGE_PREFIX, TEMPLATE_PLACEHOLDER};
use crate::error::{Error, Result};
use crate::ignore::template_ignore_set;
use crate::init::package_manager::PackageManager;
use crate::ioutils::{copy_file, create_dir_all, read_json, write_file};

/// Files whose content is copied verbatim instead of having placeholders replaced.
const BINARY_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "gif", "webp", "ico", "jar", "keystore", "ttf", "otf", "zip"];

/// Template file names that stand in for files npm would otherwise strip or interpret.
const RENAMED_FILES: &[(&str, &str)] = &[
    ("_BUCK", "BUCK"),
    ("_gitignore", ".gitignore"),
    ("_gitattributes", ".gitattributes"),
    ("_babelrc", ".babelrc"),
    ("_flowconfig", ".flowconfig"),
    ("_buckconfig", ".buckconfig"),
    ("_watchmanconfig", ".watchmanconfig"),
];

/// Everything needed to create a project from a template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRequest<'a> {
    /// Directory the project is written to
    pub dest_root: &'a Path,
    /// Name substituted for the template placeholder
    pub project_name: &'a str,
    /// Template identifier, `None` selects the built-in template
    pub template: Option<&'a str>,
    /// Framework root holding the built-in template
    pub copy_from: &'a Path,
}

/// Materializes template files into a destination directory.
pub trait TemplateEngine {
    fn create_project(
        &self,
        request: &TemplateRequest<'_>,
        package_manager: &dyn PackageManager,
    ) -> Result<()>;
}

/// Where template files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Template shipped with the framework
    BuiltIn(PathBuf),
    /// Template directory on the local filesystem
    FileSystem(PathBuf),
    /// Template package fetched through the package manager
    Package(String),
}

impl Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::BuiltIn(path) => write!(f, "built-in template: '{}'", path.display()),
            TemplateSource::FileSystem(path) => write!(f, "local path: '{}'", path.display()),
            TemplateSource::Package(name) => write!(f, "template package: '{name}'"),
        }
    }
}

impl TemplateSource {
    /// Resolves a template identifier.
    ///
    /// `file:` URLs and existing directories are local templates, anything else names a
    /// package that gets the `react-native-template-` prefix unless it already has it.
    pub fn resolve(template: Option<&str>, copy_from: &Path) -> Self {
        let Some(template) = template else {
            return TemplateSource::BuiltIn(
                copy_from.join("local-cli").join("templates").join(TEMPLATE_PLACEHOLDER),
            );
        };
        if let Some(path) = template.strip_prefix("file:") {
            return TemplateSource::FileSystem(PathBuf::from(path));
        }
        if Path::new(template).is_dir() {
            return TemplateSource::FileSystem(PathBuf::from(template));
        }
        if template.starts_with(TEMPLATE_PACKAGE_PREFIX) {
            TemplateSource::Package(template.to_string())
        } else {
            TemplateSource::Package(format!("{TEMPLATE_PACKAGE_PREFIX}{template}"))
        }
    }
}

/// Copies a template while replacing the `HelloWorld` placeholder with the project name.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderTemplate;

impl TemplateEngine for PlaceholderTemplate {
    fn create_project(
        &self,
        request: &TemplateRequest<'_>,
        package_manager: &dyn PackageManager,
    ) -> Result<()> {
        let source = TemplateSource::resolve(request.template, request.copy_from);
        info!("Creating {} from {source}", request.project_name);

        match source {
            TemplateSource::BuiltIn(path) | TemplateSource::FileSystem(path) => {
                copy_and_replace(&path, request.dest_root, request.project_name)
            }
            TemplateSource::Package(package) => {
                package_manager.install(std::slice::from_ref(&package))?;
                let template_root = request.dest_root.join("node_modules").join(&package);
                copy_and_replace(&template_root, request.dest_root, request.project_name)?;
                install_template_dependencies(&template_root, package_manager)?;
                package_manager.uninstall(&[package])
            }
        }
    }
}

/// Installs the packages listed by `dependencies.json` and `devDependencies.json`.
fn install_template_dependencies(
    template_root: &Path,
    package_manager: &dyn PackageManager,
) -> Result<()> {
    if let Some(dependencies) = read_dependency_file(&template_root.join("dependencies.json"))? {
        package_manager.install(&dependencies)?;
    }
    if let Some(dependencies) = read_dependency_file(&template_root.join("devDependencies.json"))?
    {
        package_manager.install_dev(&dependencies)?;
    }
    Ok(())
}

/// Reads a `{name: version}` file into `name@version` specifiers.
pub fn read_dependency_file(path: &Path) -> Result<Option<Vec<String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let dependencies: IndexMap<String, String> = serde_json::from_value(read_json(path)?)?;
    debug!("Template dependencies from {}: {dependencies:?}", path.display());
    Ok(Some(dependencies.into_iter().map(|(name, version)| format!("{name}@{version}")).collect()))
}

/// Replaces the placeholder in both casings.
pub fn replace_placeholders(text: &str, project_name: &str) -> String {
    text.replace(TEMPLATE_PLACEHOLDER, project_name)
        .replace(&TEMPLATE_PLACEHOLDER.to_lowercase(), &project_name.to_lowercase())
}

/// Maps a template-relative path to its project-relative path.
pub fn translate_path(relative: &Path, project_name: &str) -> PathBuf {
    relative
        .components()
        .map(|component| match component {
            Component::Normal(part) => {
                let part = replace_placeholders(&part.to_string_lossy(), project_name);
                RENAMED_FILES
                    .iter()
                    .find(|(from, _)| *from == part)
                    .map(|(_, to)| to.to_string())
                    .unwrap_or(part)
            }
            other => other.as_os_str().to_string_lossy().to_string(),
        })
        .collect()
}

fn is_binary(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Copies every file under `template_root` into `dest_root`, renaming and substituting
/// the placeholder on the way.
pub fn copy_and_replace(template_root: &Path, dest_root: &Path, project_name: &str) -> Result<()> {
    if !template_root.is_dir() {
        return Err(Error::TemplateDoesNotExistsError {
            template_dir: template_root.display().to_string(),
        });
    }
    let ignored = template_ignore_set()?;
    create_dir_all(dest_root)?;

    let walker = WalkDir::new(template_root).min_depth(1).into_iter().filter_entry(|entry| {
        entry
            .path()
            .strip_prefix(template_root)
            .map(|relative| !ignored.is_match(relative))
            .unwrap_or(true)
    });

    for entry in walker {
        let entry = entry?;
        let source = entry.path();
        let relative = source.strip_prefix(template_root).map_err(anyhow::Error::from)?;
        let target = dest_root.join(translate_path(relative, project_name));

        if entry.file_type().is_dir() {
            create_dir_all(&target)?;
        } else if is_binary(source) {
            debug!("Copying {}", target.display());
            copy_file(source, &target)?;
        } else {
            match std::fs::read_to_string(source) {
                Ok(content) => {
                    debug!("Writing {}", target.display());
                    write_file(&replace_placeholders(&content, project_name), &target)?;
                }
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    copy_file(source, &target)?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
