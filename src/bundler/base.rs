//! Loading of the project's own bundler configuration.

use async_trait::async_trait;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::bundler::config::{BundlerConfig, ProjectConfig};
use crate::bundler::merge::merge_project;
use crate::constants::{bundler::CONFIG_FILE, bundler::MANIFEST_CONFIG_KEY, MANIFEST_FILE};
use crate::error::{Error, Result};
use crate::ext::PathExt;

/// Arguments steering where the project config is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadArgs {
    /// Explicit config file, relative paths resolve against `cwd`
    pub config: Option<PathBuf>,
    pub cwd: PathBuf,
}

/// Loads the project layer and merges it onto `defaults`.
#[async_trait]
pub trait BaseConfigLoader: Send + Sync {
    async fn load_config(&self, args: &LoadArgs, defaults: BundlerConfig) -> Result<BundlerConfig>;
}

/// Reads JSON configuration from disk.
///
/// Lookup order: the explicit `config` path, `metro.config.json` in `cwd`, the `metro` key
/// of `cwd/package.json`. Without any of them the defaults are returned unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileConfigLoader;

#[async_trait]
impl BaseConfigLoader for FileConfigLoader {
    async fn load_config(&self, args: &LoadArgs, defaults: BundlerConfig) -> Result<BundlerConfig> {
        let project = match find_project_config(args).await? {
            Some(project) => project,
            None => {
                debug!("No bundler config found in {}", args.cwd.display());
                return Ok(defaults);
            }
        };
        Ok(merge_project(defaults, project))
    }
}

async fn find_project_config(args: &LoadArgs) -> Result<Option<ProjectConfig>> {
    if let Some(path) = &args.config {
        let path = path.absolutize(&args.cwd);
        if !path.is_file() {
            return Err(Error::ConfigFileNotFound { path: path.display().to_string() });
        }
        return read_config_file(&path).await.map(Some);
    }

    let config_file = args.cwd.join(CONFIG_FILE);
    if config_file.is_file() {
        return read_config_file(&config_file).await.map(Some);
    }

    let manifest = args.cwd.join(MANIFEST_FILE);
    if manifest.is_file() {
        let content = tokio::fs::read_to_string(&manifest).await?;
        let mut value: serde_json::Value = serde_json::from_str(&content)?;
        if let Some(section) = value.get_mut(MANIFEST_CONFIG_KEY).map(serde_json::Value::take) {
            info!("Loaded bundler config from the `{MANIFEST_CONFIG_KEY}` key of {}", manifest.display());
            return Ok(Some(serde_json::from_value(section)?));
        }
    }
    Ok(None)
}

async fn read_config_file(path: &Path) -> Result<ProjectConfig> {
    info!("Loaded bundler config from {}", path.display());
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::defaults::{default_config, DefaultsContext};

    fn defaults(root: &Path) -> BundlerConfig {
        default_config(&DefaultsContext {
            project_root: root.to_path_buf(),
            framework_root: root.join("node_modules/react-native"),
            port: 8081,
            watch_folders: vec![],
        })
    }

    #[tokio::test]
    async fn without_config_defaults_are_returned() {
        let tmp = tempfile::tempdir().unwrap();
        let args = LoadArgs { config: None, cwd: tmp.path().to_path_buf() };
        let loaded = FileConfigLoader.load_config(&args, defaults(tmp.path())).await.unwrap();
        assert_eq!(loaded, defaults(tmp.path()));
    }

    #[tokio::test]
    async fn reads_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), r#"{"server": {"port": 9999}}"#).unwrap();
        let args = LoadArgs { config: None, cwd: tmp.path().to_path_buf() };
        let loaded = FileConfigLoader.load_config(&args, defaults(tmp.path())).await.unwrap();
        assert_eq!(loaded.server.port, 9999);
    }

    #[tokio::test]
    async fn reads_manifest_key() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(MANIFEST_FILE),
            r#"{"name": "App", "metro": {"resolver": {"sourceExts": ["js"]}}}"#,
        )
        .unwrap();
        let args = LoadArgs { config: None, cwd: tmp.path().to_path_buf() };
        let loaded = FileConfigLoader.load_config(&args, defaults(tmp.path())).await.unwrap();
        assert_eq!(loaded.resolver.source_exts, vec!["js"]);
    }

    #[tokio::test]
    async fn explicit_missing_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let args = LoadArgs { config: Some(PathBuf::from("absent.json")), cwd: tmp.path().to_path_buf() };
        let err = FileConfigLoader.load_config(&args, defaults(tmp.path())).await.unwrap_err();
        assert!(matches!(err, Error::ConfigFileNotFound { .. }));
    }
}
