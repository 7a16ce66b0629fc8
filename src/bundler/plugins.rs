//! Discovery of framework plugins declared by a project's dependencies.

use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::MANIFEST_FILE;
use crate::error::Result;
use crate::ext::PathExt;

const COMMAND_PLUGIN_PREFIX: &str = "rnpm-plugin-";

/// Plugins found in a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugins {
    /// CLI command plugins
    pub commands: Vec<String>,
    /// Platform plugins
    pub platforms: Vec<String>,
    pub haste: HastePlugins,
}

/// Haste additions contributed by plugins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HastePlugins {
    pub platforms: Vec<String>,
    pub provides_module_node_modules: Vec<String>,
}

#[async_trait]
pub trait PluginDiscovery: Send + Sync {
    async fn find_plugins(&self, root: &Path) -> Result<Plugins>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PackageManifest {
    name: Option<String>,
    dependencies: IndexMap<String, String>,
    dev_dependencies: IndexMap<String, String>,
    rnpm: Option<RnpmSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RnpmSection {
    plugin: Option<String>,
    platform: Option<String>,
    haste: Option<HasteSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HasteSection {
    platforms: Vec<String>,
    provides_module_node_modules: Vec<String>,
}

/// Reads plugin declarations from the `rnpm` section of installed dependencies.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeModulesPlugins;

#[async_trait]
impl PluginDiscovery for NodeModulesPlugins {
    async fn find_plugins(&self, root: &Path) -> Result<Plugins> {
        let Some(project) = read_manifest(&root.join(MANIFEST_FILE)).await? else {
            debug!("No {MANIFEST_FILE} in {}, no plugins", root.display());
            return Ok(Plugins::default());
        };

        let mut commands = IndexSet::new();
        let mut platforms = IndexSet::new();
        let mut haste_platforms = IndexSet::new();
        let mut providers = IndexSet::new();

        let dependencies = project.dependencies.keys().chain(project.dev_dependencies.keys());
        for dependency in dependencies {
            if dependency.starts_with(COMMAND_PLUGIN_PREFIX) {
                commands.insert(dependency.clone());
            }
            let manifest_path = root.join("node_modules").join(dependency).join(MANIFEST_FILE);
            let Some(package) = read_manifest(&manifest_path).await? else {
                continue;
            };
            let Some(rnpm) = package.rnpm else {
                continue;
            };
            let name = package.name.unwrap_or_else(|| dependency.clone());
            if let Some(plugin) = rnpm.plugin {
                commands.insert(plugin_path(&name, &plugin));
            }
            if let Some(platform) = rnpm.platform {
                platforms.insert(plugin_path(&name, &platform));
            }
            if let Some(haste) = rnpm.haste {
                haste_platforms.extend(haste.platforms);
                providers.extend(haste.provides_module_node_modules);
            }
        }

        Ok(Plugins {
            commands: commands.into_iter().collect(),
            platforms: platforms.into_iter().collect(),
            haste: HastePlugins {
                platforms: haste_platforms.into_iter().collect(),
                provides_module_node_modules: providers.into_iter().collect(),
            },
        })
    }
}

/// Entry file of a plugin, relative to `node_modules` with `.` and `..` folded.
fn plugin_path(package: &str, entry: &str) -> String {
    Path::new(package).join(entry).normalize().to_slash_string()
}

/// Reads a package manifest, `None` when missing. Unparseable manifests are skipped
/// with a warning.
async fn read_manifest(path: &Path) -> Result<Option<PackageManifest>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_str(&content) {
        Ok(manifest) => Ok(Some(manifest)),
        Err(e) => {
            warn!("Skipping unreadable manifest {}: {e}", path.display());
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn collects_haste_platforms_and_commands() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(
            &root.join("package.json"),
            r#"{"dependencies": {"react-native-windows": "0.57.0", "lodash": "4.17.0"},
                "devDependencies": {"rnpm-plugin-test": "1.0.0"}}"#,
        );
        write(
            &root.join("node_modules/react-native-windows/package.json"),
            r#"{"name": "react-native-windows",
                "rnpm": {"platform": "./local-cli/platform.js",
                         "haste": {"platforms": ["windows"],
                                   "providesModuleNodeModules": ["react-native-windows"]}}}"#,
        );
        write(&root.join("node_modules/lodash/package.json"), r#"{"name": "lodash"}"#);

        let plugins = NodeModulesPlugins.find_plugins(root).await.unwrap();
        assert_eq!(plugins.commands, vec!["rnpm-plugin-test"]);
        assert_eq!(plugins.platforms, vec!["react-native-windows/local-cli/platform.js"]);
        assert_eq!(plugins.haste.platforms, vec!["windows"]);
        assert_eq!(plugins.haste.provides_module_node_modules, vec!["react-native-windows"]);
    }

    #[tokio::test]
    async fn missing_project_manifest_yields_no_plugins() {
        let tmp = tempfile::tempdir().unwrap();
        let plugins = NodeModulesPlugins.find_plugins(tmp.path()).await.unwrap();
        assert_eq!(plugins, Plugins::default());
    }

    #[test]
    fn plugin_paths_are_normalized() {
        assert_eq!(plugin_path("rnpm-plugin-x", "./dist/../lib/plugin.js"), "rnpm-plugin-x/lib/plugin.js");
        assert_eq!(plugin_path("@scope/pkg", "platform.js"), "@scope/pkg/platform.js");
    }
}
