use log::{debug, info};

use crate::bundler::base::{BaseConfigLoader, FileConfigLoader, LoadArgs};
use crate::bundler::config::{BundlerConfig, ConfigOverrides};
use crate::bundler::defaults::{default_config, DefaultsContext};
use crate::bundler::env::{ConfigSource, EnvSnapshot, ProcessSource};
use crate::bundler::merge::{apply_framework_layer, apply_overrides};
use crate::bundler::paths::{default_port, framework_root, project_root, watch_folders};
use crate::bundler::plugins::{NodeModulesPlugins, PluginDiscovery};
use crate::bundler::symlinks::{FsSymlinkResolver, SymlinkResolver};
use crate::error::Result;

/// Resolves the bundler configuration for a project.
pub struct ConfigLoader {
    source: Box<dyn ConfigSource>,
    plugins: Box<dyn PluginDiscovery>,
    base: Box<dyn BaseConfigLoader>,
    symlinks: Box<dyn SymlinkResolver>,
}

impl ConfigLoader {
    pub fn new(
        source: Box<dyn ConfigSource>,
        plugins: Box<dyn PluginDiscovery>,
        base: Box<dyn BaseConfigLoader>,
        symlinks: Box<dyn SymlinkResolver>,
    ) -> Self {
        Self { source, plugins, base, symlinks }
    }

    /// Loader backed by the real process environment and filesystem.
    pub fn system() -> Self {
        Self::new(
            Box::new(ProcessSource),
            Box::new(NodeModulesPlugins),
            Box::new(FileConfigLoader),
            Box::new(FsSymlinkResolver),
        )
    }

    /// Merges defaults, the project config and `overrides` into the final configuration.
    ///
    /// The environment is read once at the start; nothing is written back.
    pub async fn load(&self, overrides: &ConfigOverrides) -> Result<BundlerConfig> {
        let env = EnvSnapshot::capture(self.source.as_ref())?;
        let project_root = project_root(&env.loader_dir)?;
        let framework_root = framework_root(&env.loader_dir);
        info!("Project root: {}", project_root.display());
        debug!("Framework root: {}", framework_root.display());

        let plugins = self.plugins.find_plugins(&project_root).await?;
        debug!("Plugins: {plugins:?}");

        let defaults = default_config(&DefaultsContext {
            project_root: project_root.clone(),
            framework_root: framework_root.clone(),
            port: default_port(env.metro_port.as_deref()),
            watch_folders: watch_folders(
                env.app_root.as_deref(),
                &env.current_dir,
                self.symlinks.as_ref(),
            )?,
        });

        let args = LoadArgs { config: overrides.config.clone(), cwd: project_root };
        let loaded = self.base.load_config(&args, defaults).await?;

        let config = apply_framework_layer(loaded, &plugins.haste, &framework_root);
        Ok(apply_overrides(config, overrides))
    }
}
