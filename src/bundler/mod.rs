//! Bundler configuration: defaults, the project's config, framework wiring and caller
//! overrides merged into one [`BundlerConfig`].

pub mod base;
pub mod config;
pub mod defaults;
pub mod env;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod plugins;
pub mod symlinks;

pub use base::{BaseConfigLoader, FileConfigLoader, LoadArgs};
pub use config::{BundlerConfig, ConfigOverrides, ProjectConfig};
pub use env::{ConfigSource, ProcessSource, StaticSource};
pub use loader::ConfigLoader;
pub use plugins::{HastePlugins, NodeModulesPlugins, PluginDiscovery, Plugins};
pub use symlinks::{FsSymlinkResolver, SymlinkResolver};
