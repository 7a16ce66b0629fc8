//! Pure functions combining the configuration layers.
//!
//! Precedence, lowest first: defaults, project config, framework layer, caller overrides.

use log::debug;
use std::path::Path;

use crate::bundler::config::{
    BundlerConfig, ConfigOverrides, ProjectConfig, ResolverConfig, ResolverLayer,
    SerializerConfig, SerializerLayer, ServerConfig, ServerLayer, TransformerConfig,
    TransformerLayer,
};
use crate::bundler::plugins::HastePlugins;
use crate::constants::bundler::ASSET_REGISTRY_PATH;

/// Applies a project config over the defaults. Values present in the project replace the
/// default, lists included.
pub fn merge_project(defaults: BundlerConfig, project: ProjectConfig) -> BundlerConfig {
    BundlerConfig {
        project_root: project.project_root.unwrap_or(defaults.project_root),
        watch_folders: project.watch_folders.unwrap_or(defaults.watch_folders),
        reporter: project.reporter.unwrap_or(defaults.reporter),
        reset_cache: project.reset_cache.unwrap_or(defaults.reset_cache),
        max_workers: project.max_workers.unwrap_or(defaults.max_workers),
        resolver: merge_resolver(defaults.resolver, project.resolver),
        serializer: merge_serializer(defaults.serializer, project.serializer),
        server: merge_server(defaults.server, project.server),
        transformer: merge_transformer(defaults.transformer, project.transformer),
    }
}

pub fn merge_resolver(base: ResolverConfig, layer: ResolverLayer) -> ResolverConfig {
    ResolverConfig {
        asset_exts: layer.asset_exts.unwrap_or(base.asset_exts),
        blacklist_re: layer.blacklist_re.unwrap_or(base.blacklist_re),
        haste_impl_module_path: layer.haste_impl_module_path.or(base.haste_impl_module_path),
        platforms: layer.platforms.unwrap_or(base.platforms),
        provides_module_node_modules: layer
            .provides_module_node_modules
            .unwrap_or(base.provides_module_node_modules),
        resolver_main_fields: layer.resolver_main_fields.unwrap_or(base.resolver_main_fields),
        source_exts: layer.source_exts.unwrap_or(base.source_exts),
    }
}

pub fn merge_serializer(base: SerializerConfig, layer: SerializerLayer) -> SerializerConfig {
    SerializerConfig {
        modules_run_before_main_module: layer
            .modules_run_before_main_module
            .unwrap_or(base.modules_run_before_main_module),
        polyfills: layer.polyfills.unwrap_or(base.polyfills),
    }
}

pub fn merge_server(base: ServerConfig, layer: ServerLayer) -> ServerConfig {
    ServerConfig { port: layer.port.unwrap_or(base.port) }
}

pub fn merge_transformer(base: TransformerConfig, layer: TransformerLayer) -> TransformerConfig {
    TransformerConfig {
        asset_registry_path: layer.asset_registry_path.unwrap_or(base.asset_registry_path),
        babel_transformer_path: layer
            .babel_transformer_path
            .unwrap_or(base.babel_transformer_path),
    }
}

/// Framework wiring applied after the project config.
///
/// The asset registry is always the framework's. The Haste implementation is only filled
/// in when the project did not pick one. Plugin platforms and module providers are
/// appended.
pub fn apply_framework_layer(
    config: BundlerConfig,
    haste: &HastePlugins,
    framework_root: &Path,
) -> BundlerConfig {
    let BundlerConfig { resolver, transformer, .. } = &config;
    let resolver = ResolverConfig {
        haste_impl_module_path: resolver
            .haste_impl_module_path
            .clone()
            .or_else(|| Some(framework_root.join("jest").join("hasteImpl.js"))),
        platforms: concat(&resolver.platforms, &haste.platforms),
        provides_module_node_modules: concat(
            &resolver.provides_module_node_modules,
            &haste.provides_module_node_modules,
        ),
        ..resolver.clone()
    };
    let transformer = TransformerConfig {
        asset_registry_path: ASSET_REGISTRY_PATH.to_string(),
        ..transformer.clone()
    };
    BundlerConfig { resolver, transformer, ..config }
}

/// Caller overrides. Supplied scalars and watch folders replace the configured value;
/// supplied source extensions are always prepended to the configured list, even when
/// they repeat it, since an owned override is never the configured list itself.
pub fn apply_overrides(config: BundlerConfig, overrides: &ConfigOverrides) -> BundlerConfig {
    let source_exts = match &overrides.source_exts {
        Some(exts) => {
            debug!("Prepending source extensions {exts:?}");
            concat(exts, &config.resolver.source_exts)
        }
        _ => config.resolver.source_exts.clone(),
    };
    BundlerConfig {
        max_workers: overrides.max_workers.unwrap_or(config.max_workers),
        reporter: overrides.reporter.clone().unwrap_or_else(|| config.reporter.clone()),
        reset_cache: overrides.reset_cache.unwrap_or(config.reset_cache),
        watch_folders: overrides
            .watch_folders
            .clone()
            .unwrap_or_else(|| config.watch_folders.clone()),
        server: ServerConfig { port: overrides.port.unwrap_or(config.server.port) },
        resolver: ResolverConfig { source_exts, ..config.resolver.clone() },
        ..config
    }
}

fn concat<T: Clone>(first: &[T], second: &[T]) -> Vec<T> {
    first.iter().chain(second).cloned().collect()
}
