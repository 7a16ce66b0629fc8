//! The built-in layer of the bundler configuration.

use std::path::{Path, PathBuf};

use crate::bundler::config::{
    BundlerConfig, ResolverConfig, SerializerConfig, ServerConfig, TransformerConfig,
};
use crate::constants::bundler::{
    ASSET_EXTS, ASSET_REGISTRY_PATH, PLATFORMS, POLYFILLS, REPORTER, RESOLVER_MAIN_FIELDS,
    SOURCE_EXTS,
};
use crate::constants::FRAMEWORK_PACKAGE;

/// Paths the bundler never scans regardless of project.
const SHARED_BLACKLIST: &[&str] = &[
    r"node_modules[/\\]react[/\\]dist[/\\].*",
    r"website[/\\]node_modules[/\\].*",
    r"heapCapture[/\\]bundle\.js",
    r".*[/\\]__tests__[/\\].*",
];

/// Fixture directories of the framework itself.
const FIXTURES_BLACKLIST: &str = r".*[/\\]__fixtures__[/\\].*";

/// Inputs to the default layer that depend on the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsContext {
    pub project_root: PathBuf,
    pub framework_root: PathBuf,
    pub port: u16,
    pub watch_folders: Vec<PathBuf>,
}

/// Joins blacklist patterns into one anchored-at-end alternation.
pub fn blacklist(additional: &[&str]) -> String {
    let patterns: Vec<&str> = additional.iter().chain(SHARED_BLACKLIST).copied().collect();
    format!("({})$", patterns.join("|"))
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Number of workers used when nothing else is configured.
pub fn default_max_workers() -> usize {
    std::thread::available_parallelism().map(|workers| workers.get()).unwrap_or(1)
}

pub fn default_config(context: &DefaultsContext) -> BundlerConfig {
    let framework = &context.framework_root;
    BundlerConfig {
        project_root: context.project_root.clone(),
        watch_folders: context.watch_folders.clone(),
        reporter: REPORTER.to_string(),
        reset_cache: false,
        max_workers: default_max_workers(),
        resolver: ResolverConfig {
            asset_exts: strings(ASSET_EXTS),
            blacklist_re: blacklist(&[FIXTURES_BLACKLIST]),
            haste_impl_module_path: None,
            platforms: strings(PLATFORMS),
            provides_module_node_modules: vec![FRAMEWORK_PACKAGE.to_string()],
            resolver_main_fields: strings(RESOLVER_MAIN_FIELDS),
            source_exts: strings(SOURCE_EXTS),
        },
        serializer: SerializerConfig {
            modules_run_before_main_module: vec![framework
                .join("Libraries")
                .join("Core")
                .join("InitializeCore.js")],
            polyfills: polyfills(framework),
        },
        server: ServerConfig { port: context.port },
        transformer: TransformerConfig {
            asset_registry_path: ASSET_REGISTRY_PATH.to_string(),
            babel_transformer_path: babel_transformer_path(framework),
        },
    }
}

/// Polyfills bundled ahead of every module.
pub fn polyfills(framework_root: &Path) -> Vec<PathBuf> {
    let dir = framework_root.join("Libraries").join("polyfills");
    POLYFILLS.iter().map(|file| dir.join(file)).collect()
}

/// The bundler package is installed next to the framework.
fn babel_transformer_path(framework_root: &Path) -> PathBuf {
    framework_root
        .parent()
        .unwrap_or(framework_root)
        .join("metro")
        .join("src")
        .join("reactNativeTransformer.js")
}
