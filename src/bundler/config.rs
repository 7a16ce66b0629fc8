//! Bundler configuration types.
//!
//! [`BundlerConfig`] is the fully merged configuration. [`ProjectConfig`] mirrors it with
//! every field optional and is what project config files deserialize into.
//! [`ConfigOverrides`] carries the caller's values.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerConfig {
    pub project_root: PathBuf,
    pub watch_folders: Vec<PathBuf>,
    pub reporter: String,
    pub reset_cache: bool,
    pub max_workers: usize,
    pub resolver: ResolverConfig,
    pub serializer: SerializerConfig,
    pub server: ServerConfig,
    pub transformer: TransformerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    pub asset_exts: Vec<String>,
    /// Pattern of paths the bundler never scans
    #[serde(rename = "blacklistRE")]
    pub blacklist_re: String,
    pub haste_impl_module_path: Option<PathBuf>,
    pub platforms: Vec<String>,
    pub provides_module_node_modules: Vec<String>,
    pub resolver_main_fields: Vec<String>,
    pub source_exts: Vec<String>,
}

impl ResolverConfig {
    /// Compiles the blacklist pattern.
    pub fn blacklist_regex(&self) -> Result<Regex> {
        Ok(Regex::new(&self.blacklist_re)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializerConfig {
    /// Modules required before the entry point of every bundle
    pub modules_run_before_main_module: Vec<PathBuf>,
    pub polyfills: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformerConfig {
    pub asset_registry_path: String,
    pub babel_transformer_path: PathBuf,
}

/// Project layer as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    pub project_root: Option<PathBuf>,
    pub watch_folders: Option<Vec<PathBuf>>,
    pub reporter: Option<String>,
    pub reset_cache: Option<bool>,
    pub max_workers: Option<usize>,
    pub resolver: ResolverLayer,
    pub serializer: SerializerLayer,
    pub server: ServerLayer,
    pub transformer: TransformerLayer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverLayer {
    pub asset_exts: Option<Vec<String>>,
    #[serde(rename = "blacklistRE")]
    pub blacklist_re: Option<String>,
    pub haste_impl_module_path: Option<PathBuf>,
    pub platforms: Option<Vec<String>>,
    pub provides_module_node_modules: Option<Vec<String>>,
    pub resolver_main_fields: Option<Vec<String>>,
    pub source_exts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializerLayer {
    pub modules_run_before_main_module: Option<Vec<PathBuf>>,
    pub polyfills: Option<Vec<PathBuf>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerLayer {
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformerLayer {
    pub asset_registry_path: Option<String>,
    pub babel_transformer_path: Option<PathBuf>,
}

/// Caller-supplied values, which take precedence over everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Explicit project config file
    pub config: Option<PathBuf>,
    pub max_workers: Option<usize>,
    pub port: Option<u16>,
    pub reporter: Option<String>,
    pub reset_cache: Option<bool>,
    pub watch_folders: Option<Vec<PathBuf>>,
    pub source_exts: Option<Vec<String>>,
}
