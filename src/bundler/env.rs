//! Process state read by the config loader, behind a trait so callers can supply
//! fixed values.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::constants::env;
use crate::error::{Error, Result};

/// Source of environment variables and process locations.
pub trait ConfigSource: Send + Sync {
    /// Value of an environment variable, `None` when unset or not valid Unicode.
    fn var(&self, name: &str) -> Option<String>;

    /// Directory relative paths are resolved against.
    fn current_dir(&self) -> Result<PathBuf>;

    /// Directory the loader itself is installed in.
    fn loader_dir(&self) -> Result<PathBuf>;
}

/// Reads the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSource;

impl ConfigSource for ProcessSource {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn loader_dir(&self) -> Result<PathBuf> {
        let exe = std::env::current_exe()?;
        exe.parent().map(|dir| dir.to_path_buf()).ok_or_else(|| {
            Error::Other(anyhow::anyhow!("Executable '{}' has no parent directory", exe.display()))
        })
    }
}

/// Fixed values, for tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    vars: HashMap<String, String>,
    current_dir: PathBuf,
    loader_dir: PathBuf,
}

impl StaticSource {
    pub fn new<C: Into<PathBuf>, L: Into<PathBuf>>(current_dir: C, loader_dir: L) -> Self {
        Self { vars: HashMap::new(), current_dir: current_dir.into(), loader_dir: loader_dir.into() }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl ConfigSource for StaticSource {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn loader_dir(&self) -> Result<PathBuf> {
        Ok(self.loader_dir.clone())
    }
}

/// Everything the loader reads from its source, captured once per load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSnapshot {
    pub app_root: Option<String>,
    pub metro_port: Option<String>,
    pub current_dir: PathBuf,
    pub loader_dir: PathBuf,
}

impl EnvSnapshot {
    pub fn capture(source: &dyn ConfigSource) -> Result<Self> {
        Ok(Self {
            app_root: source.var(env::APP_ROOT).filter(|value| !value.is_empty()),
            metro_port: source.var(env::METRO_PORT).filter(|value| !value.is_empty()),
            current_dir: source.current_dir()?,
            loader_dir: source.loader_dir()?,
        })
    }
}
