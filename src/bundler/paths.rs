//! Heuristics locating the project and the framework relative to the loader.

use log::warn;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::bundler::symlinks::SymlinkResolver;
use crate::constants::{bundler::DEFAULT_PORT, env};
use crate::error::Result;
use crate::ext::PathExt;

/// Loader installed as a dependency of a project.
const NODE_MODULES_LOADER: &str = r"node_modules/react-native/local-cli/util$";
/// Loader installed through CocoaPods.
const PODS_LOADER: &str = r"Pods/React/packager$";

/// Root of the project the bundler serves.
///
/// Four levels up when the loader sits inside `node_modules`, three when it was installed
/// by CocoaPods, two otherwise (the framework's own checkout).
pub fn project_root(loader_dir: &Path) -> Result<PathBuf> {
    let location = loader_dir.to_slash_string();
    let location = location.trim_end_matches('/');
    let levels = if Regex::new(NODE_MODULES_LOADER)?.is_match(location) {
        4
    } else if Regex::new(PODS_LOADER)?.is_match(location) {
        3
    } else {
        2
    };
    Ok(loader_dir.up(levels))
}

/// Root of the framework package that contains the loader.
pub fn framework_root(loader_dir: &Path) -> PathBuf {
    loader_dir.up(2)
}

/// Port from the environment, falling back to the bundler default.
pub fn default_port(raw: Option<&str>) -> u16 {
    match raw.map(|value| value.trim().parse::<u16>()) {
        Some(Ok(port)) => port,
        Some(Err(e)) => {
            warn!("Ignoring {}={:?}: {e}", env::METRO_PORT, raw.unwrap_or_default());
            DEFAULT_PORT
        }
        None => DEFAULT_PORT,
    }
}

/// Extra folders to watch: the app root and every symlinked package reachable from it.
pub fn watch_folders(
    app_root: Option<&str>,
    current_dir: &Path,
    symlinks: &dyn SymlinkResolver,
) -> Result<Vec<PathBuf>> {
    let Some(app_root) = app_root else {
        return Ok(Vec::new());
    };
    let root = Path::new(app_root).absolutize(current_dir);
    let linked = symlinks.find_symlinked_modules(&root, std::slice::from_ref(&root))?;
    Ok(std::iter::once(root).chain(linked).collect())
}
