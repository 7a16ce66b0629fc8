//! Discovery of symlinked packages, for monorepos and linked local packages.

use indexmap::IndexSet;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ext::PathExt;

/// Finds packages under a root's `node_modules` that are symlinks to elsewhere.
pub trait SymlinkResolver: Send + Sync {
    /// Returns the resolved targets of every symlinked package reachable from `root`,
    /// skipping targets equal to or inside `ignored_roots`.
    fn find_symlinked_modules(&self, root: &Path, ignored_roots: &[PathBuf]) -> Result<Vec<PathBuf>>;
}

/// Scans the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSymlinkResolver;

impl SymlinkResolver for FsSymlinkResolver {
    fn find_symlinked_modules(&self, root: &Path, ignored_roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut ignored = ignored_roots.to_vec();
        ignored.push(root.to_path_buf());
        find_module_symlinks(&root.join("node_modules"), &ignored)
    }
}

fn find_module_symlinks(modules_dir: &Path, ignored: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if !modules_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();
    for entry in sorted_entries(modules_dir)? {
        let is_scope = entry.file_name().is_some_and(|name| name.to_string_lossy().starts_with('@'));
        if is_scope && entry.is_dir() {
            candidates.extend(sorted_entries(&entry)?);
        } else {
            candidates.push(entry);
        }
    }

    let links = resolve_symlinks(&candidates, ignored)?;

    let mut nested_ignored = ignored.to_vec();
    nested_ignored.extend(links.iter().cloned());
    let mut found: IndexSet<PathBuf> = links.iter().cloned().collect();
    for link in &links {
        found.extend(find_module_symlinks(&link.join("node_modules"), &nested_ignored)?);
    }
    Ok(found.into_iter().collect())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

fn resolve_symlinks(candidates: &[PathBuf], ignored: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut links = Vec::new();
    for candidate in candidates {
        if !std::fs::symlink_metadata(candidate)?.file_type().is_symlink() {
            continue;
        }
        let parent = candidate.parent().unwrap_or(Path::new("/"));
        let resolved = std::fs::read_link(candidate)?.absolutize(parent);
        if ignored.iter().any(|root| resolved.starts_with(root)) {
            debug!("Skipping ignored symlink {} -> {}", candidate.display(), resolved.display());
            continue;
        }
        debug!("Found symlinked module {} -> {}", candidate.display(), resolved.display());
        links.push(resolved);
    }
    Ok(links)
}
