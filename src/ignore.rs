use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

/// Patterns, relative to the template root, that are never copied into a project.
const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    ".git/**",
    "node_modules",
    "node_modules/**",
    "**/.DS_Store",
    "dependencies.json",
    "devDependencies.json",
];

/// Builds the set of template paths excluded from copying.
pub fn template_ignore_set() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        debug!("Adding ignore pattern: {pattern} to globset");
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
