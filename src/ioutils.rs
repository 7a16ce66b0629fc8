use std::path::Path;

use crate::error::{Error, Result};

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

pub fn copy_file<S: AsRef<Path>, D: AsRef<Path>>(source_path: S, dest_path: D) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::copy(source_path, dest_path).map(|_| ()).map_err(Error::IoError)
}

/// Reads a UTF-8 JSON document from disk.
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

/// Serializes a JSON value with two-space indentation and a trailing newline.
pub fn to_pretty_json(value: &serde_json::Value) -> Result<String> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    Ok(content)
}

pub fn write_json<P: AsRef<Path>>(value: &serde_json::Value, dest_path: P) -> Result<()> {
    write_file(&to_pretty_json(value)?, dest_path)
}
