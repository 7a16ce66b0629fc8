use std::process::ExitStatus;
use thiserror::Error;

use crate::constants::exit_codes;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Failed to build ignore patterns. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Invalid regular expression. Original error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Failed to walk template directory. Original error: {0}")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Manifest '{path}' is not a JSON object.")]
    ManifestNotAnObject { path: String },

    #[error("Cannot proceed: template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    /// The package manager ran but exited unsuccessfully.
    #[error("`{command}` failed with status: {status}")]
    PackageManagerFailed { command: String, status: ExitStatus },

    #[error("Bundler config file '{path}' does not exist.")]
    ConfigFileNotFound { path: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with this crate's error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(exit_codes::FAILURE);
}
