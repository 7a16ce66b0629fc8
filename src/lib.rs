/// Handles argument parsing and command dispatch.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants shared across the crate.
pub mod constants;

/// Extension traits for standard library types.
pub mod ext;

/// Paths excluded when copying templates.
pub mod ignore;

/// Text rendering for user-facing output.
pub mod renderer;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Project creation from templates.
pub mod init;

/// Bundler configuration resolution.
pub mod bundler;
