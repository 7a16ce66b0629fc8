//! Project initialization: options parsing, template instantiation, dependency
//! installation and manifest patching.

pub mod initializer;
pub mod instructions;
pub mod manifest;
pub mod options;
pub mod package_manager;
pub mod template;

pub use initializer::{AbortReason, InitOutcome, Initializer, ProjectDescriptor};
pub use manifest::{apply_test_runner, patch_manifest};
pub use options::{InitInput, InitOptions};
pub use package_manager::{
    CommandPackageManager, PackageManager, PackageManagerProvider, SystemPackageManagers,
};
pub use template::{PlaceholderTemplate, TemplateEngine, TemplateRequest, TemplateSource};
