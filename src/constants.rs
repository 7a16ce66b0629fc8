//! Constants used throughout rnscaffold

/// Manifest file name of every JS package
pub const MANIFEST_FILE: &str = "package.json";

/// Name of the framework package the projects are generated for
pub const FRAMEWORK_PACKAGE: &str = "react-native";

/// Core UI library whose version is pinned by the framework's peer dependency
pub const CORE_UI_PACKAGE: &str = "react";

/// Placeholder name used by the built-in template
pub const TEMPLATE_PLACEHOLDER: &str = "HelloWorld";

/// Prefix of template packages published to the registry
pub const TEMPLATE_PACKAGE_PREFIX: &str = "react-native-template-";

/// Names reserved by the framework that cannot be used as project names
pub const RESERVED_PROJECT_NAMES: &[&str] = &["React", "react"];

/// Test runner wiring applied to generated manifests
pub mod test_runner {
    pub const SCRIPT_KEY: &str = "test";
    pub const SCRIPT: &str = "jest";
    pub const CONFIG_KEY: &str = "jest";
    pub const PRESET: &str = "react-native";
}

/// Development dependencies installed into every new project, the test
/// renderer is appended separately since it is pinned to the core UI version.
pub const DEV_DEPENDENCIES: &[&str] =
    &["@babel/core", "babel-jest", "jest", "metro-react-native-babel-preset"];

/// Package pinned to the same version as the core UI library
pub const TEST_RENDERER_PACKAGE: &str = "react-test-renderer";

/// Environment variables consumed by the bundler config loader
pub mod env {
    pub const APP_ROOT: &str = "REACT_NATIVE_APP_ROOT";
    pub const METRO_PORT: &str = "RCT_METRO_PORT";
}

/// Bundler defaults
pub mod bundler {
    pub const DEFAULT_PORT: u16 = 8081;
    pub const ASSET_REGISTRY_PATH: &str = "react-native/Libraries/Image/AssetRegistry";
    pub const CONFIG_FILE: &str = "metro.config.json";
    pub const MANIFEST_CONFIG_KEY: &str = "metro";
    pub const RESOLVER_MAIN_FIELDS: &[&str] = &["react-native", "browser", "main"];
    pub const SOURCE_EXTS: &[&str] = &["js", "json", "ts", "tsx"];
    pub const ASSET_EXTS: &[&str] = &[
        "bmp", "gif", "jpg", "jpeg", "png", "psd", "svg", "webp", "m4v", "mov", "mp4",
        "mpeg", "mpg", "webm", "aac", "aiff", "caf", "m4a", "mp3", "wav", "html", "pdf",
        "otf", "ttf",
    ];
    pub const PLATFORMS: &[&str] = &["ios", "android", "native"];
    pub const POLYFILLS: &[&str] = &["console.js", "error-guard.js", "Object.es7.js"];
    pub const REPORTER: &str = "terminal";
}

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
