//! Wires the test runner into a generated project's manifest.

use log::debug;
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::constants::{test_runner, MANIFEST_FILE};
use crate::error::{Error, Result};
use crate::ioutils::{read_json, write_json};

/// Sets the `test` script and the test runner preset on a manifest object.
///
/// A `scripts` entry that is missing or not an object is replaced by an object.
pub fn apply_test_runner(manifest: &mut Map<String, Value>) {
    if !manifest.get("scripts").is_some_and(Value::is_object) {
        manifest.insert("scripts".to_string(), Value::Object(Map::new()));
    }
    if let Some(Value::Object(scripts)) = manifest.get_mut("scripts") {
        scripts.insert(test_runner::SCRIPT_KEY.to_string(), json!(test_runner::SCRIPT));
    }
    manifest.insert(
        test_runner::CONFIG_KEY.to_string(),
        json!({ "preset": test_runner::PRESET }),
    );
}

/// Reads `package.json` in `project_dir`, applies [`apply_test_runner`] and writes it
/// back with two-space indentation and a trailing newline.
pub fn patch_manifest<P: AsRef<Path>>(project_dir: P) -> Result<()> {
    let manifest_path = project_dir.as_ref().join(MANIFEST_FILE);
    let Value::Object(mut manifest) = read_json(&manifest_path)? else {
        return Err(Error::ManifestNotAnObject {
            path: manifest_path.display().to_string(),
        });
    };
    apply_test_runner(&mut manifest);
    write_json(&Value::Object(manifest), &manifest_path)?;
    debug!("Patched {}", manifest_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn adds_scripts_when_missing() {
        let mut manifest = json!({"name": "App"}).as_object().cloned().unwrap();
        apply_test_runner(&mut manifest);
        assert_eq!(
            Value::Object(manifest),
            json!({"name": "App", "scripts": {"test": "jest"}, "jest": {"preset": "react-native"}})
        );
    }

    #[test]
    fn keeps_other_scripts_and_overwrites_test() {
        let mut manifest = json!({
            "scripts": {"start": "node node_modules/react-native/local-cli/cli.js start", "test": "mocha"}
        })
        .as_object()
        .cloned()
        .unwrap();
        apply_test_runner(&mut manifest);
        let scripts = manifest["scripts"].as_object().unwrap();
        assert_eq!(scripts["test"], "jest");
        assert!(scripts.contains_key("start"));
    }

    #[test]
    fn replaces_non_object_scripts() {
        let mut manifest = json!({"scripts": "oops"}).as_object().cloned().unwrap();
        apply_test_runner(&mut manifest);
        assert_eq!(manifest["scripts"], json!({"test": "jest"}));
    }

    #[test]
    fn patch_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(MANIFEST_FILE);
        fs::write(&path, r#"{"name":"App","version":"0.0.1","private":true}"#).unwrap();

        patch_manifest(tmp.path()).unwrap();
        let first = fs::read(&path).unwrap();
        patch_manifest(tmp.path()).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        let text = String::from_utf8(first).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.starts_with("{\n  \"name\": \"App\",\n  \"version\": \"0.0.1\""));
    }

    #[test]
    fn rejects_non_object_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), "[1, 2]").unwrap();
        let err = patch_manifest(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::ManifestNotAnObject { .. }));
    }

    #[test]
    fn missing_manifest_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(patch_manifest(tmp.path()), Err(Error::IoError(_))));
    }
}
