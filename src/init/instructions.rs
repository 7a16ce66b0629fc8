use serde_json::json;
use std::path::Path;

use crate::error::Result;
use crate::renderer::TemplateRenderer;

const RUN_INSTRUCTIONS: &str = r#"
{% if platform.os == "macos" %}
To run your app on iOS:
   cd {{ project_dir }}
   react-native run-ios
   - or -
   Open {{ xcode_project }} in Xcode
   Hit the Run button

{% endif %}
To run your app on Android:
   cd {{ project_dir }}
   Have an Android emulator running (quickest way to get started), or a device connected
   react-native run-android
"#;

/// Renders the post-install instructions for running the new project.
///
/// iOS steps are only shown when the renderer reports a macOS host. The Xcode
/// workspace is preferred over the project file when the template created one.
pub fn render_run_instructions(
    renderer: &dyn TemplateRenderer,
    project_dir: &Path,
    project_name: &str,
) -> Result<String> {
    let context = instructions_context(project_dir, project_name);
    renderer.render(RUN_INSTRUCTIONS, &context, Some("run_instructions"))
}

fn instructions_context(project_dir: &Path, project_name: &str) -> serde_json::Value {
    let workspace = format!("ios/{project_name}.xcworkspace");
    let xcode_project = if project_dir.join(&workspace).exists() {
        workspace
    } else {
        format!("ios/{project_name}.xcodeproj")
    };
    json!({
        "project_dir": project_dir.display().to_string(),
        "xcode_project": xcode_project,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MiniJinjaRenderer;

    fn render_on(os: &str, project_dir: &Path, project_name: &str) -> String {
        let mut context = instructions_context(project_dir, project_name);
        context["platform"] = json!({"os": os});
        MiniJinjaRenderer::new().render(RUN_INSTRUCTIONS, &context, None).unwrap()
    }

    #[test]
    fn mentions_directory_and_xcode_project_on_macos() {
        let tmp = tempfile::tempdir().unwrap();
        let text = render_on("macos", tmp.path(), "Demo");
        assert!(text.contains(&format!("cd {}", tmp.path().display())));
        assert!(text.contains("react-native run-ios"));
        assert!(text.contains("Open ios/Demo.xcodeproj in Xcode"));
        assert!(text.contains("react-native run-android"));
    }

    #[test]
    fn skips_ios_steps_elsewhere() {
        let tmp = tempfile::tempdir().unwrap();
        let text = render_on("linux", tmp.path(), "Demo");
        assert!(!text.contains("iOS"));
        assert!(!text.contains("Xcode"));
        assert!(text.contains("react-native run-android"));
    }

    #[test]
    fn prefers_workspace_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("ios/Demo.xcworkspace")).unwrap();
        let text = render_on("macos", tmp.path(), "Demo");
        assert!(text.contains("Open ios/Demo.xcworkspace in Xcode"));
    }

    #[test]
    fn host_platform_decides_ios_steps() {
        let tmp = tempfile::tempdir().unwrap();
        let text = render_run_instructions(&MiniJinjaRenderer::new(), tmp.path(), "Demo").unwrap();
        assert_eq!(text.contains("run-ios"), std::env::consts::OS == "macos");
        assert!(text.contains("react-native run-android"));
    }
}
