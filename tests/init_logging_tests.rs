mod utils;

use rnscaffold::init::{
    AbortReason, InitInput, InitOutcome, Initializer, PackageManager, TemplateEngine,
    TemplateRequest,
};
use rnscaffold::renderer::MiniJinjaRenderer;
use utils::{capture_logs, errors, framework_fixture, RecordingPackageManagers};

/// Template engine that must never be reached by an aborted init.
struct UnreachableTemplates;

impl TemplateEngine for UnreachableTemplates {
    fn create_project(
        &self,
        request: &TemplateRequest<'_>,
        _package_manager: &dyn PackageManager,
    ) -> rnscaffold::error::Result<()> {
        panic!("template requested for {}", request.project_name);
    }
}

fn args(values: &[&str]) -> InitInput {
    InitInput::Args(values.iter().map(|value| value.to_string()).collect())
}

#[test]
fn empty_arguments_log_exactly_one_error() {
    let tmp = tempfile::tempdir().unwrap();
    let project_dir = tmp.path().join("App");
    let managers = RecordingPackageManagers::default();
    let renderer = MiniJinjaRenderer::new();
    let initializer = Initializer::new(&UnreachableTemplates, &managers, &renderer);

    for input in [args(&[]), InitInput::from_name("", Vec::new())] {
        let (outcome, records) = capture_logs(|| initializer.init(&project_dir, input).unwrap());
        assert_eq!(outcome, InitOutcome::Aborted(AbortReason::MissingProjectName));
        let logged = errors(&records);
        assert_eq!(logged.len(), 1, "{records:?}");
        assert!(logged[0].contains("No project name"));
    }

    assert!(managers.calls().is_empty());
    assert!(!project_dir.exists());
}

#[test]
fn missing_peer_dependency_logs_exactly_one_error() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = framework_fixture(&tmp.path().join("framework"), "{}");
    let project_dir = tmp.path().join("App");
    let managers = RecordingPackageManagers::default();
    let renderer = MiniJinjaRenderer::new();
    let initializer = Initializer::new(&UnreachableTemplates, &managers, &renderer)
        .with_framework_manifest(&manifest);

    let (outcome, records) =
        capture_logs(|| initializer.init(&project_dir, args(&["AwesomeApp", "--verbose"])).unwrap());

    assert_eq!(outcome, InitOutcome::Aborted(AbortReason::MissingPeerDependency { manifest }));
    let logged = errors(&records);
    assert_eq!(logged.len(), 1, "{records:?}");
    assert!(logged[0].contains("peer dependency"));
    assert!(managers.calls().is_empty());
    assert!(!project_dir.exists());
}

#[test]
fn invalid_project_name_logs_exactly_one_error() {
    let tmp = tempfile::tempdir().unwrap();
    let managers = RecordingPackageManagers::default();
    let renderer = MiniJinjaRenderer::new();
    let initializer = Initializer::new(&UnreachableTemplates, &managers, &renderer);

    let (outcome, records) = capture_logs(|| initializer.init(tmp.path(), args(&["my-app"])).unwrap());

    assert_eq!(outcome, InitOutcome::Aborted(AbortReason::InvalidProjectName("my-app".to_string())));
    assert_eq!(errors(&records).len(), 1, "{records:?}");
}
