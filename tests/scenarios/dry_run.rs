//! Scenario: previewing a deployment.

use batchship::domain::entities::ArtifactKind;
use batchship::infrastructure::LocalFs;
use batchship::{Orchestrator, RunRequest};

use crate::common::*;

/// SCENARIO: the dry run inspects every artifact locally and never connects.
#[test]
fn scenario_dry_run_never_connects() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let channel = RecordingChannel::new();
    let orchestrator = Orchestrator::new(
        config_in(project.path(), SAMPLE_CONFIG),
        channel.clone(),
        LocalFs::new(),
    );

    let preview = orchestrator.preview(&RunRequest::all()).unwrap();

    assert_eq!(channel.calls().connects, 0);
    assert_eq!(preview.host, PRIMARY_HOST);
    assert_eq!(preview.artifact_count(), 5);
    assert_eq!(preview.missing_count(), 1);

    let tests = &preview.batches[0].artifacts[0];
    assert_eq!(tests.kind, ArtifactKind::Directory);
    assert_eq!(tests.file_count, Some(3));

    let archive = &preview.batches[1].artifacts[0];
    assert!(!archive.exists());
    assert_eq!(archive.remote_path.as_str(), "/opt/test_project/test_env.tar.gz");
}

/// SCENARIO: the dry run works for a password target whose variable is unset.
#[test]
fn scenario_dry_run_does_not_need_credentials() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let orchestrator = Orchestrator::new(
        config_in(project.path(), SAMPLE_CONFIG),
        RecordingChannel::new(),
        LocalFs::new(),
    );

    let preview = orchestrator
        .preview(&RunRequest::all().with_target("backup"))
        .unwrap();
    assert_eq!(preview.host, BACKUP_HOST);
}
