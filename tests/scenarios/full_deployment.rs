//! Scenario: deploying the sample project batch by batch.

use std::path::Path;

use batchship::domain::entities::RunMode;
use batchship::infrastructure::LocalFs;
use batchship::{Orchestrator, RunRequest};

use crate::common::*;

fn orchestrator(
    root: &Path,
    channel: &RecordingChannel,
) -> Orchestrator<RecordingChannel, LocalFs> {
    Orchestrator::new(config_in(root, SAMPLE_CONFIG), channel.clone(), LocalFs::new())
}

/// SCENARIO: the sample test-code batch (a directory of three files plus
/// two files) deploys cleanly on its own.
#[test]
fn scenario_test_code_batch_succeeds() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let channel = RecordingChannel::new();

    let report = orchestrator(project.path(), &channel)
        .run(&RunRequest::all().with_batch("test_code"))
        .unwrap();

    let result = report.get("test_code").unwrap();
    assert!(result.uploaded);
    assert!(result.verified);
    assert!(report.overall_success());
    assert_eq!(report.exit_code(), 0);

    let calls = channel.calls();
    assert_eq!(
        calls.dir_transfers,
        vec![(
            project.path().join("tests"),
            "/opt/test_project/tests".to_string()
        )]
    );
    assert_eq!(calls.file_transfers.len(), 2);
    assert_eq!(calls.verification_commands().len(), 3);
    assert_eq!(calls.closes, 1);
}

/// SCENARIO: the environment archive was never built, so its batch fails
/// without touching the remote host.
#[test]
fn scenario_missing_env_package_fails_without_transfer() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let channel = RecordingChannel::new();

    let report = orchestrator(project.path(), &channel)
        .run(&RunRequest::all().with_batch("env_package"))
        .unwrap();

    let result = report.get("env_package").unwrap();
    assert!(!result.uploaded);
    assert!(!result.verified);
    assert!(!report.overall_success());
    assert_eq!(report.exit_code(), 1);

    let outcome = &result.transfer_outcomes[0];
    assert!(!outcome.transferred);
    assert!(outcome
        .error
        .as_deref()
        .unwrap()
        .contains("test_env.tar.gz"));

    let calls = channel.calls();
    assert_eq!(calls.transfer_count(), 0);
    assert!(calls.verification_commands().is_empty());
}

/// SCENARIO: a full run keeps going after a failed batch, in plan order,
/// and still runs the health checks.
#[test]
fn scenario_full_run_attempts_every_batch_in_order() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let channel = RecordingChannel::new();
    let sink = RecordingSink::new();

    let report = orchestrator(project.path(), &channel)
        .with_events(sink.clone())
        .run(&RunRequest::all())
        .unwrap();

    assert_eq!(report.mode, RunMode::Full);
    let names: Vec<_> = report.batches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["test_code", "env_package", "scripts"]);
    assert!(report.get("test_code").unwrap().is_success());
    assert!(!report.get("env_package").unwrap().uploaded);
    assert!(report.get("scripts").unwrap().is_success());
    assert!(!report.overall_success());

    assert_eq!(report.health_checks.len(), 2);
    assert!(report.health_checks.iter().all(|c| c.passed));

    let calls = channel.calls();
    assert_eq!(
        calls.remote_paths().last().map(String::as_str),
        Some("/opt/test_project/scripts/deploy_and_test.sh")
    );
    assert!(calls
        .commands
        .contains(&"ls -la '/opt/test_project'".to_string()));

    let kinds = sink.kinds();
    assert_eq!(kinds.first(), Some(&"connecting"));
    assert_eq!(kinds.last(), Some(&"disconnected"));
    assert_eq!(kinds.iter().filter(|k| **k == "batch_started").count(), 3);
    assert_eq!(kinds.iter().filter(|k| **k == "batch_finished").count(), 3);
}

/// SCENARIO: every artifact present and every remote call succeeds.
#[test]
fn scenario_complete_project_deploys_cleanly() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    write_env_package(project.path());
    let channel = RecordingChannel::new();

    let report = orchestrator(project.path(), &channel)
        .run(&RunRequest::all())
        .unwrap();

    assert!(report.overall_success());
    assert_eq!(report.successful_batches(), 3);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(channel.calls().transfer_count(), 5);
}

/// SCENARIO: one transfer breaks mid-batch; the rest of the batch and the
/// following batches are still attempted.
#[test]
fn scenario_transfer_failure_is_recorded_not_fatal() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    write_env_package(project.path());
    let channel = RecordingChannel::with_faults(Faults {
        fail_transfer: Some("run_tests.py".to_string()),
        ..Faults::default()
    });

    let report = orchestrator(project.path(), &channel)
        .run(&RunRequest::all())
        .unwrap();

    let test_code = report.get("test_code").unwrap();
    assert!(!test_code.uploaded);
    assert_eq!(test_code.transferred_count(), 2);
    assert!(test_code.transfer_outcomes[1]
        .error
        .as_deref()
        .unwrap()
        .contains("Connection reset by peer"));
    assert!(report.get("env_package").unwrap().is_success());

    let calls = channel.calls();
    assert_eq!(calls.transfer_count(), 5);
    // Only the two later batches were verified.
    assert_eq!(calls.verification_commands().len(), 2);
    assert_eq!(calls.closes, 1);
}

/// SCENARIO: everything uploads but the remote host cannot see the files.
#[test]
fn scenario_failed_verification_marks_batch_unverified() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let channel = RecordingChannel::with_faults(Faults {
        fail_command: Some("ls -ld".to_string()),
        ..Faults::default()
    });

    let report = orchestrator(project.path(), &channel)
        .run(&RunRequest::all().with_batch("scripts"))
        .unwrap();

    let scripts = report.get("scripts").unwrap();
    assert!(scripts.uploaded);
    assert!(!scripts.verified);
    assert_eq!(report.exit_code(), 1);
}

/// SCENARIO: a failing health check is reported but does not fail the run.
#[test]
fn scenario_health_failures_do_not_affect_exit_code() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    write_env_package(project.path());
    let channel = RecordingChannel::with_faults(Faults {
        fail_command: Some("python3".to_string()),
        ..Faults::default()
    });

    let report = orchestrator(project.path(), &channel)
        .run(&RunRequest::all())
        .unwrap();

    let python = &report.health_checks[0];
    assert_eq!(python.name, "Python runtime");
    assert!(!python.passed);
    assert!(report.health_checks[1].passed);
    assert!(report.overall_success());
    assert_eq!(report.exit_code(), 0);
}

/// SCENARIO: a batch whose only artifact is a directory of three files.
#[test]
fn scenario_single_directory_batch_succeeds() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let config = SAMPLE_CONFIG.replace(
        r#"artifacts = ["tests", "run_tests.py", "pytest.ini"]"#,
        r#"artifacts = ["tests"]"#,
    );
    let channel = RecordingChannel::new();

    let report = Orchestrator::new(
        config_in(project.path(), &config),
        channel.clone(),
        LocalFs::new(),
    )
    .run(&RunRequest::all().with_batch("test_code"))
    .unwrap();

    let result = report.get("test_code").unwrap();
    assert!(result.uploaded);
    assert!(result.verified);
    assert_eq!(result.transfer_outcomes.len(), 1);
    assert_eq!(report.exit_code(), 0);

    let calls = channel.calls();
    assert_eq!(calls.dir_transfers.len(), 1);
    assert!(calls.file_transfers.is_empty());
    assert_eq!(
        calls.verification_commands(),
        vec!["ls -ld -- '/opt/test_project/tests'"]
    );
}

/// SCENARIO: one artifact of an otherwise complete batch is missing; the
/// others still go up but the batch is not uploaded and never verified.
#[test]
fn scenario_one_missing_artifact_fails_the_whole_batch() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let config = SAMPLE_CONFIG.replace(
        r#"artifacts = ["tests", "run_tests.py", "pytest.ini"]"#,
        r#"artifacts = ["tests", "requirements.txt", "run_tests.py"]"#,
    );
    let channel = RecordingChannel::new();

    let report = Orchestrator::new(
        config_in(project.path(), &config),
        channel.clone(),
        LocalFs::new(),
    )
    .run(&RunRequest::all().with_batch("test_code"))
    .unwrap();

    let result = report.get("test_code").unwrap();
    assert_eq!(result.transferred_count(), 2);
    assert!(!result.transfer_outcomes[1].transferred);
    assert!(!result.uploaded);
    assert!(!result.verified);
    assert_eq!(report.exit_code(), 1);

    let calls = channel.calls();
    assert_eq!(calls.transfer_count(), 2);
    assert!(calls.verification_commands().is_empty());
}

/// SCENARIO: the remote directory for one artifact cannot be created; only
/// that artifact fails and the rest of the batch is still transferred.
#[test]
fn scenario_failed_mkdir_only_fails_its_artifact() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let config = SAMPLE_CONFIG.replace(
        r#"artifacts = ["tests", "run_tests.py", "pytest.ini"]"#,
        r#"artifacts = ["scripts/deploy_and_test.sh", "run_tests.py", "pytest.ini"]"#,
    );
    let channel = RecordingChannel::with_faults(Faults {
        fail_command: Some("mkdir -p -- '/opt/test_project/scripts'".to_string()),
        ..Faults::default()
    });

    let report = Orchestrator::new(
        config_in(project.path(), &config),
        channel.clone(),
        LocalFs::new(),
    )
    .run(&RunRequest::all().with_batch("test_code"))
    .unwrap();

    let result = report.get("test_code").unwrap();
    assert_eq!(result.transferred_count(), 2);
    let script = &result.transfer_outcomes[0];
    assert!(!script.transferred);
    assert!(script.error.as_deref().unwrap().contains("mkdir"));
    assert!(!result.uploaded);
    assert!(!result.verified);

    let calls = channel.calls();
    assert_eq!(
        calls.remote_paths(),
        vec![
            "/opt/test_project/run_tests.py".to_string(),
            "/opt/test_project/pytest.ini".to_string(),
        ]
    );
    assert!(calls.verification_commands().is_empty());
}

/// SCENARIO: the remote base lives under the login user's home.
#[test]
fn scenario_home_relative_remote_base() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let config = SAMPLE_CONFIG.replace(
        r#"remote_base = "/opt/test_project""#,
        r#"remote_base = "~/test_project""#,
    );
    let channel = RecordingChannel::new();

    let report = Orchestrator::new(
        config_in(project.path(), &config),
        channel.clone(),
        LocalFs::new(),
    )
    .run(&RunRequest::all().with_batch("scripts"))
    .unwrap();

    assert!(report.get("scripts").unwrap().is_success());
    let expected_base = format!("{}/test_project", REMOTE_HOME);
    assert_eq!(report.remote_base.as_str(), expected_base);

    let calls = channel.calls();
    assert_eq!(
        calls.remote_paths(),
        vec![format!("{}/scripts/deploy_and_test.sh", expected_base)]
    );
    assert!(calls
        .commands
        .contains(&format!("mkdir -p -- '{}/scripts'", expected_base)));
    assert!(calls.commands.iter().all(|c| !c.contains("'~")));
}
