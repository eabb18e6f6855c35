//! Scenario: the remote session is acquired once and released exactly once.

use std::panic::{catch_unwind, AssertUnwindSafe};

use batchship::infrastructure::LocalFs;
use batchship::{DeployError, Orchestrator, RunRequest, RunState};

use crate::common::*;

fn project() -> tempfile::TempDir {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    project
}

/// SCENARIO: a transfer error mid-run does not leak or double-close the session.
#[test]
fn scenario_transfer_error_closes_once() {
    let project = project();
    let channel = RecordingChannel::with_faults(Faults {
        fail_transfer: Some("tests".to_string()),
        ..Faults::default()
    });
    let mut orchestrator = Orchestrator::new(
        config_in(project.path(), SAMPLE_CONFIG),
        channel.clone(),
        LocalFs::new(),
    );

    orchestrator.run(&RunRequest::all()).unwrap();

    let calls = channel.calls();
    assert_eq!(calls.connects, 1);
    assert_eq!(calls.closes, 1);
    assert_eq!(orchestrator.state(), RunState::Disconnected);
}

/// SCENARIO: a panic inside a transfer still releases the session on unwind.
#[test]
fn scenario_panicking_transfer_closes_once() {
    let project = project();
    let channel = RecordingChannel::with_faults(Faults {
        panic_transfer: Some("run_tests.py".to_string()),
        ..Faults::default()
    });
    let mut orchestrator = Orchestrator::new(
        config_in(project.path(), SAMPLE_CONFIG),
        channel.clone(),
        LocalFs::new(),
    );

    let outcome = catch_unwind(AssertUnwindSafe(|| orchestrator.run(&RunRequest::all())));
    assert!(outcome.is_err(), "the injected panic should propagate");

    let calls = channel.calls();
    assert_eq!(calls.connects, 1);
    assert_eq!(calls.closes, 1);
    // Nothing after the panicking transfer ran.
    assert_eq!(calls.transfer_count(), 2);
}

/// SCENARIO: an unreachable host aborts before any batch starts.
#[test]
fn scenario_unreachable_host_is_fatal() {
    let project = project();
    let channel = RecordingChannel::with_faults(Faults {
        refuse_connect: true,
        ..Faults::default()
    });
    let sink = RecordingSink::new();
    let mut orchestrator = Orchestrator::new(
        config_in(project.path(), SAMPLE_CONFIG),
        channel.clone(),
        LocalFs::new(),
    )
    .with_events(sink.clone());

    let err = orchestrator.run(&RunRequest::all()).unwrap_err();

    assert!(matches!(err, DeployError::Unreachable { ref host, .. } if host == PRIMARY_HOST));
    assert!(err.is_fatal());
    assert_eq!(orchestrator.state(), RunState::Idle);
    assert_eq!(sink.kinds(), vec!["connecting"]);

    let calls = channel.calls();
    assert_eq!(calls.closes, 0);
    assert_eq!(calls.transfer_count(), 0);
}

/// SCENARIO: rejected credentials abort the run the same way.
#[test]
fn scenario_rejected_credentials_are_fatal() {
    let project = project();
    let channel = RecordingChannel::with_faults(Faults {
        reject_auth: true,
        ..Faults::default()
    });
    let mut orchestrator = Orchestrator::new(
        config_in(project.path(), SAMPLE_CONFIG),
        channel.clone(),
        LocalFs::new(),
    );

    let err = orchestrator.run(&RunRequest::all()).unwrap_err();
    assert!(matches!(err, DeployError::Authentication { .. }));
    assert_eq!(channel.calls().transfer_count(), 0);
}

/// SCENARIO: a typo in the target name never reaches the network.
#[test]
fn scenario_unknown_target_fails_before_connecting() {
    let project = project();
    let channel = RecordingChannel::new();
    let mut orchestrator = Orchestrator::new(
        config_in(project.path(), SAMPLE_CONFIG),
        channel.clone(),
        LocalFs::new(),
    );

    let err = orchestrator
        .run(&RunRequest::all().with_target("primray"))
        .unwrap_err();

    assert!(matches!(err, DeployError::Configuration { .. }));
    assert!(err.to_string().contains("did you mean 'primary'"));
    assert_eq!(channel.calls().connects, 0);
}

/// SCENARIO: the password variable of the selected target is unset.
#[test]
fn scenario_unset_password_variable_fails_before_connecting() {
    let project = project();
    let channel = RecordingChannel::new();
    let mut orchestrator = Orchestrator::new(
        config_in(project.path(), SAMPLE_CONFIG),
        channel.clone(),
        LocalFs::new(),
    );

    let err = orchestrator
        .run(&RunRequest::all().with_target("backup"))
        .unwrap_err();

    assert!(matches!(err, DeployError::Configuration { .. }));
    assert!(err.to_string().contains("BATCHSHIP_TEST_BACKUP_PASSWORD"));
    assert_eq!(channel.calls().connects, 0);
}
