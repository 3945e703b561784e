#![cfg(test)]
use labmon_core::sources::ignore::IgnoreList;
use labmon_core::sync::SyncOutcome;
use pretty_assertions::assert_eq;

use crate::support::{FakeDirectory, RecordingRunner, instance, service};

fn one_instance() -> FakeDirectory {
    FakeDirectory::new(vec![instance(
        "i-1",
        "i-1.pmtpa.wmflabs",
        "bots",
        "bots-1",
        &["base"],
        "10.0.0.1",
    )])
}

#[test]
fn debug_mode_writes_configs_but_runs_nothing() {
    let out = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::default();
    let service = service(out.path(), true, IgnoreList::new(), runner.clone());

    let report = service.run(one_instance()).unwrap();

    assert_eq!(report.outcome, SyncOutcome::SkippedDebug);
    assert!(runner.calls().is_empty());
    assert!(out.path().join("instance-i-1.pmtpa.wmflabs.cfg").exists());
}

#[test]
fn validates_before_reloading() {
    let out = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::default();
    let service = service(out.path(), false, IgnoreList::new(), runner.clone());

    let report = service.run(one_instance()).unwrap();

    assert_eq!(report.outcome, SyncOutcome::Reloaded);
    assert_eq!(runner.calls(), vec!["icinga -v test.cfg", "service icinga reload"]);
}

#[test]
fn failed_validation_skips_reload() {
    let out = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::failing_on("icinga -v test.cfg");
    let service = service(out.path(), false, IgnoreList::new(), runner.clone());

    let report = service.run(one_instance()).unwrap();

    assert_eq!(report.outcome, SyncOutcome::ValidationFailed);
    assert_eq!(runner.calls(), vec!["icinga -v test.cfg"]);
    // Generated files stay on disk for inspection.
    assert!(out.path().join("group-ssh.cfg").exists());
}

#[test]
fn failed_reload_is_reported() {
    let out = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::failing_on("service icinga reload");
    let service = service(out.path(), false, IgnoreList::new(), runner.clone());

    let report = service.run(one_instance()).unwrap();

    assert_eq!(report.outcome, SyncOutcome::ReloadFailed);
    assert_eq!(runner.calls().len(), 2);
}
