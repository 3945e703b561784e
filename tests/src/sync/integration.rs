#![cfg(test)]
use std::fs;

use labmon_common::config::DEFAULT_BASE_DN;
use labmon_core::cleanup;
use labmon_core::sources::ignore::IgnoreList;
use labmon_core::sync::SyncError;
use pretty_assertions::assert_eq;

use crate::support::{FakeDirectory, RecordingRunner, instance, service};

fn read(dir: &std::path::Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

/// One instance in project `bots` with the `base` class ends up in the
/// project group and the class-driven `ssh` group, and nowhere else.
#[test]
fn sync_single_instance_writes_host_and_groups() {
    let out = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::default();
    let service = service(out.path(), true, IgnoreList::new(), runner);
    let directory = FakeDirectory::new(vec![instance(
        "i-000003d1",
        "i-000003d1.pmtpa.wmflabs",
        "bots",
        "bots-cb-dev",
        &["base"],
        "10.4.0.249",
    )]);

    let report = service.run(directory).unwrap();

    assert_eq!(
        report.written.host_files,
        vec!["instance-i-000003d1.pmtpa.wmflabs.cfg"]
    );
    assert_eq!(report.written.group_files, vec!["group-bots.cfg", "group-ssh.cfg"]);

    let host = read(out.path(), "instance-i-000003d1.pmtpa.wmflabs.cfg");
    assert!(host.contains("host_name               i-000003d1.pmtpa.wmflabs"));
    assert!(host.contains("address                 10.4.0.249"));
    assert!(host.contains("hostgroups              bots,ssh"));

    let ssh = read(out.path(), "group-ssh.cfg");
    assert!(ssh.contains("members                 i-000003d1.pmtpa.wmflabs"));
    assert!(!out.path().join("group-http.cfg").exists());
}

#[test]
fn sync_queries_instance_attributes_under_base() {
    let out = tempfile::tempdir().unwrap();
    let service = service(out.path(), true, IgnoreList::new(), RecordingRunner::default());
    let directory = FakeDirectory::new(Vec::new());
    let seen = directory.seen.clone();

    service.run(directory).unwrap();

    let query = seen.borrow().clone().unwrap();
    assert_eq!(query.base_dn, DEFAULT_BASE_DN);
    assert!(query.attributes.iter().any(|a| a == "puppetVar"));
    assert!(query.attributes.iter().any(|a| a == "associatedDomain"));
}

#[test]
fn sync_removes_stale_configs_and_keeps_preserved() {
    let out = tempfile::tempdir().unwrap();
    for name in [
        "instance-gone.example.cfg",
        "group-stale.cfg",
        "localhost_icinga",
        "notes.txt",
    ] {
        fs::write(out.path().join(name), "old").unwrap();
    }

    let service = service(out.path(), true, IgnoreList::new(), RecordingRunner::default());
    let directory = FakeDirectory::new(vec![instance(
        "i-1",
        "i-1.pmtpa.wmflabs",
        "bots",
        "bots-1",
        &[],
        "10.0.0.1",
    )]);

    let report = service.run(directory).unwrap();

    assert_eq!(report.removed, vec!["group-stale.cfg", "instance-gone.example.cfg"]);
    let left = cleanup::existing_files(out.path()).unwrap();
    assert_eq!(
        left,
        vec![
            "group-bots.cfg",
            "instance-i-1.pmtpa.wmflabs.cfg",
            "localhost_icinga",
            "notes.txt",
        ]
    );
}

#[test]
fn sync_empty_directory_prunes_every_generated_file() {
    let out = tempfile::tempdir().unwrap();
    fs::write(out.path().join("instance-a.cfg"), "old").unwrap();
    fs::write(out.path().join("group-a.cfg"), "old").unwrap();

    let service = service(out.path(), true, IgnoreList::new(), RecordingRunner::default());
    let report = service.run(FakeDirectory::new(Vec::new())).unwrap();

    assert_eq!(report.written.written(), 0);
    assert_eq!(report.removed.len(), 2);
    assert!(cleanup::existing_files(out.path()).unwrap().is_empty());
}

#[test]
fn sync_ignored_host_is_neither_written_nor_grouped() {
    let out = tempfile::tempdir().unwrap();
    let ignore = IgnoreList::from_iter(["i-2.pmtpa.wmflabs"]);
    let service = service(out.path(), true, ignore, RecordingRunner::default());
    let directory = FakeDirectory::new(vec![
        instance("i-1", "i-1.pmtpa.wmflabs", "bots", "bots-1", &["base"], "10.0.0.1"),
        instance("i-2", "i-2.pmtpa.wmflabs", "deploy", "deploy-1", &["base"], "10.0.0.2"),
    ]);

    let report = service.run(directory).unwrap();

    assert_eq!(report.inventory.stats.ignored, 1);
    assert!(!out.path().join("instance-i-2.pmtpa.wmflabs.cfg").exists());
    assert!(!out.path().join("group-deploy.cfg").exists());
    assert!(!read(out.path(), "group-ssh.cfg").contains("i-2"));
}

#[test]
fn sync_is_idempotent() {
    let out = tempfile::tempdir().unwrap();
    let entries = vec![instance("i-1", "i-1.pmtpa.wmflabs", "bots", "bots-1", &["base"], "10.0.0.1")];
    let service = service(out.path(), true, IgnoreList::new(), RecordingRunner::default());

    service.run(FakeDirectory::new(entries.clone())).unwrap();
    let first = read(out.path(), "instance-i-1.pmtpa.wmflabs.cfg");
    let report = service.run(FakeDirectory::new(entries)).unwrap();

    assert!(report.removed.is_empty());
    assert_eq!(read(out.path(), "instance-i-1.pmtpa.wmflabs.cfg"), first);
}

#[test]
fn directory_is_closed_after_a_successful_run() {
    let out = tempfile::tempdir().unwrap();
    let service = service(out.path(), true, IgnoreList::new(), RecordingRunner::default());
    let directory = FakeDirectory::new(Vec::new());
    let closed = directory.closed_flag();

    service.run(directory).unwrap();
    assert!(closed.get());
}

#[test]
fn directory_is_closed_when_the_search_fails() {
    let out = tempfile::tempdir().unwrap();
    fs::write(out.path().join("instance-keep.cfg"), "old").unwrap();
    let service = service(out.path(), true, IgnoreList::new(), RecordingRunner::default());
    let directory = FakeDirectory::failing();
    let closed = directory.closed_flag();

    let result = service.run(directory);

    assert!(matches!(result, Err(SyncError::Directory(_))));
    assert!(closed.get());
    // Nothing is pruned when the directory could not be read.
    assert!(out.path().join("instance-keep.cfg").exists());
}
