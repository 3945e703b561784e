//! In-memory stand-ins for the directory and the command runner.

use std::cell::{Cell, RefCell};
use std::io;
use std::path::Path;
use std::rc::Rc;

use labmon_common::command::CommandRunner;
use labmon_common::config::Config;
use labmon_common::directory::{Directory, DirectoryEntry, DirectoryError, DirectoryQuery};
use labmon_common::inventory::record::{
    ATTR_A_RECORD, ATTR_ASSOCIATED_DOMAIN, ATTR_DC, ATTR_PUPPET_CLASS, ATTR_PUPPET_VAR,
};
use labmon_core::sources::ignore::IgnoreList;
use labmon_core::sources::mapping::ClassMapping;
use labmon_core::sync::SyncService;

/// Serves a fixed set of entries and flags when it has been dropped.
pub struct FakeDirectory {
    entries: Vec<DirectoryEntry>,
    fail: bool,
    closed: Rc<Cell<bool>>,
    pub seen: Rc<RefCell<Option<DirectoryQuery>>>,
}

impl FakeDirectory {
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        Self::with_failure(entries, false)
    }

    pub fn failing() -> Self {
        Self::with_failure(Vec::new(), true)
    }

    fn with_failure(entries: Vec<DirectoryEntry>, fail: bool) -> Self {
        Self {
            entries,
            fail,
            closed: Rc::new(Cell::new(false)),
            seen: Rc::new(RefCell::new(None)),
        }
    }

    pub fn closed_flag(&self) -> Rc<Cell<bool>> {
        self.closed.clone()
    }
}

impl Directory for FakeDirectory {
    fn search(&mut self, query: &DirectoryQuery) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        *self.seen.borrow_mut() = Some(query.clone());
        if self.fail {
            return Err(DirectoryError::Search {
                base_dn: query.base_dn.clone(),
                reason: "server went away".into(),
            });
        }
        Ok(self.entries.clone())
    }
}

impl Drop for FakeDirectory {
    fn drop(&mut self) {
        self.closed.set(true);
    }
}

/// Records every command line and answers from a script.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    pub calls: Rc<RefCell<Vec<String>>>,
    pub failing: Rc<RefCell<Vec<String>>>,
}

impl RecordingRunner {
    pub fn failing_on(command_line: &str) -> Self {
        let runner = Self::default();
        runner.failing.borrow_mut().push(command_line.to_string());
        runner
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command_line: &str) -> io::Result<bool> {
        self.calls.borrow_mut().push(command_line.to_string());
        Ok(!self.failing.borrow().iter().any(|c| c == command_line))
    }
}

pub fn instance(dc: &str, fqdn: &str, project: &str, name: &str, classes: &[&str], ip: &str) -> DirectoryEntry {
    DirectoryEntry::new(format!("dc={dc},ou=hosts,dc=wikimedia,dc=org"))
        .with_attr(ATTR_DC, [dc])
        .with_attr(ATTR_ASSOCIATED_DOMAIN, [fqdn])
        .with_attr(
            ATTR_PUPPET_VAR,
            [format!("instanceproject={project}"), format!("instancename={name}")],
        )
        .with_attr(ATTR_PUPPET_CLASS, classes.iter().copied())
        .with_attr(ATTR_A_RECORD, [ip])
}

pub fn mapping() -> ClassMapping {
    let mut mapping = ClassMapping::new();
    mapping.insert("base", "ssh", "SSH servers");
    mapping.insert("webserver::apache2", "http", "HTTP servers");
    mapping
}

pub fn config(output_dir: &Path, debug: bool) -> Config {
    Config {
        output_dir: output_dir.to_path_buf(),
        debug,
        validate_command: "icinga -v test.cfg".into(),
        reload_command: "service icinga reload".into(),
        ..Config::default()
    }
}

pub fn service(output_dir: &Path, debug: bool, ignore: IgnoreList, runner: RecordingRunner) -> SyncService {
    SyncService::new(config(output_dir, debug), mapping(), ignore, Box::new(runner)).unwrap()
}
