//! # Sync Service
//!
//! Implements the single use case of the tool: bring the monitoring config in
//! line with the directory.
//!
//! 1. **Query**: fetch every instance record, then release the directory session.
//! 2. **Build**: derive hosts and groups.
//! 3. **Emit**: write host and group configs.
//! 4. **Clean**: remove configs for hosts and groups that are gone.
//! 5. **Reload**: validate and reload the daemon, unless running in debug mode.

use std::fs;
use std::path::Path;

use labmon_common::command::CommandRunner;
use labmon_common::config::{Config, INSTANCE_ATTRIBUTES};
use labmon_common::directory::{Directory, DirectoryEntry, DirectoryError, DirectoryQuery};
use thiserror::Error;
use tracing::{debug, info};

use crate::builder::{Inventory, InventoryBuilder};
use crate::cleanup;
use crate::emitter::{ConfigEmitter, EmitError, EmitReport};
use crate::reload::{self, ReloadOutcome};
use crate::sources::ignore::{self, IgnoreList};
use crate::sources::mapping::{self, ClassMapping};
use crate::sources::SourceError;
use crate::templates::{TemplateCatalog, TemplateError};

pub const CLASS_TEMPLATE_DIR: &str = "classes";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("could not clean {}: {source}", dir.display())]
    Cleanup {
        dir: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Reloaded,
    ValidationFailed,
    ReloadFailed,
    SkippedDebug,
}

impl From<ReloadOutcome> for SyncOutcome {
    fn from(outcome: ReloadOutcome) -> Self {
        match outcome {
            ReloadOutcome::Reloaded => Self::Reloaded,
            ReloadOutcome::ValidationFailed => Self::ValidationFailed,
            ReloadOutcome::ReloadFailed => Self::ReloadFailed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub inventory: Inventory,
    pub written: EmitReport,
    pub removed: Vec<String>,
    pub outcome: SyncOutcome,
}

pub struct SyncService {
    config: Config,
    mapping: ClassMapping,
    ignore: IgnoreList,
    catalog: Option<TemplateCatalog>,
    emitter: ConfigEmitter,
    runner: Box<dyn CommandRunner>,
}

impl SyncService {
    pub fn new(
        config: Config,
        mapping: ClassMapping,
        ignore: IgnoreList,
        runner: Box<dyn CommandRunner>,
    ) -> Result<Self, SyncError> {
        let template_dir = config.template_dir.as_deref();
        let emitter = ConfigEmitter::new(&config.output_dir, template_dir)?;
        let catalog = match template_dir.map(|dir| dir.join(CLASS_TEMPLATE_DIR)) {
            Some(root) if root.is_dir() => Some(TemplateCatalog::open(&root)?),
            _ => None,
        };

        Ok(Self {
            config,
            mapping,
            ignore,
            catalog,
            emitter,
            runner,
        })
    }

    /// Loads the class mapping and ignore list named in `config`.
    pub fn from_config(config: Config, runner: Box<dyn CommandRunner>) -> Result<Self, SyncError> {
        let mapping = mapping::load(&config.class_mapping)?;
        let ignore = ignore::load(&config.ignore_list)?;
        Self::new(config, mapping, ignore, runner)
    }

    pub fn query(&self) -> DirectoryQuery {
        DirectoryQuery {
            base_dn: self.config.base_dn.clone(),
            filter: self.config.filter.clone(),
            attributes: INSTANCE_ATTRIBUTES.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Searches `directory` and drops it, closing the session, before returning.
    pub fn fetch<D: Directory>(&self, mut directory: D) -> Result<Vec<DirectoryEntry>, SyncError> {
        let entries = directory.search(&self.query())?;
        drop(directory);
        debug!("Directory returned {} entries", entries.len());
        Ok(entries)
    }

    pub fn build(&self, entries: &[DirectoryEntry]) -> Inventory {
        let builder = InventoryBuilder::new(&self.ignore, &self.mapping);
        match &self.catalog {
            Some(catalog) => builder.with_templates(catalog).build(entries),
            None => builder.build(entries),
        }
    }

    pub fn run<D: Directory>(&self, directory: D) -> Result<SyncReport, SyncError> {
        let entries = self.fetch(directory)?;
        self.apply(&entries)
    }

    /// Everything after the query: build, emit, clean and reload.
    pub fn apply(&self, entries: &[DirectoryEntry]) -> Result<SyncReport, SyncError> {
        let inventory = self.build(entries);

        let written = self.emitter.emit(&inventory)?;
        let removed = self.clean(&written)?;

        let outcome = if self.config.debug {
            debug!("Skipping reload due to debug mode");
            SyncOutcome::SkippedDebug
        } else {
            reload::reload(
                self.runner.as_ref(),
                &self.config.validate_command,
                &self.config.reload_command,
            )
            .into()
        };

        Ok(SyncReport {
            inventory,
            written,
            removed,
            outcome,
        })
    }

    fn clean(&self, written: &EmitReport) -> Result<Vec<String>, SyncError> {
        let dir = &self.config.output_dir;
        let io_error = |source| SyncError::Cleanup {
            dir: dir.clone(),
            source,
        };
        let existing = cleanup::existing_files(dir).map_err(io_error)?;
        let plan = cleanup::plan_cleanup(&existing, written, &self.config);
        let removed = cleanup::prune(dir, &plan).map_err(io_error)?;
        if !removed.is_empty() {
            info!("Removed {} stale configs", removed.len());
        }
        Ok(removed)
    }
}

/// Creates the output directory if needed.
pub fn prepare_output_dir(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)
}
