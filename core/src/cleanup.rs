//! Removal of configs for hosts and groups that no longer exist.
//!
//! Only files matching the generated naming scheme are candidates. Everything
//! else in the output directory, including the preserved allow-list, is left alone.

use std::fs;
use std::path::Path;

use labmon_common::config::Config;
use tracing::info;

use crate::emitter::{CONFIG_SUFFIX, EmitReport, GROUP_FILE_PREFIX, HOST_FILE_PREFIX};

pub fn is_generated(file_name: &str) -> bool {
    (file_name.starts_with(HOST_FILE_PREFIX) || file_name.starts_with(GROUP_FILE_PREFIX))
        && file_name.ends_with(CONFIG_SUFFIX)
}

/// Files in `existing` that should be deleted, in the order given.
///
/// Anything on the configured allow-list survives.
pub fn plan_cleanup(existing: &[String], current: &EmitReport, config: &Config) -> Vec<String> {
    existing
        .iter()
        .filter(|name| !config.is_preserved(name))
        .filter(|name| is_generated(name))
        .filter(|name| !current.contains(name))
        .cloned()
        .collect()
}

/// Plain file names in `dir`, sorted.
pub fn existing_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Deletes every planned file and returns the names removed.
pub fn prune(dir: &Path, plan: &[String]) -> std::io::Result<Vec<String>> {
    let mut removed: Vec<String> = Vec::with_capacity(plan.len());
    for name in plan {
        let path = dir.join(name);
        info!("Removing {}", path.display());
        fs::remove_file(&path)?;
        removed.push(name.clone());
    }
    Ok(removed)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
