//! Works out which groups a host belongs to.
//!
//! Two rules apply, in this order:
//! 1. **Project**: a host with an `instanceproject` variable joins that project's
//!    group, which is created on first sight.
//! 2. **Class**: a host joins every class-driven group whose triggering classes
//!    intersect the host's classes. Groups are visited in name order.

use labmon_common::inventory::{RawRecord, VariableMap};
use tracing::debug;

use crate::registry::GroupRegistry;

/// Returns the host's groups without repeats, project group first.
///
/// The project value is trimmed. A project that is empty or only whitespace
/// yields no project group, even though the variable is present.
///
/// Creating the project group is the only mutation made to `registry`;
/// membership is recorded by the caller.
pub fn classify(record: &RawRecord, vars: &VariableMap, registry: &mut GroupRegistry) -> Vec<String> {
    debug!("Processing host groups for {}", record.dc);
    let mut groups: Vec<String> = Vec::new();

    match vars.project().map(str::trim) {
        Some(project) if !project.is_empty() => {
            if registry.ensure_project(project) {
                debug!("Created project group {project}");
            }
            debug!("Added group {project} for {}", record.dc);
            groups.push(project.to_string());
        }
        Some(_) => debug!("{} declares a blank project", record.dc),
        None => {}
    }

    for group in registry.class_driven() {
        if groups.contains(&group.name) {
            continue;
        }
        if group.matches_any(&record.puppet_classes) {
            debug!("Added group {} for {}", group.name, record.dc);
            groups.push(group.name.clone());
        }
    }

    groups
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
