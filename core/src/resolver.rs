//! # Host Resolution
//!
//! Decides whether a record is a monitorable instance and, if so, derives its
//! identity: FQDN, display name and primary address.

use std::sync::OnceLock;

use labmon_common::inventory::{HostDescriptor, RawRecord, VariableMap};
use regex::Regex;

/// Why a record did not produce a host. Routine filtering, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `instancename` variable.
    NotAnInstance,
    /// Every `aRecord` value is blank, usually because the instance is still building.
    NoAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Host(HostDescriptor),
    Skip(SkipReason),
}

static UNIT_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// `None` only if the pattern fails to compile; display names then fall back to the bare name.
fn unit_pattern() -> Option<&'static Regex> {
    UNIT_PATTERN
        .get_or_init(|| Regex::new(r"^dc=([^,]+),dc=.+").ok())
        .as_ref()
}

/// Builds the host descriptor for `record`.
///
/// The returned host has no groups or templates yet; the builder attaches those.
pub fn resolve(record: &RawRecord, vars: &VariableMap) -> Resolution {
    let Some(name) = vars.instance_name() else {
        return Resolution::Skip(SkipReason::NotAnInstance);
    };
    let Some(address) = record.usable_addresses().next() else {
        return Resolution::Skip(SkipReason::NoAddress);
    };

    Resolution::Host(HostDescriptor {
        id: record.dc.clone(),
        fqdn: resolve_fqdn(record),
        name: name.to_string(),
        display_name: display_name(&record.dc, name),
        address: address.trim().to_string(),
        variables: vars.clone(),
        classes: record.puppet_classes.clone(),
        groups: Vec::new(),
        templates: Vec::new(),
    })
}

/// The first associated domain starting with the `dc` value, else the `dc` value itself.
pub fn resolve_fqdn(record: &RawRecord) -> String {
    record
        .associated_domains
        .iter()
        .find(|domain| domain.starts_with(&record.dc))
        .unwrap_or(&record.dc)
        .clone()
}

pub fn display_name(dc: &str, instance_name: &str) -> String {
    match unit_pattern()
        .and_then(|pattern| pattern.captures(dc))
        .and_then(|c| c.get(1))
    {
        Some(unit) if !unit.as_str().is_empty() => format!("{}-{instance_name}", unit.as_str()),
        _ => instance_name.to_string(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
