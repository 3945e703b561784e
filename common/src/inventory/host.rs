use std::path::PathBuf;

use serde::Serialize;

use crate::inventory::variables::VariableMap;

/// A per-class monitoring snippet that applies to a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateRef {
    pub class: String,
    pub path: PathBuf,
}

/// A monitored instance.
///
/// Built once per qualifying record and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostDescriptor {
    /// The record's `dc` value.
    pub id: String,
    pub fqdn: String,
    /// The `instancename` variable.
    pub name: String,
    /// `name`, prefixed with the organisational unit when the `dc` carries one.
    pub display_name: String,
    pub address: String,
    pub variables: VariableMap,
    pub classes: Vec<String>,
    pub groups: Vec<String>,
    pub templates: Vec<TemplateRef>,
}
