use thiserror::Error;

use crate::directory::DirectoryEntry;

pub const ATTR_DC: &str = "dc";
pub const ATTR_PUPPET_VAR: &str = "puppetVar";
pub const ATTR_PUPPET_CLASS: &str = "puppetClass";
pub const ATTR_A_RECORD: &str = "aRecord";
pub const ATTR_ASSOCIATED_DOMAIN: &str = "associatedDomain";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("{dn} has no dc value")]
    MissingDc { dn: String },
}

/// A directory object describing (possibly) a VM instance.
///
/// Only `dc` is required. Every other attribute is optional and shows up as
/// an empty list when the directory did not return it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub dn: String,
    /// First `dc` value. Unique, used as the inventory key.
    pub dc: String,
    /// Ordered `key=value` declarations.
    pub puppet_vars: Vec<String>,
    pub puppet_classes: Vec<String>,
    pub a_records: Vec<String>,
    pub associated_domains: Vec<String>,
}

impl RawRecord {
    pub fn new(dc: impl Into<String>) -> Self {
        let dc = dc.into();
        Self {
            dn: format!("dc={dc}"),
            dc,
            ..Default::default()
        }
    }

    /// Addresses with something other than whitespace in them.
    ///
    /// Instances that are still building carry empty `aRecord` values.
    pub fn usable_addresses(&self) -> impl Iterator<Item = &str> {
        self.a_records
            .iter()
            .map(String::as_str)
            .filter(|ip| !ip.trim().is_empty())
    }
}

impl TryFrom<&DirectoryEntry> for RawRecord {
    type Error = RecordError;

    fn try_from(entry: &DirectoryEntry) -> Result<Self, Self::Error> {
        let dc = entry
            .values(ATTR_DC)
            .first()
            .cloned()
            .ok_or_else(|| RecordError::MissingDc { dn: entry.dn.clone() })?;

        Ok(Self {
            dn: entry.dn.clone(),
            dc,
            puppet_vars: entry.values(ATTR_PUPPET_VAR).to_vec(),
            puppet_classes: entry.values(ATTR_PUPPET_CLASS).to_vec(),
            a_records: entry.values(ATTR_A_RECORD).to_vec(),
            associated_domains: entry.values(ATTR_ASSOCIATED_DOMAIN).to_vec(),
        })
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
