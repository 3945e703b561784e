//! Class-to-group mapping.
//!
//! The file is sectioned, one section per class:
//!
//! ```text
//! [webserver::apache2]
//! short = http
//! desc = HTTP servers
//! ```
//!
//! Several classes may name the same `short` group; the group is then
//! triggered by any of them and keeps the first description seen.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::SourceError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedGroup {
    pub description: String,
    pub classes: Vec<String>,
}

/// Group name to its description and triggering classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMapping {
    groups: BTreeMap<String, MappedGroup>,
}

impl ClassMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: &str, group: &str, description: &str) {
        let mapped = self
            .groups
            .entry(group.to_string())
            .or_insert_with(|| MappedGroup {
                description: description.to_string(),
                classes: Vec::new(),
            });
        if !mapped.classes.iter().any(|c| c == class) {
            mapped.classes.push(class.to_string());
        }
    }

    pub fn get(&self, group: &str) -> Option<&MappedGroup> {
        self.groups.get(group)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappedGroup)> {
        self.groups.iter().map(|(name, mapped)| (name.as_str(), mapped))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub fn load(path: &Path) -> Result<ClassMapping, SourceError> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mapping = parse(&text);
    debug!("Loaded {} class-driven groups from {}", mapping.len(), path.display());
    Ok(mapping)
}

pub fn parse(text: &str) -> ClassMapping {
    let mut mapping = ClassMapping::new();
    for (class, keys) in sections(text) {
        let Some(short) = keys.get("short").filter(|s| !s.is_empty()) else {
            warn!("Class {class} has no short group name, skipping");
            continue;
        };
        let description = match keys.get("desc") {
            Some(desc) => desc.as_str(),
            None => {
                warn!("Class {class} has no group description");
                short.as_str()
            }
        };
        mapping.insert(&class, short, description);
    }
    mapping
}

/// Sections in file order. Repeated sections merge, later keys win.
fn sections(text: &str) -> Vec<(String, BTreeMap<String, String>)> {
    let mut sections: Vec<(String, BTreeMap<String, String>)> = Vec::new();
    let mut current: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            current = match sections.iter().position(|(n, _)| *n == name) {
                Some(pos) => Some(pos),
                None => {
                    sections.push((name, BTreeMap::new()));
                    Some(sections.len() - 1)
                }
            };
            continue;
        }

        let Some((key, value)) = split_pair(line) else {
            warn!("Line {}: {line:?} is not a key/value pair", idx + 1);
            continue;
        };
        match current {
            Some(pos) => {
                sections[pos].1.insert(key.to_string(), value.to_string());
            }
            None => warn!("Line {}: {key} appears before any section", idx + 1),
        }
    }

    sections
}

fn split_pair(line: &str) -> Option<(&str, &str)> {
    let at = line.find(['=', ':'])?;
    let (key, value) = (line[..at].trim(), line[at + 1..].trim());
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
