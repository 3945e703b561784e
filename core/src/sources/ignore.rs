//! FQDNs that must never be monitored.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::SourceError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList(BTreeSet<String>);

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, fqdn: &str) -> bool {
        self.0.contains(fqdn)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

pub fn load(path: &Path) -> Result<IgnoreList, SourceError> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let list = parse(&text);
    debug!("Loaded {} ignored hosts from {}", list.len(), path.display());
    Ok(list)
}

/// One FQDN per line. Blank lines and lines starting with `#` or `;` are skipped.
pub fn parse(text: &str) -> IgnoreList {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with(';'))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
