//! # Directory Port
//!
//! The contract for reading instance metadata out of a directory service.
//!
//! The core never talks to a directory directly. It receives [`DirectoryEntry`]
//! values from whatever implements [`Directory`], which keeps the inventory
//! derivation testable against in-memory fixtures.

use std::collections::BTreeMap;

use thiserror::Error;

/// What to ask the directory for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub base_dn: String,
    pub filter: String,
    pub attributes: Vec<String>,
}

/// One object returned by a directory search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub dn: String,
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style helper, mostly for fixtures.
    pub fn with_attr<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .insert(name.to_string(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn values(&self, name: &str) -> &[String] {
        self.attributes.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Connection details are missing or unreadable.
    #[error("directory configuration: {0}")]
    Config(String),
    #[error("could not connect to {uri}: {reason}")]
    Connect { uri: String, reason: String },
    #[error("could not bind as {bind_dn}: {reason}")]
    Bind { bind_dn: String, reason: String },
    #[error("search under {base_dn} failed: {reason}")]
    Search { base_dn: String, reason: String },
}

/// A live directory session.
///
/// Implementations own their connection and release it when dropped.
pub trait Directory {
    fn search(&mut self, query: &DirectoryQuery) -> Result<Vec<DirectoryEntry>, DirectoryError>;
}
