//! # LDAP Directory Adapter
//!
//! Connection details come from an `ldap.conf`-style file:
//!
//! ```text
//! uri ldap://ldap.example.org
//! binddn cn=proxyagent,ou=profile,dc=wikimedia,dc=org
//! bindpw secret
//! base dc=wikimedia,dc=org
//! ```
//!
//! The session is opened with StartTLS and a simple bind. It is unbound when
//! the [`LdapDirectory`] is dropped, whichever way the run ends.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use labmon_common::directory::{Directory, DirectoryEntry, DirectoryError, DirectoryQuery};
use ldap3::{LdapConn, LdapConnSettings, Scope, SearchEntry};
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdapSettings {
    pub uri: String,
    pub bind_dn: String,
    pub bind_password: String,
    pub base_dn: Option<String>,
}

impl LdapSettings {
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let text = fs::read_to_string(path)
            .map_err(|e| DirectoryError::Config(format!("could not read {}: {e}", path.display())))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, DirectoryError> {
        let values: BTreeMap<&str, &str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once(' '))
            .map(|(key, value)| (key.trim(), value.trim()))
            .collect();

        let Some(uri) = values.get("uri") else {
            return Err(DirectoryError::Config("could not get URI from ldap config".into()));
        };
        let (Some(bind_dn), Some(bind_password)) = (values.get("binddn"), values.get("bindpw")) else {
            return Err(DirectoryError::Config("could not get bind details from ldap config".into()));
        };

        Ok(Self {
            uri: uri.to_string(),
            bind_dn: bind_dn.to_string(),
            bind_password: bind_password.to_string(),
            base_dn: values.get("base").map(|b| b.to_string()),
        })
    }
}

pub struct LdapDirectory {
    conn: Option<LdapConn>,
    uri: String,
}

impl LdapDirectory {
    pub fn connect(settings: &LdapSettings) -> Result<Self, DirectoryError> {
        let conn_settings = LdapConnSettings::new().set_starttls(true);
        let mut conn = LdapConn::with_settings(conn_settings, &settings.uri).map_err(|e| {
            DirectoryError::Connect {
                uri: settings.uri.clone(),
                reason: e.to_string(),
            }
        })?;

        if let Err(e) = conn
            .simple_bind(&settings.bind_dn, &settings.bind_password)
            .and_then(|res| res.success())
        {
            let _ = conn.unbind();
            return Err(DirectoryError::Bind {
                bind_dn: settings.bind_dn.clone(),
                reason: e.to_string(),
            });
        }

        debug!("Connected to {}", settings.uri);
        Ok(Self {
            conn: Some(conn),
            uri: settings.uri.clone(),
        })
    }

    fn release(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            match conn.unbind() {
                Ok(()) => debug!("Disconnected from {}", self.uri),
                Err(e) => error!("Could not cleanly disconnect from {}: {e}", self.uri),
            }
        }
    }
}

impl Directory for LdapDirectory {
    fn search(&mut self, query: &DirectoryQuery) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let search_error = |reason: String| DirectoryError::Search {
            base_dn: query.base_dn.clone(),
            reason,
        };
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| search_error("connection already closed".into()))?;

        debug!("Searching {} for {}", query.base_dn, query.filter);
        let (entries, _) = conn
            .search(&query.base_dn, Scope::Subtree, &query.filter, &query.attributes)
            .and_then(|res| res.success())
            .map_err(|e| search_error(e.to_string()))?;

        Ok(entries
            .into_iter()
            .map(SearchEntry::construct)
            .map(|entry| DirectoryEntry {
                dn: entry.dn,
                attributes: entry.attrs.into_iter().collect(),
            })
            .collect())
    }
}

impl Drop for LdapDirectory {
    fn drop(&mut self) {
        self.release();
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
