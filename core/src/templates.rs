//! # Monitoring-Class Templates
//!
//! Per-class snippets live under a trusted root, one file per class. Class
//! `role::lucene::front-end` maps to `<root>/role/lucene/front-end.cfg.hbs`.
//!
//! Class names come from the directory, so every lookup is checked: the
//! canonical path of the snippet must stay inside the canonical root.

use std::path::{Path, PathBuf};

use labmon_common::inventory::TemplateRef;
use thiserror::Error;
use tracing::{debug, warn};

pub const SNIPPET_EXTENSION: &str = "cfg.hbs";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template for class {class} resolves outside the template root ({})", path.display())]
    OutsideRoot { class: String, path: PathBuf },
    #[error("could not resolve {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    root: PathBuf,
}

impl TemplateCatalog {
    pub fn open(root: &Path) -> Result<Self, TemplateError> {
        let root = root.canonicalize().map_err(|source| TemplateError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The snippet for `class`, if one exists inside the root.
    pub fn lookup(&self, class: &str) -> Result<Option<TemplateRef>, TemplateError> {
        let candidate = self.root.join(relative_path(class));
        if !candidate.exists() {
            return Ok(None);
        }

        let path = candidate.canonicalize().map_err(|source| TemplateError::Io {
            path: candidate.clone(),
            source,
        })?;
        if !path.starts_with(&self.root) || !path.is_file() {
            return Err(TemplateError::OutsideRoot {
                class: class.to_string(),
                path,
            });
        }

        Ok(Some(TemplateRef {
            class: class.to_string(),
            path,
        }))
    }

    /// Snippets for every class that has one, in class order. Rejected lookups are logged and dropped.
    pub fn templates_for(&self, classes: &[String]) -> Vec<TemplateRef> {
        classes
            .iter()
            .filter_map(|class| match self.lookup(class) {
                Ok(found) => found,
                Err(e) => {
                    warn!("{e}");
                    None
                }
            })
            .inspect(|t| debug!("Matched template {} for class {}", t.path.display(), t.class))
            .collect()
    }
}

fn relative_path(class: &str) -> PathBuf {
    let mut path: PathBuf = class.split("::").collect();
    let file_name = format!(
        "{}.{SNIPPET_EXTENSION}",
        path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
    );
    path.set_file_name(file_name);
    path
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
