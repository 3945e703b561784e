//! # Config Emitter
//!
//! Renders the inventory into monitoring-daemon object files, one per host
//! and one per populated group. File names follow a fixed scheme so the
//! cleanup stage can recognise what it generated on earlier runs.

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use labmon_common::inventory::{GroupDescriptor, HostDescriptor};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

use crate::builder::Inventory;

pub const HOST_FILE_PREFIX: &str = "instance-";
pub const GROUP_FILE_PREFIX: &str = "group-";
pub const CONFIG_SUFFIX: &str = ".cfg";

const HOST_TEMPLATE: &str = "host";
const GROUP_TEMPLATE: &str = "group";
const DEFAULT_HOST_TEMPLATE: &str = include_str!("../templates/host.cfg.hbs");
const DEFAULT_GROUP_TEMPLATE: &str = include_str!("../templates/group.cfg.hbs");

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("invalid template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),
    #[error("could not render {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Names of the files written by one [`ConfigEmitter::emit`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub host_files: Vec<String>,
    pub group_files: Vec<String>,
}

impl EmitReport {
    pub fn written(&self) -> usize {
        self.host_files.len() + self.group_files.len()
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.host_files.iter().chain(&self.group_files).any(|f| f == file_name)
    }
}

pub struct ConfigEmitter {
    output_dir: PathBuf,
    templates: Handlebars<'static>,
}

impl ConfigEmitter {
    /// Uses the embedded templates unless `template_dir` provides
    /// `host.cfg.hbs` or `group.cfg.hbs`.
    pub fn new(output_dir: &Path, template_dir: Option<&Path>) -> Result<Self, EmitError> {
        let mut templates = Handlebars::new();
        templates.register_escape_fn(handlebars::no_escape);

        for (name, default) in [(HOST_TEMPLATE, DEFAULT_HOST_TEMPLATE), (GROUP_TEMPLATE, DEFAULT_GROUP_TEMPLATE)] {
            let custom = template_dir
                .map(|dir| dir.join(format!("{name}.cfg.hbs")))
                .filter(|path| path.is_file());
            match custom {
                Some(path) => {
                    debug!("Using {} for {name} configs", path.display());
                    templates.register_template_file(name, &path).map_err(Box::new)?;
                }
                None => templates.register_template_string(name, default).map_err(Box::new)?,
            }
        }

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            templates,
        })
    }

    pub fn render_host(&self, host: &HostDescriptor) -> Result<String, EmitError> {
        let mut snippets: Vec<String> = Vec::with_capacity(host.templates.len());
        for template in &host.templates {
            let source = fs::read_to_string(&template.path).map_err(|source| EmitError::Io {
                path: template.path.clone(),
                source,
            })?;
            let rendered = self
                .templates
                .render_template(&source, &json!({ "host": host }))
                .map_err(|source| EmitError::Render {
                    name: template.path.display().to_string(),
                    source: Box::new(source),
                })?;
            snippets.push(rendered.trim_end().to_string());
        }

        let context = json!({
            "host": host,
            "hostgroups": host.groups.join(","),
            "snippets": snippets,
        });
        self.render(HOST_TEMPLATE, &context)
    }

    pub fn render_group(&self, group: &GroupDescriptor) -> Result<String, EmitError> {
        let context = json!({
            "group": group,
            "members": group.unique_members().join(","),
        });
        self.render(GROUP_TEMPLATE, &context)
    }

    /// Writes every host file and every populated group file.
    pub fn emit(&self, inventory: &Inventory) -> Result<EmitReport, EmitError> {
        let mut report = EmitReport::default();

        for group in inventory.groups.populated() {
            let file_name = group_file_name(&group.name);
            debug!("Writing out group {} to {file_name}", group.name);
            self.write(&file_name, &self.render_group(group)?)?;
            report.group_files.push(file_name);
        }

        for host in inventory.hosts.values() {
            let file_name = host_file_name(&host.fqdn);
            debug!("Writing out host {} to {file_name}", host.fqdn);
            self.write(&file_name, &self.render_host(host)?)?;
            report.host_files.push(file_name);
        }

        info!(
            "Wrote {} host and {} group configs to {}",
            report.host_files.len(),
            report.group_files.len(),
            self.output_dir.display()
        );
        Ok(report)
    }

    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, EmitError> {
        self.templates
            .render(name, context)
            .map_err(|source| EmitError::Render {
                name: name.to_string(),
                source: Box::new(source),
            })
    }

    fn write(&self, file_name: &str, content: &str) -> Result<(), EmitError> {
        let path = self.output_dir.join(file_name);
        fs::write(&path, content).map_err(|source| EmitError::Io { path, source })
    }
}

pub fn host_file_name(fqdn: &str) -> String {
    format!("{HOST_FILE_PREFIX}{}{CONFIG_SUFFIX}", sanitize(fqdn))
}

pub fn group_file_name(group: &str) -> String {
    format!("{GROUP_FILE_PREFIX}{}{CONFIG_SUFFIX}", sanitize(group))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
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
