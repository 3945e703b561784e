pub mod sync;

use std::path::PathBuf;

use clap::Parser;
use labmon_common::config::Config;

#[derive(Parser)]
#[command(name = "labmon")]
#[command(about = "Rebuilds monitoring config from the instance directory.")]
pub struct CommandLine {
    /// Debug logging. Configs are written but the daemon is not reloaded
    #[arg(short, long)]
    pub debug: bool,
    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
    /// Where to write generated configs
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
    /// File of FQDNs that are never monitored
    #[arg(long, value_name = "FILE")]
    pub ignore_list: Option<PathBuf>,
    /// Class-to-group mapping file
    #[arg(long, value_name = "FILE")]
    pub class_mapping: Option<PathBuf>,
    /// ldap.conf-style file with the directory URI and credentials
    #[arg(long, value_name = "FILE")]
    pub ldap_config: Option<PathBuf>,
    /// Override root for host/group templates and per-class snippets
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn is_verbose(&self) -> bool {
        self.debug || self.verbose
    }

    pub fn to_config(&self) -> Config {
        let mut cfg = Config {
            debug: self.debug,
            template_dir: self.template_dir.clone(),
            ..Config::default()
        };
        if let Some(dir) = &self.config_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(path) = &self.ignore_list {
            cfg.ignore_list = path.clone();
        }
        if let Some(path) = &self.class_mapping {
            cfg.class_mapping = path.clone();
        }
        if let Some(path) = &self.ldap_config {
            cfg.ldap_config = path.clone();
        }
        cfg
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
