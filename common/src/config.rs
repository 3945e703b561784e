use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "/etc/icinga/objects/labs";
pub const DEFAULT_IGNORE_LIST: &str = "/etc/labmon/ignored-fqdns.conf";
pub const DEFAULT_CLASS_MAPPING: &str = "/etc/labmon/puppet-classes.conf";
pub const DEFAULT_LDAP_CONFIG: &str = "/etc/ldap.conf";

pub const DEFAULT_BASE_DN: &str = "dc=wikimedia,dc=org";
pub const DEFAULT_FILTER: &str = "(objectClass=dcobject)";
pub const INSTANCE_ATTRIBUTES: [&str; 5] =
    ["puppetVar", "puppetClass", "dc", "aRecord", "associatedDomain"];

pub const DEFAULT_VALIDATE_COMMAND: &str = "icinga -v /etc/icinga/icinga.cfg";
pub const DEFAULT_RELOAD_COMMAND: &str = "service icinga reload";

/// Files in the output directory that were not generated by us and must survive cleanup.
pub const DEFAULT_PRESERVED_FILES: [&str; 5] = [
    "localhost_icinga",
    "generic_host_icinga.cfg",
    "generic_service_icinga.cfg",
    "timeperiods_icinga.cfg",
    "contacts_icinga.cfg",
];

#[derive(Debug, Clone)]
pub struct Config {
    /// Where generated host and group files are written.
    pub output_dir: PathBuf,
    /// Newline-delimited FQDNs that are never monitored.
    pub ignore_list: PathBuf,
    /// Sectioned class-to-group mapping used to seed the group registry.
    pub class_mapping: PathBuf,
    /// `ldap.conf`-style file holding the directory URI and bind credentials.
    pub ldap_config: PathBuf,
    /// Optional override root for `host.cfg.hbs`, `group.cfg.hbs` and `classes/`.
    pub template_dir: Option<PathBuf>,
    pub base_dn: String,
    pub filter: String,
    pub validate_command: String,
    pub reload_command: String,
    pub preserved_files: Vec<String>,
    /// Debug runs write configs but never reload the monitoring daemon.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ignore_list: PathBuf::from(DEFAULT_IGNORE_LIST),
            class_mapping: PathBuf::from(DEFAULT_CLASS_MAPPING),
            ldap_config: PathBuf::from(DEFAULT_LDAP_CONFIG),
            template_dir: None,
            base_dn: DEFAULT_BASE_DN.to_string(),
            filter: DEFAULT_FILTER.to_string(),
            validate_command: DEFAULT_VALIDATE_COMMAND.to_string(),
            reload_command: DEFAULT_RELOAD_COMMAND.to_string(),
            preserved_files: DEFAULT_PRESERVED_FILES.iter().map(|s| s.to_string()).collect(),
            debug: false,
        }
    }
}

impl Config {
    pub fn is_preserved(&self, file_name: &str) -> bool {
        self.preserved_files.iter().any(|f| f == file_name)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_preserves_localhost_definition() {
        let cfg = Config::default();
        assert!(cfg.is_preserved("localhost_icinga"));
        assert!(!cfg.is_preserved("instance-i-000003d1.cfg"));
        assert!(!cfg.debug);
    }
}
