//! # Inventory Builder
//!
//! Runs every directory entry through normalisation, resolution and
//! classification, producing the hosts and groups for one pass.
//!
//! Nothing a single record does can abort the pass: malformed records,
//! non-instances, address-less instances and ignored hosts are counted,
//! logged and dropped. A `dc` seen twice keeps its first host; the later
//! record never reaches classification.

use std::collections::BTreeMap;

use labmon_common::directory::DirectoryEntry;
use labmon_common::inventory::{HostDescriptor, RawRecord};
use tracing::{debug, error, info, warn};

use crate::classifier::classify;
use crate::normalizer::normalize;
use crate::registry::GroupRegistry;
use crate::resolver::{Resolution, SkipReason, resolve};
use crate::sources::ignore::IgnoreList;
use crate::sources::mapping::ClassMapping;
use crate::templates::TemplateCatalog;

/// Counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub records: usize,
    pub hosts: usize,
    pub not_instance: usize,
    pub no_address: usize,
    pub ignored: usize,
    pub malformed: usize,
    /// Later records whose `dc` was already taken. The first record wins.
    pub duplicates: usize,
}

/// Result of a pass. Hosts are keyed by their `dc` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub hosts: BTreeMap<String, HostDescriptor>,
    pub groups: GroupRegistry,
    pub stats: BuildStats,
}

pub struct InventoryBuilder<'a> {
    ignore: &'a IgnoreList,
    mapping: &'a ClassMapping,
    templates: Option<&'a TemplateCatalog>,
}

impl<'a> InventoryBuilder<'a> {
    pub fn new(ignore: &'a IgnoreList, mapping: &'a ClassMapping) -> Self {
        Self {
            ignore,
            mapping,
            templates: None,
        }
    }

    /// Attach per-class monitoring templates to every host.
    pub fn with_templates(mut self, catalog: &'a TemplateCatalog) -> Self {
        self.templates = Some(catalog);
        self
    }

    /// Builds a fresh inventory. The registry is seeded anew on every call.
    pub fn build(&self, entries: &[DirectoryEntry]) -> Inventory {
        let mut hosts: BTreeMap<String, HostDescriptor> = BTreeMap::new();
        let mut groups = GroupRegistry::seeded(self.mapping);
        let mut stats = BuildStats::default();

        if entries.is_empty() {
            error!("Could not get the list of hosts from the directory");
        }

        for entry in entries {
            stats.records += 1;
            debug!("Processing info for {}", entry.dn);

            let record = match RawRecord::try_from(entry) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping record: {e}");
                    stats.malformed += 1;
                    continue;
                }
            };

            if let Some(first) = hosts.get(&record.dc) {
                warn!("{} appeared twice, keeping {}", record.dc, first.fqdn);
                stats.duplicates += 1;
                continue;
            }

            if let Some(host) = self.process(&record, &mut groups, &mut stats) {
                hosts.insert(record.dc.clone(), host);
            }
        }

        stats.hosts = hosts.len();
        info!(
            "Found {} hosts in {} groups from {} directory records",
            hosts.len(),
            groups.len(),
            stats.records
        );

        Inventory { hosts, groups, stats }
    }

    fn process(&self, record: &RawRecord, groups: &mut GroupRegistry, stats: &mut BuildStats) -> Option<HostDescriptor> {
        let vars = match normalize(record) {
            Ok(vars) => vars,
            Err(e) => {
                warn!("Skipping {}: {e}", record.dn);
                stats.malformed += 1;
                return None;
            }
        };

        let mut host = match resolve(record, &vars) {
            Resolution::Host(host) => host,
            Resolution::Skip(SkipReason::NotAnInstance) => {
                debug!("Skipping {}, not an instance", record.dn);
                stats.not_instance += 1;
                return None;
            }
            Resolution::Skip(SkipReason::NoAddress) => {
                debug!("Skipping {}, no ips", record.dn);
                stats.no_address += 1;
                return None;
            }
        };

        if self.ignore.contains(&host.fqdn) {
            info!("Ignoring {}, listed in the ignore list", host.fqdn);
            stats.ignored += 1;
            return None;
        }

        let host_groups = classify(record, &vars, groups);
        for group in &host_groups {
            debug!("Adding group {group} for {}", record.dn);
            if let Err(e) = groups.add_member(group, &host.fqdn) {
                warn!("{e}");
            }
        }
        host.groups = host_groups;

        if let Some(catalog) = self.templates {
            host.templates = catalog.templates_for(&host.classes);
        }

        Some(host)
    }
}

/// Convenience wrapper for a pass without class templates.
pub fn build(entries: &[DirectoryEntry], ignore: &IgnoreList, mapping: &ClassMapping) -> Inventory {
    InventoryBuilder::new(ignore, mapping).build(entries)
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
    use labmon_common::inventory::record::{
        ATTR_A_RECORD, ATTR_ASSOCIATED_DOMAIN, ATTR_DC, ATTR_PUPPET_CLASS, ATTR_PUPPET_VAR,
    };
    use pretty_assertions::assert_eq;

    fn mapping() -> ClassMapping {
        let mut mapping = ClassMapping::new();
        mapping.insert("base", "ssh", "SSH servers");
        mapping.insert("webserver::apache2", "http", "HTTP servers");
        mapping
    }

    fn entry(dc: &str, vars: &[&str], classes: &[&str], ips: &[&str]) -> DirectoryEntry {
        DirectoryEntry::new(format!("dc={dc},ou=hosts,dc=wikimedia,dc=org"))
            .with_attr(ATTR_DC, [dc])
            .with_attr(ATTR_PUPPET_VAR, vars.iter().copied())
            .with_attr(ATTR_PUPPET_CLASS, classes.iter().copied())
            .with_attr(ATTR_A_RECORD, ips.iter().copied())
    }

    fn bots_cb_dev() -> DirectoryEntry {
        entry(
            "i-000003d1",
            &["instanceproject=bots", "instancename=bots-cb-dev"],
            &["base"],
            &["10.4.0.249"],
        )
    }

    #[test]
    fn build_single_instance() {
        let inventory = build(&[bots_cb_dev()], &IgnoreList::new(), &mapping());

        let host = &inventory.hosts["i-000003d1"];
        assert_eq!(host.fqdn, "i-000003d1");
        let mut groups = host.groups.clone();
        groups.sort();
        assert_eq!(groups, vec!["bots", "ssh"]);

        assert_eq!(inventory.groups.get("bots").unwrap().members, vec!["i-000003d1"]);
        assert_eq!(inventory.groups.get("ssh").unwrap().members, vec!["i-000003d1"]);
        assert!(inventory.groups.get("http").unwrap().members.is_empty());
        assert_eq!(inventory.stats.hosts, 1);
    }

    #[test]
    fn build_members_use_resolved_fqdn() {
        let entry = bots_cb_dev().with_attr(ATTR_ASSOCIATED_DOMAIN, ["i-000003d1.pmtpa.wmflabs"]);
        let inventory = build(&[entry], &IgnoreList::new(), &mapping());
        assert_eq!(
            inventory.groups.get("ssh").unwrap().members,
            vec!["i-000003d1.pmtpa.wmflabs"]
        );
    }

    #[test]
    fn build_counts_and_skips_non_instances() {
        let entries = vec![
            entry("i-1", &["instanceproject=bots"], &["base"], &["10.0.0.1"]),
            entry("i-2", &["instancename=building"], &["base"], &[""]),
            entry("i-3", &["oops"], &["base"], &["10.0.0.3"]),
            DirectoryEntry::new("ou=hosts,dc=wikimedia,dc=org"),
            bots_cb_dev(),
        ];
        let inventory = build(&entries, &IgnoreList::new(), &mapping());

        assert_eq!(inventory.hosts.keys().collect::<Vec<_>>(), vec!["i-000003d1"]);
        assert_eq!(
            inventory.stats,
            BuildStats {
                records: 5,
                hosts: 1,
                not_instance: 1,
                no_address: 1,
                ignored: 0,
                malformed: 2,
                duplicates: 0,
            }
        );
        assert_eq!(inventory.groups.get("ssh").unwrap().members, vec!["i-000003d1"]);
    }

    #[test]
    fn build_ignored_host_is_in_no_group() {
        let ignore = IgnoreList::from_iter(["i-000003d1"]);
        let other = entry("i-2", &["instanceproject=tools", "instancename=t"], &["base"], &["10.0.0.2"]);
        let inventory = build(&[bots_cb_dev(), other], &ignore, &mapping());

        assert!(!inventory.hosts.contains_key("i-000003d1"));
        assert!(inventory.groups.iter().all(|g| !g.members.iter().any(|m| m == "i-000003d1")));
        assert!(!inventory.groups.contains("bots"));
        assert_eq!(inventory.groups.get("ssh").unwrap().members, vec!["i-2"]);
        assert_eq!(inventory.stats.ignored, 1);
    }

    #[test]
    fn build_keeps_first_record_for_a_repeated_dc() {
        let first = entry("i-1", &["instanceproject=bots", "instancename=one"], &["base"], &["10.0.0.1"])
            .with_attr(ATTR_ASSOCIATED_DOMAIN, ["i-1.pmtpa.wmflabs"]);
        let second = entry("i-1", &["instanceproject=tools", "instancename=two"], &["base"], &["10.0.0.2"])
            .with_attr(ATTR_ASSOCIATED_DOMAIN, ["i-1.eqiad.wmflabs"]);

        let inventory = build(&[first, second], &IgnoreList::new(), &mapping());

        assert_eq!(inventory.hosts.len(), 1);
        assert_eq!(inventory.hosts["i-1"].fqdn, "i-1.pmtpa.wmflabs");
        assert_eq!(inventory.stats.duplicates, 1);
        assert!(!inventory.groups.contains("tools"));
        assert_eq!(inventory.groups.get("bots").unwrap().members, vec!["i-1.pmtpa.wmflabs"]);
        assert_eq!(inventory.groups.get("ssh").unwrap().members, vec!["i-1.pmtpa.wmflabs"]);

        // Every member of every group has a host behind it.
        let fqdns: Vec<&str> = inventory.hosts.values().map(|h| h.fqdn.as_str()).collect();
        for group in inventory.groups.iter() {
            assert!(group.members.iter().all(|m| fqdns.contains(&m.as_str())), "{}", group.name);
        }
    }

    #[test]
    fn build_is_repeatable() {
        let entries = vec![
            bots_cb_dev(),
            entry("i-2", &["instanceproject=tools", "instancename=web"], &["webserver::apache2"], &["10.0.0.2"]),
        ];
        let ignore = IgnoreList::new();
        let mapping = mapping();
        assert_eq!(build(&entries, &ignore, &mapping), build(&entries, &ignore, &mapping));
    }

    #[test]
    fn build_empty_directory_yields_seeded_registry_only() {
        let inventory = build(&[], &IgnoreList::new(), &mapping());
        assert!(inventory.hosts.is_empty());
        assert_eq!(inventory.groups.len(), 2);
        assert_eq!(inventory.groups.populated().count(), 0);
    }

    #[test]
    fn build_attaches_class_templates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.cfg.hbs"), "define service {}").unwrap();
        let catalog = TemplateCatalog::open(dir.path()).unwrap();

        let ignore = IgnoreList::new();
        let mapping = mapping();
        let inventory = InventoryBuilder::new(&ignore, &mapping)
            .with_templates(&catalog)
            .build(&[bots_cb_dev()]);

        let templates = &inventory.hosts["i-000003d1"].templates;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].class, "base");
    }
}
