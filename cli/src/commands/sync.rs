use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tracing::{error, info_span, warn};

use crate::terminal::{colors, format, print, spinner};
use labmon_common::config::Config;
use labmon_common::inventory::HostDescriptor;
use labmon_core::directory::ldap::{LdapDirectory, LdapSettings};
use labmon_core::reload::ShellRunner;
use labmon_core::sync::{SyncOutcome, SyncReport, SyncService, prepare_output_dir};

const RELOADED: u8 = 0;
const FAILED: u8 = 1;
const OUTPUT_DIR_FAILURE: u8 = 2;

pub fn sync(mut cfg: Config, verbose: bool) -> ExitCode {
    if let Err(e) = prepare_output_dir(&cfg.output_dir) {
        error!("Could not create {}: {e}", cfg.output_dir.display());
        return ExitCode::from(OUTPUT_DIR_FAILURE);
    }

    let start_time: Instant = Instant::now();
    match run(&mut cfg) {
        Ok(report) => {
            sync_ends(&report, start_time.elapsed(), verbose);
            ExitCode::from(exit_status(report.outcome))
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(FAILED)
        }
    }
}

/// Only a validated and reloaded config counts as success.
fn exit_status(outcome: SyncOutcome) -> u8 {
    match outcome {
        SyncOutcome::Reloaded => RELOADED,
        SyncOutcome::ValidationFailed | SyncOutcome::ReloadFailed | SyncOutcome::SkippedDebug => FAILED,
    }
}

fn run(cfg: &mut Config) -> anyhow::Result<SyncReport> {
    let settings = LdapSettings::load(&cfg.ldap_config)
        .with_context(|| format!("loading {}", cfg.ldap_config.display()))?;
    if let Some(base) = &settings.base_dn {
        cfg.base_dn = base.clone();
    }

    let service = SyncService::from_config(cfg.clone(), Box::new(ShellRunner))?;

    let span = info_span!("sync");
    let _guard = span.enter();

    let pb = spinner::start(&format!("Querying {}", settings.uri));
    let entries = LdapDirectory::connect(&settings)
        .map_err(anyhow::Error::from)
        .and_then(|directory| service.fetch(directory).map_err(anyhow::Error::from));
    spinner::finish(&pb);

    Ok(service.apply(&entries?)?)
}

fn sync_ends(report: &SyncReport, total_time: Duration, verbose: bool) {
    let inventory = &report.inventory;
    if inventory.hosts.is_empty() {
        print::header("zero instances");
        print::no_results();
    } else if verbose {
        print::header("instances");
        print_hosts(inventory.hosts.values());
    }

    print::header("summary");
    let stats = &inventory.stats;
    print::aligned_line("Records", stats.records);
    print::aligned_line("Hosts", stats.hosts.to_string().green());
    print::aligned_line("Groups", report.written.group_files.len());
    print::aligned_line("Ignored", stats.ignored);
    print::aligned_line("Skipped", stats.not_instance + stats.no_address);
    if stats.duplicates > 0 {
        print::aligned_line("Duplicates", stats.duplicates.to_string().yellow());
    }
    if stats.malformed > 0 {
        warn!("{} records had malformed puppet variables", stats.malformed);
    }
    print::aligned_line("Removed", report.removed.len());
    for name in &report.removed {
        print::print_status(name.color(colors::SEPARATOR).to_string());
    }

    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Sync complete: {} in {}", format::outcome(report.outcome), total_time)
        .color(colors::TEXT_DEFAULT)
        .to_string();
    print::fat_separator();
    print::centerln(&output);
}

fn print_hosts<'a>(hosts: impl Iterator<Item = &'a HostDescriptor>) {
    for (idx, host) in hosts.enumerate() {
        print::tree_head(idx, &host.display_name);
        print::as_tree_one_level(format::host_to_details(host));
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
