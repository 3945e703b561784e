use colored::*;
use labmon_common::inventory::HostDescriptor;
use labmon_core::sync::SyncOutcome;

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn host_to_details(host: &HostDescriptor) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("FQDN".to_string(), host.fqdn.normal()),
        ("Address".to_string(), host.address.color(colors::ADDRESS)),
    ];

    if !host.groups.is_empty() {
        details.push(("Groups".to_string(), host.groups.join(", ").color(colors::GROUP)));
    }

    if !host.templates.is_empty() {
        let classes: Vec<&str> = host.templates.iter().map(|t| t.class.as_str()).collect();
        details.push(("Checks".to_string(), classes.join(", ").normal()));
    }

    details
}

pub fn outcome(outcome: SyncOutcome) -> ColoredString {
    match outcome {
        SyncOutcome::Reloaded => "validated and reloaded".green().bold(),
        SyncOutcome::SkippedDebug => "reload skipped (debug mode)".yellow().bold(),
        SyncOutcome::ValidationFailed => "validation failed, not reloaded".red().bold(),
        SyncOutcome::ReloadFailed => "reload failed".red().bold(),
    }
}
