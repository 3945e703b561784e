//! Turns a record's `puppetVar` declarations into a [`VariableMap`].

use labmon_common::inventory::{RawRecord, VariableMap};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("{dc}: variable declaration {entry:?} has no '='")]
    MissingSeparator { dc: String, entry: String },
}

/// Splits every declaration on its first `=`.
///
/// Values may contain further `=` characters. A repeated key keeps the value
/// of its last declaration. An entry without any `=` fails the whole record.
pub fn normalize(record: &RawRecord) -> Result<VariableMap, NormalizeError> {
    let mut vars = VariableMap::new();
    for entry in &record.puppet_vars {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(NormalizeError::MissingSeparator {
                dc: record.dc.clone(),
                entry: entry.clone(),
            });
        };
        debug!("Found variable {key} for {}", record.dc);
        vars.insert(key, value);
    }
    Ok(vars)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
