//! # Run Inputs
//!
//! Loaders for the two local files read once per run: the class-to-group
//! mapping and the ignore list.

use std::path::PathBuf;

use thiserror::Error;

pub mod ignore;
pub mod mapping;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
