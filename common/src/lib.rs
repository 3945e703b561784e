//! # Labmon Common
//!
//! Shared vocabulary for the `labmon` workspace.
//!
//! * **[`inventory`]**: The domain models. Raw directory records, declared variables,
//!   and the host and group descriptors derived from them.
//! * **[`config`]**: Run configuration with the defaults of a standard deployment.
//! * **[`directory`]** and **[`command`]**: Outbound ports. The core depends on these
//!   traits; concrete adapters live in `labmon-core`.

pub mod command;
pub mod config;
pub mod directory;
pub mod inventory;
