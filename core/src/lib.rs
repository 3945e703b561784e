//! # Labmon Core
//!
//! Derives the monitored inventory from directory records and turns it into
//! monitoring-daemon configuration.
//!
//! ## Inventory derivation
//! * **[`normalizer`]**: `puppetVar` declarations to a variable map.
//! * **[`resolver`]**: record to host descriptor, or a reason to skip it.
//! * **[`classifier`]**: project and class-driven group membership.
//! * **[`registry`]**: the groups of one pass.
//! * **[`builder`]**: runs the above over every record.
//!
//! ## Around it
//! * **[`sources`]**: class mapping and ignore-list loaders.
//! * **[`directory`]**: the LDAP adapter.
//! * **[`templates`]**, **[`emitter`]**, **[`cleanup`]**, **[`reload`]**: output side.
//! * **[`sync`]**: the end-to-end use case.

pub mod builder;
pub mod classifier;
pub mod cleanup;
pub mod directory;
pub mod emitter;
pub mod normalizer;
pub mod registry;
pub mod reload;
pub mod resolver;
pub mod sources;
pub mod sync;
pub mod templates;
