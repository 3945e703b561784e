//! # Inventory Models
//!
//! Data shapes that flow through one inventory pass.
//!
//! * [`record::RawRecord`]: A directory object, typed. Immutable once fetched.
//! * [`variables::VariableMap`]: The `key=value` pairs declared on a record.
//! * [`host::HostDescriptor`]: A monitored instance, created once per qualifying record.
//! * [`group::GroupDescriptor`]: A named set of hosts, either class-driven or per project.

pub mod group;
pub mod host;
pub mod record;
pub mod variables;

pub use group::GroupDescriptor;
pub use host::{HostDescriptor, TemplateRef};
pub use record::{RawRecord, RecordError};
pub use variables::VariableMap;
