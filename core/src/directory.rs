//! Concrete [`Directory`](labmon_common::directory::Directory) adapters.

pub mod ldap;
