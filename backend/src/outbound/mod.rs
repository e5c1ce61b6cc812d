//! Outbound adapters connecting the domain to external systems.

pub mod persistence;
