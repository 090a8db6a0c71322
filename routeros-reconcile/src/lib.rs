//! Terminal-facing pieces of the `routeros-reconcile` command: order
//! profiles, colored script reports and section listings.

pub mod inspect;
pub mod profile;
pub mod report;
