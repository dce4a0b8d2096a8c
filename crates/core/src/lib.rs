//! Functional core for `tablemigrate`.
//!
//! Pure data and decisions: configuration, backup naming and polling policy,
//! key projections, migration phases and the final report. Nothing in this
//! crate performs I/O.

pub mod backup;
pub mod migration;
pub mod storage;
