//! Task synchronisation between a source and a destination system.
//!
//! A cycle fetches a full snapshot from each system, classifies every source
//! record as new, changed or unchanged, pushes the new and changed records to
//! the destination, and records the outcome in a bounded history. Manual
//! callers and the periodic scheduler share the same cycle. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
