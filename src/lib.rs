//! Task sync: two-system task reconciliation engine.
//!
//! This crate keeps a destination task system in line with a source task
//! system. One reconciliation cycle serves both manual requests and the
//! fixed-interval scheduler, and every cycle outcome lands in a bounded
//! history.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`sync`]: Task records, reconciliation, orchestration and scheduling
//! - [`config`]: Environment-driven runtime settings
//! - [`telemetry`]: `tracing` subscriber setup

pub mod config;
pub mod sync;
pub mod telemetry;
