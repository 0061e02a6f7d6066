//! Port contracts for task synchronisation.
//!
//! Ports define infrastructure-agnostic interfaces used by sync services.
//! Concrete integrations are selected once, at construction time.

pub mod sink;
pub mod source;

pub use sink::{PushOutcome, PushSink, PushSinkError, PushSinkResult};
pub use source::{SnapshotSource, SnapshotSourceError, SnapshotSourceResult};

#[cfg(test)]
pub use sink::MockPushSink;
#[cfg(test)]
pub use source::MockSnapshotSource;
