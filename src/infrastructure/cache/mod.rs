//! Local snapshot adapters.

mod snapshot;

pub use snapshot::SnapshotCache;
