//! Persistent store for inspection and shipping records
//!
//! Records are kept as whole-collection JSON snapshots behind a small
//! key-value interface. Every mutation rewrites the snapshot.

pub mod collection;
pub mod kv;
pub mod snapshot;

pub use collection::Collection;
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use snapshot::{decode_snapshot, encode_snapshot, LoadWarning, Snapshot};

/// Key of the inspection collection snapshot
pub const INSPECTIONS_KEY: &str = "qc_inspections";

/// Key of the shipping collection snapshot
pub const SHIPPING_KEY: &str = "qc_shipping";
