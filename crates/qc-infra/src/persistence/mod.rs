//! Persistence implementations
//!
//! Repository traits from the domain layer, backed by key-value snapshots.

mod kv_inspection_repo;
mod kv_shipping_repo;

pub use kv_inspection_repo::KvInspectionRepository;
pub use kv_shipping_repo::KvShippingRepository;
