//! Domain layer: pass/fail rules, record lifecycle, and read-side views

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::{InspectionRepository, ShippingRepository};
