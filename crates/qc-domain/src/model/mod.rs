//! Domain model types

pub mod draft;
pub mod parameters;

pub use draft::{InspectionDraft, ShippingDraft};
pub use parameters::{process_template, PROCESS_PARAMETER_NAMES};
