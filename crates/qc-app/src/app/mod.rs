//! Application use cases

pub mod inspection_service;

pub use inspection_service::{Confirmation, DeleteOutcome, FileQcApp, HistoryFilter, QcApp};
