//! Infrastructure layer - persistence, import, and file formats

pub mod csv_export;
pub mod legacy_importer;
pub mod persistence;
pub mod photo;
