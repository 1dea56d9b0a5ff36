//! Repository trait definitions for data persistence

use qc_types::{InspectionRecord, Result, ShippingRecord};

use crate::model::InspectionDraft;

/// Repository for inspection records (newest first)
pub trait InspectionRepository {
    /// All records, newest first
    fn find_all(&self) -> Result<Vec<InspectionRecord>>;

    /// Find a record by id
    fn find_by_id(&self, id: &str) -> Result<Option<InspectionRecord>>;

    /// Add a new record at the front of the collection
    fn insert(&mut self, record: InspectionRecord) -> Result<()>;

    /// Replace the record with the same id in place.
    /// Fails with `RecordNotFound` when the id is unknown.
    fn replace(&mut self, record: InspectionRecord) -> Result<()>;

    /// Delete by id. Returns false when the id was unknown (no-op).
    fn delete(&mut self, id: &str) -> Result<bool>;

    /// Append older records at the back, skipping known ids.
    /// Returns how many were added.
    fn append_history(&mut self, records: Vec<InspectionRecord>) -> Result<usize>;

    /// Draft pre-filled from a stored record
    fn draft_for_edit(&self, id: &str) -> Result<InspectionDraft> {
        self.find_by_id(id)?
            .map(|record| InspectionDraft::from_record(&record))
            .ok_or_else(|| qc_types::Error::RecordNotFound(id.to_string()))
    }
}

/// Repository for shipping records (append-only, newest first)
pub trait ShippingRepository {
    /// All shipments, newest first
    fn find_all(&self) -> Result<Vec<ShippingRecord>>;

    /// Add a new shipment at the front
    fn insert(&mut self, record: ShippingRecord) -> Result<()>;

    /// Append older shipments at the back, skipping known ids
    fn append_history(&mut self, records: Vec<ShippingRecord>) -> Result<usize>;

    fn count(&self) -> Result<usize> {
        Ok(self.find_all()?.len())
    }
}
