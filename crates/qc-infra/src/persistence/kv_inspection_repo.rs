//! Key-value backed inspection repository

use log::info;
use qc_domain::repository::InspectionRepository;
use qc_store::{Collection, KeyValueStore, LoadWarning, INSPECTIONS_KEY};
use qc_types::{Error, InspectionRecord, Result};

/// Inspection records stored as one snapshot under `qc_inspections`
pub struct KvInspectionRepository<S: KeyValueStore> {
    records: Collection<InspectionRecord, S>,
}

impl<S: KeyValueStore> KvInspectionRepository<S> {
    /// Load the inspection collection from the store
    pub fn open(store: S) -> Result<Self> {
        let records = Collection::open(store, INSPECTIONS_KEY)?;
        Ok(Self { records })
    }

    /// Set when the stored snapshot was unreadable and replaced by an empty one
    pub fn load_warning(&self) -> Option<&LoadWarning> {
        self.records.load_warning()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowed view of all records, newest first
    pub fn records(&self) -> &[InspectionRecord] {
        self.records.items()
    }
}

impl<S: KeyValueStore> InspectionRepository for KvInspectionRepository<S> {
    fn find_all(&self) -> Result<Vec<InspectionRecord>> {
        Ok(self.records.items().to_vec())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<InspectionRecord>> {
        Ok(self.records.get(id).cloned())
    }

    fn insert(&mut self, record: InspectionRecord) -> Result<()> {
        let id = record.id.clone();
        self.records.prepend(record)?;
        info!("inspection {} created", id);
        Ok(())
    }

    fn replace(&mut self, record: InspectionRecord) -> Result<()> {
        let existing_kind = self
            .records
            .get(&record.id)
            .map(|existing| existing.kind())
            .ok_or_else(|| Error::RecordNotFound(record.id.clone()))?;
        if existing_kind != record.kind() {
            return Err(Error::KindMismatch {
                expected: record.kind(),
                found: existing_kind,
            });
        }

        let id = record.id.clone();
        self.records.replace(record)?;
        info!("inspection {} updated", id);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let removed = self.records.remove(id)?;
        if removed {
            info!("inspection {} deleted", id);
        }
        Ok(removed)
    }

    fn append_history(&mut self, records: Vec<InspectionRecord>) -> Result<usize> {
        Ok(self.records.append_missing(records)?)
    }
}
