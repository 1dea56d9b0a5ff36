//! Key-value backed shipping repository

use log::info;
use qc_domain::repository::ShippingRepository;
use qc_store::{Collection, KeyValueStore, LoadWarning, SHIPPING_KEY};
use qc_types::{Result, ShippingRecord};

/// Shipping log stored as one snapshot under `qc_shipping`
pub struct KvShippingRepository<S: KeyValueStore> {
    records: Collection<ShippingRecord, S>,
}

impl<S: KeyValueStore> KvShippingRepository<S> {
    pub fn open(store: S) -> Result<Self> {
        let records = Collection::open(store, SHIPPING_KEY)?;
        Ok(Self { records })
    }

    pub fn load_warning(&self) -> Option<&LoadWarning> {
        self.records.load_warning()
    }

    pub fn records(&self) -> &[ShippingRecord] {
        self.records.items()
    }
}

impl<S: KeyValueStore> ShippingRepository for KvShippingRepository<S> {
    fn find_all(&self) -> Result<Vec<ShippingRecord>> {
        Ok(self.records.items().to_vec())
    }

    fn insert(&mut self, record: ShippingRecord) -> Result<()> {
        let id = record.id.clone();
        self.records.prepend(record)?;
        info!("shipment {} recorded", id);
        Ok(())
    }

    fn append_history(&mut self, records: Vec<ShippingRecord>) -> Result<usize> {
        Ok(self.records.append_missing(records)?)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }
}
