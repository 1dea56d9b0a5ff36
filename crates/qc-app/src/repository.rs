//! Repository adapters for persistence layer

use std::path::PathBuf;

use qc_infra::persistence::{KvInspectionRepository, KvShippingRepository};
use qc_store::FileKvStore;
use qc_types::Result;

pub type FileInspectionRepository = KvInspectionRepository<FileKvStore>;
pub type FileShippingRepository = KvShippingRepository<FileKvStore>;

/// Open the file-backed key-value store at a data directory
pub fn open_store_at(data_dir: PathBuf) -> Result<FileKvStore> {
    FileKvStore::open(data_dir).map_err(Into::into)
}

/// Open file-based inspection repository
pub fn open_inspection_repo(store: &FileKvStore) -> Result<FileInspectionRepository> {
    KvInspectionRepository::open(store.clone())
}

/// Open file-based shipping repository
pub fn open_shipping_repo(store: &FileKvStore) -> Result<FileShippingRepository> {
    KvShippingRepository::open(store.clone())
}
