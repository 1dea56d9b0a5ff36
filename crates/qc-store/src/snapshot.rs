//! Snapshot encoding with fail-closed decoding

use std::fmt;

use log::warn;
use qc_types::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Raised when a stored snapshot could not be parsed and was replaced by
/// an empty collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub key: String,
    pub message: String,
    /// Key holding a copy of the unreadable bytes, if one was written
    pub backup_key: Option<String>,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stored data under '{}' is unreadable ({}); starting from an empty collection",
            self.key, self.message
        )?;
        if let Some(ref backup) = self.backup_key {
            write!(f, ", original kept under '{}'", backup)?;
        }
        Ok(())
    }
}

/// Result of decoding a stored snapshot
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub items: Vec<T>,
    pub warning: Option<LoadWarning>,
}

/// Serialize a collection as a JSON array
pub fn encode_snapshot<T: Serialize>(key: &str, items: &[T]) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(items).map_err(|e| StoreError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Decode a stored snapshot.
///
/// Absent data is an empty collection. Malformed data is also an empty
/// collection, reported through `Snapshot::warning` instead of an error.
pub fn decode_snapshot<T: DeserializeOwned>(key: &str, bytes: Option<&[u8]>) -> Snapshot<T> {
    let Some(bytes) = bytes else {
        return Snapshot {
            items: Vec::new(),
            warning: None,
        };
    };

    match serde_json::from_slice::<Vec<T>>(bytes) {
        Ok(items) => Snapshot {
            items,
            warning: None,
        },
        Err(e) => {
            warn!("snapshot '{}' is malformed: {}", key, e);
            Snapshot {
                items: Vec::new(),
                warning: Some(LoadWarning {
                    key: key.to_string(),
                    message: e.to_string(),
                    backup_key: None,
                }),
            }
        }
    }
}
