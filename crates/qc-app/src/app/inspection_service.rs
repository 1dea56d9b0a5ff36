//! Inspection Service - use cases for the QC record workflow
//!
//! `QcApp` owns both repositories and runs every operation against them:
//! submitting and editing inspections, deleting with confirmation,
//! recording shipments, history queries, reports, and legacy import.

use std::path::PathBuf;

use chrono::Utc;
use log::{debug, info};
use qc_domain::model::{InspectionDraft, ShippingDraft};
use qc_domain::repository::{InspectionRepository, ShippingRepository};
use qc_domain::service::{
    create_record, create_shipment, edit_record, generate_inspection_report, DashboardSummary,
};
use qc_infra::legacy_importer::{import_legacy_data, ImportResult, LegacySnapshot};
use qc_infra::persistence::{KvInspectionRepository, KvShippingRepository};
use qc_store::{LoadWarning, MemoryKvStore};
use qc_types::{Error, InspectionRecord, InspectionStatus, InspectionType, Result, ShippingRecord};
use uuid::Uuid;

use crate::config::Config;
use crate::repository::{
    open_inspection_repo, open_shipping_repo, open_store_at, FileInspectionRepository,
    FileShippingRepository,
};

/// Asks the operator before a record is deleted
pub trait Confirmation {
    fn confirm_delete(&mut self, record: &InspectionRecord) -> bool;
}

impl<F> Confirmation for F
where
    F: FnMut(&InspectionRecord) -> bool,
{
    fn confirm_delete(&mut self, record: &InspectionRecord) -> bool {
        self(record)
    }
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(InspectionRecord),
    /// Unknown id; nothing changed
    NotFound,
    /// Operator declined
    Cancelled,
}

/// Filter for history queries
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub kind: Option<InspectionType>,
    pub status: Option<InspectionStatus>,
    pub limit: Option<usize>,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: InspectionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_status(mut self, status: InspectionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, record: &InspectionRecord) -> bool {
        self.kind.map_or(true, |k| record.kind() == k)
            && self.status.map_or(true, |s| record.status == s)
    }
}

/// Application state: both collections and any load warnings
pub struct QcApp<I, S> {
    inspections: I,
    shipping: S,
    warnings: Vec<LoadWarning>,
}

/// File-backed application used by the CLI
pub type FileQcApp = QcApp<FileInspectionRepository, FileShippingRepository>;

impl FileQcApp {
    /// Open both collections in the configured data directory
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_at(config.data_dir()?)
    }

    pub fn open_at(data_dir: PathBuf) -> Result<Self> {
        let store = open_store_at(data_dir)?;
        let inspections = open_inspection_repo(&store)?;
        let shipping = open_shipping_repo(&store)?;

        let warnings = inspections
            .load_warning()
            .into_iter()
            .chain(shipping.load_warning())
            .cloned()
            .collect();

        Ok(QcApp::new(inspections, shipping).with_warnings(warnings))
    }
}

impl<I, S> QcApp<I, S>
where
    I: InspectionRepository,
    S: ShippingRepository,
{
    pub fn new(inspections: I, shipping: S) -> Self {
        Self {
            inspections,
            shipping,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<LoadWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Collections that were unreadable at startup and reset to empty
    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn inspections(&self) -> &I {
        &self.inspections
    }

    pub fn shipping(&self) -> &S {
        &self.shipping
    }

    /// Stored record by id
    pub fn find(&self, id: &str) -> Result<InspectionRecord> {
        self.inspections
            .find_by_id(id)?
            .ok_or_else(|| Error::RecordNotFound(id.to_string()))
    }

    /// Form pre-filled from a stored record
    pub fn draft_for_edit(&self, id: &str) -> Result<InspectionDraft> {
        self.inspections.draft_for_edit(id)
    }

    /// Submit a draft.
    ///
    /// With no `edit_id` a new record is created at the front of the history.
    /// Otherwise the record with that id is replaced in place, keeping its id
    /// and timestamp.
    pub fn submit(
        &mut self,
        draft: InspectionDraft,
        edit_id: Option<&str>,
    ) -> Result<InspectionRecord> {
        let record = match edit_id {
            None => {
                let record = create_record(draft, Uuid::new_v4().to_string(), Utc::now());
                self.inspections.insert(record.clone())?;
                record
            }
            Some(id) => {
                let existing = self.find(id)?;
                let record = edit_record(draft, &existing)?;
                self.inspections.replace(record.clone())?;
                record
            }
        };
        debug!("{} inspection {} is {}", record.kind(), record.id, record.status);
        Ok(record)
    }

    /// Delete a record after confirmation. Unknown ids are a no-op.
    pub fn delete<C>(&mut self, id: &str, confirm: &mut C) -> Result<DeleteOutcome>
    where
        C: Confirmation + ?Sized,
    {
        let Some(record) = self.inspections.find_by_id(id)? else {
            debug!("delete of unknown inspection {} ignored", id);
            return Ok(DeleteOutcome::NotFound);
        };
        if !confirm.confirm_delete(&record) {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.inspections.delete(id)?;
        Ok(DeleteOutcome::Deleted(record))
    }

    /// Record a shipment at the front of the shipping log
    pub fn record_shipment(&mut self, draft: ShippingDraft) -> Result<ShippingRecord> {
        let record = create_shipment(draft, Uuid::new_v4().to_string(), Utc::now());
        self.shipping.insert(record.clone())?;
        Ok(record)
    }

    /// Inspections matching the filter, newest first
    pub fn history(&self, filter: &HistoryFilter) -> Result<Vec<InspectionRecord>> {
        let matching = self
            .inspections
            .find_all()?
            .into_iter()
            .filter(|r| filter.matches(r));
        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    /// Shipping log, newest first
    pub fn shipments(&self, limit: Option<usize>) -> Result<Vec<ShippingRecord>> {
        let mut all = self.shipping.find_all()?;
        if let Some(limit) = limit {
            all.truncate(limit);
        }
        Ok(all)
    }

    /// Printable report for one inspection
    pub fn report(&self, id: &str) -> Result<String> {
        Ok(generate_inspection_report(&self.find(id)?))
    }

    pub fn dashboard(&self) -> Result<DashboardSummary> {
        let records = self.inspections.find_all()?;
        Ok(DashboardSummary::from_records(&records, self.shipping.count()?))
    }

    /// Import legacy records as older history
    pub fn import_legacy(&mut self, snapshot: &LegacySnapshot) -> Result<ImportResult> {
        let result = import_legacy_data(snapshot, &mut self.inspections, &mut self.shipping)?;
        info!(
            "legacy import: {} inspections, {} shipments, {} skipped, {} errors",
            result.inspections_imported,
            result.shipping_imported,
            result.skipped,
            result.errors.len()
        );
        Ok(result)
    }

    /// Run an import against an in-memory copy of the current data
    pub fn preview_import(&self, snapshot: &LegacySnapshot) -> Result<ImportResult> {
        let store = MemoryKvStore::new();
        let mut inspections = KvInspectionRepository::open(store.clone())?;
        let mut shipping = KvShippingRepository::open(store)?;
        inspections.append_history(self.inspections.find_all()?)?;
        shipping.append_history(self.shipping.find_all()?)?;
        import_legacy_data(snapshot, &mut inspections, &mut shipping)
    }
}
