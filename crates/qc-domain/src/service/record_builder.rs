//! Turning submitted forms into stored records

use chrono::{DateTime, Utc};
use qc_types::{
    Error, InspectionDetails, InspectionRecord, InspectionStatus, Result, ShippingRecord,
    TechnicalParameter, WeightMeasurements,
};

use crate::model::parameters::{GRAMMAGE, HUMIDITY, LENGTH, THICKNESS, WIDTH};
use crate::model::{InspectionDraft, ShippingDraft};

use super::process_evaluator::evaluate_process;
use super::weight_evaluator::evaluate_weight;

/// Status of an inspection payload, by its kind's rule
pub fn evaluate_details(details: &InspectionDetails) -> InspectionStatus {
    match details {
        InspectionDetails::Process { parameters } => evaluate_process(parameters),
        InspectionDetails::Weight(m) => evaluate_weight(m).status,
    }
}

/// Build a new record from a draft. Status is computed here, once.
pub fn create_record(
    draft: InspectionDraft,
    id: String,
    timestamp: DateTime<Utc>,
) -> InspectionRecord {
    let status = evaluate_details(&draft.details);
    InspectionRecord {
        id,
        timestamp,
        inspector_name: draft.inspector_name,
        material_id: draft.material_id,
        batch_number: draft.batch_number,
        sector: draft.sector,
        details: draft.details,
        comment: normalize_text(draft.comment),
        photo: normalize_text(draft.photo),
        status,
    }
}

/// Build the replacement for an edited record.
///
/// Keeps the original id and timestamp; every other field comes from the
/// draft and the status is recomputed. The draft must be of the same kind.
pub fn edit_record(
    draft: InspectionDraft,
    existing: &InspectionRecord,
) -> Result<InspectionRecord> {
    if draft.kind() != existing.kind() {
        return Err(Error::KindMismatch {
            expected: draft.kind(),
            found: existing.kind(),
        });
    }
    Ok(create_record(draft, existing.id.clone(), existing.timestamp))
}

/// Build a shipping record from a draft
pub fn create_shipment(
    draft: ShippingDraft,
    id: String,
    timestamp: DateTime<Utc>,
) -> ShippingRecord {
    ShippingRecord {
        id,
        invoice_number: draft.invoice_number,
        pdv: draft.pdv,
        batch_number: draft.batch_number,
        client: draft.client,
        quantity: draft.quantity,
        timestamp,
        photo: normalize_text(draft.photo),
    }
}

/// Parameter rows of a record.
///
/// Process records return their stored parameters. Weight records derive
/// five rows from their measurements; the grammage row carries the
/// effective band and the computed grammage.
pub fn record_parameters(record: &InspectionRecord) -> Vec<TechnicalParameter> {
    match &record.details {
        InspectionDetails::Process { parameters } => parameters.clone(),
        InspectionDetails::Weight(m) => weight_parameters(m),
    }
}

fn weight_parameters(m: &WeightMeasurements) -> Vec<TechnicalParameter> {
    let eval = evaluate_weight(m);
    vec![
        TechnicalParameter::new(LENGTH, 0.0, 0.0, m.length),
        TechnicalParameter::new(WIDTH, 0.0, 0.0, m.width),
        TechnicalParameter::new(THICKNESS, 0.0, 0.0, m.thickness),
        TechnicalParameter::new(HUMIDITY, 0.0, 0.0, m.humidity),
        TechnicalParameter::new(
            GRAMMAGE,
            eval.effective_band.min,
            eval.effective_band.max,
            eval.grammage,
        ),
    ]
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
