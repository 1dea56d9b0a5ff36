//! CSV export of inspection history

use std::io::Write;
use std::path::Path;

use qc_domain::service::{evaluate_weight, parameter_verdict, record_parameters};
use qc_types::{Error, InspectionRecord, InspectionType, Result};
use serde::Serialize;

/// One CSV row per inspection
#[derive(Debug, Serialize)]
struct InspectionRow<'a> {
    id: &'a str,
    timestamp: String,
    #[serde(rename = "type")]
    kind: &'static str,
    inspector: &'a str,
    material: &'a str,
    batch: &'a str,
    sector: &'a str,
    status: &'static str,
    area_m2: Option<f64>,
    grammage: Option<f64>,
    band_min: Option<f64>,
    band_max: Option<f64>,
    parameters: String,
    comment: &'a str,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `Nome=valor` per parameter row; process rows also carry their verdict
fn parameter_summary(record: &InspectionRecord) -> String {
    let is_process = record.kind() == InspectionType::Process;
    record_parameters(record)
        .iter()
        .map(|p| match parameter_verdict(p) {
            None => format!("{}=N.A.", p.name),
            Some(pass) if is_process => {
                format!("{}={} {}", p.name, p.actual, if pass { "OK" } else { "NOK" })
            }
            Some(_) => format!("{}={}", p.name, p.actual),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn to_row(record: &InspectionRecord) -> InspectionRow<'_> {
    let weight = record.weight().map(evaluate_weight);
    InspectionRow {
        id: &record.id,
        timestamp: record.timestamp.to_rfc3339(),
        kind: record.kind().label_en(),
        inspector: &record.inspector_name,
        material: &record.material_id,
        batch: &record.batch_number,
        sector: &record.sector,
        status: record.status.label_en(),
        area_m2: weight.and_then(|w| finite(w.area)),
        grammage: weight.and_then(|w| finite(w.grammage)),
        band_min: weight.and_then(|w| finite(w.effective_band.min)),
        band_max: weight.and_then(|w| finite(w.effective_band.max)),
        parameters: parameter_summary(record),
        comment: record.comment.as_deref().unwrap_or(""),
    }
}

/// Write inspections as CSV (with header) to any writer
pub fn write_inspections_csv<W: Write>(writer: W, records: &[InspectionRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(to_row(record))
            .map_err(|e| Error::Csv(e.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export inspections to a CSV file
pub fn export_inspections_csv(records: &[InspectionRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_inspections_csv(file, records)?;
    log::info!("exported {} inspections to {}", records.len(), path.display());
    Ok(())
}
