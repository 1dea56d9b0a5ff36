//! Import data from the legacy browser version of the QC app
//!
//! Reads the `qc_inspections` and `qc_shipping` local-storage snapshots
//! (JSON arrays) saved by the old web app.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::warn;
use qc_domain::model::parameters::{GRAMMAGE, HUMIDITY, LENGTH, THICKNESS, WIDTH};
use qc_domain::repository::{InspectionRepository, ShippingRepository};
use qc_types::{
    Error, InspectionDetails, InspectionRecord, InspectionStatus, Result, ShippingRecord,
    TechnicalParameter, WeightMeasurements,
};
use serde::Deserialize;

/// Legacy technical parameter. Non-numeric inputs were saved as `null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyParameter {
    pub name: String,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub actual: Option<f64>,
    #[serde(default)]
    pub not_applicable: bool,
}

/// Legacy inspection record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyInspection {
    pub id: String,
    /// "Processo" or "Gramatura"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub inspector_name: String,
    pub timestamp: String,
    #[serde(default)]
    pub material_id: String,
    #[serde(default)]
    pub batch_number: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub parameters: Vec<LegacyParameter>,
    #[serde(default)]
    pub area_m2: Option<f64>,
    #[serde(default)]
    pub weight_with_glue: Option<f64>,
    #[serde(default)]
    pub weight_without_glue: Option<f64>,
    #[serde(default)]
    pub calculated_weight: Option<f64>,
    #[serde(default)]
    pub press_temperature: Option<f64>,
    #[serde(default)]
    pub press_time: Option<f64>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// "Aprovado" or "Reprovado"
    pub status: String,
}

/// Legacy shipping record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyShipping {
    pub id: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub pdv: String,
    #[serde(default)]
    pub batch_number: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    pub timestamp: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Both legacy collections
#[derive(Debug, Clone, Default)]
pub struct LegacySnapshot {
    pub inspections: Vec<LegacyInspection>,
    pub shipping: Vec<LegacyShipping>,
}

/// Import result
#[derive(Debug, Default)]
pub struct ImportResult {
    pub inspections_imported: usize,
    pub shipping_imported: usize,
    /// Records whose id was already present
    pub skipped: usize,
    /// Records that could not be converted
    pub errors: Vec<String>,
}

impl ImportResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

fn load_array<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::FileNotFound(format!("{}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::LegacyImport(format!("failed to parse {}: {}", path.display(), e))
    })
}

/// Load legacy snapshots. Either file may be omitted.
pub fn load_legacy_snapshot(
    inspections_path: Option<&Path>,
    shipping_path: Option<&Path>,
) -> Result<LegacySnapshot> {
    let inspections = match inspections_path {
        Some(path) => load_array(path)?,
        None => Vec::new(),
    };
    let shipping = match shipping_path {
        Some(path) => load_array(path)?,
        None => Vec::new(),
    };
    Ok(LegacySnapshot {
        inspections,
        shipping,
    })
}

fn parse_timestamp(id: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::LegacyImport(format!("record {}: bad timestamp '{}': {}", id, raw, e)))
}

fn parse_status(id: &str, raw: &str) -> Result<InspectionStatus> {
    match raw {
        "Aprovado" => Ok(InspectionStatus::Approved),
        "Reprovado" => Ok(InspectionStatus::Rejected),
        other => Err(Error::LegacyImport(format!(
            "record {}: unknown status '{}'",
            id, other
        ))),
    }
}

/// Legacy manual bounds used 0 (or an empty field) for "not set"
fn legacy_bound(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

fn convert_parameter(p: &LegacyParameter) -> TechnicalParameter {
    TechnicalParameter {
        name: p.name.clone(),
        min: p.min.unwrap_or(f64::NAN),
        max: p.max.unwrap_or(f64::NAN),
        actual: p.actual.unwrap_or(f64::NAN),
        not_applicable: p.not_applicable,
    }
}

fn convert_weight(item: &LegacyInspection) -> WeightMeasurements {
    let find = |name: &str| item.parameters.iter().find(|p| p.name == name);
    let actual_of = |name: &str| find(name).and_then(|p| p.actual).unwrap_or(f64::NAN);
    let grammage = find(GRAMMAGE);

    WeightMeasurements {
        length: actual_of(LENGTH),
        width: actual_of(WIDTH),
        thickness: actual_of(THICKNESS),
        humidity: actual_of(HUMIDITY),
        glued_mass: item.weight_with_glue.unwrap_or(f64::NAN),
        unglued_mass: item.weight_without_glue.unwrap_or(f64::NAN),
        press_temperature: item.press_temperature.unwrap_or(f64::NAN),
        press_time: item.press_time.unwrap_or(f64::NAN),
        manual_min: legacy_bound(grammage.and_then(|p| p.min)),
        manual_max: legacy_bound(grammage.and_then(|p| p.max)),
    }
}

/// Convert a legacy inspection. The stored status is kept as-is.
pub fn convert_inspection(item: &LegacyInspection) -> Result<InspectionRecord> {
    let details = match item.kind.as_str() {
        "Processo" => InspectionDetails::Process {
            parameters: item.parameters.iter().map(convert_parameter).collect(),
        },
        "Gramatura" => InspectionDetails::Weight(convert_weight(item)),
        other => {
            return Err(Error::LegacyImport(format!(
                "record {}: unknown inspection type '{}'",
                item.id, other
            )))
        }
    };

    Ok(InspectionRecord {
        id: item.id.clone(),
        timestamp: parse_timestamp(&item.id, &item.timestamp)?,
        inspector_name: item.inspector_name.clone(),
        material_id: item.material_id.clone(),
        batch_number: item.batch_number.clone(),
        sector: item.sector.clone(),
        details,
        comment: non_empty(&item.comment),
        photo: non_empty(&item.photo),
        status: parse_status(&item.id, &item.status)?,
    })
}

/// Convert a legacy shipment. A missing or invalid quantity becomes 0.
pub fn convert_shipping(item: &LegacyShipping) -> Result<ShippingRecord> {
    let quantity = match item.quantity {
        Some(q) if q.is_finite() && q >= 0.0 => q.round() as u32,
        _ => 0,
    };
    Ok(ShippingRecord {
        id: item.id.clone(),
        invoice_number: item.invoice_number.clone(),
        pdv: item.pdv.clone(),
        batch_number: item.batch_number.clone(),
        client: item.client.clone(),
        quantity,
        timestamp: parse_timestamp(&item.id, &item.timestamp)?,
        photo: non_empty(&item.photo),
    })
}

fn convert_all<L, T>(
    items: &[L],
    convert: impl Fn(&L) -> Result<T>,
    errors: &mut Vec<String>,
) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match convert(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("skipping legacy record: {}", e);
                errors.push(e.to_string());
                None
            }
        })
        .collect()
}

/// Import a legacy snapshot into the repositories.
///
/// Imported records go after the existing ones, keeping their legacy order.
/// Ids already present are skipped.
pub fn import_legacy_data<I, S>(
    snapshot: &LegacySnapshot,
    inspections: &mut I,
    shipping: &mut S,
) -> Result<ImportResult>
where
    I: InspectionRepository + ?Sized,
    S: ShippingRepository + ?Sized,
{
    let mut result = ImportResult::default();

    let records = convert_all(&snapshot.inspections, convert_inspection, &mut result.errors);
    let converted = records.len();
    result.inspections_imported = inspections.append_history(records)?;
    result.skipped += converted - result.inspections_imported;

    let shipments = convert_all(&snapshot.shipping, convert_shipping, &mut result.errors);
    let converted = shipments.len();
    result.shipping_imported = shipping.append_history(shipments)?;
    result.skipped += converted - result.shipping_imported;

    Ok(result)
}

/// Generate summary report of a legacy snapshot
pub fn summarize_legacy_snapshot(snapshot: &LegacySnapshot) -> String {
    let mut report = String::new();
    report.push_str("=== Legacy QC snapshot ===\n");
    report.push_str(&format!("Inspections: {}\n", snapshot.inspections.len()));
    report.push_str(&format!("Shipments:   {}\n", snapshot.shipping.len()));

    if !snapshot.inspections.is_empty() {
        report.push_str("\n=== Sample Inspections ===\n");
        for (i, item) in snapshot.inspections.iter().take(5).enumerate() {
            let date = DateTime::parse_from_rfc3339(&item.timestamp)
                .map(|d| d.format("%Y/%m/%d %H:%M").to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            report.push_str(&format!(
                "{}. {} {} {} {}\n",
                i + 1,
                date,
                item.kind,
                if item.material_id.is_empty() { "-" } else { item.material_id.as_str() },
                item.status
            ));
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KvInspectionRepository, KvShippingRepository};
    use qc_store::MemoryKvStore;
    use qc_types::InspectionType;
    use std::io::Write;

    const LEGACY_INSPECTIONS: &str = r#"[
      {
        "id": "1717000000000",
        "type": "Gramatura",
        "inspectorName": "Bruno",
        "timestamp": "2024-05-29T16:26:40.000Z",
        "materialId": "HDF-3",
        "batchNumber": "L-88",
        "sector": "Colagem",
        "comment": "",
        "photo": "",
        "parameters": [
          {"name": "Comprimento", "min": 0, "max": 0, "actual": 1, "notApplicable": false},
          {"name": "Largura", "min": 0, "max": 0, "actual": 1, "notApplicable": false},
          {"name": "Espessura", "min": 0, "max": 0, "actual": 1.5, "notApplicable": false},
          {"name": "Umidade", "min": 0, "max": 0, "actual": 7, "notApplicable": false},
          {"name": "Gramatura", "min": 0, "max": 280, "actual": 370, "notApplicable": false}
        ],
        "status": "Aprovado",
        "areaM2": 1,
        "weightWithGlue": 400,
        "weightWithoutGlue": 30,
        "calculatedWeight": 370,
        "pressTemperature": 180,
        "pressTime": 45
      },
      {
        "id": "1716000000000",
        "type": "Processo",
        "inspectorName": "Ana",
        "timestamp": "2024-05-18T02:40:00.000Z",
        "materialId": "MDF-18",
        "batchNumber": "L-7",
        "sector": "Prensa",
        "parameters": [
          {"name": "Comprimento", "min": 2740, "max": 2760, "actual": 2750, "notApplicable": false},
          {"name": "Umidade", "min": 6, "max": 10, "actual": null, "notApplicable": false},
          {"name": "Esquadro", "min": 0, "max": 0, "actual": 0, "notApplicable": true}
        ],
        "status": "Reprovado",
        "areaM2": 0,
        "weightWithGlue": 0,
        "weightWithoutGlue": 0,
        "calculatedWeight": 0,
        "pressTemperature": 0,
        "pressTime": 0
      }
    ]"#;

    const LEGACY_SHIPPING: &str = r#"[
      {"id": "1717100000000", "invoiceNumber": "NF-5531", "pdv": "PO-12", "batchNumber": "L-88",
       "client": "Moveis Sul", "quantity": 240, "timestamp": "2024-05-30T20:13:20.000Z", "photo": ""},
      {"id": "1717200000000", "invoiceNumber": "NF-5532", "pdv": "PO-13", "batchNumber": "L-89",
       "client": "Casa Forte", "quantity": null, "timestamp": "2024-06-01T00:00:00.000Z"}
    ]"#;

    fn snapshot() -> LegacySnapshot {
        LegacySnapshot {
            inspections: serde_json::from_str(LEGACY_INSPECTIONS).unwrap(),
            shipping: serde_json::from_str(LEGACY_SHIPPING).unwrap(),
        }
    }

    #[test]
    fn test_convert_weight_record() {
        let record = convert_inspection(&snapshot().inspections[0]).unwrap();
        assert_eq!(record.kind(), InspectionType::Weight);
        assert_eq!(record.status, InspectionStatus::Approved);
        assert!(record.comment.is_none());
        assert!(record.photo.is_none());

        let m = record.weight().unwrap();
        assert_eq!(m.thickness, 1.5);
        assert_eq!(m.glued_mass, 400.0);
        assert_eq!(m.press_temperature, 180.0);
        // legacy 0 meant "no override"
        assert_eq!(m.manual_min, None);
        assert_eq!(m.manual_max, Some(280.0));
    }

    #[test]
    fn test_convert_keeps_stored_status() {
        // process status stays Rejected; the null actual becomes NaN
        let record = convert_inspection(&snapshot().inspections[1]).unwrap();
        assert_eq!(record.status, InspectionStatus::Rejected);
        let params = record.process_parameters().unwrap();
        assert!(params[1].actual.is_nan());
        assert!(params[2].not_applicable);
    }

    #[test]
    fn test_convert_rejects_unknown_type() {
        let mut item = snapshot().inspections[1].clone();
        item.kind = "Outro".to_string();
        assert!(matches!(convert_inspection(&item), Err(Error::LegacyImport(_))));
    }

    #[test]
    fn test_convert_shipping_quantity() {
        let snap = snapshot();
        assert_eq!(convert_shipping(&snap.shipping[0]).unwrap().quantity, 240);
        assert_eq!(convert_shipping(&snap.shipping[1]).unwrap().quantity, 0);
    }

    #[test]
    fn test_import_appends_and_skips_duplicates() {
        let store = MemoryKvStore::new();
        let mut inspections = KvInspectionRepository::open(store.clone()).unwrap();
        let mut shipping = KvShippingRepository::open(store).unwrap();

        let mut snap = snapshot();
        let mut bad = snap.inspections[1].clone();
        bad.id = "bad".to_string();
        bad.timestamp = "yesterday".to_string();
        snap.inspections.push(bad);

        let result = import_legacy_data(&snap, &mut inspections, &mut shipping).unwrap();
        assert_eq!(result.inspections_imported, 2);
        assert_eq!(result.shipping_imported, 2);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.errors.len(), 1);
        assert!(!result.is_success());

        let ids: Vec<_> = inspections.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1717000000000", "1716000000000"]);

        let again = import_legacy_data(&snapshot(), &mut inspections, &mut shipping).unwrap();
        assert_eq!(again.inspections_imported, 0);
        assert_eq!(again.shipping_imported, 0);
        assert_eq!(again.skipped, 4);
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qc_inspections.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(LEGACY_INSPECTIONS.as_bytes()).unwrap();

        let snap = load_legacy_snapshot(Some(&path), None).unwrap();
        assert_eq!(snap.inspections.len(), 2);
        assert!(snap.shipping.is_empty());

        let summary = summarize_legacy_snapshot(&snap);
        assert!(summary.contains("Inspections: 2"));
        assert!(summary.contains("2024/05/29"));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(
            load_legacy_snapshot(Some(&path), None),
            Err(Error::LegacyImport(_))
        ));
    }
}
