//! History export (Excel workbook or CSV)

pub mod excel;

use std::path::Path;

use qc_domain::service::DashboardSummary;
use qc_infra::csv_export::export_inspections_csv;
use qc_types::{Error, InspectionRecord, Result, ShippingRecord};

pub use excel::export_to_excel;

/// Export format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Csv,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx") => Ok(ExportFormat::Excel),
            Some("csv") => Ok(ExportFormat::Csv),
            _ => Err(Error::InvalidInput(format!(
                "unsupported export file '{}' (use .xlsx or .csv)",
                path.display()
            ))),
        }
    }
}

/// Write the history to `path`. CSV output holds inspections only.
pub fn export_history(
    path: &Path,
    summary: &DashboardSummary,
    inspections: &[InspectionRecord],
    shipments: &[ShippingRecord],
) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Excel => export_to_excel(summary, inspections, shipments, path)?,
        ExportFormat::Csv => export_inspections_csv(inspections, path)?,
    }
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("out/History.XLSX")).unwrap(),
            ExportFormat::Excel
        );
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("history.csv")).unwrap(),
            ExportFormat::Csv
        );
        assert!(ExportFormat::from_path(&PathBuf::from("history.pdf")).is_err());
    }
}
