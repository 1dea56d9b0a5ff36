//! Excel export functionality

use std::path::Path;

use qc_domain::service::{evaluate_weight, DashboardSummary};
use qc_types::{Error, InspectionRecord, Result, ShippingRecord};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

/// Export dashboard totals, inspections and shipments to an Excel file
pub fn export_to_excel(
    summary: &DashboardSummary,
    inspections: &[InspectionRecord],
    shipments: &[ShippingRecord],
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, summary)?;

    let inspections_sheet = workbook.add_worksheet();
    write_inspections_sheet(inspections_sheet, inspections)?;

    let shipping_sheet = workbook.add_worksheet();
    write_shipping_sheet(shipping_sheet, shipments)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    log::info!("exported workbook to {}", output_path.display());
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, summary: &DashboardSummary) -> Result<()> {
    sheet
        .set_name("Summary")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "QC Master Pro - Quality Summary", &header_format)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let rows: [(&str, f64); 7] = [
        ("Total inspections:", summary.total as f64),
        ("Approved:", summary.approved as f64),
        ("Rejected:", summary.rejected as f64),
        ("Quality rate (%):", summary.quality_rate_percent as f64),
        ("Process inspections:", summary.process_count as f64),
        ("Weight inspections:", summary.weight_count as f64),
        ("Shipments:", summary.shipping_count as f64),
    ];

    for (i, (label, value)) in rows.iter().enumerate() {
        let row = (i + 2) as u32;
        sheet
            .write_string(row, 0, *label)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 1, *value)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .set_column_width(0, 24)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }
    Ok(())
}

/// Writes nothing for NaN so the cell stays blank
fn write_finite(sheet: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<()> {
    if value.is_finite() {
        sheet
            .write_number(row, col, value)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }
    Ok(())
}

fn write_inspections_sheet(sheet: &mut Worksheet, records: &[InspectionRecord]) -> Result<()> {
    sheet
        .set_name("Inspections")
        .map_err(|e| Error::Excel(e.to_string()))?;

    write_headers(
        sheet,
        &[
            "Date",
            "Type",
            "Inspector",
            "Material",
            "Batch",
            "Sector",
            "Status",
            "Area (m²)",
            "Grammage (g/m²)",
            "Band Min",
            "Band Max",
            "Comment",
            "ID",
        ],
    )?;

    for (row_idx, record) in records.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, record.timestamp.format("%Y-%m-%d %H:%M").to_string())
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, record.kind().label())
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 2, &record.inspector_name)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 3, &record.material_id)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 4, &record.batch_number)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 5, &record.sector)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 6, record.status.label())
            .map_err(|e| Error::Excel(e.to_string()))?;

        // Weight-only columns
        if let Some(m) = record.weight() {
            let evaluation = evaluate_weight(m);
            write_finite(sheet, row, 7, evaluation.area)?;
            write_finite(sheet, row, 8, evaluation.grammage)?;
            write_finite(sheet, row, 9, evaluation.effective_band.min)?;
            write_finite(sheet, row, 10, evaluation.effective_band.max)?;
        }

        // Comment (truncate for Excel)
        let comment = record.comment.as_deref().unwrap_or("");
        let comment = if comment.chars().count() > 200 {
            format!("{}...", comment.chars().take(200).collect::<String>())
        } else {
            comment.to_string()
        };
        sheet
            .write_string(row, 11, &comment)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 12, &record.id)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .set_column_width(0, 17)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .set_column_width(2, 16)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .set_column_width(11, 40)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_shipping_sheet(sheet: &mut Worksheet, shipments: &[ShippingRecord]) -> Result<()> {
    sheet
        .set_name("Shipping")
        .map_err(|e| Error::Excel(e.to_string()))?;

    write_headers(
        sheet,
        &["Date", "Invoice", "PDV", "Batch", "Client", "Quantity", "ID"],
    )?;

    for (row_idx, shipment) in shipments.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, shipment.timestamp.format("%Y-%m-%d %H:%M").to_string())
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, &shipment.invoice_number)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 2, &shipment.pdv)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 3, &shipment.batch_number)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 4, &shipment.client)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 5, shipment.quantity as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 6, &shipment.id)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .set_column_width(4, 24)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}
