//! Output formatting module

use qc_domain::service::{evaluate_weight, generate_dashboard_report, DashboardSummary};
use qc_infra::legacy_importer::ImportResult;
use qc_types::{InspectionRecord, OutputFormat, Result, ShippingRecord};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

/// Confirmation after a submit or edit
pub fn output_record(
    output_format: OutputFormat,
    record: &InspectionRecord,
    edited: bool,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!(
        "\n{} {} inspection",
        if edited { "Updated" } else { "Saved" },
        record.kind().label_en()
    );
    println!("================");
    println!("ID:        {}", record.id);
    println!("Date:      {}", record.timestamp.format("%Y-%m-%d %H:%M"));
    println!("Inspector: {}", or_dash(&record.inspector_name));
    println!("Material:  {}", or_dash(&record.material_id));
    println!("Batch:     {}", or_dash(&record.batch_number));

    if let Some(m) = record.weight() {
        let evaluation = evaluate_weight(m);
        println!("Area:      {:.4} m²", evaluation.area);
        println!("Grammage:  {:.2} g/m²", evaluation.grammage);
        println!(
            "Band:      {} .. {} g/m²",
            evaluation.effective_band.min, evaluation.effective_band.max
        );
    }

    println!(
        "Status:    {} ({})",
        record.status.label(),
        record.status.label_en()
    );
    Ok(())
}

pub fn output_history(
    output_format: OutputFormat,
    records: &[InspectionRecord],
    total: usize,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    println!("Inspection History");
    println!("==================");
    println!("Showing {} of {} inspections", records.len(), total);
    println!();

    if records.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    println!(
        "{:<36} {:<11} {:<10} {:<16} {:<12} {:<14} {:<10}",
        "ID", "Date", "Type", "Inspector", "Material", "Batch", "Status"
    );
    println!("{}", "-".repeat(115));

    for record in records {
        println!(
            "{:<36} {:<11} {:<10} {:<16} {:<12} {:<14} {:<10}",
            record.id,
            record.timestamp.format("%m/%d %H:%M").to_string(),
            record.kind().label(),
            truncate(or_dash(&record.inspector_name), 16),
            truncate(or_dash(&record.material_id), 12),
            truncate(or_dash(&record.batch_number), 14),
            record.status.label()
        );
    }

    Ok(())
}

pub fn output_shipments(
    output_format: OutputFormat,
    shipments: &[ShippingRecord],
    total: usize,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(shipments)?);
        return Ok(());
    }

    println!("Shipping Log");
    println!("============");
    println!("Showing {} of {} shipments", shipments.len(), total);
    println!();

    if shipments.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    println!(
        "{:<11} {:<12} {:<10} {:<14} {:<24} {:>8}",
        "Date", "Invoice", "PDV", "Batch", "Client", "Qty"
    );
    println!("{}", "-".repeat(84));

    for shipment in shipments {
        println!(
            "{:<11} {:<12} {:<10} {:<14} {:<24} {:>8}",
            shipment.timestamp.format("%m/%d %H:%M").to_string(),
            truncate(or_dash(&shipment.invoice_number), 12),
            truncate(or_dash(&shipment.pdv), 10),
            truncate(or_dash(&shipment.batch_number), 14),
            truncate(or_dash(&shipment.client), 24),
            shipment.quantity
        );
    }

    Ok(())
}

pub fn output_dashboard(output_format: OutputFormat, summary: &DashboardSummary) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print!("{}", generate_dashboard_report(summary));
    }
    Ok(())
}

pub fn output_import_result(result: &ImportResult, dry_run: bool) {
    println!();
    if dry_run {
        println!("[DRY RUN] Import summary:");
        println!("  Would import inspections: {}", result.inspections_imported);
        println!("  Would import shipments:   {}", result.shipping_imported);
        println!("  Would skip (duplicates):  {}", result.skipped);
    } else {
        println!("Import complete:");
        println!("  Inspections imported: {}", result.inspections_imported);
        println!("  Shipments imported:   {}", result.shipping_imported);
        println!("  Skipped (duplicates): {}", result.skipped);
    }
    println!("  Errors: {}", result.errors.len());
    for error in &result.errors {
        eprintln!("  - {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Colagem", 12), "Colagem");
        assert_eq!(truncate("Indústria Moveleira Sul", 10), "Indústr...");
    }
}
