//! Dashboard statistics

use qc_types::{InspectionRecord, InspectionStatus, InspectionType};
use serde::{Deserialize, Serialize};

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    /// Approved share of all inspections, rounded to a whole percent
    pub quality_rate_percent: u32,
    pub process_count: usize,
    pub weight_count: usize,
    pub shipping_count: usize,
}

impl DashboardSummary {
    pub fn from_records(inspections: &[InspectionRecord], shipping_count: usize) -> Self {
        let total = inspections.len();
        let approved = count_status(inspections, InspectionStatus::Approved);
        let rejected = count_status(inspections, InspectionStatus::Rejected);
        let quality_rate_percent = if total > 0 {
            ((approved as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total,
            approved,
            rejected,
            quality_rate_percent,
            process_count: count_kind(inspections, InspectionType::Process),
            weight_count: count_kind(inspections, InspectionType::Weight),
            shipping_count,
        }
    }
}

fn count_status(records: &[InspectionRecord], status: InspectionStatus) -> usize {
    records.iter().filter(|r| r.status == status).count()
}

fn count_kind(records: &[InspectionRecord], kind: InspectionType) -> usize {
    records.iter().filter(|r| r.kind() == kind).count()
}

/// Render the dashboard as a text block
pub fn generate_dashboard_report(summary: &DashboardSummary) -> String {
    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("            Painel de Qualidade                   \n");
    report.push_str("            Quality Dashboard                     \n");
    report.push_str("==================================================\n\n");
    report.push_str(&format!("  Inspeções / Inspections:        {}\n", summary.total));
    report.push_str(&format!("  Aprovadas / Approved:           {}\n", summary.approved));
    report.push_str(&format!("  Reprovadas / Rejected:          {}\n", summary.rejected));
    report.push_str(&format!(
        "  Índice de qualidade / Quality:  {}%\n",
        summary.quality_rate_percent
    ));
    report.push_str(&format!("  Expedições / Shipments:         {}\n", summary.shipping_count));
    report.push('\n');
    report.push_str("[ Por tipo / By kind ]\n");
    report.push_str(&format!(
        "  {:<28} {:>6}\n",
        InspectionType::Process.label(),
        summary.process_count
    ));
    report.push_str(&format!(
        "  {:<28} {:>6}\n",
        InspectionType::Weight.label(),
        summary.weight_count
    ));
    report.push_str(&format!(
        "\n  {}\n",
        status_bar(summary.approved, summary.rejected, 40)
    ));
    report.push_str("==================================================\n");
    report
}

/// Horizontal approved/rejected bar, `#` approved and `.` rejected
fn status_bar(approved: usize, rejected: usize, width: usize) -> String {
    let total = approved + rejected;
    if total == 0 {
        return format!("[{}]", " ".repeat(width));
    }
    let filled = ((approved as f64 / total as f64) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}
