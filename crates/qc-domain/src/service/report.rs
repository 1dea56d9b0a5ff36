//! Printable inspection report

use qc_types::{InspectionDetails, InspectionRecord, TechnicalParameter, WeightMeasurements};

use super::process_evaluator::parameter_verdict;
use super::weight_evaluator::evaluate_weight;

const WIDTH: usize = 70;

/// Render a record as a fixed-layout conformity report.
///
/// The headline verdict is the status stored on the record.
pub fn generate_inspection_report(record: &InspectionRecord) -> String {
    let mut report = String::new();
    report.push_str(&"=".repeat(WIDTH));
    report.push('\n');
    report.push_str("  QC MASTER PRO\n");
    report.push_str("  Laudo Técnico de Conformidade / Conformity Report\n");
    report.push_str(&"=".repeat(WIDTH));
    report.push('\n');

    let verdict = if record.status.is_approved() {
        "CONFORME / CONFORMING"
    } else {
        "NÃO CONFORME / NON-CONFORMING"
    };
    report.push_str(&format!("  Resultado / Result:   {}\n", verdict));
    report.push_str(&format!("  ID:                   {}\n", record.id));
    report.push_str(&format!(
        "  Tipo / Kind:          {}\n\n",
        record.kind().label()
    ));

    report.push_str("[ Resumo da Inspeção / Summary ]\n");
    report.push_str(&format!(
        "  Data / Date:          {}\n",
        record.timestamp.format("%Y-%m-%d %H:%M")
    ));
    report.push_str(&format!("  Material:             {}\n", record.material_id));
    report.push_str(&format!("  Lote / Batch:         {}\n", record.batch_number));
    report.push_str(&format!("  Setor / Sector:       {}\n", record.sector));
    report.push_str(&format!("  Inspetor / Inspector: {}\n", record.inspector_name));
    if record.photo.is_some() {
        report.push_str("  Evidência fotográfica anexa / Photo attached\n");
    }
    report.push('\n');

    report.push_str("[ Detalhamento dos Parâmetros / Parameters ]\n");
    report.push_str(&"-".repeat(WIDTH));
    report.push('\n');
    report.push_str(&format!(
        "{:<22} {:>10} {:>10} {:>12} {:>12}\n",
        "Indicador", "Mínimo", "Máximo", "Valor Real", "Resultado"
    ));
    report.push_str(&"-".repeat(WIDTH));
    report.push('\n');
    match &record.details {
        InspectionDetails::Process { parameters } => {
            for parameter in parameters {
                report.push_str(&process_row(parameter));
            }
        }
        InspectionDetails::Weight(m) => {
            report.push_str(&weight_rows(m));
        }
    }
    report.push_str(&"-".repeat(WIDTH));
    report.push('\n');

    if let Some(ref comment) = record.comment {
        report.push_str("\n[ Parecer Técnico / Remarks ]\n");
        report.push_str(&format!("  \"{}\"\n", comment));
    }

    report.push('\n');
    report.push_str(&format!(
        "  {:<32} {}\n",
        "______________________________", "______________________________"
    ));
    report.push_str(&format!(
        "  {:<32} {}\n",
        "Inspetor Responsável", "Supervisor de Qualidade"
    ));
    report.push_str(&format!("  {:<32} {}\n", record.inspector_name, "Assinatura / Carimbo"));
    report.push_str(&"=".repeat(WIDTH));
    report.push('\n');
    report
}

fn process_row(p: &TechnicalParameter) -> String {
    match parameter_verdict(p) {
        None => format!(
            "{:<22} {:>10} {:>10} {:>12} {:>12}\n",
            truncate_str(&p.name, 21),
            "-",
            "-",
            "N.A.",
            "-"
        ),
        Some(pass) => format!(
            "{:<22} {:>10} {:>10} {:>12} {:>12}\n",
            truncate_str(&p.name, 21),
            format_value(p.min),
            format_value(p.max),
            format_value(p.actual),
            if pass { "APROVADO" } else { "REPROVADO" }
        ),
    }
}

fn weight_rows(m: &WeightMeasurements) -> String {
    let eval = evaluate_weight(m);
    let mut rows = String::new();
    let plain = [
        ("Comprimento (m)", m.length),
        ("Largura (m)", m.width),
        ("Área (m²)", eval.area),
        ("Espessura (mm)", m.thickness),
        ("Umidade (%)", m.humidity),
        ("Peso Sem Cola (g)", m.unglued_mass),
        ("Peso Com Cola (g)", m.glued_mass),
        ("T. Prensa (°C)", m.press_temperature),
        ("Tempo Prensagem (s)", m.press_time),
    ];
    for (label, value) in plain {
        rows.push_str(&format!(
            "{:<22} {:>10} {:>10} {:>12} {:>12}\n",
            label,
            "-",
            "-",
            format_value(value),
            "-"
        ));
    }
    rows.push_str(&format!(
        "{:<22} {:>10} {:>10} {:>12.2} {:>12}\n",
        "GRAMATURA (g/m²)",
        format_value(eval.effective_band.min),
        format_value(eval.effective_band.max),
        eval.grammage,
        eval.status.label().to_uppercase()
    ));
    if m.manual_min.is_some() || m.manual_max.is_some() {
        rows.push_str(&format!(
            "  (faixa manual / manual band; padrão / default {} - {})\n",
            format_value(eval.default_band.min),
            format_value(eval.default_band.max)
        ));
    }
    rows
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "inválido".to_string()
    } else {
        format!("{}", value)
    }
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use qc_types::InspectionStatus;

    fn process_record() -> InspectionRecord {
        InspectionRecord {
            id: "abc-123".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 2, 14, 9, 5, 0).unwrap(),
            inspector_name: "Ana".to_string(),
            material_id: "MDF-18".to_string(),
            batch_number: "L-204".to_string(),
            sector: "Prensa".to_string(),
            details: InspectionDetails::Process {
                parameters: vec![
                    TechnicalParameter::new("Comprimento", 2740.0, 2760.0, 2750.0),
                    TechnicalParameter::new("Umidade", 6.0, 10.0, 12.0),
                    TechnicalParameter::not_applicable("Esquadro"),
                ],
            },
            comment: Some("Lote com umidade alta".to_string()),
            photo: Some("data:image/png;base64,AAAA".to_string()),
            status: InspectionStatus::Rejected,
        }
    }

    #[test]
    fn test_process_report_rows() {
        let report = generate_inspection_report(&process_record());
        assert!(report.contains("NÃO CONFORME"));
        assert!(report.contains("abc-123"));
        assert!(report.contains("2024-02-14 09:05"));
        assert!(report.contains("APROVADO"));
        assert!(report.contains("REPROVADO"));
        assert!(report.contains("N.A."));
        assert!(report.contains("Lote com umidade alta"));
        assert!(report.contains("Photo attached"));
    }

    #[test]
    fn test_weight_report_rows() {
        let mut record = process_record();
        record.details = InspectionDetails::Weight(WeightMeasurements {
            length: 1.0,
            width: 1.0,
            thickness: 1.5,
            glued_mass: 400.0,
            unglued_mass: 30.0,
            ..Default::default()
        });
        record.status = InspectionStatus::Approved;
        record.comment = None;
        record.photo = None;

        let report = generate_inspection_report(&record);
        assert!(report.contains("CONFORME / CONFORMING"));
        assert!(report.contains("GRAMATURA"));
        assert!(report.contains("370.00"));
        assert!(report.contains("380.9"));
        assert!(report.contains("APROVADO"));
        assert!(!report.contains("manual band"));
        assert!(!report.contains("Remarks"));
    }

    #[test]
    fn test_manual_band_noted() {
        let mut record = process_record();
        record.details = InspectionDetails::Weight(WeightMeasurements {
            thickness: 1.5,
            manual_min: Some(200.0),
            manual_max: Some(280.0),
            ..Default::default()
        });
        let report = generate_inspection_report(&record);
        assert!(report.contains("manual band"));
        assert!(report.contains("360 - 380.9"));
    }

    #[test]
    fn test_nan_value_rendered() {
        assert_eq!(format_value(f64::NAN), "inválido");
        assert_eq!(format_value(2.5), "2.5");
    }
}
