//! Pass/fail rule for process inspections

use qc_types::{InspectionStatus, TechnicalParameter};

/// Verdict for a single parameter: `None` when not applicable, otherwise
/// whether `min <= actual <= max`.
///
/// Any NaN in the comparison makes the parameter fail.
pub fn parameter_verdict(parameter: &TechnicalParameter) -> Option<bool> {
    if parameter.not_applicable {
        return None;
    }
    Some(parameter.min <= parameter.actual && parameter.actual <= parameter.max)
}

/// Approved when every applicable parameter is within its bounds.
///
/// A set with no applicable parameters is approved.
pub fn evaluate_process(parameters: &[TechnicalParameter]) -> InspectionStatus {
    let any_out_of_band = parameters
        .iter()
        .any(|p| parameter_verdict(p) == Some(false));
    InspectionStatus::from_pass(!any_out_of_band)
}
