//! Canonical parameter names

use qc_types::TechnicalParameter;

pub const LENGTH: &str = "Comprimento";
pub const WIDTH: &str = "Largura";
pub const HUMIDITY: &str = "Umidade";
pub const STRAIGHTNESS: &str = "Retilineidade";
pub const SQUARENESS: &str = "Esquadro";
pub const THICKNESS: &str = "Espessura";
pub const GRAMMAGE: &str = "Gramatura";

/// Parameters offered on a new process inspection, in display order
pub const PROCESS_PARAMETER_NAMES: [&str; 6] =
    [LENGTH, WIDTH, HUMIDITY, STRAIGHTNESS, SQUARENESS, THICKNESS];

/// Blank process parameter set: all applicable, all bounds and values at zero
pub fn process_template() -> Vec<TechnicalParameter> {
    PROCESS_PARAMETER_NAMES
        .iter()
        .map(|name| TechnicalParameter::new(*name, 0.0, 0.0, 0.0))
        .collect()
}
