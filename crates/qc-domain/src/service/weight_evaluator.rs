//! Grammage calculation and pass/fail rule for weight inspections

use qc_types::{InspectionStatus, WeightMeasurements};
use serde::{Deserialize, Serialize};

/// Inclusive grammage tolerance interval (g/m²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    pub min: f64,
    pub max: f64,
}

impl ToleranceBand {
    /// Band used when the thickness matches no table row
    pub const UNDEFINED: ToleranceBand = ToleranceBand { min: 0.0, max: 0.0 };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// One row of the thickness table. The upper bound is always inclusive.
struct ThicknessRange {
    low: f64,
    low_inclusive: bool,
    high: f64,
    band: ToleranceBand,
}

impl ThicknessRange {
    fn matches(&self, thickness: f64) -> bool {
        let above_low = if self.low_inclusive {
            thickness >= self.low
        } else {
            thickness > self.low
        };
        above_low && thickness <= self.high
    }
}

/// Default bands by thickness (mm). Rows are tested in order.
const THICKNESS_TABLE: [ThicknessRange; 3] = [
    ThicknessRange {
        low: 1.3,
        low_inclusive: true,
        high: 1.7,
        band: ToleranceBand::new(360.0, 380.9),
    },
    ThicknessRange {
        low: 1.8,
        low_inclusive: true,
        high: 2.1,
        band: ToleranceBand::new(381.0, 400.9),
    },
    ThicknessRange {
        low: 2.1,
        low_inclusive: false,
        high: f64::INFINITY,
        band: ToleranceBand::new(401.0, 425.9),
    },
];

/// Default tolerance band for a thickness.
///
/// Thicknesses below 1.3, in the gap (1.7, 1.8), or NaN get
/// [`ToleranceBand::UNDEFINED`].
pub fn default_band(thickness: f64) -> ToleranceBand {
    THICKNESS_TABLE
        .iter()
        .find(|row| row.matches(thickness))
        .map(|row| row.band)
        .unwrap_or(ToleranceBand::UNDEFINED)
}

/// Sample area: length × width
pub fn calculate_area(length: f64, width: f64) -> f64 {
    length * width
}

/// Areal density of the glue layer: (glued − unglued) / area.
///
/// Returns 0 when the area is not positive.
pub fn calculate_grammage(glued_mass: f64, unglued_mass: f64, area: f64) -> f64 {
    if area > 0.0 {
        (glued_mass - unglued_mass) / area
    } else {
        0.0
    }
}

/// Everything derived from a weight inspection's measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightEvaluation {
    pub area: f64,
    pub grammage: f64,
    /// Band selected by thickness
    pub default_band: ToleranceBand,
    /// Band actually applied after manual overrides
    pub effective_band: ToleranceBand,
    pub status: InspectionStatus,
}

/// Derive area and grammage and judge grammage against the effective band.
///
/// Manual bounds, when present, replace the corresponding default bound
/// independently of each other.
pub fn evaluate_weight(measurements: &WeightMeasurements) -> WeightEvaluation {
    let area = calculate_area(measurements.length, measurements.width);
    let grammage = calculate_grammage(measurements.glued_mass, measurements.unglued_mass, area);
    let default_band = default_band(measurements.thickness);
    let effective_band = ToleranceBand {
        min: measurements.manual_min.unwrap_or(default_band.min),
        max: measurements.manual_max.unwrap_or(default_band.max),
    };
    let status = InspectionStatus::from_pass(effective_band.contains(grammage));

    WeightEvaluation {
        area,
        grammage,
        default_band,
        effective_band,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(thickness: f64, glued: f64) -> WeightMeasurements {
        WeightMeasurements {
            length: 1.0,
            width: 1.0,
            thickness,
            glued_mass: glued,
            unglued_mass: 30.0,
            ..Default::default()
        }
    }

    // ==========================================
    // Thickness table
    // ==========================================

    #[test]
    fn test_band_boundaries() {
        assert_eq!(default_band(1.3), ToleranceBand::new(360.0, 380.9));
        assert_eq!(default_band(1.7), ToleranceBand::new(360.0, 380.9));
        assert_eq!(default_band(1.8), ToleranceBand::new(381.0, 400.9));
        assert_eq!(default_band(2.1), ToleranceBand::new(381.0, 400.9));
        assert_eq!(default_band(2.1000001), ToleranceBand::new(401.0, 425.9));
        assert_eq!(default_band(9.0), ToleranceBand::new(401.0, 425.9));
    }

    #[test]
    fn test_band_outside_table() {
        assert_eq!(default_band(1.29), ToleranceBand::UNDEFINED);
        assert_eq!(default_band(1.75), ToleranceBand::UNDEFINED);
        assert_eq!(default_band(0.0), ToleranceBand::UNDEFINED);
        assert_eq!(default_band(f64::NAN), ToleranceBand::UNDEFINED);
    }

    // ==========================================
    // Decision
    // ==========================================

    #[test]
    fn test_grammage_within_default_band() {
        let eval = evaluate_weight(&sample(1.5, 400.0));
        assert!((eval.area - 1.0).abs() < f64::EPSILON);
        assert!((eval.grammage - 370.0).abs() < 1e-9);
        assert_eq!(eval.default_band, ToleranceBand::new(360.0, 380.9));
        assert_eq!(eval.status, InspectionStatus::Approved);
    }

    #[test]
    fn test_grammage_below_default_band() {
        let eval = evaluate_weight(&sample(1.5, 300.0));
        assert!((eval.grammage - 270.0).abs() < 1e-9);
        assert_eq!(eval.status, InspectionStatus::Rejected);
    }

    #[test]
    fn test_manual_band_takes_precedence() {
        let mut m = sample(1.5, 300.0);
        m.manual_min = Some(200.0);
        m.manual_max = Some(280.0);
        let eval = evaluate_weight(&m);
        assert_eq!(eval.effective_band, ToleranceBand::new(200.0, 280.0));
        assert_eq!(eval.status, InspectionStatus::Approved);
    }

    #[test]
    fn test_single_manual_bound_keeps_other_default() {
        let mut m = sample(1.5, 400.0);
        m.manual_max = Some(365.0);
        let eval = evaluate_weight(&m);
        assert_eq!(eval.effective_band, ToleranceBand::new(360.0, 365.0));
        assert_eq!(eval.status, InspectionStatus::Rejected);
    }

    #[test]
    fn test_explicit_zero_override_is_honoured() {
        // grammage 0 with a manual band of [0, 0] passes
        let m = WeightMeasurements {
            thickness: 1.5,
            manual_min: Some(0.0),
            manual_max: Some(0.0),
            ..Default::default()
        };
        let eval = evaluate_weight(&m);
        assert_eq!(eval.effective_band, ToleranceBand::new(0.0, 0.0));
        assert_eq!(eval.status, InspectionStatus::Approved);
    }

    #[test]
    fn test_zero_area_has_zero_grammage() {
        let m = WeightMeasurements {
            length: 0.0,
            width: 2.0,
            thickness: 1.5,
            glued_mass: 400.0,
            unglued_mass: 30.0,
            ..Default::default()
        };
        let eval = evaluate_weight(&m);
        assert_eq!(eval.area, 0.0);
        assert_eq!(eval.grammage, 0.0);
        assert_eq!(eval.status, InspectionStatus::Rejected);
    }

    #[test]
    fn test_negative_area_has_zero_grammage() {
        assert_eq!(calculate_grammage(400.0, 30.0, -2.0), 0.0);
    }

    #[test]
    fn test_undefined_band_with_zero_grammage_passes() {
        // thickness outside the table gives [0, 0]; zero area gives grammage 0
        let eval = evaluate_weight(&WeightMeasurements::default());
        assert_eq!(eval.default_band, ToleranceBand::UNDEFINED);
        assert_eq!(eval.status, InspectionStatus::Approved);
    }

    #[test]
    fn test_nan_mass_fails() {
        let mut m = sample(1.5, f64::NAN);
        m.manual_min = Some(0.0);
        let eval = evaluate_weight(&m);
        assert!(eval.grammage.is_nan());
        assert_eq!(eval.status, InspectionStatus::Rejected);
    }

    #[test]
    fn test_area_scaling() {
        let m = WeightMeasurements {
            length: 0.5,
            width: 0.4,
            thickness: 2.0,
            glued_mass: 110.0,
            unglued_mass: 32.0,
            ..Default::default()
        };
        let eval = evaluate_weight(&m);
        assert!((eval.area - 0.2).abs() < 1e-12);
        assert!((eval.grammage - 390.0).abs() < 1e-9);
        assert_eq!(eval.status, InspectionStatus::Approved);
    }
}
