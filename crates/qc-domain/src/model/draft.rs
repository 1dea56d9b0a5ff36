//! In-progress form state for inspections and shipments

use qc_types::{
    Error, InspectionDetails, InspectionRecord, InspectionType, Result, TechnicalParameter,
    WeightMeasurements,
};

use super::parameters::process_template;

/// Inspection form contents before submission
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionDraft {
    pub inspector_name: String,
    pub material_id: String,
    pub batch_number: String,
    pub sector: String,
    pub comment: Option<String>,
    pub photo: Option<String>,
    pub details: InspectionDetails,
}

impl InspectionDraft {
    /// Blank process form with the canonical parameter set
    pub fn new_process() -> Self {
        Self::blank(InspectionDetails::Process {
            parameters: process_template(),
        })
    }

    /// Blank weight form, all measurements at zero and no manual bounds
    pub fn new_weight() -> Self {
        Self::blank(InspectionDetails::Weight(WeightMeasurements::default()))
    }

    pub fn new(kind: InspectionType) -> Self {
        match kind {
            InspectionType::Process => Self::new_process(),
            InspectionType::Weight => Self::new_weight(),
        }
    }

    /// Form pre-filled from a stored record, for editing
    pub fn from_record(record: &InspectionRecord) -> Self {
        Self {
            inspector_name: record.inspector_name.clone(),
            material_id: record.material_id.clone(),
            batch_number: record.batch_number.clone(),
            sector: record.sector.clone(),
            comment: record.comment.clone(),
            photo: record.photo.clone(),
            details: record.details.clone(),
        }
    }

    fn blank(details: InspectionDetails) -> Self {
        Self {
            inspector_name: String::new(),
            material_id: String::new(),
            batch_number: String::new(),
            sector: String::new(),
            comment: None,
            photo: None,
            details,
        }
    }

    pub fn kind(&self) -> InspectionType {
        self.details.kind()
    }

    /// Set a process parameter, replacing one with the same name or
    /// appending a new one
    pub fn set_parameter(&mut self, parameter: TechnicalParameter) -> Result<()> {
        let InspectionDetails::Process { parameters } = &mut self.details else {
            return Err(Error::InvalidInput(format!(
                "parameter '{}' only applies to process inspections",
                parameter.name
            )));
        };
        match parameters.iter_mut().find(|p| p.name == parameter.name) {
            Some(existing) => *existing = parameter,
            None => parameters.push(parameter),
        }
        Ok(())
    }

    /// Weight measurements, if this is a weight form
    pub fn weight_mut(&mut self) -> Option<&mut WeightMeasurements> {
        match &mut self.details {
            InspectionDetails::Weight(m) => Some(m),
            InspectionDetails::Process { .. } => None,
        }
    }
}

/// Shipping form contents before submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShippingDraft {
    pub invoice_number: String,
    pub pdv: String,
    pub batch_number: String,
    pub client: String,
    pub quantity: u32,
    pub photo: Option<String>,
}
