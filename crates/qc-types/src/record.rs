//! Inspection and shipping record definitions

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::numeric::{nan_if_null, present_nan_if_null};

/// Records addressable by a stable id
pub trait Identified {
    fn id(&self) -> &str;
}

/// Kind of inspection, fixed when the record is created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionType {
    /// Process inspection (dimensional / technical parameters)
    Process,
    /// Weight inspection (grammage)
    Weight,
}

impl InspectionType {
    pub fn label(&self) -> &'static str {
        match self {
            InspectionType::Process => "Processo",
            InspectionType::Weight => "Gramatura",
        }
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            InspectionType::Process => "process",
            InspectionType::Weight => "weight",
        }
    }
}

impl std::fmt::Display for InspectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label_en())
    }
}

/// Pass/fail classification stored at submit time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
    Approved,
    Rejected,
}

impl InspectionStatus {
    pub fn from_pass(pass: bool) -> Self {
        if pass {
            InspectionStatus::Approved
        } else {
            InspectionStatus::Rejected
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, InspectionStatus::Approved)
    }

    pub fn label(&self) -> &'static str {
        match self {
            InspectionStatus::Approved => "Aprovado",
            InspectionStatus::Rejected => "Reprovado",
        }
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            InspectionStatus::Approved => "approved",
            InspectionStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label_en())
    }
}

/// A named measurement with its tolerance bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalParameter {
    pub name: String,
    #[serde(deserialize_with = "nan_if_null")]
    pub min: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub max: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub actual: f64,
    /// When set, min/max/actual are ignored by evaluation
    #[serde(default)]
    pub not_applicable: bool,
}

impl TechnicalParameter {
    pub fn new(name: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            actual,
            not_applicable: false,
        }
    }

    /// Parameter excluded from evaluation
    pub fn not_applicable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min: 0.0,
            max: 0.0,
            actual: 0.0,
            not_applicable: true,
        }
    }
}

/// Raw measurements of a weight (grammage) inspection.
///
/// Area and grammage are not stored; they are derived from these values
/// whenever needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightMeasurements {
    /// Sample length (m)
    #[serde(deserialize_with = "nan_if_null")]
    pub length: f64,
    /// Sample width (m)
    #[serde(deserialize_with = "nan_if_null")]
    pub width: f64,
    /// Board thickness (mm), selects the default tolerance band
    #[serde(deserialize_with = "nan_if_null")]
    pub thickness: f64,
    /// Humidity (%)
    #[serde(deserialize_with = "nan_if_null")]
    pub humidity: f64,
    /// Mass with glue (g)
    #[serde(deserialize_with = "nan_if_null")]
    pub glued_mass: f64,
    /// Mass without glue (g)
    #[serde(deserialize_with = "nan_if_null")]
    pub unglued_mass: f64,
    /// Press temperature (°C)
    #[serde(deserialize_with = "nan_if_null")]
    pub press_temperature: f64,
    /// Pressing time (s)
    #[serde(deserialize_with = "nan_if_null")]
    pub press_time: f64,
    /// Manual lower bound replacing the thickness band minimum
    #[serde(
        default,
        deserialize_with = "present_nan_if_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_min: Option<f64>,
    /// Manual upper bound replacing the thickness band maximum
    #[serde(
        default,
        deserialize_with = "present_nan_if_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_max: Option<f64>,
}

/// Kind-specific payload of an inspection.
///
/// The variant is the record kind, so a record cannot change kind without
/// being rebuilt from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InspectionDetails {
    Process { parameters: Vec<TechnicalParameter> },
    Weight(WeightMeasurements),
}

impl InspectionDetails {
    pub fn kind(&self) -> InspectionType {
        match self {
            InspectionDetails::Process { .. } => InspectionType::Process,
            InspectionDetails::Weight(_) => InspectionType::Weight,
        }
    }
}

/// A submitted inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    /// Stable id, assigned at creation
    pub id: String,
    /// Creation time, preserved across edits
    pub timestamp: DateTime<Utc>,
    pub inspector_name: String,
    pub material_id: String,
    pub batch_number: String,
    pub sector: String,
    #[serde(flatten)]
    pub details: InspectionDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Photo as a data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub status: InspectionStatus,
}

impl InspectionRecord {
    pub fn kind(&self) -> InspectionType {
        self.details.kind()
    }

    /// Process parameters, if this is a process inspection
    pub fn process_parameters(&self) -> Option<&[TechnicalParameter]> {
        match &self.details {
            InspectionDetails::Process { parameters } => Some(parameters),
            InspectionDetails::Weight(_) => None,
        }
    }

    /// Weight measurements, if this is a weight inspection
    pub fn weight(&self) -> Option<&WeightMeasurements> {
        match &self.details {
            InspectionDetails::Weight(m) => Some(m),
            InspectionDetails::Process { .. } => None,
        }
    }
}

impl Identified for InspectionRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A shipment leaving the plant. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRecord {
    pub id: String,
    /// Invoice (nota fiscal) number
    pub invoice_number: String,
    /// Purchase order / point-of-sale reference
    pub pdv: String,
    pub batch_number: String,
    pub client: String,
    pub quantity: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Identified for ShippingRecord {
    fn id(&self) -> &str {
        &self.id
    }
}
