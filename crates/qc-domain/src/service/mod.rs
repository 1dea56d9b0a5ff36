//! Domain services

pub mod dashboard;
pub mod process_evaluator;
pub mod record_builder;
pub mod report;
pub mod weight_evaluator;

pub use dashboard::{generate_dashboard_report, DashboardSummary};
pub use process_evaluator::{evaluate_process, parameter_verdict};
pub use record_builder::{
    create_record, create_shipment, edit_record, evaluate_details, record_parameters,
};
pub use report::generate_inspection_report;
pub use weight_evaluator::{default_band, evaluate_weight, ToleranceBand, WeightEvaluation};
