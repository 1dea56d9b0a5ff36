//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use qc_types::numeric::parse_lenient;
use qc_types::{InspectionStatus, InspectionType, OutputFormat, TechnicalParameter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qc-checker")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Quality-control inspection records: process checks, grammage, shipping")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory override. Uses config value if not specified.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Header fields shared by both inspection kinds.
///
/// When editing, only the fields given on the command line replace the
/// stored values.
#[derive(Args, Debug, Clone, Default)]
pub struct InspectionHeader {
    /// Inspector name
    #[arg(long, short = 'i')]
    pub inspector: Option<String>,

    /// Material identifier (e.g., "MDF-18")
    #[arg(long, short = 'm')]
    pub material: Option<String>,

    /// Batch / lot number
    #[arg(long, short = 'b')]
    pub batch: Option<String>,

    /// Production sector (e.g., "Prensa")
    #[arg(long, short = 's')]
    pub sector: Option<String>,

    /// Free-text remarks
    #[arg(long, short = 'c')]
    pub comment: Option<String>,

    /// Photo attachment (jpg, png, gif, webp, bmp)
    #[arg(long)]
    pub photo: Option<PathBuf>,

    /// Edit the record with this id instead of creating a new one
    #[arg(long)]
    pub edit: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a process inspection
    Process {
        #[command(flatten)]
        header: InspectionHeader,

        /// Parameter as NAME=MIN:MAX:ACTUAL, or NAME=na for not applicable.
        /// Repeatable; replaces a canonical parameter with the same name.
        #[arg(long = "param", short = 'p', value_parser = parse_param_spec)]
        params: Vec<TechnicalParameter>,
    },

    /// Submit a weight (grammage) inspection
    Weight {
        #[command(flatten)]
        header: InspectionHeader,

        /// Sample length (m)
        #[arg(long, value_parser = parse_number)]
        length: Option<f64>,

        /// Sample width (m)
        #[arg(long, value_parser = parse_number)]
        width: Option<f64>,

        /// Board thickness (mm)
        #[arg(long, short = 't', value_parser = parse_number)]
        thickness: Option<f64>,

        /// Humidity (%)
        #[arg(long, value_parser = parse_number)]
        humidity: Option<f64>,

        /// Sample mass with glue (g)
        #[arg(long, value_parser = parse_number)]
        glued: Option<f64>,

        /// Sample mass without glue (g)
        #[arg(long, value_parser = parse_number)]
        unglued: Option<f64>,

        /// Press temperature (°C)
        #[arg(long, value_parser = parse_number)]
        press_temp: Option<f64>,

        /// Press time (s)
        #[arg(long, value_parser = parse_number)]
        press_time: Option<f64>,

        /// Manual lower grammage bound (g/m²), replaces the table value
        #[arg(long, value_parser = parse_number)]
        manual_min: Option<f64>,

        /// Manual upper grammage bound (g/m²), replaces the table value
        #[arg(long, value_parser = parse_number)]
        manual_max: Option<f64>,

        /// Drop stored manual bounds when editing
        #[arg(long, conflicts_with_all = ["manual_min", "manual_max"])]
        clear_manual: bool,
    },

    /// Show inspection history (newest first)
    History {
        /// Only this inspection type
        #[arg(long, short = 'k')]
        kind: Option<InspectionType>,

        /// Only this status
        #[arg(long)]
        status: Option<InspectionStatus>,

        /// Limit number of entries shown. Uses config value if not specified.
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Print the report for one inspection
    Report {
        /// Inspection id
        id: String,

        /// Write the attached photo to this path
        #[arg(long)]
        save_photo: Option<PathBuf>,
    },

    /// Delete an inspection
    Delete {
        /// Inspection id
        id: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show totals and quality rate
    Dashboard,

    /// Record a shipment
    Ship {
        /// Invoice number (NF)
        #[arg(long)]
        invoice: String,

        /// Purchase order / point of sale reference
        #[arg(long)]
        pdv: String,

        /// Batch / lot number
        #[arg(long, short = 'b')]
        batch: String,

        /// Client name
        #[arg(long)]
        client: String,

        /// Shipped quantity (pieces)
        #[arg(long, short = 'q')]
        quantity: u32,

        /// Photo attachment
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Show the shipping log (newest first)
    Shipping {
        /// Limit number of entries shown. Uses config value if not specified.
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Export history to Excel (.xlsx) or CSV (.csv)
    Export {
        /// Output file; the extension selects the format
        output: PathBuf,
    },

    /// Import snapshots saved by the legacy browser app
    Import {
        /// JSON array from the `qc_inspections` key
        #[arg(long)]
        inspections: Option<PathBuf>,

        /// JSON array from the `qc_shipping` key
        #[arg(long)]
        shipping: Option<PathBuf>,

        /// Show what would be imported without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default history limit
        #[arg(long)]
        set_history_limit: Option<usize>,

        /// Enable/disable delete confirmation
        #[arg(long)]
        set_confirm_deletes: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Numeric form input; text that is not a number becomes NaN
pub fn parse_number(input: &str) -> Result<f64, String> {
    Ok(parse_lenient(input))
}

/// Parse `NAME=MIN:MAX:ACTUAL` or `NAME=na`
pub fn parse_param_spec(input: &str) -> Result<TechnicalParameter, String> {
    let (name, values) = input
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=MIN:MAX:ACTUAL or NAME=na, got '{}'", input))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("parameter name is empty".to_string());
    }

    let values = values.trim();
    if values.eq_ignore_ascii_case("na") || values.eq_ignore_ascii_case("n/a") {
        return Ok(TechnicalParameter::not_applicable(name));
    }

    let parts: Vec<&str> = values.split(':').collect();
    let [min, max, actual] = parts.as_slice() else {
        return Err(format!(
            "parameter '{}' needs MIN:MAX:ACTUAL, got '{}'",
            name, values
        ));
    };
    Ok(TechnicalParameter::new(
        name,
        parse_lenient(min),
        parse_lenient(max),
        parse_lenient(actual),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_param_spec() {
        let p = parse_param_spec("Umidade=6:10:8.5").unwrap();
        assert_eq!(p, TechnicalParameter::new("Umidade", 6.0, 10.0, 8.5));

        let na = parse_param_spec("Esquadro=NA").unwrap();
        assert!(na.not_applicable);
        assert_eq!(na.name, "Esquadro");
    }

    #[test]
    fn test_parse_param_spec_lenient_values() {
        let p = parse_param_spec("Largura=1200:1210:abc").unwrap();
        assert!(p.actual.is_nan());
        assert!(!p.not_applicable);
    }

    #[test]
    fn test_parse_param_spec_errors() {
        assert!(parse_param_spec("Umidade").is_err());
        assert!(parse_param_spec("=1:2:3").is_err());
        assert!(parse_param_spec("Umidade=1:2").is_err());
    }

    #[test]
    fn test_weight_args() {
        let cli = Cli::try_parse_from([
            "qc-checker",
            "weight",
            "--thickness",
            "1.5",
            "--glued",
            "quatrocentos",
            "--manual-max",
            "280",
        ])
        .unwrap();
        match cli.command {
            Commands::Weight {
                thickness,
                glued,
                manual_max,
                manual_min,
                ..
            } => {
                assert_eq!(thickness, Some(1.5));
                assert!(glued.unwrap().is_nan());
                assert_eq!(manual_max, Some(280.0));
                assert_eq!(manual_min, None);
            }
            _ => panic!("expected weight command"),
        }
    }
}
