//! Command handlers

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands, InspectionHeader};
use crate::output::{
    output_dashboard, output_history, output_import_result, output_record, output_shipments,
};
use qc_app::app::{DeleteOutcome, FileQcApp, HistoryFilter};
use qc_app::config::Config;
use qc_app::export::export_history;
use qc_domain::model::{InspectionDraft, ShippingDraft};
use qc_domain::repository::InspectionRepository;
use qc_infra::legacy_importer::{load_legacy_snapshot, summarize_legacy_snapshot};
use qc_infra::photo::{decode_photo, encode_photo, extension_for_mime};
use qc_types::{
    Error, InspectionRecord, InspectionStatus, InspectionType, OutputFormat, Result,
    TechnicalParameter,
};

/// Weight measurement flags; `None` keeps the form value
#[derive(Debug, Default)]
struct WeightInput {
    length: Option<f64>,
    width: Option<f64>,
    thickness: Option<f64>,
    humidity: Option<f64>,
    glued: Option<f64>,
    unglued: Option<f64>,
    press_temp: Option<f64>,
    press_time: Option<f64>,
    manual_min: Option<f64>,
    manual_max: Option<f64>,
    clear_manual: bool,
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Override from CLI args
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    log::debug!("effective config: {:?}", config);

    match cli.command {
        Commands::Process { header, params } => {
            cmd_process(&config, output_format, header, params)
        }

        Commands::Weight {
            header,
            length,
            width,
            thickness,
            humidity,
            glued,
            unglued,
            press_temp,
            press_time,
            manual_min,
            manual_max,
            clear_manual,
        } => {
            let input = WeightInput {
                length,
                width,
                thickness,
                humidity,
                glued,
                unglued,
                press_temp,
                press_time,
                manual_min,
                manual_max,
                clear_manual,
            };
            cmd_weight(&config, output_format, header, input)
        }

        Commands::History {
            kind,
            status,
            limit,
        } => {
            let limit = limit.unwrap_or(config.history_limit);
            cmd_history(&config, output_format, kind, status, limit)
        }

        Commands::Report { id, save_photo } => cmd_report(&config, &id, save_photo),

        Commands::Delete { id, yes } => {
            let confirm = config.confirm_deletes && !yes;
            cmd_delete(&config, &id, confirm)
        }

        Commands::Dashboard => cmd_dashboard(&config, output_format),

        Commands::Ship {
            invoice,
            pdv,
            batch,
            client,
            quantity,
            photo,
        } => {
            let draft = ShippingDraft {
                invoice_number: invoice,
                pdv,
                batch_number: batch,
                client,
                quantity,
                photo: None,
            };
            cmd_ship(&config, draft, photo)
        }

        Commands::Shipping { limit } => {
            let limit = limit.unwrap_or(config.history_limit);
            cmd_shipping(&config, output_format, limit)
        }

        Commands::Export { output } => cmd_export(&config, &output),

        Commands::Import {
            inspections,
            shipping,
            dry_run,
        } => cmd_import(&config, inspections, shipping, dry_run),

        Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_history_limit,
            set_confirm_deletes,
            reset,
        } => cmd_config(
            cli.config.as_deref(),
            show,
            set_data_dir,
            set_output,
            set_history_limit,
            set_confirm_deletes,
            reset,
        ),
    }
}

/// Open the application and report any collection that could not be read
fn open_app(config: &Config) -> Result<FileQcApp> {
    let app = FileQcApp::open(config)?;
    for warning in app.load_warnings() {
        eprintln!("Warning: {}", warning);
    }
    Ok(app)
}

/// Start from a blank form, or from the stored record when editing
fn load_draft(
    app: &FileQcApp,
    kind: InspectionType,
    edit_id: Option<&str>,
) -> Result<InspectionDraft> {
    let Some(id) = edit_id else {
        return Ok(InspectionDraft::new(kind));
    };
    let draft = app.draft_for_edit(id)?;
    if draft.kind() != kind {
        return Err(Error::KindMismatch {
            expected: kind,
            found: draft.kind(),
        });
    }
    Ok(draft)
}

fn apply_header(draft: &mut InspectionDraft, header: InspectionHeader) -> Result<()> {
    if let Some(inspector) = header.inspector {
        draft.inspector_name = inspector;
    }
    if let Some(material) = header.material {
        draft.material_id = material;
    }
    if let Some(batch) = header.batch {
        draft.batch_number = batch;
    }
    if let Some(sector) = header.sector {
        draft.sector = sector;
    }
    if let Some(comment) = header.comment {
        draft.comment = Some(comment);
    }
    if let Some(photo) = header.photo {
        draft.photo = Some(encode_photo(&photo)?);
    }
    Ok(())
}

fn cmd_process(
    config: &Config,
    output_format: OutputFormat,
    mut header: InspectionHeader,
    params: Vec<TechnicalParameter>,
) -> Result<()> {
    let mut app = open_app(config)?;
    let edit_id = header.edit.take();

    let mut draft = load_draft(&app, InspectionType::Process, edit_id.as_deref())?;
    apply_header(&mut draft, header)?;
    for param in params {
        draft.set_parameter(param)?;
    }

    let record = app.submit(draft, edit_id.as_deref())?;
    output_record(output_format, &record, edit_id.is_some())
}

fn cmd_weight(
    config: &Config,
    output_format: OutputFormat,
    mut header: InspectionHeader,
    input: WeightInput,
) -> Result<()> {
    let mut app = open_app(config)?;
    let edit_id = header.edit.take();

    let mut draft = load_draft(&app, InspectionType::Weight, edit_id.as_deref())?;
    apply_header(&mut draft, header)?;

    let m = draft
        .weight_mut()
        .ok_or_else(|| Error::InvalidInput("weight form expected".to_string()))?;
    let fields = [
        (&mut m.length, input.length),
        (&mut m.width, input.width),
        (&mut m.thickness, input.thickness),
        (&mut m.humidity, input.humidity),
        (&mut m.glued_mass, input.glued),
        (&mut m.unglued_mass, input.unglued),
        (&mut m.press_temperature, input.press_temp),
        (&mut m.press_time, input.press_time),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            *field = value;
        }
    }
    if input.clear_manual {
        m.manual_min = None;
        m.manual_max = None;
    }
    if input.manual_min.is_some() {
        m.manual_min = input.manual_min;
    }
    if input.manual_max.is_some() {
        m.manual_max = input.manual_max;
    }

    let record = app.submit(draft, edit_id.as_deref())?;
    output_record(output_format, &record, edit_id.is_some())
}

fn cmd_history(
    config: &Config,
    output_format: OutputFormat,
    kind: Option<InspectionType>,
    status: Option<InspectionStatus>,
    limit: usize,
) -> Result<()> {
    let app = open_app(config)?;

    let mut filter = HistoryFilter::new().with_limit(limit);
    if let Some(kind) = kind {
        filter = filter.with_kind(kind);
    }
    if let Some(status) = status {
        filter = filter.with_status(status);
    }

    let records = app.history(&filter)?;
    output_history(output_format, &records, app.inspections().len())
}

fn cmd_report(config: &Config, id: &str, save_photo: Option<PathBuf>) -> Result<()> {
    let app = open_app(config)?;
    print!("{}", app.report(id)?);

    if let Some(path) = save_photo {
        let record = app.find(id)?;
        let data_url = record
            .photo
            .ok_or_else(|| Error::InvalidInput(format!("inspection {} has no photo", id)))?;
        let (mime, bytes) = decode_photo(&data_url)?;
        let path = if path.extension().is_none() {
            path.with_extension(extension_for_mime(&mime))
        } else {
            path
        };
        std::fs::write(&path, bytes)?;
        println!("Photo saved to: {}", path.display());
    }

    Ok(())
}

fn ask_delete(record: &InspectionRecord) -> bool {
    println!(
        "\nDelete {} inspection {} ({}, {}, {})? [y/N]",
        record.kind().label_en(),
        record.id,
        record.timestamp.format("%Y-%m-%d %H:%M"),
        if record.material_id.is_empty() { "-" } else { record.material_id.as_str() },
        record.status.label()
    );
    std::io::stdout().flush().ok();
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).ok();
    input.trim().eq_ignore_ascii_case("y")
}

fn cmd_delete(config: &Config, id: &str, confirm: bool) -> Result<()> {
    let mut app = open_app(config)?;

    let outcome = if confirm {
        app.delete(id, &mut ask_delete)?
    } else {
        app.delete(id, &mut |_: &InspectionRecord| true)?
    };

    match outcome {
        DeleteOutcome::Deleted(record) => println!("Deleted inspection {}", record.id),
        DeleteOutcome::NotFound => println!("No inspection with id {} (nothing deleted)", id),
        DeleteOutcome::Cancelled => println!("Cancelled."),
    }
    Ok(())
}

fn cmd_dashboard(config: &Config, output_format: OutputFormat) -> Result<()> {
    let app = open_app(config)?;
    output_dashboard(output_format, &app.dashboard()?)
}

fn cmd_ship(config: &Config, mut draft: ShippingDraft, photo: Option<PathBuf>) -> Result<()> {
    if let Some(path) = photo {
        draft.photo = Some(encode_photo(&path)?);
    }

    let mut app = open_app(config)?;
    let record = app.record_shipment(draft)?;

    println!("Shipment recorded:");
    println!("  ID:       {}", record.id);
    println!("  Invoice:  {}", record.invoice_number);
    println!("  Client:   {}", record.client);
    println!("  Quantity: {}", record.quantity);
    Ok(())
}

fn cmd_shipping(config: &Config, output_format: OutputFormat, limit: usize) -> Result<()> {
    let app = open_app(config)?;
    let shipments = app.shipments(Some(limit))?;
    output_shipments(output_format, &shipments, app.shipping().records().len())
}

fn cmd_export(config: &Config, output: &Path) -> Result<()> {
    let app = open_app(config)?;
    let inspections = app.inspections().find_all()?;
    let shipments = app.shipments(None)?;
    let summary = app.dashboard()?;

    export_history(output, &summary, &inspections, &shipments)?;

    println!("Exported to: {}", output.display());
    Ok(())
}

fn cmd_import(
    config: &Config,
    inspections: Option<PathBuf>,
    shipping: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    if inspections.is_none() && shipping.is_none() {
        return Err(Error::InvalidInput(
            "nothing to import: pass --inspections and/or --shipping".to_string(),
        ));
    }

    let snapshot = load_legacy_snapshot(inspections.as_deref(), shipping.as_deref())?;
    print!("{}", summarize_legacy_snapshot(&snapshot));

    let mut app = open_app(config)?;
    let result = if dry_run {
        app.preview_import(&snapshot)?
    } else {
        app.import_legacy(&snapshot)?
    };
    output_import_result(&result, dry_run);

    if !dry_run {
        println!("  Total inspections in store: {}", app.inspections().len());
    }
    Ok(())
}

fn cmd_config(
    config_path: Option<&Path>,
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_history_limit: Option<usize>,
    set_confirm_deletes: Option<bool>,
    reset: bool,
) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };

    if reset {
        let config = Config::default();
        config.save_to(&path)?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load_from(&path)?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(limit) = set_history_limit {
        config.history_limit = limit;
        modified = true;
    }

    if let Some(confirm) = set_confirm_deletes {
        config.confirm_deletes = confirm;
        modified = true;
    }

    if modified {
        config.save_to(&path)?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
