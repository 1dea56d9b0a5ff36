//! End-to-end workflow through the qc-checker binary
//!
//! Every run uses a temporary data directory and config file.

use std::path::Path;
use std::process::{Command, Output};

use qc_store::{FileKvStore, KeyValueStore, INSPECTIONS_KEY};
use serde_json::Value;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn data_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("data")
    }

    fn run(&self, args: &[&str]) -> Output {
        let config = self.dir.path().join("config.toml");
        Command::new(env!("CARGO_BIN_EXE_qc-checker"))
            .arg("--config")
            .arg(&config)
            .arg("--data-dir")
            .arg(self.data_dir())
            .args(args)
            .output()
            .unwrap()
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "{:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--format", "json"];
        full.extend_from_slice(args);
        serde_json::from_str(&self.run_ok(&full)).unwrap()
    }

    fn stored_inspections(&self) -> Value {
        let store = FileKvStore::open(self.data_dir()).unwrap();
        let bytes = store.load(INSPECTIONS_KEY).unwrap().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[test]
fn test_weight_inspection_pass_and_fail() {
    let ws = Workspace::new();

    let passed = ws.run_json(&[
        "weight", "-i", "Bruno", "--length", "1", "--width", "1", "--thickness", "1.5",
        "--glued", "400", "--unglued", "30",
    ]);
    assert_eq!(passed["status"], "approved");
    assert_eq!(passed["type"], "weight");

    let failed = ws.run_json(&[
        "weight", "--length", "1", "--width", "1", "--thickness", "1.5", "--glued", "300",
        "--unglued", "30",
    ]);
    assert_eq!(failed["status"], "rejected");

    // manual band rescues the same sample
    let manual = ws.run_json(&[
        "weight", "--length", "1", "--width", "1", "--thickness", "1.5", "--glued", "300",
        "--unglued", "30", "--manual-min", "200", "--manual-max", "280",
    ]);
    assert_eq!(manual["status"], "approved");
}

#[test]
fn test_create_edit_delete_reload() {
    let ws = Workspace::new();

    let first = ws.run_json(&[
        "process", "-i", "Ana", "-m", "MDF-18", "-p", "Umidade=6:10:8", "-p", "Esquadro=na",
    ]);
    let second = ws.run_json(&["process", "-i", "Caio", "-p", "Umidade=6:10:abc"]);
    assert_eq!(first["status"], "approved");
    assert_eq!(second["status"], "rejected");

    let first_id = first["id"].as_str().unwrap();
    let second_id = second["id"].as_str().unwrap();

    // edit keeps id and timestamp, re-derives status
    let edited = ws.run_json(&[
        "process", "--edit", second_id, "-p", "Umidade=6:10:7", "-c", "remedido",
    ]);
    assert_eq!(edited["id"], second["id"]);
    assert_eq!(edited["timestamp"], second["timestamp"]);
    assert_eq!(edited["status"], "approved");
    assert_eq!(edited["inspectorName"], "Caio");
    assert_eq!(edited["comment"], "remedido");

    // unknown id and kind change are rejected
    let output = ws.run(&["process", "--edit", "ghost"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    assert!(!ws.run(&["weight", "--edit", first_id, "--glued", "1"]).status.success());

    ws.run_ok(&["delete", first_id, "--yes"]);
    let out = ws.run_ok(&["delete", "does-not-exist", "--yes"]);
    assert!(out.contains("nothing deleted"));

    let history = ws.run_json(&["history"]);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0], edited);
    assert_eq!(&ws.stored_inspections()[0], &edited);
}

#[test]
fn test_history_order_and_filters() {
    let ws = Workspace::new();
    let older = ws.run_json(&["process", "-p", "Umidade=6:10:8"]);
    let newer = ws.run_json(&["process", "-p", "Umidade=6:10:12"]);

    let history = ws.run_json(&["history"]);
    assert_eq!(history[0]["id"], newer["id"]);
    assert_eq!(history[1]["id"], older["id"]);

    let rejected = ws.run_json(&["history", "--status", "rejected"]);
    assert_eq!(rejected.as_array().unwrap().len(), 1);

    let weights = ws.run_json(&["history", "--kind", "weight"]);
    assert!(weights.as_array().unwrap().is_empty());
}

#[test]
fn test_shipping_dashboard_and_report() {
    let ws = Workspace::new();
    let record = ws.run_json(&["process", "-m", "MDF-18", "-p", "Umidade=6:10:8"]);
    ws.run_json(&["process", "-p", "Umidade=6:10:12"]);
    ws.run_ok(&[
        "ship", "--invoice", "NF-5531", "--pdv", "PO-12", "-b", "L-88", "--client",
        "Moveis Sul", "-q", "240",
    ]);

    let shipments = ws.run_json(&["shipping"]);
    assert_eq!(shipments[0]["quantity"], 240);

    let dashboard = ws.run_json(&["dashboard"]);
    assert_eq!(dashboard["total"], 2);
    assert_eq!(dashboard["quality_rate_percent"], 50);
    assert_eq!(dashboard["shipping_count"], 1);

    let report = ws.run_ok(&["report", record["id"].as_str().unwrap()]);
    assert!(report.contains("MDF-18"));
    assert!(report.contains("CONFORME"));
}

#[test]
fn test_malformed_snapshot_fails_closed() {
    let ws = Workspace::new();
    std::fs::create_dir_all(ws.data_dir()).unwrap();
    std::fs::write(ws.data_dir().join("qc_inspections.json"), "{not json").unwrap();

    let output = ws.run(&["history"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Warning:"));
    assert!(Path::new(&ws.data_dir().join("qc_inspections.corrupt.json")).exists());
}

#[test]
fn test_legacy_import_and_export() {
    let ws = Workspace::new();
    ws.run_json(&["process", "-p", "Umidade=6:10:8"]);

    let legacy = ws.dir.path().join("legacy.json");
    std::fs::write(
        &legacy,
        r#"[{"id": "1716000000000", "type": "Processo", "inspectorName": "Ana",
             "timestamp": "2024-05-18T02:40:00.000Z", "materialId": "MDF-18",
             "batchNumber": "L-7", "sector": "Prensa", "parameters": [],
             "status": "Reprovado"}]"#,
    )
    .unwrap();
    let legacy_arg = legacy.to_str().unwrap();

    let preview = ws.run_ok(&["import", "--inspections", legacy_arg, "--dry-run"]);
    assert!(preview.contains("Would import inspections: 1"));
    assert_eq!(ws.run_json(&["history"]).as_array().unwrap().len(), 1);

    ws.run_ok(&["import", "--inspections", legacy_arg]);
    let history = ws.run_json(&["history"]);
    assert_eq!(history[1]["id"], "1716000000000");
    assert_eq!(history[1]["status"], "rejected");

    let again = ws.run_ok(&["import", "--inspections", legacy_arg]);
    assert!(again.contains("Skipped (duplicates): 1"));

    let csv_path = ws.dir.path().join("history.csv");
    ws.run_ok(&["export", csv_path.to_str().unwrap()]);
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);

    let xlsx_path = ws.dir.path().join("history.xlsx");
    ws.run_ok(&["export", xlsx_path.to_str().unwrap()]);
    assert!(xlsx_path.exists());
}
