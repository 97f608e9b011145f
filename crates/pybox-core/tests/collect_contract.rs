use pybox_core::{
    OutputName, Processor, PyboxErrorCategory, PyboxProcessor, RequestedOutputs,
};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TEMPORAL_ROWS: usize = 4;
const CLASS_COUNT: usize = 3;

fn write_file(path: &Path, content: impl AsRef<[u8]>) {
    fs::write(path, content).expect("fixture file should be written");
}

fn temporal_table(rows: usize, classes: usize) -> String {
    let mut table = String::from("length(m) height(m) rho_c u TPE TKE hmax time eps...\n");
    for row in 0..rows {
        let mut values = (0..8)
            .map(|column| format!("{:.3}", row as f64 * 10.0 + column as f64))
            .collect::<Vec<_>>();
        values.extend((0..classes).map(|class| format!("{:.4}", 0.01 * (class + 1) as f64)));
        table.push_str(&values.join("  "));
        table.push('\n');
    }
    table
}

fn populate_working_dir(dir: &Path) {
    write_file(&dir.join("out_file_params.txt"), "lat 40.8\nlon 14.1\n");
    write_file(&dir.join("out_file.tif"), [0x4d_u8, 0x4d, 0x00, 0x2a]);
    write_file(&dir.join("out_file_EC2.tif"), [0x49_u8, 0x49, 0x2a, 0x00]);
    write_file(
        &dir.join("out_file.csv"),
        temporal_table(TEMPORAL_ROWS, CLASS_COUNT),
    );
    write_file(
        &dir.join("out_file_thickness.csv"),
        "position total c0 c1 c2\n100 0.5 0.2 0.2 0.1\n-50 0.1 0.05 0.03 0.02\n",
    );
}

#[test]
fn empty_request_collects_every_declared_output() {
    let temp = TempDir::new().expect("tempdir should be created");
    populate_working_dir(temp.path());

    let (media_type, outputs) = PyboxProcessor::default()
        .prepare_output(temp.path(), &RequestedOutputs::all())
        .expect("all outputs should be collected");

    assert_eq!(media_type, "application/json");
    assert_eq!(outputs.keys().copied().collect::<Vec<_>>(), OutputName::ALL.to_vec());

    let envelope = serde_json::to_value(&outputs).expect("outputs should serialize");
    assert_eq!(envelope["input_data"]["value"], "lat 40.8\nlon 14.1\n");
    assert_eq!(envelope["input_data"]["mediaType"], "text/plain");
    assert!(envelope["input_data"].get("encoding").is_none());
    assert_eq!(envelope["dem"]["value"], "TU0AKg==");
    assert_eq!(envelope["dem"]["encoding"], "base64");
    assert_eq!(envelope["invasion_map"]["value"], "SUkqAA==");
    assert_ne!(envelope["dem"]["value"], envelope["invasion_map"]["value"]);
    assert_eq!(envelope["temporal_evolution"]["mediaType"], "application/json");
}

#[test]
fn every_series_has_one_value_per_row_and_one_extra_series_per_class() {
    let temp = TempDir::new().expect("tempdir should be created");
    populate_working_dir(temp.path());

    let (_, outputs) = PyboxProcessor::default()
        .prepare_output(
            temp.path(),
            &RequestedOutputs::from_names(["temporal_evolution", "deposit_thickness"]),
        )
        .expect("tables should be collected");
    let envelope = serde_json::to_value(&outputs).expect("outputs should serialize");

    let temporal = &envelope["temporal_evolution"]["value"];
    assert_eq!(temporal["Domain"]["label"], "length(m)");
    let series = temporal["Series"].as_array().expect("series should be an array");
    assert_eq!(series.len(), 7 + CLASS_COUNT);
    for column in series {
        assert_eq!(
            column["values"].as_array().map(Vec::len),
            Some(TEMPORAL_ROWS)
        );
    }
    assert_eq!(series[7]["label"], "eps_0");
    assert_eq!(series[9]["label"], "eps_2");
    assert_eq!(series[9]["values"][0], 0.03);

    let deposit = &envelope["deposit_thickness"]["value"];
    assert_eq!(deposit["Domain"]["values"], serde_json::json!([100.0, -50.0]));
    let labels = deposit["Series"]
        .as_array()
        .expect("series should be an array")
        .iter()
        .map(|column| column["label"].clone())
        .collect::<Vec<Value>>();
    assert_eq!(
        labels,
        ["total deposit thickness(m)", "eps_0", "eps_1", "eps_2"]
    );
}

#[test]
fn missing_output_file_is_an_io_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("out_file.tif"), [0_u8]);

    let error = PyboxProcessor::default()
        .prepare_output(temp.path(), &RequestedOutputs::from_names(["dem", "invasion_map"]))
        .expect_err("absent invasion map should fail");
    assert_eq!(error.category(), PyboxErrorCategory::IoSystemError);
    assert!(error.message().contains("out_file_EC2.tif"));
    assert!(!error.is_client_error());
}

#[test]
fn malformed_table_is_a_parse_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(
        &temp.path().join("out_file_thickness.csv"),
        "100 0.5 0.2\n200 0.4\n",
    );

    let error = PyboxProcessor::default()
        .prepare_output(temp.path(), &RequestedOutputs::from_names(["deposit_thickness"]))
        .expect_err("narrow second row should fail");
    assert_eq!(error.category(), PyboxErrorCategory::ParseError);
    assert!(error.message().contains("out_file_thickness.csv line 2"));
}
