use pybox_core::ProcessDescriptor;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const REQUEST: &str = r#"
{
  "lat": 40.8,
  "lon": 14.1,
  "l0": 500,
  "h0": 300,
  "theta0": 900,
  "dt": 1.0,
  "margin": 10000,
  "multiple_values": [
    { "eps0": 0.05, "rhos": 2500, "ds": 0.0001 },
    { "eps0": 0.02, "rhos": 1200, "ds": 0.001 }
  ]
}
"#;

fn run_adapter(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pybox-adapter"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("adapter binary should run")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent directory should be created");
    }
    fs::write(path, content).expect("fixture file should be written");
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn translate_prints_the_argument_map() {
    let temp = TempDir::new().expect("tempdir should be created");
    let request_path = temp.path().join("request.json");
    write_file(&request_path, REQUEST);

    let output = run_adapter(&["translate", "--request", request_path.to_str().unwrap()]);
    let arguments = stdout_json(&output);

    assert_eq!(arguments["--eps0"], "0.05 0.02");
    assert_eq!(arguments["--rhos"], "2500 1200");
    assert_eq!(arguments["--ds"], "0.0001 0.001");
    assert_eq!(arguments["--lat"], 40.8);
    assert_eq!(arguments["-o"], "out_file");
    assert_eq!(arguments.as_object().map(|map| map.len()), Some(11));
}

#[test]
fn translate_argv_format_lists_flag_value_pairs() {
    let temp = TempDir::new().expect("tempdir should be created");
    let request_path = temp.path().join("request.json");
    write_file(&request_path, REQUEST);

    let output = run_adapter(&[
        "translate",
        "--request",
        request_path.to_str().unwrap(),
        "--format",
        "argv",
    ]);
    let argv = stdout_json(&output);
    let tokens = argv.as_array().expect("argv should be an array");

    assert_eq!(tokens.len(), 22);
    assert_eq!(tokens[0], "--eps0");
    assert_eq!(tokens[1], "0.05 0.02");
    assert_eq!(tokens[21], "out_file");
}

#[test]
fn translate_accepts_execute_bodies_and_checks_their_outputs() {
    let temp = TempDir::new().expect("tempdir should be created");
    let request_path = temp.path().join("execute.json");
    write_file(
        &request_path,
        &format!(
            r#"{{ "inputs": {REQUEST}, "outputs": {{ "grafico_1": {{ "transmissionMode": "value" }} }} }}"#
        ),
    );

    let output = run_adapter(&["translate", "--request", request_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[INPUT.UNEXPECTED_OUTPUT]"), "stderr: {stderr}");
    assert!(stderr.contains("FATAL EXIT CODE: 2"));
}

#[test]
fn translate_reports_range_errors_with_exit_code_two() {
    let temp = TempDir::new().expect("tempdir should be created");
    let request_path = temp.path().join("request.json");
    write_file(&request_path, &REQUEST.replace("40.8", "95.0"));

    let output = run_adapter(&["translate", "--request", request_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Value 'lat' must be >=-90 and <=90."), "stderr: {stderr}");
}

#[test]
fn malformed_request_json_is_a_client_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let request_path = temp.path().join("request.json");
    write_file(&request_path, "{ \"lat\": 40.8,");

    let output = run_adapter(&["translate", "--request", request_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[INPUT.REQUEST_JSON]"), "stderr: {stderr}");
}

#[test]
fn missing_request_file_is_an_io_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let request_path = temp.path().join("absent.json");

    let output = run_adapter(&["translate", "--request", request_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[IO.CLI]"));
}

#[test]
fn collect_writes_the_response_envelope() {
    let temp = TempDir::new().expect("tempdir should be created");
    let working_dir = temp.path().join("job");
    write_file(&working_dir.join("out_file_params.txt"), "dt = 1.0\n");
    write_file(
        &working_dir.join("out_file_thickness.csv"),
        "# x total c0\n10.0 0.3 0.3\n20.0 0.1 0.1\n",
    );
    let response_path = temp.path().join("response/outputs.json");

    let output = run_adapter(&[
        "collect",
        "--working-dir",
        working_dir.to_str().unwrap(),
        "--outputs",
        "input_data,deposit_thickness",
        "--output",
        response_path.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let response: Value = serde_json::from_str(
        &fs::read_to_string(&response_path).expect("response should be written"),
    )
    .expect("response should be JSON");
    assert_eq!(response["mimeType"], "application/json");
    assert_eq!(response["outputs"]["input_data"]["value"], "dt = 1.0\n");
    let series = &response["outputs"]["deposit_thickness"]["value"]["Series"];
    assert_eq!(series[1]["label"], "eps_0");
    assert_eq!(series[1]["values"], serde_json::json!([0.3, 0.1]));
}

#[test]
fn collect_fails_with_io_exit_code_when_files_are_missing() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = run_adapter(&[
        "collect",
        "--working-dir",
        temp.path().to_str().unwrap(),
        "--outputs",
        "dem",
    ]);

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[IO.OUTPUT_READ]"));
}

#[test]
fn describe_prints_the_builtin_description() {
    let description = stdout_json(&run_adapter(&["describe"]));
    assert_eq!(description["id"], "pybox");
    assert_eq!(description["inputs"]["lat"]["schema"]["maximum"], 90.0);
    assert_eq!(description["outputs"]["invasion_map"]["title"], "Invasion map");
}

#[test]
fn custom_descriptor_changes_title_and_base_filename() {
    let temp = TempDir::new().expect("tempdir should be created");
    let mut descriptor = ProcessDescriptor::pybox();
    descriptor.title = "PYBOX (staging)".to_string();
    descriptor.base_output_filename = "staging_run".to_string();
    let descriptor_path = temp.path().join("descriptor.json");
    write_file(
        &descriptor_path,
        &serde_json::to_string(&descriptor).expect("descriptor should serialize"),
    );
    let request_path = temp.path().join("request.json");
    write_file(&request_path, REQUEST);

    let description = stdout_json(&run_adapter(&[
        "--descriptor",
        descriptor_path.to_str().unwrap(),
        "describe",
    ]));
    assert_eq!(description["title"], "PYBOX (staging)");

    let arguments = stdout_json(&run_adapter(&[
        "translate",
        "--descriptor",
        descriptor_path.to_str().unwrap(),
        "--request",
        request_path.to_str().unwrap(),
    ]));
    assert_eq!(arguments["-o"], "staging_run");
}

#[test]
fn malformed_descriptor_is_rejected() {
    let temp = TempDir::new().expect("tempdir should be created");
    let descriptor_path = temp.path().join("descriptor.json");
    write_file(&descriptor_path, "{ \"id\": \"pybox\" }");

    let output = run_adapter(&[
        "describe",
        "--descriptor",
        descriptor_path.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.DESCRIPTOR_PARSE]"));
}

#[test]
fn usage_errors_exit_with_code_two() {
    let output = run_adapter(&["translate"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.CLI_USAGE]"));
}
