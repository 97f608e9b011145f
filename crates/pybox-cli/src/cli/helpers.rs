use super::CliError;
use anyhow::Context;
use pybox_core::{ProcessDescriptor, PyboxError, PyboxProcessor, RequestedOutputs};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

pub(super) fn load_processor(descriptor_path: Option<&Path>) -> Result<PyboxProcessor, CliError> {
    let Some(path) = descriptor_path else {
        return Ok(PyboxProcessor::default());
    };

    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read process descriptor '{}'", path.display()))?;
    let descriptor = ProcessDescriptor::from_json_str(&source)?;
    debug!(path = %path.display(), id = %descriptor.id, "loaded process descriptor");
    Ok(PyboxProcessor::new(descriptor)?)
}

/// An unreadable file is an IO failure; unparsable content is the caller's
/// request error.
pub(super) fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    serde_json::from_str(&source).map_err(|error| {
        PyboxError::input_validation(
            "INPUT.REQUEST_JSON",
            format!("Request '{}' is not valid JSON: {error}.", path.display()),
        )
        .into()
    })
}

/// A request file holds either the bare input parameters or a full execute
/// body (`{"inputs": {...}, "outputs": {...}}`).
pub(super) fn split_execute_body(document: Value) -> (Value, Option<Value>) {
    match document {
        Value::Object(mut body) if body.get("inputs").is_some_and(Value::is_object) => {
            let inputs = body.remove("inputs").unwrap_or(Value::Null);
            let outputs = body.remove("outputs");
            (inputs, outputs)
        }
        other => (other, None),
    }
}

/// Explicit `--outputs` names win over the outputs of an execute body.
pub(super) fn requested_outputs(
    cli_names: &[String],
    body_outputs: Option<&Value>,
) -> Result<RequestedOutputs, CliError> {
    if !cli_names.is_empty() {
        return Ok(RequestedOutputs::from_names(cli_names.iter().cloned()));
    }
    match body_outputs {
        Some(outputs) => Ok(RequestedOutputs::from_json(outputs)?),
        None => Ok(RequestedOutputs::all()),
    }
}

pub(super) fn emit_json<T: Serialize>(value: &T, destination: Option<&Path>) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    match destination {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory '{}'", parent.display())
                })?;
            }
            fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write '{}'", path.display()))?;
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
