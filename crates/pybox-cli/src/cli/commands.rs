use super::CliError;
use super::helpers::{emit_json, read_json_file, requested_outputs, split_execute_body};
use pybox_core::{Processor, PyboxProcessor};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum ArgumentFormat {
    /// JSON object of flag to value
    Map,
    /// JSON array of command-line tokens
    Argv,
}

#[derive(clap::Args)]
pub(super) struct TranslateArgs {
    /// Request JSON: bare input parameters or an execute body with inputs/outputs
    #[arg(long, value_name = "PATH")]
    request: PathBuf,

    /// Requested outputs (comma separated); defaults to the execute body or all
    #[arg(long, value_delimiter = ',')]
    outputs: Vec<String>,

    /// Rendering of the simulator arguments
    #[arg(long, value_enum, default_value_t = ArgumentFormat::Map)]
    format: ArgumentFormat,

    /// Write the result here instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct CollectArgs {
    /// Directory the simulator wrote its output files into
    #[arg(long, value_name = "DIR")]
    working_dir: PathBuf,

    /// Requested outputs (comma separated); defaults to all declared outputs
    #[arg(long, value_delimiter = ',')]
    outputs: Vec<String>,

    /// Write the response here instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct DescribeArgs {
    /// Write the description here instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

pub(super) fn run_translate_command(
    processor: &PyboxProcessor,
    args: TranslateArgs,
) -> Result<i32, CliError> {
    let document = read_json_file(&args.request)?;
    let (inputs, body_outputs) = split_execute_body(document);
    let requested = requested_outputs(&args.outputs, body_outputs.as_ref())?;

    let arguments = processor.prepare_input(&inputs, &requested)?;
    info!(
        request = %args.request.display(),
        flags = arguments.len(),
        "request translated"
    );

    match args.format {
        ArgumentFormat::Map => emit_json(&arguments, args.output.as_deref())?,
        ArgumentFormat::Argv => emit_json(&arguments.to_command_args(), args.output.as_deref())?,
    }
    Ok(0)
}

pub(super) fn run_collect_command(
    processor: &PyboxProcessor,
    args: CollectArgs,
) -> Result<i32, CliError> {
    let requested = requested_outputs(&args.outputs, None)?;
    let (media_type, outputs) = processor.prepare_output(&args.working_dir, &requested)?;

    let response = json!({
        "mimeType": media_type,
        "outputs": outputs,
    });
    emit_json(&response, args.output.as_deref())?;
    Ok(0)
}

pub(super) fn run_describe_command(
    processor: &PyboxProcessor,
    args: DescribeArgs,
) -> Result<i32, CliError> {
    emit_json(&processor.describe(), args.output.as_deref())?;
    Ok(0)
}
