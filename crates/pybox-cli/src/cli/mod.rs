mod commands;
mod helpers;
mod logging;

use clap::Parser;
use pybox_core::PyboxError;
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let adapter_error = error.as_pybox_error();
            eprintln!("{}", adapter_error.diagnostic_line());
            eprintln!("{}", adapter_error.fatal_exit_line());
            adapter_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("pybox-adapter".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            logging::init(cli.verbose);
            dispatch_parsed(cli.descriptor, cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "pybox-adapter",
    version,
    about = "Request adapter for the PYBOX pyroclastic density current simulator"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Process descriptor JSON replacing the built-in PYBOX description
    #[arg(long, global = true, value_name = "PATH")]
    descriptor: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Validate an execution request and print the simulator arguments
    Translate(commands::TranslateArgs),
    /// Read simulator outputs from a working directory and print the response
    Collect(commands::CollectArgs),
    /// Print the process description document
    Describe(commands::DescribeArgs),
}

fn dispatch_parsed(descriptor: Option<PathBuf>, command: CliCommand) -> Result<i32, CliError> {
    let processor = helpers::load_processor(descriptor.as_deref())?;
    match command {
        CliCommand::Translate(args) => commands::run_translate_command(&processor, args),
        CliCommand::Collect(args) => commands::run_collect_command(&processor, args),
        CliCommand::Describe(args) => commands::run_describe_command(&processor, args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(PyboxError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<PyboxError> for CliError {
    fn from(error: PyboxError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_pybox_error(&self) -> PyboxError {
        match self {
            Self::Usage(message) => {
                PyboxError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => PyboxError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
