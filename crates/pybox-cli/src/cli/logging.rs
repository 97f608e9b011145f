use tracing_subscriber::EnvFilter;

const CRATE_TARGETS: &[&str] = &["pybox_adapter", "pybox_core"];

/// Maps `-v` occurrences to a level for the workspace targets: none is
/// warn, then info, debug and trace. `RUST_LOG` takes precedence.
pub(super) fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let default_filter = CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
