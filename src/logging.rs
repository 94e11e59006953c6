use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset.
///
/// Manifest anomalies reach the user through the CLI's own stderr output, so
/// `warn!` lines stay hidden unless `verbose` is set.
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "error" }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise only errors are logged, or
/// everything down to `debug` with `verbose`. Logs go to stderr unless
/// `log_file` is given, in which case they are written to that file through
/// a non-blocking writer. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))?;

    match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()?;

            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .compact(),
                )
                .try_init()?;

            Ok(None)
        }
    }
}
