use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber.
///
/// Logs go to stderr, or to `log_file` when given. The level comes from
/// `RUST_LOG` and defaults to "info". When writing to a file the returned guard
/// must be kept alive until the program exits so buffered lines are flushed.
pub fn init(
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    match log_file {
        Some(path) => {
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty());
            let directory = directory.unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().ok_or("log file path has no file name")?;

            std::fs::create_dir_all(directory)?;

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
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .try_init()?;

            Ok(None)
        }
    }
}
