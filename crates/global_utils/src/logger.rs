use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// Keeps the non-blocking writer alive; logs are flushed when it is dropped.
pub struct LoggerGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber: `RUST_LOG` filter (defaults to `info`) and a non-blocking stdout writer.
///
/// Calling it twice is harmless, the second registration is ignored, which is what tests sharing a
/// `LazyLock<LoggerGuard>` rely on.
pub fn init_logger() -> LoggerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_target(true).with_line_number(true))
        .try_init();

    LoggerGuard { _guard: guard }
}
