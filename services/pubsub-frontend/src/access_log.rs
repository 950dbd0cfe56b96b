use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes logging for this process: one line per request plus
/// error-level entries for backend failures, written to
/// `logs/server-{port}.log` (spec.md §6).
///
/// Failure to create the `logs` directory is ignored if it already
/// exists; any other failure aborts startup (spec.md §7's startup error
/// policy), same as the teacher's own `.expect(...)`-on-fatal-setup style.
///
/// Returns a guard that must be held for the lifetime of the process —
/// dropping it stops the background writer thread, so callers must bind
/// it in `main` rather than let it fall out of scope immediately.
pub fn init(port: u16) -> WorkerGuard {
    match std::fs::create_dir("logs") {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {}
        Err(err) => panic!("failed to create logs directory: {err}"),
    }

    let file_appender = tracing_appender::rolling::never("logs", format!("server-{port}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    guard
}
