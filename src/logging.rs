use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps the background log writers alive; drop it on shutdown to flush.
pub struct LogGuards {
    _file: WorkerGuard,
    _json: WorkerGuard,
}

/// Installs the global subscriber: a compact console layer filtered by
/// `RUST_LOG`, a daily plain-text error log and a daily JSON log under
/// `log_dir`.
pub fn init_tracing(log_dir: impl AsRef<Path>) -> io::Result<LogGuards> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)?;

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,ums_core=info,reqwest=warn,hyper=warn",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let (file_writer, file_guard) = tracing_appender::non_blocking(RollingFileAppender::new(
        Rotation::DAILY,
        log_dir,
        "ums-console.log",
    ));
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let (json_writer, json_guard) = tracing_appender::non_blocking(RollingFileAppender::new(
        Rotation::DAILY,
        log_dir,
        "ums-console.json",
    ));
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_writer)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(LogGuards {
        _file: file_guard,
        _json: json_guard,
    })
}
