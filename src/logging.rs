//! Tracing subscriber setup for the CLI.

use std::{env, sync::OnceLock};

use tracing_appender::{
    non_blocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt::{fmt, time::ChronoLocal, writer::MakeWriterExt},
    EnvFilter,
};

/// Keeps the non-blocking writer alive so buffered logs flush on shutdown.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

/// Console logging, plus daily-rolling files when `LOG_DIR` is set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(false)
        .with_ansi(true)
        .with_level(true);

    match env::var("LOG_DIR") {
        Ok(dir) => {
            let mut appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("rivals.log");
            if let Some(n) = env::var("LOG_MAX_FILES")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
            {
                appender = appender.max_log_files(n);
            }
            let appender = appender.build(&dir).expect("failed to create log file");

            let (file_writer, guard) = non_blocking(appender);
            LOG_GUARD.set(guard).expect("LOG_GUARD already set");

            let stdout = std::io::stdout.with_max_level(tracing::Level::INFO);
            builder.with_writer(stdout.and(file_writer)).init();
        }
        Err(_) => builder.init(),
    }

    tracing::info!("logger initialized");
}
