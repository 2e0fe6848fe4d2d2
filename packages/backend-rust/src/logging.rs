use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

const LOG_FILE_PREFIX: &str = "wortkarten.log";

/// Flushes the file writer on drop; hold it until shutdown
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

pub fn init_tracing(config: &Config) -> LogGuard {
    let (file_layer, guard) = match config.log_dir.as_deref().and_then(daily_file_writer) {
        Some((writer, guard)) => (
            Some(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(build_filter(&config.log_level))
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .init();

    LogGuard { _file: guard }
}

/// `RUST_LOG`-style filter; sqlx statement logging stays at warn unless
/// the directive names it explicitly
pub fn build_filter(directives: &str) -> EnvFilter {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));
    if directives.contains("sqlx") {
        return filter;
    }
    match "sqlx::query=warn".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn daily_file_writer(dir: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if let Err(err) = std::fs::create_dir_all(dir) {
        eprintln!("failed to create log directory {}: {err}", dir.display());
        return None;
    }
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
    Some(tracing_appender::non_blocking(appender))
}
