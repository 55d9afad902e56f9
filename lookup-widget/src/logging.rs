use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

pub const LOG_FILE_NAME: &str = "lookup-widget.log";

/// Keeps the background log writer alive; drop it last to flush.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// The terminal belongs to the widget, so logs only ever go to a file.
pub fn init_tracing(config: &Config) -> Option<FileLogGuard> {
    if !config.file_logging {
        return None;
    }
    if let Err(err) = std::fs::create_dir_all(&config.log_dir) {
        eprintln!(
            "failed to create log directory {}: {err}",
            config.log_dir.display()
        );
        return None;
    }

    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Some(FileLogGuard { _guard: guard })
}
