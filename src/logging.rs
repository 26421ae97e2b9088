use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "rte-surface.log";
const DEFAULT_FILTER: &str = "rte_surface=info";

pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// `logs/` next to the settings file, else under the temp dir.
fn ensure_log_dir() -> Option<PathBuf> {
    let beside_settings = rte_surface::kernel::services::adapters::get_settings_path()
        .and_then(|path| path.parent().map(|dir| dir.join("logs")));
    let fallback = std::env::temp_dir().join("rte-surface").join("logs");

    beside_settings
        .into_iter()
        .chain(std::iter::once(fallback))
        .find(|dir| std::fs::create_dir_all(dir).is_ok())
}

/// Routes `tracing` into a daily file. `None` when no log dir is writable or a
/// subscriber is already installed.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = ensure_log_dir()?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, LOG_FILE));
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .ok()?;

    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "panic");
    }));
    tracing::info!(log_dir = %log_dir.display(), "logging ready");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
