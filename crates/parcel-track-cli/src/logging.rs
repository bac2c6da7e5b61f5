use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing, writing to `<cache_dir>/parcel-track/parcel-track.log`.
///
/// The TUI owns the terminal, so logs go to a file. Falls back to stderr
/// when the file cannot be opened.
pub fn init() {
    let log_path = dirs::cache_dir().map(|d| d.join("parcel-track"));
    let file = log_path.as_ref().and_then(|dir| {
        std::fs::create_dir_all(dir).ok()?;
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("parcel-track.log"))
            .ok()
    });

    match file {
        Some(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .init();
            let _ = LOG_GUARD.set(guard);
            if let Some(dir) = &log_path {
                tracing::info!(path = %dir.display(), "logging initialized");
            }
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!("failed to open log file; using stderr");
        }
    }
}
