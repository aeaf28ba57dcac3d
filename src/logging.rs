use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const FALLBACK_FILE_NAME: &str = "pokefav.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

fn fallback_log_file() -> PathBuf {
    std::env::temp_dir().join(FALLBACK_FILE_NAME)
}

/// Pick the log destination. The terminal belongs to the UI, so this never
/// yields stdout/stderr: the configured file, then a file in the temp dir,
/// then a sink.
fn log_writer(path: &Path) -> (NonBlocking, WorkerGuard, Option<(PathBuf, io::Error)>) {
    match open_log_file(path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            (writer, guard, None)
        }
        Err(error) => {
            let failure = Some((path.to_path_buf(), error));
            match open_log_file(&fallback_log_file()) {
                Ok(file) => {
                    let (writer, guard) = tracing_appender::non_blocking(file);
                    (writer, guard, failure)
                }
                Err(_) => {
                    let (writer, guard) = tracing_appender::non_blocking(io::sink());
                    (writer, guard, failure)
                }
            }
        }
    }
}

/// Log to `path` so the terminal stays free for the UI.
pub fn init(path: &Path) {
    let (writer, guard, failure) = log_writer(path);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    let _ = LOG_GUARD.set(guard);

    match failure {
        None => tracing::info!(path = %path.display(), "logging initialized"),
        Some((path, error)) => tracing::warn!(
            path = %path.display(),
            %error,
            fallback = %fallback_log_file().display(),
            "failed to open log file"
        ),
    }
}
