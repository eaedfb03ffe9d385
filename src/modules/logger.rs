use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn prepare_log_dir(dir: &str) -> Result<PathBuf, String> {
    let log_dir = PathBuf::from(dir);

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;
    }

    Ok(log_dir)
}

/// Initialize logger system
/// Console output always; daily rolling file output when `log_dir` is given
pub fn init_logger(log_dir: Option<&str>) {
    // Capture log macro logs
    let _ = tracing_log::LogTracer::init();

    let console_layer = fmt::Layer::new()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    let file_layer = match log_dir.map(prepare_log_dir) {
        Some(Ok(dir)) => {
            let file_appender = tracing_appender::rolling::daily(dir, "lookup.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            // Guard must outlive the process, there is no flush point on shutdown
            std::mem::forget(guard);

            Some(
                fmt::Layer::new()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true),
            )
        }
        Some(Err(e)) => {
            eprintln!("Failed to initialize log directory: {}", e);
            None
        }
        None => None,
    };

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init: tests may initialize more than once
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    info!(
        "Logger system initialized ({})",
        if log_dir.is_some() {
            "Console + File Persistence"
        } else {
            "Console"
        }
    );
}

/// Shorten a secret for log output
pub fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(8).collect();
    format!("{}...", prefix)
}
