//! Logging setup.
//!
//! Two layers share one `tracing` registry:
//! - a daily-rolling file of one-line JSON events (always on)
//! - coloured human-readable stdout (debug builds, or when asked for)
//!
//! `log` macros used by the application layer are forwarded through
//! `tracing-log`. `RUST_LOG` overrides the default filters.
//!
//! JSON events carry: timestamp (ISO 8601, millis, local offset), level,
//! target, pid, tid, thread name, file + line, message, fields, version.

mod format;

use log::LevelFilter;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

use format::{HumanReadableFormatter, JsonFormatter};

const LOG_FILE_PREFIX: &str = "dailydev.log";

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct LoggerOptions {
    pub log_dir: PathBuf,
    pub stdout: bool,
}

impl LoggerOptions {
    pub fn new(log_dir: PathBuf) -> Self {
        Self {
            log_dir,
            stdout: cfg!(debug_assertions),
        }
    }

    pub fn with_stdout(mut self, stdout: bool) -> Self {
        self.stdout = stdout;
        self
    }
}

/// Default log directory: `<data-local-dir>/dailydev/logs`, or `./logs`.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("dailydev").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_logger(options: LoggerOptions) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    let log_dir = options.log_dir;
    std::fs::create_dir_all(&log_dir)?;
    let _ = LOG_DIR.set(log_dir.clone());

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let json_layer = fmt::layer()
        .with_writer(non_blocking)
        .event_format(JsonFormatter::new(env!("CARGO_PKG_VERSION")))
        .with_filter(file_filter());

    let stdout_layer = options.stdout.then(|| {
        fmt::layer()
            .with_ansi(true)
            .event_format(HumanReadableFormatter::new())
            .with_filter(stdout_filter())
    });

    let subscriber = Registry::default().with(json_layer).with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "dailydev::logging",
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        profile = if cfg!(debug_assertions) { "Debug" } else { "Release" },
        "Logger initialized"
    );

    Ok(())
}

/// Plain stdout logging for when the file logger cannot be set up.
pub fn init_console_fallback() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .try_init();
}

fn file_filter() -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        "debug,sqlx=warn,dailydev=trace"
    } else {
        "info,sqlx=warn"
    };

    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn stdout_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("debug,sqlx=warn,hyper=info"))
        .unwrap_or_else(|_| EnvFilter::new("debug"))
}

pub fn get_log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}
