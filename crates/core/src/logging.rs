//! JSON logging for navigation flows.
//!
//! Containers report every slot change as an `info` event under the
//! `switchyard_core::navigation` target, with structured fields next to the
//! human-readable message:
//!
//! ```text
//! {"level":"INFO","target":"switchyard_core::navigation::stack",
//!  "fields":{"message":"NavigationStackCoordinator(RoomScreen) Push: MemberScreen",
//!            "container":"stack","change":"Push","module":42}}
//! ```
//!
//! Compact layout recomputes and ignored requests (popping an empty stack,
//! selecting an unknown tab) are logged at `debug`.
//!
//! [`init_logging`] writes those lines to `switchyard-<run_id>.json` in the
//! configured directory and prunes the oldest run files beyond `max-files`.
//! The navigation target gets its own level, `navigation-level`, so a host
//! app can trace its navigation without turning up everything else:
//!
//! ```toml
//! [logging]
//! level = "warn"
//! navigation-level = "debug"
//! ```
//!
//! `RUST_LOG` replaces both when set.
//!
//! # Example
//!
//! ```no_run
//! use switchyard_core::logging::{init_logging, run_id, shutdown_logging};
//! use switchyard_core::settings::LoggingSettings;
//!
//! init_logging(&LoggingSettings::default())?;
//! eprintln!("navigation log for run {}", run_id());
//! shutdown_logging();
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::settings::LoggingSettings;
use anyhow::{Context, Error};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Target prefix of every event emitted by the navigation containers.
pub const NAVIGATION_TARGET: &str = "switchyard_core::navigation";

const LOG_FILE_PREFIX: &str = "switchyard-";
const LOG_FILE_EXTENSION: &str = "json";

static LOG_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
static RUN_ID: OnceLock<Uuid> = OnceLock::new();

/// Identifies this process in log file names, a UUID v7 generated on first use.
pub fn run_id() -> Uuid {
    *RUN_ID.get_or_init(Uuid::now_v7)
}

/// Installs the global JSON subscriber writing to this run's log file.
///
/// Does nothing when logging is disabled. A second call fails because the
/// global subscriber can only be set once.
///
/// # Errors
///
/// Fails if the log directory can't be prepared, if a level doesn't parse,
/// or if a global subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), Error> {
    if !settings.enabled {
        return Ok(());
    }

    let log_dir = std::env::current_dir()
        .context("can't get current working directory")?
        .join(&settings.directory);
    let writer = run_log_writer(&log_dir, settings.max_files)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => navigation_filter(&settings.level, settings.navigation_level.as_deref())?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer(writer))
        .try_init()
        .context("can't install tracing subscriber")?;

    tracing::info!(
        run_id = %run_id(),
        version = env!("CARGO_PKG_VERSION"),
        directory = %log_dir.display(),
        "navigation logging started"
    );

    Ok(())
}

/// Flushes pending log lines to disk.
///
/// Dropping the writer guard blocks until the background writer has drained
/// or given up. Later events are discarded.
pub fn shutdown_logging() {
    let guard = LOG_GUARD
        .get()
        .and_then(|guard| guard.lock().ok()?.take());
    drop(guard);
}

/// Prepares `log_dir`, prunes old runs and opens this run's file.
fn run_log_writer(log_dir: &Path, max_files: usize) -> Result<NonBlocking, Error> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("can't create log directory {}", log_dir.display()))?;

    if max_files > 0 {
        // The new run's file doesn't exist yet, make room for it.
        prune_run_logs(log_dir, max_files - 1)?;
    }

    let appender = Builder::new()
        .rotation(Rotation::NEVER)
        .filename_prefix(format!("{}{}", LOG_FILE_PREFIX, run_id()))
        .filename_suffix(LOG_FILE_EXTENSION)
        .build(log_dir)
        .with_context(|| format!("can't open log file in {}", log_dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    // Only the first writer's guard is retained for shutdown.
    let _ = LOG_GUARD.set(Mutex::new(Some(guard)));

    Ok(writer)
}

/// The JSON layer shared by the log file and the tests.
fn json_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(writer)
}

/// Builds the filter for `level`, with the navigation target overridden by
/// `navigation_level` when given. A blank `level` means `info`.
fn navigation_filter(level: &str, navigation_level: Option<&str>) -> Result<EnvFilter, Error> {
    let mut directives = match level.trim() {
        "" => String::from("info"),
        level => level.to_string(),
    };

    if let Some(navigation_level) = navigation_level.map(str::trim).filter(|l| !l.is_empty()) {
        directives.push_str(&format!(",{}={}", NAVIGATION_TARGET, navigation_level));
    }

    EnvFilter::builder()
        .parse(&directives)
        .with_context(|| format!("invalid logging directives {:?}", directives))
}

/// Parses the run id out of a log file path, `None` for anything else.
fn log_file_run_id(path: &Path) -> Option<Uuid> {
    if path.extension()? != OsStr::new(LOG_FILE_EXTENSION) {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    Uuid::parse_str(stem.strip_prefix(LOG_FILE_PREFIX)?).ok()
}

/// Removes all but the `keep` most recent run files and returns how many were
/// removed. Run ids are UUID v7, so ordering by id orders runs by start time.
fn prune_run_logs(log_dir: &Path, keep: usize) -> Result<usize, Error> {
    let mut runs: Vec<(Uuid, PathBuf)> = Vec::new();
    for entry in fs::read_dir(log_dir)
        .with_context(|| format!("can't list log directory {}", log_dir.display()))?
    {
        let path = entry.context("can't read log directory entry")?.path();
        if let Some(run) = log_file_run_id(&path) {
            runs.push((run, path));
        }
    }

    runs.sort_unstable_by_key(|(run, _)| *run);
    let stale = runs.len().saturating_sub(keep);
    for (_, path) in &runs[..stale] {
        fs::remove_file(path)
            .with_context(|| format!("can't remove stale log file {}", path.display()))?;
    }

    Ok(stale)
}
