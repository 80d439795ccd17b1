use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bikeshare_core::catalog::CityCatalog;
use bikeshare_core::settings::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name looked up when no catalog is given on the command line.
pub const CATALOG_FILE: &str = "cities.json";

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `DEBUG`/`INFO`/`WARNING`/`ERROR` level name to an [`EnvFilter`]
/// directive. `CRITICAL` maps to `error`, the most severe tracing level.
fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Falls back to `"info"` if the level string is not recognised. Output goes
/// to `log_file` when given, otherwise to stderr, so log lines never land in
/// the middle of a prompt on stdout.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, stderr_layer) = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), None)
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr);
            (None, Some(layer))
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

// ── Catalog discovery ──────────────────────────────────────────────────────────

/// Look for a catalog file next to the data, then in the per-user config
/// directory.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `<data_dir>/cities.json`
/// 2. `<config_dir>/bikeshare/cities.json`
pub fn discover_catalog_in(data_dir: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
    let mut candidates = vec![data_dir.join(CATALOG_FILE)];
    if let Some(config) = config_dir {
        candidates.push(config.join("bikeshare").join(CATALOG_FILE));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// Build the catalog the session will offer.
///
/// An explicit `--catalog` wins, then a discovered `cities.json`, then the
/// built-in entries. Entries whose source file is missing are dropped.
pub fn resolve_catalog(settings: &Settings) -> anyhow::Result<CityCatalog> {
    let path = settings.catalog.clone().or_else(|| {
        discover_catalog_in(&settings.data_dir, dirs::config_dir().as_deref())
    });

    let catalog = match path {
        Some(path) => {
            tracing::info!("Using catalog {}", path.display());
            CityCatalog::load_from(&path, &settings.data_dir)?
        }
        None => {
            tracing::info!("Using built-in catalog in {}", settings.data_dir.display());
            CityCatalog::builtin(&settings.data_dir)
        }
    };

    Ok(catalog.retain_available()?)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
