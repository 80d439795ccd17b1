use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive explorer for bike-share trip logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Interactive explorer for bike-share trip logs",
    version
)]
pub struct Settings {
    /// Directory holding the city CSV files
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// JSON file mapping city names to CSV paths
    #[arg(long, env = "BIKESHARE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Logging level
    #[arg(
        long,
        env = "BIKESHARE_LOG_LEVEL",
        default_value = "WARNING",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"]
    )]
    pub log_level: String,

    /// Log file path (logs go to stderr when unset)
    #[arg(long, env = "BIKESHARE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, env = "BIKESHARE_DEBUG")]
    pub debug: bool,

    /// Never clear the terminal between screens
    #[arg(long, env = "BIKESHARE_NO_CLEAR")]
    pub no_clear: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
