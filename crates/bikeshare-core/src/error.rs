use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// The city identifier is not present in the catalog.
    #[error("No data source configured for city: {0}")]
    SourceNotFound(String),

    /// A source file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid CSV.
    #[error("Failed to parse CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A source file lacks one of the columns every trip log must carry.
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A catalog file could not be parsed.
    #[error("Failed to parse catalog {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No catalog entry resolves to a readable source.
    #[error("No city data sources are available")]
    EmptyCatalog,

    /// A validated answer did not map onto a known option.
    #[error("Unrecognised choice: {0}")]
    InvalidChoice(String),

    /// The user entered the escape sentinel.
    #[error("Session cancelled by user")]
    Cancelled,

    /// Standard input was closed while a prompt was waiting for an answer.
    #[error("Input closed")]
    InputClosed,

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExplorerError {
    /// `true` for the two ways a user ends the session without a failure.
    pub fn is_user_exit(&self) -> bool {
        matches!(self, ExplorerError::Cancelled | ExplorerError::InputClosed)
    }
}

/// Convenience alias used throughout the explorer crates.
pub type Result<T> = std::result::Result<T, ExplorerError>;
