//! Error types for the encounter crate.

use thiserror::Error;

/// Errors that can occur while loading catalogs or generating encounters.
#[derive(Debug, Error)]
pub enum EncounterError {
    /// Combat generation needs at least one catalog entry to draw from.
    #[error("monster catalog is empty")]
    EmptyCatalog,

    /// Two catalog entries share the same id.
    #[error("duplicate monster id: \"{0}\"")]
    DuplicateMonster(String),

    /// A catalog or spec file could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A catalog or spec file was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for encounter operations.
pub type EncounterResult<T> = Result<T, EncounterError>;
