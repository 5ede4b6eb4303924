//! Error handling for the maintenance engine
//!
//! Due-status calculation itself never fails; errors only come from the edges
//! around it: reading snapshots, loading configuration and exporting results.

use thiserror::Error;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    // Input errors
    #[error("Failed to read snapshot {path}: {source}")]
    SnapshotRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot JSON: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    // Output errors
    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl EngineError {
    /// Stable machine-readable code, used by the WASM layer
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::SnapshotRead { .. } => "SNAPSHOT_READ",
            EngineError::SnapshotParse(_) => "SNAPSHOT_PARSE",
            EngineError::InvalidDate(_) => "INVALID_DATE",
            EngineError::VehicleNotFound(_) => "VEHICLE_NOT_FOUND",
            EngineError::Configuration(_) => "CONFIGURATION_ERROR",
            EngineError::Export(_) => "EXPORT_ERROR",
            EngineError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(e: csv::Error) -> Self {
        EngineError::Export(format!("CSV serialization error: {}", e))
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
