//! # Report Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Report Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌──────────────────┐  ┌────────────────────────┐ │
//! │  │  Configuration  │  │    Snapshot      │  │     Engine             │ │
//! │  │                 │  │                  │  │                        │ │
//! │  │  InvalidConfig  │  │  SnapshotLoad-   │  │  Core(CoreError)       │ │
//! │  │  ConfigLoad-    │  │  Failed          │  │   └─ Validation        │ │
//! │  │  Failed, Toml   │  │  Json, Io        │  │                        │ │
//! │  └─────────────────┘  └──────────────────┘  └────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use bistro_core::CoreError;
use thiserror::Error;

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsed but holds unusable values.
    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    /// Config file exists but could not be read.
    #[error("Failed to load config from {path}: {reason}")]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Config file is not valid TOML for `ReportConfig`.
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // =========================================================================
    // Snapshot Errors
    // =========================================================================
    /// Snapshot file could not be read.
    #[error("Failed to load snapshot from {path}: {reason}")]
    SnapshotLoadFailed { path: PathBuf, reason: String },

    /// Snapshot or report JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Engine Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ReportError {
    /// Returns true if this error comes from the configuration layer.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidConfig(_) | ReportError::ConfigLoadFailed { .. } | ReportError::Toml(_)
        )
    }
}
