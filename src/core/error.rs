//! Error types for the asset picker
//!
//! Policy vetoes, redundant selections and disabled gestures are reported as
//! [`SelectionOutcome`](crate::core::selection::SelectionOutcome)s, never as
//! errors. The variants here cover contract violations (using a session outside
//! its presenting state) and failures of the host-side plumbing.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::library::AssetId;
use crate::ui::coordinator::SessionState;

/// Main error type for the asset picker
#[derive(Error, Debug)]
pub enum PickerError {
    /// An operation was invoked in a session state that does not allow it
    #[error("'{operation}' is not allowed while the picker is {state}")]
    InvalidState {
        /// Operation that was attempted
        operation: &'static str,
        /// State the session was in
        state: SessionState,
    },

    /// A collection index outside the coordinator's collection list
    #[error("No collection at index {0}")]
    UnknownCollection(usize),

    /// An asset id that does not resolve in the loaded library
    #[error("Unknown asset '{0}'")]
    UnknownAsset(AssetId),

    /// Configuration loading failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A library manifest could not be read or parsed
    #[error("Invalid library manifest '{}': {message}", path.display())]
    Manifest {
        /// Manifest path
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// A gesture script line could not be parsed
    #[error("Script error on line {line}: {message}")]
    Script {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// General I/O error
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PickerError>;

impl From<std::io::Error> for PickerError {
    fn from(err: std::io::Error) -> Self {
        PickerError::Io(err.to_string())
    }
}

impl PickerError {
    /// Check if this error is a session contract violation
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, PickerError::InvalidState { .. })
    }
}
