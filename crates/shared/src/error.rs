use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Io,
    Packaging,
    Encoding,
}

/// Failure at the import/export boundary. Raised before the engine sees any
/// data, so the board is never partially updated.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("invalid data format: {0}")]
    Validation(String),
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to package export: {0}")]
    Packaging(String),
    #[error("failed to encode snapshot: {0}")]
    Encoding(String),
}

impl BoundaryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::Validation,
            Self::Io { .. } => ErrorCode::Io,
            Self::Packaging(_) => ErrorCode::Packaging,
            Self::Encoding(_) => ErrorCode::Encoding,
        }
    }
}

/// What the front end shows the user when an import or export fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&BoundaryError> for ErrorReport {
    fn from(err: &BoundaryError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
