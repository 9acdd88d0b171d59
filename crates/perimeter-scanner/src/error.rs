use perimeter_core::PerimeterError;
use perimeter_progress::ProgressError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The apex domain failed validation; the scan never started.
    #[error("invalid apex domain: {0}")]
    InvalidDomain(String),

    /// An HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// The progress store could not be opened.
    #[error("progress store error: {0}")]
    Progress(#[from] ProgressError),

    /// An unexpected fault aborted the scan.
    #[error("scan failed: {0}")]
    Internal(String),
}

impl From<PerimeterError> for ScanError {
    fn from(err: PerimeterError) -> Self {
        match err {
            PerimeterError::Validation(msg) => Self::InvalidDomain(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
