use thiserror::Error as ThisError;
use uniffi::Error;

use crate::errors::LogError;

/// Error surface seen by foreign callers. Only the message crosses the boundary.
#[derive(Debug, ThisError, Error)]
#[uniffi(flat_error)]
#[non_exhaustive]
pub enum WorkoutLogError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NothingSelected(String),
    #[error("{0}")]
    Storage(String),
}

impl From<LogError> for WorkoutLogError {
    fn from(e: LogError) -> Self {
        match e {
            LogError::Validation(v) => WorkoutLogError::Validation(v.to_string()),
            LogError::NothingSelected => {
                WorkoutLogError::NothingSelected(LogError::NothingSelected.to_string())
            }
            other => WorkoutLogError::Storage(other.to_string()),
        }
    }
}
