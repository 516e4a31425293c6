use thiserror::Error as ThisError;

/// Rejections raised while turning raw form input into a [`crate::form::NewWorkout`].
///
/// Checked in declaration order; the first failing rule wins.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("Please provide both reps and weight for each set.")]
    IncompleteSet,
    #[error("Invalid date format. Please use MM-DD-YYYY.")]
    InvalidDate,
    #[error("Please fill in all required fields.")]
    MissingField,
    #[error("Please add at least one set.")]
    NoSets,
    #[error("Set {set_number}: reps must be a whole number and weight must be a number.")]
    InvalidSetValue { set_number: usize },
}

#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum LogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No item selected")]
    NothingSelected,
    #[error("failed to open database {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: diesel::ConnectionError,
    },
    #[error("database error: {0}")]
    Storage(#[from] diesel::result::Error),
    #[error("failed to apply schema migrations: {0}")]
    Migration(String),
}

impl LogError {
    /// Whether the error should be shown as a warning rather than a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, LogError::NothingSelected)
    }
}

pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_form_wording() {
        assert_eq!(
            ValidationError::IncompleteSet.to_string(),
            "Please provide both reps and weight for each set."
        );
        assert_eq!(
            ValidationError::InvalidDate.to_string(),
            "Invalid date format. Please use MM-DD-YYYY."
        );
        assert_eq!(
            LogError::from(ValidationError::MissingField).to_string(),
            "Please fill in all required fields."
        );
    }

    #[test]
    fn nothing_selected_is_a_warning() {
        assert!(LogError::NothingSelected.is_warning());
        assert!(!LogError::from(ValidationError::InvalidDate).is_warning());
    }
}
