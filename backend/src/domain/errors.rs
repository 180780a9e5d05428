//! Error kinds surfaced by the expense domain.

/// Longest note accepted on an expense
pub const MAX_DESCRIPTION_LENGTH: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error("Please select a category")]
    MissingCategory,
    #[error("Please enter a valid amount greater than 0 ({0})")]
    InvalidAmount(String),
    #[error("Description is too long ({0} characters). Maximum is {max}.", max = MAX_DESCRIPTION_LENGTH)]
    DescriptionTooLong(usize),
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Saved expenses could not be read: {0}")]
    PersistedStateUnreadable(String),
    #[error("Expense {0} not found")]
    RecordNotFound(i64),
    #[error("No expense id is left after {0}")]
    IdSpaceExhausted(i64),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ExpenseError {
    /// Whether the error came from user input rather than the storage layer
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ExpenseError::MissingCategory
                | ExpenseError::InvalidAmount(_)
                | ExpenseError::DescriptionTooLong(_)
                | ExpenseError::UnknownCategory(_)
        )
    }
}
