//! Entry form validation.
//!
//! Free-text input is parsed into strict values here, before anything reaches
//! the data model. Amounts must be finite and greater than zero.

use crate::domain::errors::{ExpenseError, MAX_DESCRIPTION_LENGTH};

/// Validates and cleans the fields of the expense entry form
#[derive(Debug, Clone)]
pub struct ExpenseFormValidator {
    currency_symbol: String,
}

impl ExpenseFormValidator {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Clean and parse amount input: strips the currency symbol, thousands
    /// separators and spaces, then requires a finite number above zero.
    pub fn clean_and_parse_amount(&self, amount_input: &str) -> Result<f64, ExpenseError> {
        let mut cleaned = amount_input.trim().to_string();
        if !self.currency_symbol.is_empty() {
            cleaned = cleaned.replace(&self.currency_symbol, "");
        }
        let cleaned = cleaned.replace(',', "").replace(' ', "");

        if cleaned.is_empty() {
            return Err(ExpenseError::InvalidAmount("amount is empty".to_string()));
        }

        let amount = cleaned
            .parse::<f64>()
            .map_err(|_| ExpenseError::InvalidAmount(format!("'{}' is not a number", amount_input.trim())))?;

        if !amount.is_finite() {
            return Err(ExpenseError::InvalidAmount(format!("'{}' is not a number", amount_input.trim())));
        }
        if amount <= 0.0 {
            return Err(ExpenseError::InvalidAmount("amount must be greater than 0".to_string()));
        }

        Ok(amount)
    }

    /// Trim the optional note and enforce its length limit
    pub fn clean_description(&self, description: &str) -> Result<String, ExpenseError> {
        let trimmed = description.trim();
        let length = trimmed.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(ExpenseError::DescriptionTooLong(length));
        }
        Ok(trimmed.to_string())
    }
}

impl Default for ExpenseFormValidator {
    fn default() -> Self {
        Self::new("₹")
    }
}
