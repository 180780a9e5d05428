//! Domain model for the fixed set of spending categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::ExpenseError;

/// Spending category. The set is closed; records never carry anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Grocery,
    Medical,
    Clothes,
    Petrol,
    Doctor,
    Entertainment,
    Other,
}

impl ExpenseCategory {
    /// Every category in category grid order
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Food,
        ExpenseCategory::Grocery,
        ExpenseCategory::Medical,
        ExpenseCategory::Clothes,
        ExpenseCategory::Petrol,
        ExpenseCategory::Doctor,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Grocery => "Grocery",
            ExpenseCategory::Medical => "Medical",
            ExpenseCategory::Clothes => "Clothes",
            ExpenseCategory::Petrol => "Petrol",
            ExpenseCategory::Doctor => "Doctor",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "🍽️",
            ExpenseCategory::Grocery => "🛒",
            ExpenseCategory::Medical => "❤️",
            ExpenseCategory::Clothes => "👕",
            ExpenseCategory::Petrol => "⛽",
            ExpenseCategory::Doctor => "👨‍⚕️",
            ExpenseCategory::Entertainment => "🎬",
            ExpenseCategory::Other => "...",
        }
    }

    /// Look a category up by its 1-based position on the grid
    pub fn from_position(position: usize) -> Option<Self> {
        position
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ExpenseError;

    /// Case-insensitive match on the category label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExpenseError::UnknownCategory(wanted.to_string()))
    }
}
