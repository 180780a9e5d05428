//! Category selection state for the entry form.
//!
//! Exactly one category can be highlighted at a time. The state lives only for
//! the current session and is never persisted.

use serde::{Deserialize, Serialize};

use crate::domain::models::category::ExpenseCategory;

/// What happens to the highlighted category after a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Clear the highlight, matching a form reset
    #[default]
    ResetAfterSubmit,
    /// Keep the category highlighted for the next entry
    RetainAfterSubmit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelection {
    #[default]
    NoneSelected,
    Selected(ExpenseCategory),
}

impl CategorySelection {
    /// Highlight `category`, replacing any earlier choice
    pub fn select(&mut self, category: ExpenseCategory) {
        *self = CategorySelection::Selected(category);
    }

    pub fn clear(&mut self) {
        *self = CategorySelection::NoneSelected;
    }

    pub fn current(&self) -> Option<ExpenseCategory> {
        match self {
            CategorySelection::NoneSelected => None,
            CategorySelection::Selected(category) => Some(*category),
        }
    }

    pub fn is_selected(&self, category: ExpenseCategory) -> bool {
        self.current() == Some(category)
    }

    /// Apply `policy` once an expense has been stored
    pub fn after_submit(&mut self, policy: SelectionPolicy) {
        if policy == SelectionPolicy::ResetAfterSubmit {
            self.clear();
        }
    }
}
