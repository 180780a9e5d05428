use serde::{Deserialize, Serialize};
use std::fmt;

/// Expense record as exchanged with frontends.
///
/// Field names follow the persisted JSON shape: `id`, `amount`, `category`,
/// `description`, `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    /// Always greater than zero
    pub amount: f64,
    /// Category name, e.g. "Food"
    pub category: String,
    /// Optional note, empty when none was given
    pub description: String,
    /// Creation timestamp with offset (RFC 3339)
    pub created_at: String,
}

/// A spending category as shown on the category grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub icon: String,
    /// Whether this is the currently highlighted category
    pub selected: bool,
}

/// Represents a formatted expense row for display purposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedExpense {
    pub id: i64,
    pub category: String,
    pub category_icon: String,
    pub formatted_amount: String,
    pub description: String,
    pub formatted_time: String,
    pub raw_amount: f64,
    pub raw_date: String,
}

/// Spending total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub icon: String,
    pub total: f64,
    pub formatted_total: String,
    pub count: usize,
}

/// Totals shown beneath the expense list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub today_total: f64,
    pub overall_total: f64,
    pub formatted_today_total: String,
    pub formatted_overall_total: String,
    pub today_count: usize,
    pub overall_count: usize,
    /// Only categories with at least one expense, in category grid order
    pub category_totals: Vec<CategoryTotal>,
}

/// Which records the expense list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseListScope {
    Today,
    All,
}

impl fmt::Display for ExpenseListScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseListScope::Today => write!(f, "Today's expenses"),
            ExpenseListScope::All => write!(f, "All expenses"),
        }
    }
}

/// Everything a frontend needs to render the main screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseViewResponse {
    pub scope: ExpenseListScope,
    /// Most recent first
    pub display_list: Vec<FormattedExpense>,
    pub summary: ExpenseSummary,
    pub categories: Vec<CategoryInfo>,
    /// e.g. "Monday, July 21, 2025, 04:28 PM"
    pub header_time: String,
}

impl ExpenseViewResponse {
    /// Message shown in place of an empty list
    pub fn empty_message(&self) -> &'static str {
        match self.scope {
            ExpenseListScope::Today => "No expenses recorded today",
            ExpenseListScope::All => "No expenses recorded yet",
        }
    }
}

/// Response after a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

/// Response after a delete request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    /// False when the user declined or the expense no longer exists
    pub deleted: bool,
    pub message: String,
}

/// Export content held in memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    /// Pretty-printed JSON array of every expense
    pub json_content: String,
    /// e.g. "expenses_2025-07-21.json"
    pub filename: String,
    pub expense_count: usize,
}

/// Result of writing the export file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub expense_count: usize,
}
