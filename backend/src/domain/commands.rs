//! Domain-level command and query types.
//! These structs are used by services inside the domain layer. Frontends map
//! user events onto them and receive the DTOs from the `shared` crate back.

pub mod expenses {
    use crate::domain::models::category::ExpenseCategory;
    use crate::domain::models::expense::Expense;

    /// Input for creating a new expense from the entry form.
    #[derive(Debug, Clone, Default)]
    pub struct CreateExpenseCommand {
        /// Raw text from the amount field
        pub amount_input: String,
        /// Currently highlighted category, if any
        pub category: Option<ExpenseCategory>,
        pub description: String,
    }

    /// Answer to the "delete this expense?" prompt.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Confirmation {
        Confirmed,
        Declined,
    }

    impl Confirmation {
        /// Interpret a typed answer; anything but yes declines
        pub fn from_answer(answer: &str) -> Self {
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => Confirmation::Confirmed,
                _ => Confirmation::Declined,
            }
        }
    }

    /// Command for deleting a single expense.
    #[derive(Debug, Clone)]
    pub struct DeleteExpenseCommand {
        pub expense_id: i64,
        pub confirmation: Confirmation,
    }

    /// Result of creating an expense.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseResult {
        pub expense: Expense,
        pub success_message: String,
    }

    /// Result of a delete request.
    #[derive(Debug, Clone)]
    pub struct DeleteExpenseResult {
        pub deleted: bool,
        pub message: String,
    }
}

pub mod view {
    use chrono::{DateTime, Utc};
    use shared::ExpenseListScope;

    /// Query for recomputing the main screen.
    #[derive(Debug, Clone)]
    pub struct ExpenseViewQuery {
        pub scope: ExpenseListScope,
        /// Reference instant deciding what "today" is
        pub now: DateTime<Utc>,
    }
}

pub mod export {
    /// Input for writing the export file to disk.
    #[derive(Debug, Clone, Default)]
    pub struct ExportToPathCommand {
        pub custom_path: Option<String>,
    }
}
