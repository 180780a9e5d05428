use expense_tracker_backend::domain::commands::expenses::{CreateExpenseResult, DeleteExpenseResult};
use expense_tracker_backend::domain::Expense as DomainExpense;
use shared::{CreateExpenseResponse, DeleteExpenseResponse, Expense};

/// Simple expense mapper for converting domain expenses to DTOs
pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(expense: DomainExpense) -> Expense {
        Expense {
            id: expense.id,
            amount: expense.amount,
            category: expense.category.label().to_string(),
            description: expense.description,
            created_at: expense.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_response(result: CreateExpenseResult) -> CreateExpenseResponse {
        CreateExpenseResponse {
            expense: Self::to_dto(result.expense),
            success_message: result.success_message,
        }
    }

    pub fn to_delete_response(result: DeleteExpenseResult) -> DeleteExpenseResponse {
        DeleteExpenseResponse {
            deleted: result.deleted,
            message: result.message,
        }
    }
}
