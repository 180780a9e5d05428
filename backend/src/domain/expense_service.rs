//! Expense service domain logic for the expense tracker.
//!
//! Owns the record store and runs every user-initiated mutation: validate the
//! entry form, append to the store, delete after confirmation. After each
//! mutation the frontend calls [`ExpenseService::build_view`] to recompute
//! what is shown.

use chrono::{DateTime, FixedOffset, Utc};
use log::{info, warn};
use shared::ExpenseListScope;

use crate::domain::commands::expenses::{
    Confirmation, CreateExpenseCommand, CreateExpenseResult, DeleteExpenseCommand,
    DeleteExpenseResult,
};
use crate::domain::commands::view::ExpenseViewQuery;
use crate::domain::errors::ExpenseError;
use crate::domain::models::expense::Expense;
use crate::domain::summary::{order_for_display, summarize, ExpenseView};
use crate::domain::validation::ExpenseFormValidator;
use crate::storage::{ExpenseRepository, KeyValueStorage};

pub struct ExpenseService<S: KeyValueStorage> {
    repository: ExpenseRepository<S>,
    validator: ExpenseFormValidator,
}

impl<S: KeyValueStorage> ExpenseService<S> {
    pub fn new(storage: S, timezone: FixedOffset, validator: ExpenseFormValidator) -> Self {
        Self {
            repository: ExpenseRepository::open(storage, timezone),
            validator,
        }
    }

    /// Check the entry form and build the expense it describes.
    ///
    /// The category is checked first, then the amount, then the note. The
    /// identifier and timestamp are assigned here, from `now`.
    pub fn validate_submission(
        &self,
        command: &CreateExpenseCommand,
        now: DateTime<Utc>,
    ) -> Result<Expense, ExpenseError> {
        let category = command.category.ok_or(ExpenseError::MissingCategory)?;
        let amount = self.validator.clean_and_parse_amount(&command.amount_input)?;
        let description = self.validator.clean_description(&command.description)?;

        Ok(Expense {
            id: self.repository.next_id(&now)?,
            amount,
            category,
            description,
            created_at: now.with_timezone(&self.repository.timezone()),
        })
    }

    pub fn create_expense(
        &mut self,
        command: CreateExpenseCommand,
    ) -> Result<CreateExpenseResult, ExpenseError> {
        self.create_expense_at(command, Utc::now())
    }

    /// Validate and store a new expense created at `now`
    pub fn create_expense_at(
        &mut self,
        command: CreateExpenseCommand,
        now: DateTime<Utc>,
    ) -> Result<CreateExpenseResult, ExpenseError> {
        let expense = match self.validate_submission(&command, now) {
            Ok(expense) => expense,
            Err(e) => {
                info!("Rejected expense submission: {}", e);
                return Err(e);
            }
        };

        self.repository.add(expense.clone())?;
        info!(
            "💸 Recorded expense {}: {}{:.2} for {}",
            expense.id,
            self.validator.currency_symbol(),
            expense.amount,
            expense.category
        );

        let success_message = format!(
            "Added {}{:.2} for {}",
            self.validator.currency_symbol(),
            expense.amount,
            expense.category
        );
        Ok(CreateExpenseResult {
            expense,
            success_message,
        })
    }

    /// Delete an expense once the user has confirmed. Declining, or asking
    /// for an id that is not stored, changes nothing and reports `deleted: false`.
    pub fn request_deletion(
        &mut self,
        command: DeleteExpenseCommand,
    ) -> Result<DeleteExpenseResult, ExpenseError> {
        if command.confirmation == Confirmation::Declined {
            info!("Deletion of expense {} declined", command.expense_id);
            return Ok(DeleteExpenseResult {
                deleted: false,
                message: "Deletion cancelled".to_string(),
            });
        }

        if self.repository.remove(command.expense_id)? {
            info!("🗑️ Deleted expense {}", command.expense_id);
            Ok(DeleteExpenseResult {
                deleted: true,
                message: "Expense deleted".to_string(),
            })
        } else {
            warn!("Delete requested for unknown expense {}", command.expense_id);
            Ok(DeleteExpenseResult {
                deleted: false,
                message: ExpenseError::RecordNotFound(command.expense_id).to_string(),
            })
        }
    }

    /// Every expense in chronological (storage) order
    pub fn all_expenses(&self) -> &[Expense] {
        self.repository.all()
    }

    pub fn todays_expenses(&self, now: DateTime<Utc>) -> Vec<Expense> {
        self.repository.today(&now)
    }

    pub fn get_expense(&self, id: i64) -> Option<&Expense> {
        self.repository.get(id)
    }

    /// Recompute the visible list and the totals from the current store
    pub fn build_view(&self, query: &ExpenseViewQuery) -> ExpenseView {
        let all = self.repository.all();
        let today = self.repository.today(&query.now);
        let totals = summarize(all, &today);

        let display_list = match query.scope {
            ExpenseListScope::Today => order_for_display(&today),
            ExpenseListScope::All => order_for_display(all),
        };

        ExpenseView {
            display_list,
            totals,
        }
    }

    pub fn timezone(&self) -> FixedOffset {
        self.repository.timezone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::category::ExpenseCategory;
    use crate::storage::test_utils::{ist, TestEnvironment};
    use crate::storage::MemoryStorage;
    use chrono::Duration;

    fn create_test_service() -> ExpenseService<MemoryStorage> {
        ExpenseService::new(MemoryStorage::new(), ist(), ExpenseFormValidator::default())
    }

    /// 16:28 IST on 21 July 2025
    fn reference_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-07-21T16:28:00+05:30")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn command(amount: &str, category: Option<ExpenseCategory>, description: &str) -> CreateExpenseCommand {
        CreateExpenseCommand {
            amount_input: amount.to_string(),
            category,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_submit_lunch_scenario() {
        let mut service = create_test_service();
        let now = reference_time();

        let result = service
            .create_expense_at(command("250", Some(ExpenseCategory::Food), "lunch"), now)
            .unwrap();

        assert_eq!(service.all_expenses().len(), 1);
        let stored = &service.all_expenses()[0];
        assert_eq!(stored, &result.expense);
        assert_eq!(stored.amount, 250.0);
        assert_eq!(stored.category, ExpenseCategory::Food);
        assert_eq!(stored.description, "lunch");
        assert_eq!(stored.created_at.offset(), &ist());
        assert_eq!(result.success_message, "Added ₹250.00 for Food");

        assert_eq!(service.todays_expenses(now), vec![stored.clone()]);

        let view = service.build_view(&ExpenseViewQuery {
            scope: ExpenseListScope::Today,
            now,
        });
        assert_eq!(view.totals.today_total, 250.0);
        assert_eq!(view.totals.overall_total, 250.0);
    }

    #[test]
    fn test_submission_grows_store_by_one_and_matches_draft() {
        let mut service = create_test_service();
        let now = reference_time();
        service
            .create_expense_at(command("10", Some(ExpenseCategory::Other), ""), now)
            .unwrap();

        let cmd = command("99.5", Some(ExpenseCategory::Medical), "tablets");
        let draft = service.validate_submission(&cmd, now).unwrap();
        let before = service.all_expenses().len();
        service.create_expense_at(cmd, now).unwrap();

        assert_eq!(service.all_expenses().len(), before + 1);
        assert_eq!(service.all_expenses().last(), Some(&draft));
    }

    #[test]
    fn test_missing_category_leaves_store_unchanged() {
        let mut service = create_test_service();

        let err = service
            .create_expense_at(command("250", None, "lunch"), reference_time())
            .unwrap_err();

        assert!(matches!(err, ExpenseError::MissingCategory));
        assert!(service.all_expenses().is_empty());
    }

    #[test]
    fn test_submission_after_max_id_fails_without_panicking() {
        let stored = format!(
            r#"[{{"id":{},"amount":5,"category":"Food","createdAt":"2025-07-21T09:00:00+05:30"}}]"#,
            i64::MAX
        );
        let storage = MemoryStorage::with_value(crate::storage::EXPENSES_KEY, &stored);
        let mut service = ExpenseService::new(storage, ist(), ExpenseFormValidator::default());

        let err = service
            .create_expense_at(command("250", Some(ExpenseCategory::Food), ""), reference_time())
            .unwrap_err();

        assert!(matches!(err, ExpenseError::IdSpaceExhausted(_)));
        assert!(!err.is_validation_error());
        assert_eq!(service.all_expenses().len(), 1);
    }

    #[test]
    fn test_category_is_checked_before_amount() {
        let service = create_test_service();
        let err = service
            .validate_submission(&command("-5", None, ""), reference_time())
            .unwrap_err();
        assert!(matches!(err, ExpenseError::MissingCategory));
    }

    #[test]
    fn test_negative_amount_leaves_store_unchanged() {
        let mut service = create_test_service();

        let err = service
            .create_expense_at(command("-5", Some(ExpenseCategory::Food), ""), reference_time())
            .unwrap_err();

        assert!(matches!(err, ExpenseError::InvalidAmount(_)));
        assert!(err.is_validation_error());
        assert!(service.all_expenses().is_empty());
    }

    #[test]
    fn test_ids_stay_unique_within_one_millisecond() {
        let mut service = create_test_service();
        let now = reference_time();
        let first = service
            .create_expense_at(command("1", Some(ExpenseCategory::Food), ""), now)
            .unwrap();
        let second = service
            .create_expense_at(command("2", Some(ExpenseCategory::Food), ""), now)
            .unwrap();

        assert_ne!(first.expense.id, second.expense.id);
        assert!(second.expense.id > first.expense.id);
    }

    #[test]
    fn test_declined_deletion_is_noop() {
        let mut service = create_test_service();
        let created = service
            .create_expense_at(command("5", Some(ExpenseCategory::Food), ""), reference_time())
            .unwrap();

        let result = service
            .request_deletion(DeleteExpenseCommand {
                expense_id: created.expense.id,
                confirmation: Confirmation::Declined,
            })
            .unwrap();

        assert!(!result.deleted);
        assert_eq!(service.all_expenses().len(), 1);
    }

    #[test]
    fn test_confirmed_deletion_removes_expense() {
        let mut service = create_test_service();
        let created = service
            .create_expense_at(command("5", Some(ExpenseCategory::Food), ""), reference_time())
            .unwrap();

        let result = service
            .request_deletion(DeleteExpenseCommand {
                expense_id: created.expense.id,
                confirmation: Confirmation::Confirmed,
            })
            .unwrap();

        assert!(result.deleted);
        assert!(service.get_expense(created.expense.id).is_none());
        assert!(service.all_expenses().is_empty());
    }

    #[test]
    fn test_deleting_unknown_expense_reports_not_found() {
        let mut service = create_test_service();

        let result = service
            .request_deletion(DeleteExpenseCommand {
                expense_id: 12345,
                confirmation: Confirmation::Confirmed,
            })
            .unwrap();

        assert!(!result.deleted);
        assert_eq!(result.message, "Expense 12345 not found");
    }

    #[test]
    fn test_today_view_excludes_other_days_but_totals_include_them() {
        let mut service = create_test_service();
        let now = reference_time();
        let yesterday = now - Duration::days(1);

        service
            .create_expense_at(command("100", Some(ExpenseCategory::Grocery), "veg"), yesterday)
            .unwrap();
        let today = service
            .create_expense_at(command("250", Some(ExpenseCategory::Food), "lunch"), now)
            .unwrap();

        let view = service.build_view(&ExpenseViewQuery {
            scope: ExpenseListScope::Today,
            now,
        });
        assert_eq!(view.display_list, vec![today.expense]);
        assert_eq!(view.totals.today_total, 250.0);
        assert_eq!(view.totals.overall_total, 350.0);
    }

    #[test]
    fn test_all_view_is_most_recent_first() {
        let mut service = create_test_service();
        let now = reference_time();
        let r1 = service
            .create_expense_at(command("1", Some(ExpenseCategory::Food), ""), now - Duration::days(3))
            .unwrap()
            .expense;
        let r2 = service
            .create_expense_at(command("2", Some(ExpenseCategory::Food), ""), now)
            .unwrap()
            .expense;

        let view = service.build_view(&ExpenseViewQuery {
            scope: ExpenseListScope::All,
            now,
        });
        assert_eq!(view.display_list, vec![r2.clone(), r1.clone()]);
        assert_eq!(service.all_expenses(), &[r1, r2]);
    }

    #[test]
    fn test_expenses_survive_restart() {
        let env = TestEnvironment::new().unwrap();
        let now = reference_time();
        {
            let mut service =
                ExpenseService::new(env.file_storage(), ist(), ExpenseFormValidator::default());
            service
                .create_expense_at(command("250", Some(ExpenseCategory::Food), "lunch"), now)
                .unwrap();
        }

        let service = ExpenseService::new(env.file_storage(), ist(), ExpenseFormValidator::default());
        assert_eq!(service.all_expenses().len(), 1);
        assert_eq!(service.todays_expenses(now).len(), 1);
    }
}
