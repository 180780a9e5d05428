//! # Expense Tracker App
//!
//! The interactive loop. Each input line is one user action: it goes to the
//! backend, the view is rebuilt from the store, and the presenter renders it.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use shared::ExpenseListScope;
use std::io::BufRead;

use expense_tracker_backend::domain::commands::expenses::{
    Confirmation, CreateExpenseCommand, DeleteExpenseCommand,
};
use expense_tracker_backend::domain::commands::export::ExportToPathCommand;
use expense_tracker_backend::domain::commands::view::ExpenseViewQuery;
use expense_tracker_backend::domain::{CategorySelection, ExpenseCategory};
use expense_tracker_backend::storage::KeyValueStorage;
use expense_tracker_backend::Backend;

use crate::ui::{parse_action, ExpenseMapper, ExpensePresenter, StatusMessage, UserAction};

/// What the loop should do after a line has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    Continue,
    Quit,
}

/// Session state that is never persisted
#[derive(Debug, Clone)]
pub struct UiState {
    pub selection: CategorySelection,
    pub scope: ExpenseListScope,
    /// Expense waiting for a y/N answer
    pub pending_deletion: Option<i64>,
}

pub struct ExpenseTrackerApp<S: KeyValueStorage, P: ExpensePresenter> {
    backend: Backend<S>,
    presenter: P,
    state: UiState,
    clock: fn() -> DateTime<Utc>,
}

impl<S: KeyValueStorage, P: ExpensePresenter> ExpenseTrackerApp<S, P> {
    pub fn new(backend: Backend<S>, presenter: P) -> Self {
        Self::with_clock(backend, presenter, Utc::now)
    }

    pub fn with_clock(backend: Backend<S>, presenter: P, clock: fn() -> DateTime<Utc>) -> Self {
        let state = UiState {
            selection: CategorySelection::default(),
            scope: backend.config.default_scope,
            pending_deletion: None,
        };
        Self {
            backend,
            presenter,
            state,
            clock,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn backend(&self) -> &Backend<S> {
        &self.backend
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Initial render: the list for the configured scope and the category grid
    pub fn start(&mut self) -> Result<()> {
        info!(
            "🚀 Expense tracker started with {} stored expenses",
            self.backend.expense_service.all_expenses().len()
        );
        self.refresh_view()?;
        self.show_categories()
    }

    /// Read lines until `quit` or end of input
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.start()?;
        self.prompt()?;

        for line in input.lines() {
            let line = line?;
            if self.handle_line(&line)? == AppFlow::Quit {
                break;
            }
            self.prompt()?;
        }

        info!("👋 Expense tracker closed");
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Result<AppFlow> {
        if let Some(expense_id) = self.state.pending_deletion.take() {
            self.confirm_deletion(expense_id, Confirmation::from_answer(line))?;
            return Ok(AppFlow::Continue);
        }

        match parse_action(line) {
            Ok(action) => self.handle_action(action),
            Err(message) => {
                self.presenter.present_status(&StatusMessage::Error(message))?;
                Ok(AppFlow::Continue)
            }
        }
    }

    pub fn handle_action(&mut self, action: UserAction) -> Result<AppFlow> {
        debug!("Handling {:?}", action);
        match action {
            UserAction::ShowCategories => self.show_categories()?,
            UserAction::SelectCategory(category) => self.select_category(category)?,
            UserAction::ClearSelection => {
                self.state.selection.clear();
                self.show_categories()?;
            }
            UserAction::AddExpense {
                amount_input,
                description,
            } => self.submit_expense(amount_input, description)?,
            UserAction::DeleteExpense(expense_id) => self.request_deletion(expense_id)?,
            UserAction::ShowScope(scope) => {
                self.state.scope = scope;
                self.refresh_view()?;
            }
            UserAction::ShowSummary => self.show_summary()?,
            UserAction::Export(custom_path) => self.export(custom_path)?,
            UserAction::Help => self.presenter.present_help()?,
            UserAction::Quit => return Ok(AppFlow::Quit),
        }
        Ok(AppFlow::Continue)
    }

    fn select_category(&mut self, category: ExpenseCategory) -> Result<()> {
        self.state.selection.select(category);
        self.show_categories()
    }

    fn submit_expense(&mut self, amount_input: String, description: String) -> Result<()> {
        let command = CreateExpenseCommand {
            amount_input,
            category: self.state.selection.current(),
            description,
        };

        match self
            .backend
            .expense_service
            .create_expense_at(command, (self.clock)())
        {
            Ok(result) => {
                let response = ExpenseMapper::to_create_response(result);
                self.state
                    .selection
                    .after_submit(self.backend.config.selection_policy);
                // The id is what `delete <id>` takes
                self.presenter.present_status(&StatusMessage::Success(format!(
                    "{} (#{})",
                    response.success_message, response.expense.id
                )))?;
                self.refresh_view()
            }
            Err(e) if e.is_validation_error() => {
                self.presenter.present_status(&StatusMessage::Error(e.to_string()))
            }
            Err(e) => {
                error!("❌ Failed to save expense: {}", e);
                self.presenter.present_status(&StatusMessage::Error(format!(
                    "Could not save the expense: {}",
                    e
                )))
            }
        }
    }

    fn request_deletion(&mut self, expense_id: i64) -> Result<()> {
        let formatted = self
            .backend
            .expense_service
            .get_expense(expense_id)
            .map(|expense| self.backend.expense_table_service.format_single_expense(expense));

        match formatted {
            Some(expense) => {
                self.state.pending_deletion = Some(expense_id);
                self.presenter.present_confirmation(&expense)
            }
            None => self.presenter.present_status(&StatusMessage::Error(format!(
                "Expense {} not found",
                expense_id
            ))),
        }
    }

    fn confirm_deletion(&mut self, expense_id: i64, confirmation: Confirmation) -> Result<()> {
        let command = DeleteExpenseCommand {
            expense_id,
            confirmation,
        };

        match self.backend.expense_service.request_deletion(command) {
            Ok(result) => {
                let response = ExpenseMapper::to_delete_response(result);
                if response.deleted {
                    self.presenter
                        .present_status(&StatusMessage::Success(response.message))?;
                    self.refresh_view()
                } else {
                    self.presenter
                        .present_status(&StatusMessage::Info(response.message))
                }
            }
            Err(e) => {
                error!("❌ Failed to delete expense {}: {}", expense_id, e);
                self.presenter.present_status(&StatusMessage::Error(format!(
                    "Could not delete the expense: {}",
                    e
                )))
            }
        }
    }

    fn show_categories(&mut self) -> Result<()> {
        let categories = self
            .backend
            .expense_table_service
            .category_infos(&self.state.selection);
        self.presenter.present_categories(&categories)
    }

    fn show_summary(&mut self) -> Result<()> {
        let view = self.backend.expense_service.build_view(&ExpenseViewQuery {
            scope: self.state.scope,
            now: (self.clock)(),
        });
        let summary = self.backend.expense_table_service.format_summary(&view.totals);
        self.presenter.present_summary(&summary)
    }

    fn export(&mut self, custom_path: Option<String>) -> Result<()> {
        let response = self.backend.export_service.export_to_path(
            ExportToPathCommand { custom_path },
            self.backend.expense_service.all_expenses(),
            (self.clock)(),
        )?;

        let status = if response.success {
            StatusMessage::Success(response.message)
        } else {
            StatusMessage::Error(response.message)
        };
        self.presenter.present_status(&status)
    }

    /// Recompute the list and totals from the store and render them
    fn refresh_view(&mut self) -> Result<()> {
        let now = (self.clock)();
        let view = self.backend.expense_service.build_view(&ExpenseViewQuery {
            scope: self.state.scope,
            now,
        });
        let response = self.backend.expense_table_service.format_view(
            &view,
            self.state.scope,
            &self.state.selection,
            now,
        );
        self.presenter.present_view(&response)
    }

    fn prompt(&mut self) -> Result<()> {
        if self.state.pending_deletion.is_some() {
            return Ok(());
        }
        let selected = self.state.selection.current().map(|category| category.label());
        self.presenter.present_prompt(selected)
    }
}
