//! # Domain Module
//!
//! Contains all business logic for the expense tracker.
//!
//! ## Module Organization
//!
//! - **expense_service**: Submission, deletion and view recomputation over the record store
//! - **summary**: Totals and display ordering, pure functions over expense slices
//! - **validation**: Parsing the free-text entry form into strict values
//! - **selection**: The single-select category highlight
//! - **expense_table**: Formatting records and totals for display
//! - **export_service**: JSON snapshot export
//!
//! ## Business Rules
//!
//! - Every expense has a category and an amount greater than zero
//! - Expenses are never edited, only deleted, and deletion needs confirmation
//! - "Today" is decided in one configured timezone for every comparison
//! - Totals are recomputed from the records every time, never stored

pub mod commands;
pub mod errors;
pub mod expense_service;
pub mod expense_table;
pub mod export_service;
pub mod models;
pub mod selection;
pub mod summary;
pub mod validation;

pub use errors::ExpenseError;
pub use expense_service::ExpenseService;
pub use expense_table::{ExpenseTableConfig, ExpenseTableService, TimeFormat};
pub use export_service::ExportService;
pub use models::category::ExpenseCategory;
pub use models::expense::Expense;
pub use selection::{CategorySelection, SelectionPolicy};
pub use summary::{ExpenseTotals, ExpenseView};
pub use validation::ExpenseFormValidator;
