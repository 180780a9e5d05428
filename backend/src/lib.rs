//! # Expense Tracker Backend
//!
//! All non-UI logic for the expense tracker: the record store and its
//! persistence, entry validation, aggregation and export.
//!
//! Everything is synchronous and single-threaded. A frontend owns one
//! [`Backend`] and drives it one user action at a time:
//!
//! ```text
//! user action → ExpenseService (validate, mutate, persist)
//!             → ExpenseService::build_view (recompute)
//!             → ExpenseTableService::format_view → frontend renders
//! ```

pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;
use std::path::Path;

use crate::domain::{
    ExpenseFormValidator, ExpenseService, ExpenseTableConfig, ExpenseTableService, ExportService,
};
use crate::storage::{
    AppConfig, ConfigRepository, FileConnection, FileStorage, KeyValueStorage, MemoryStorage,
};

/// Main backend struct that orchestrates all services
pub struct Backend<S: KeyValueStorage> {
    pub expense_service: ExpenseService<S>,
    pub expense_table_service: ExpenseTableService,
    pub export_service: ExportService,
    pub config: AppConfig,
}

impl Backend<FileStorage> {
    /// Open the backend on a data directory, or the default one under
    /// Documents when `data_dir` is `None`
    pub fn open(data_dir: Option<&Path>) -> Result<Self> {
        let connection = match data_dir {
            Some(dir) => FileConnection::new(dir)?,
            None => FileConnection::new_default()?,
        };
        info!("📁 Using data directory {}", connection.base_directory().display());

        let config = ConfigRepository::new(connection.clone()).load_or_create()?;
        Self::with_storage(FileStorage::new(connection), config)
    }
}

impl Backend<MemoryStorage> {
    /// A backend that forgets everything when dropped
    pub fn in_memory(config: AppConfig) -> Result<Self> {
        Self::with_storage(MemoryStorage::new(), config)
    }
}

impl<S: KeyValueStorage> Backend<S> {
    pub fn with_storage(storage: S, config: AppConfig) -> Result<Self> {
        let timezone = config.timezone()?;

        let expense_service = ExpenseService::new(
            storage,
            timezone,
            ExpenseFormValidator::new(config.currency_symbol.clone()),
        );
        let expense_table_service = ExpenseTableService::with_config(
            ExpenseTableConfig {
                currency_symbol: config.currency_symbol.clone(),
                time_format: config.time_format,
            },
            timezone,
        );
        let export_service = ExportService::new(timezone);

        Ok(Backend {
            expense_service,
            expense_table_service,
            export_service,
            config,
        })
    }
}
