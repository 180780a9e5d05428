//! # Expense Repository
//!
//! The record store: the full ordered sequence of expenses held in memory and
//! mirrored to a key-value substrate under the key `"expenses"`.
//!
//! ## Stored Format
//!
//! ```json
//! [
//!   {"id": 1753095480000, "amount": 250.0, "category": "Food",
//!    "description": "lunch", "createdAt": "2025-07-21T16:28:00+05:30"}
//! ]
//! ```
//!
//! Records written before ids existed carry `date` instead of `createdAt`,
//! an ignored `title`, and no `id`. They are given ids from their creation
//! time when loaded.
//!
//! Every mutation rewrites the whole array. A missing value loads as an empty
//! store; an unreadable one also loads as empty, after its raw bytes have been
//! copied to `"expenses.corrupt"`. If that copy cannot be made the store
//! refuses to write, so the only copy is never replaced.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset, TimeZone};
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::collections::HashSet;

use crate::domain::models::category::ExpenseCategory;

use crate::domain::errors::ExpenseError;
use crate::domain::models::expense::Expense;

use super::traits::KeyValueStorage;

/// Key holding the expense list
pub const EXPENSES_KEY: &str = "expenses";
/// Key receiving an unreadable expense list before it is replaced
pub const CORRUPT_EXPENSES_KEY: &str = "expenses.corrupt";

pub struct ExpenseRepository<S: KeyValueStorage> {
    storage: S,
    expenses: Vec<Expense>,
    timezone: FixedOffset,
    /// Set when an unreadable value could not be preserved
    writes_blocked: bool,
}

/// What a load produced, and whether the stored value may be replaced
struct LoadOutcome {
    expenses: Vec<Expense>,
    writes_blocked: bool,
}

impl LoadOutcome {
    fn loaded(expenses: Vec<Expense>) -> Self {
        Self {
            expenses,
            writes_blocked: false,
        }
    }
}

/// An expense as it may appear in storage, current or legacy shape
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredExpense {
    id: Option<i64>,
    amount: f64,
    category: ExpenseCategory,
    #[serde(default)]
    description: String,
    #[serde(alias = "date")]
    created_at: DateTime<FixedOffset>,
}

impl<S: KeyValueStorage> ExpenseRepository<S> {
    /// Open the store, loading whatever `storage` currently holds.
    /// `timezone` decides calendar days for [`ExpenseRepository::today`].
    pub fn open(storage: S, timezone: FixedOffset) -> Self {
        let outcome = Self::load_from(&storage);
        info!("📂 Loaded {} expenses", outcome.expenses.len());
        Self {
            storage,
            expenses: outcome.expenses,
            timezone,
            writes_blocked: outcome.writes_blocked,
        }
    }

    /// Read the persisted collection again. Never fails: absent or unreadable
    /// data comes back as an empty list.
    pub fn load(&self) -> Vec<Expense> {
        Self::load_from(&self.storage).expenses
    }

    fn load_from(storage: &S) -> LoadOutcome {
        let result = match storage.get(EXPENSES_KEY) {
            Ok(Some(raw)) => parse_expenses(&raw),
            Ok(None) => {
                debug!("No saved expenses found, starting empty");
                return LoadOutcome::loaded(Vec::new());
            }
            Err(e) => Err(ExpenseError::PersistedStateUnreadable(format!("{:#}", e))),
        };

        match result {
            Ok(expenses) => LoadOutcome::loaded(expenses),
            Err(e) => {
                warn!("⚠️ {}; starting with an empty list", e);
                LoadOutcome {
                    expenses: Vec::new(),
                    writes_blocked: !Self::preserve_unreadable(storage),
                }
            }
        }
    }

    /// Copy the unreadable value aside. False when it could not be copied.
    fn preserve_unreadable(storage: &S) -> bool {
        match storage.copy_value(EXPENSES_KEY, CORRUPT_EXPENSES_KEY) {
            Ok(_) => {
                info!("Preserved unreadable expenses under '{}'", CORRUPT_EXPENSES_KEY);
                true
            }
            Err(e) => {
                error!(
                    "❌ Failed to preserve unreadable expenses, saving is disabled: {:#}",
                    e
                );
                false
            }
        }
    }

    /// Append `expense` and persist the full list
    pub fn add(&mut self, expense: Expense) -> Result<()> {
        let id = expense.id;
        self.expenses.push(expense);
        if let Err(e) = self.persist() {
            // Keep memory in step with what is on disk
            self.expenses.pop();
            return Err(e);
        }
        debug!("Added expense {}, store now holds {}", id, self.expenses.len());
        Ok(())
    }

    /// Remove the expense with `id`. Returns false, without writing, when no
    /// such expense exists.
    pub fn remove(&mut self, id: i64) -> Result<bool> {
        let Some(index) = self.expenses.iter().position(|expense| expense.id == id) else {
            debug!("Expense {} not found, nothing removed", id);
            return Ok(false);
        };

        let removed = self.expenses.remove(index);
        if let Err(e) = self.persist() {
            self.expenses.insert(index, removed);
            return Err(e);
        }
        debug!("Removed expense {}, store now holds {}", id, self.expenses.len());
        Ok(true)
    }

    /// Every expense in insertion (chronological) order
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    /// Expenses created on the same calendar day as `reference`, both sides
    /// read in the store's timezone
    pub fn today<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> Vec<Expense> {
        let day = reference.with_timezone(&self.timezone).date_naive();
        self.expenses
            .iter()
            .filter(|expense| expense.created_on(&self.timezone) == day)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    /// Identifier for an expense created at `now`
    pub fn next_id<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<i64, ExpenseError> {
        let latest = self.expenses.iter().map(|expense| expense.id).max();
        Expense::generate_id(now.timestamp_millis(), latest)
            .ok_or(ExpenseError::IdSpaceExhausted(latest.unwrap_or(i64::MAX)))
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    fn persist(&self) -> Result<()> {
        if self.writes_blocked {
            return Err(anyhow!(
                "Saved expenses could not be read or backed up; not overwriting them"
            ));
        }
        let json = serde_json::to_string(&self.expenses).context("Failed to serialize expenses")?;
        self.storage
            .set(EXPENSES_KEY, &json)
            .context("Failed to save expenses")
    }
}

/// Parse a stored expense list, checking the record invariants
pub fn parse_expenses(raw: &str) -> Result<Vec<Expense>, ExpenseError> {
    // A stored `null` loads as an empty list
    let parsed: Option<Vec<StoredExpense>> = serde_json::from_str(raw)
        .map_err(|e| ExpenseError::PersistedStateUnreadable(e.to_string()))?;
    let stored = parsed.unwrap_or_default();

    // Legacy records get ids past every explicit one
    let mut latest = stored.iter().filter_map(|record| record.id).max();
    let mut expenses = Vec::with_capacity(stored.len());
    for record in stored {
        let id = match record.id {
            Some(id) => id,
            None => {
                let id = Expense::generate_id(record.created_at.timestamp_millis(), latest)
                    .ok_or_else(|| {
                        ExpenseError::PersistedStateUnreadable(
                            "no id left for a legacy expense".to_string(),
                        )
                    })?;
                latest = Some(id);
                id
            }
        };
        expenses.push(Expense {
            id,
            amount: record.amount,
            category: record.category,
            description: record.description,
            created_at: record.created_at,
        });
    }

    let mut seen = HashSet::new();
    for expense in &expenses {
        if !expense.amount.is_finite() || expense.amount <= 0.0 {
            return Err(ExpenseError::PersistedStateUnreadable(format!(
                "expense {} has invalid amount {}",
                expense.id, expense.amount
            )));
        }
        if !seen.insert(expense.id) {
            return Err(ExpenseError::PersistedStateUnreadable(format!(
                "duplicate expense id {}",
                expense.id
            )));
        }
    }

    Ok(expenses)
}
