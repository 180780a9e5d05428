//! Domain model for an expense record.
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::category::ExpenseCategory;

/// A single spending entry. Immutable once created; only deletion removes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Epoch milliseconds at creation, bumped past the latest id on collision
    pub id: i64,
    pub amount: f64,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<FixedOffset>,
}

impl Expense {
    /// Derive an id from the creation time, keeping ids strictly increasing.
    /// `None` once the latest id is `i64::MAX`.
    pub fn generate_id(epoch_millis: i64, latest_id: Option<i64>) -> Option<i64> {
        match latest_id {
            Some(latest) if latest >= epoch_millis => latest.checked_add(1),
            _ => Some(epoch_millis),
        }
    }

    /// Calendar date of creation as seen in `timezone`
    pub fn created_on(&self, timezone: &FixedOffset) -> NaiveDate {
        self.created_at.with_timezone(timezone).date_naive()
    }
}
