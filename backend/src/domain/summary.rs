//! Aggregation over expense records.
//!
//! Totals are always recomputed from the records; nothing is stored. Sums use
//! plain `f64` accumulation and are rounded only when formatted for display.

use crate::domain::models::category::ExpenseCategory;
use crate::domain::models::expense::Expense;

/// Totals for the current view
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseTotals {
    pub today_total: f64,
    pub overall_total: f64,
    pub today_count: usize,
    pub overall_count: usize,
    /// Categories that have at least one expense, in grid order
    pub category_totals: Vec<CategoryBreakdown>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category: ExpenseCategory,
    pub total: f64,
    pub count: usize,
}

/// Records to show plus their totals, produced once per user action
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseView {
    /// Most recent first
    pub display_list: Vec<Expense>,
    pub totals: ExpenseTotals,
}

/// Total of `amount` over `records`; zero when empty
pub fn sum_amounts(records: &[Expense]) -> f64 {
    records.iter().map(|expense| expense.amount).sum()
}

pub fn summarize(all: &[Expense], today: &[Expense]) -> ExpenseTotals {
    ExpenseTotals {
        today_total: sum_amounts(today),
        overall_total: sum_amounts(all),
        today_count: today.len(),
        overall_count: all.len(),
        category_totals: category_breakdown(all),
    }
}

/// Per-category totals over `records`, skipping empty categories
pub fn category_breakdown(records: &[Expense]) -> Vec<CategoryBreakdown> {
    ExpenseCategory::ALL
        .iter()
        .filter_map(|&category| {
            let matching: Vec<&Expense> = records
                .iter()
                .filter(|expense| expense.category == category)
                .collect();
            if matching.is_empty() {
                return None;
            }
            Some(CategoryBreakdown {
                category,
                total: matching.iter().map(|expense| expense.amount).sum(),
                count: matching.len(),
            })
        })
        .collect()
}

/// Most recent first. Storage order is left untouched.
pub fn order_for_display(records: &[Expense]) -> Vec<Expense> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    ordered.reverse();
    ordered
}
