//! Expense table domain logic for the expense tracker.
//!
//! Turns domain records and totals into the display-ready DTOs handed to a
//! frontend: currency amounts rounded to two places, times shown in the
//! configured timezone, category labels and icons from the fixed lookup table.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    CategoryInfo, CategoryTotal, ExpenseListScope, ExpenseSummary, ExpenseViewResponse,
    FormattedExpense,
};

use crate::domain::models::category::ExpenseCategory;
use crate::domain::models::expense::Expense;
use crate::domain::selection::CategorySelection;
use crate::domain::summary::{ExpenseTotals, ExpenseView};

/// Clock style for expense rows and the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    TwelveHour,     // "04:28 PM"
    TwentyFourHour, // "16:28"
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseTableConfig {
    pub currency_symbol: String,
    pub time_format: TimeFormat,
}

impl Default for ExpenseTableConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            time_format: TimeFormat::TwelveHour,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseTableService {
    config: ExpenseTableConfig,
    timezone: FixedOffset,
}

impl ExpenseTableService {
    pub fn new(timezone: FixedOffset) -> Self {
        Self::with_config(ExpenseTableConfig::default(), timezone)
    }

    pub fn with_config(config: ExpenseTableConfig, timezone: FixedOffset) -> Self {
        Self { config, timezone }
    }

    pub fn format_expenses(&self, expenses: &[Expense]) -> Vec<FormattedExpense> {
        expenses
            .iter()
            .map(|expense| self.format_single_expense(expense))
            .collect()
    }

    pub fn format_single_expense(&self, expense: &Expense) -> FormattedExpense {
        FormattedExpense {
            id: expense.id,
            category: expense.category.label().to_string(),
            category_icon: expense.category.icon().to_string(),
            formatted_amount: self.format_amount(expense.amount),
            description: expense.description.clone(),
            formatted_time: self.format_time(&expense.created_at),
            raw_amount: expense.amount,
            raw_date: expense.created_at.to_rfc3339(),
        }
    }

    /// "₹250.00"
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.config.currency_symbol, amount)
    }

    /// "21 Jul 2025, 04:28 PM" in the configured timezone
    pub fn format_time(&self, timestamp: &DateTime<FixedOffset>) -> String {
        let local = timestamp.with_timezone(&self.timezone);
        format!("{}, {}", local.format("%d %b %Y"), local.format(self.clock_pattern()))
    }

    /// "Monday, July 21, 2025, 04:28 PM" in the configured timezone
    pub fn format_header_time(&self, now: DateTime<Utc>) -> String {
        let local = now.with_timezone(&self.timezone);
        format!("{}, {}", local.format("%A, %B %-d, %Y"), local.format(self.clock_pattern()))
    }

    fn clock_pattern(&self) -> &'static str {
        match self.config.time_format {
            TimeFormat::TwelveHour => "%I:%M %p",
            TimeFormat::TwentyFourHour => "%H:%M",
        }
    }

    pub fn format_summary(&self, totals: &ExpenseTotals) -> ExpenseSummary {
        ExpenseSummary {
            today_total: totals.today_total,
            overall_total: totals.overall_total,
            formatted_today_total: self.format_amount(totals.today_total),
            formatted_overall_total: self.format_amount(totals.overall_total),
            today_count: totals.today_count,
            overall_count: totals.overall_count,
            category_totals: totals
                .category_totals
                .iter()
                .map(|breakdown| CategoryTotal {
                    category: breakdown.category.label().to_string(),
                    icon: breakdown.category.icon().to_string(),
                    total: breakdown.total,
                    formatted_total: self.format_amount(breakdown.total),
                    count: breakdown.count,
                })
                .collect(),
        }
    }

    /// The category grid with the current highlight
    pub fn category_infos(&self, selection: &CategorySelection) -> Vec<CategoryInfo> {
        ExpenseCategory::ALL
            .iter()
            .map(|&category| CategoryInfo {
                name: category.label().to_string(),
                icon: category.icon().to_string(),
                selected: selection.is_selected(category),
            })
            .collect()
    }

    /// Assemble the full screen from a recomputed view
    pub fn format_view(
        &self,
        view: &ExpenseView,
        scope: ExpenseListScope,
        selection: &CategorySelection,
        now: DateTime<Utc>,
    ) -> ExpenseViewResponse {
        ExpenseViewResponse {
            scope,
            display_list: self.format_expenses(&view.display_list),
            summary: self.format_summary(&view.totals),
            categories: self.category_infos(selection),
            header_time: self.format_header_time(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::summary::summarize;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    }

    fn lunch() -> Expense {
        Expense {
            id: 1753095480000,
            amount: 250.0,
            category: ExpenseCategory::Food,
            description: "lunch".to_string(),
            created_at: DateTime::parse_from_rfc3339("2025-07-21T10:58:00Z").unwrap(),
        }
    }

    #[test]
    fn test_format_single_expense() {
        let service = ExpenseTableService::new(ist());
        let formatted = service.format_single_expense(&lunch());

        assert_eq!(formatted.id, 1753095480000);
        assert_eq!(formatted.category, "Food");
        assert_eq!(formatted.category_icon, "🍽️");
        assert_eq!(formatted.formatted_amount, "₹250.00");
        assert_eq!(formatted.description, "lunch");
        assert_eq!(formatted.formatted_time, "21 Jul 2025, 04:28 PM");
        assert_eq!(formatted.raw_amount, 250.0);
    }

    #[test]
    fn test_amount_rounds_only_for_display() {
        let service = ExpenseTableService::new(ist());
        assert_eq!(service.format_amount(0.1 + 0.2), "₹0.30");
        assert_eq!(service.format_amount(0.0), "₹0.00");
        assert_eq!(service.format_amount(1234.567), "₹1234.57");
    }

    #[test]
    fn test_header_time() {
        let service = ExpenseTableService::new(ist());
        let now = DateTime::parse_from_rfc3339("2025-07-21T10:58:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(service.format_header_time(now), "Monday, July 21, 2025, 04:28 PM");
    }

    #[test]
    fn test_twenty_four_hour_clock_and_custom_currency() {
        let config = ExpenseTableConfig {
            currency_symbol: "$".to_string(),
            time_format: TimeFormat::TwentyFourHour,
        };
        let service = ExpenseTableService::with_config(config, ist());
        let formatted = service.format_single_expense(&lunch());
        assert_eq!(formatted.formatted_amount, "$250.00");
        assert_eq!(formatted.formatted_time, "21 Jul 2025, 16:28");
    }

    #[test]
    fn test_category_infos_mark_selection() {
        let service = ExpenseTableService::new(ist());
        let infos = service.category_infos(&CategorySelection::Selected(ExpenseCategory::Petrol));

        assert_eq!(infos.len(), 8);
        assert_eq!(infos[0].name, "Food");
        let selected: Vec<&str> = infos
            .iter()
            .filter(|info| info.selected)
            .map(|info| info.name.as_str())
            .collect();
        assert_eq!(selected, vec!["Petrol"]);
    }

    #[test]
    fn test_format_summary() {
        let service = ExpenseTableService::new(ist());
        let all = vec![lunch()];
        let summary = service.format_summary(&summarize(&all, &all));

        assert_eq!(summary.formatted_today_total, "₹250.00");
        assert_eq!(summary.formatted_overall_total, "₹250.00");
        assert_eq!(summary.category_totals.len(), 1);
        assert_eq!(summary.category_totals[0].formatted_total, "₹250.00");
    }
}
