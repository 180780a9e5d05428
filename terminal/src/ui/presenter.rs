//! # Presenter Module
//!
//! The presentation side of the expense screen. A presenter receives
//! display-ready DTOs and turns them into output; it never reads or changes
//! the record store.

use anyhow::Result;
use shared::{CategoryInfo, ExpenseSummary, ExpenseViewResponse, FormattedExpense};
use std::io::Write;

use super::actions::HELP_TEXT;

/// Feedback shown after an action
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Success(String),
    Error(String),
    Info(String),
}

pub trait ExpensePresenter {
    /// Render the header clock, the expense list and the totals
    fn present_view(&mut self, view: &ExpenseViewResponse) -> Result<()>;

    fn present_categories(&mut self, categories: &[CategoryInfo]) -> Result<()>;

    fn present_summary(&mut self, summary: &ExpenseSummary) -> Result<()>;

    fn present_status(&mut self, status: &StatusMessage) -> Result<()>;

    /// Ask whether `expense` should really be deleted
    fn present_confirmation(&mut self, expense: &FormattedExpense) -> Result<()>;

    fn present_help(&mut self) -> Result<()>;

    /// Input prompt; `selected` is the highlighted category, if any
    fn present_prompt(&mut self, selected: Option<&str>) -> Result<()>;
}

/// Plain-text presenter writing to any output stream
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_row(&mut self, expense: &FormattedExpense) -> Result<()> {
        write!(
            self.out,
            "  #{}  {} {:<13} {:>12}",
            expense.id, expense.category_icon, expense.category, expense.formatted_amount
        )?;
        if !expense.description.is_empty() {
            write!(self.out, "  {}", expense.description)?;
        }
        writeln!(self.out, "  ({})", expense.formatted_time)?;
        Ok(())
    }
}

impl<W: Write> ExpensePresenter for TerminalPresenter<W> {
    fn present_view(&mut self, view: &ExpenseViewResponse) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", view.header_time)?;
        writeln!(self.out, "── {} ──", view.scope)?;

        if view.display_list.is_empty() {
            writeln!(self.out, "  {}", view.empty_message())?;
        } else {
            for expense in &view.display_list {
                self.write_row(expense)?;
            }
        }

        writeln!(
            self.out,
            "Today: {} ({})   Overall: {} ({})",
            view.summary.formatted_today_total,
            view.summary.today_count,
            view.summary.formatted_overall_total,
            view.summary.overall_count
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn present_categories(&mut self, categories: &[CategoryInfo]) -> Result<()> {
        for (index, category) in categories.iter().enumerate() {
            let marker = if category.selected { '*' } else { ' ' };
            writeln!(
                self.out,
                " {}{}. {} {}",
                marker,
                index + 1,
                category.icon,
                category.name
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn present_summary(&mut self, summary: &ExpenseSummary) -> Result<()> {
        if summary.category_totals.is_empty() {
            writeln!(self.out, "No expenses recorded yet")?;
        }
        for total in &summary.category_totals {
            writeln!(
                self.out,
                "  {} {:<13} {:>12}  ({})",
                total.icon, total.category, total.formatted_total, total.count
            )?;
        }
        writeln!(self.out, "  Overall: {}", summary.formatted_overall_total)?;
        self.out.flush()?;
        Ok(())
    }

    fn present_status(&mut self, status: &StatusMessage) -> Result<()> {
        match status {
            StatusMessage::Success(message) => writeln!(self.out, "✅ {}", message)?,
            StatusMessage::Error(message) => writeln!(self.out, "❌ {}", message)?,
            StatusMessage::Info(message) => writeln!(self.out, "{}", message)?,
        }
        self.out.flush()?;
        Ok(())
    }

    fn present_confirmation(&mut self, expense: &FormattedExpense) -> Result<()> {
        write!(
            self.out,
            "Delete {} {} from {}? [y/N] ",
            expense.category, expense.formatted_amount, expense.formatted_time
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn present_help(&mut self) -> Result<()> {
        writeln!(self.out, "{}", HELP_TEXT)?;
        self.out.flush()?;
        Ok(())
    }

    fn present_prompt(&mut self, selected: Option<&str>) -> Result<()> {
        match selected {
            Some(category) => write!(self.out, "[{}] > ", category)?,
            None => write!(self.out, "> ")?,
        }
        self.out.flush()?;
        Ok(())
    }
}
