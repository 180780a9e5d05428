//! Export service domain logic for the expense tracker.
//!
//! Produces a read-only JSON snapshot of every stored expense and writes it to
//! a file named after the current date. There is no import path.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use log::{error, info};
use shared::{ExportDataResponse, ExportToPathResponse};
use std::fs;
use std::path::PathBuf;

use crate::domain::commands::export::ExportToPathCommand;
use crate::domain::models::expense::Expense;

/// Export service that handles all export-related business logic
#[derive(Debug, Clone)]
pub struct ExportService {
    timezone: FixedOffset,
}

impl ExportService {
    /// `timezone` decides the date in the export filename
    pub fn new(timezone: FixedOffset) -> Self {
        Self { timezone }
    }

    /// "expenses_2025-07-21.json"
    pub fn export_filename(&self, now: DateTime<Utc>) -> String {
        format!(
            "expenses_{}.json",
            now.with_timezone(&self.timezone).format("%Y-%m-%d")
        )
    }

    /// Pretty-printed JSON of `expenses` in storage order
    pub fn export_json(&self, expenses: &[Expense], now: DateTime<Utc>) -> Result<ExportDataResponse> {
        let json_content =
            serde_json::to_string_pretty(expenses).context("Failed to serialize expenses for export")?;
        let response = ExportDataResponse {
            json_content,
            filename: self.export_filename(now),
            expense_count: expenses.len(),
        };

        info!(
            "📄 EXPORT: Generated {} ({} expenses, {} bytes)",
            response.filename,
            response.expense_count,
            response.json_content.len()
        );
        Ok(response)
    }

    /// Write the export into the requested directory, or the Documents folder
    /// when none is given. Failures to write are reported in the response.
    pub fn export_to_path(
        &self,
        command: ExportToPathCommand,
        expenses: &[Expense],
        now: DateTime<Utc>,
    ) -> Result<ExportToPathResponse> {
        let export = self.export_json(expenses, now)?;

        let export_dir = match command.custom_path {
            Some(custom_path) if !custom_path.trim().is_empty() => {
                resolve_export_dir(&custom_path)
            }
            _ => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(dir) => dir,
                None => {
                    error!("❌ EXPORT: Could not determine default export directory");
                    return Ok(ExportToPathResponse {
                        success: false,
                        message: "Failed to determine export directory".to_string(),
                        file_path: String::new(),
                        expense_count: 0,
                    });
                }
            },
        };

        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!("❌ EXPORT: Failed to create export directory {:?}: {}", export_dir, e);
            return Ok(ExportToPathResponse {
                success: false,
                message: format!("Failed to create export directory: {}", e),
                file_path: export_dir.to_string_lossy().to_string(),
                expense_count: 0,
            });
        }

        let file_path = export_dir.join(&export.filename);
        let file_path_str = file_path.to_string_lossy().to_string();
        match fs::write(&file_path, &export.json_content) {
            Ok(()) => {
                info!("✅ EXPORT: Wrote {} expenses to {}", export.expense_count, file_path_str);
                Ok(ExportToPathResponse {
                    success: true,
                    message: format!("Exported {} expenses to {}", export.expense_count, file_path_str),
                    file_path: file_path_str,
                    expense_count: export.expense_count,
                })
            }
            Err(e) => {
                error!("❌ EXPORT: Failed to write {:?}: {}", file_path, e);
                Ok(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to write export file: {}", e),
                    file_path: file_path_str,
                    expense_count: 0,
                })
            }
        }
    }
}

/// Directory typed after `export`: surrounding quotes are dropped and a
/// leading `~` means the home directory
fn resolve_export_dir(input: &str) -> PathBuf {
    let trimmed = input.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|&quote| {
            trimmed
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(trimmed)
        .trim();

    let home_relative = unquoted
        .strip_prefix("~/")
        .or_else(|| unquoted.strip_prefix("~\\"))
        .or_else(|| (unquoted == "~").then_some(""));
    match (home_relative, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(unquoted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::category::ExpenseCategory;
    use tempfile::TempDir;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            Expense {
                id: 1,
                amount: 100.0,
                category: ExpenseCategory::Grocery,
                description: "veg".to_string(),
                created_at: DateTime::parse_from_rfc3339("2025-07-20T09:00:00+05:30").unwrap(),
            },
            Expense {
                id: 2,
                amount: 250.0,
                category: ExpenseCategory::Food,
                description: "lunch".to_string(),
                created_at: DateTime::parse_from_rfc3339("2025-07-21T16:28:00+05:30").unwrap(),
            },
        ]
    }

    #[test]
    fn test_filename_uses_target_timezone_date() {
        let service = ExportService::new(ist());
        // 20:00 UTC on the 21st is already the 22nd in IST
        let now = DateTime::parse_from_rfc3339("2025-07-21T20:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(service.export_filename(now), "expenses_2025-07-22.json");
    }

    #[test]
    fn test_export_json_is_pretty_and_in_storage_order() {
        let service = ExportService::new(ist());
        let expenses = sample_expenses();

        let export = service.export_json(&expenses, Utc::now()).unwrap();
        assert_eq!(export.expense_count, 2);
        assert!(export.json_content.contains("\n  {"));

        let parsed: Vec<Expense> = serde_json::from_str(&export.json_content).unwrap();
        assert_eq!(parsed, expenses);
    }

    #[test]
    fn test_export_to_path_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let service = ExportService::new(ist());
        let now = DateTime::parse_from_rfc3339("2025-07-21T10:58:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let command = ExportToPathCommand {
            custom_path: Some(format!("\"{}/\"", temp_dir.path().display())),
        };
        let response = service.export_to_path(command, &sample_expenses(), now).unwrap();

        assert!(response.success, "{}", response.message);
        assert_eq!(response.expense_count, 2);
        let written = temp_dir.path().join("expenses_2025-07-21.json");
        assert!(written.exists());
        let parsed: Vec<Expense> =
            serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_export_to_unwritable_path_reports_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        fs::write(&blocker, "file").unwrap();
        let service = ExportService::new(ist());

        let command = ExportToPathCommand {
            custom_path: Some(blocker.to_string_lossy().to_string()),
        };
        let response = service.export_to_path(command, &sample_expenses(), Utc::now()).unwrap();

        assert!(!response.success);
        assert_eq!(response.expense_count, 0);
    }

    #[test]
    fn test_resolve_export_dir() {
        let home = dirs::home_dir().unwrap();

        assert_eq!(resolve_export_dir("\"~/Documents\""), home.join("Documents"));
        assert_eq!(resolve_export_dir(" '~/My Exports' "), home.join("My Exports"));
        assert_eq!(resolve_export_dir("~"), home);
        assert_eq!(resolve_export_dir("  /path/to/dir  "), PathBuf::from("/path/to/dir"));
        assert_eq!(resolve_export_dir("\"/tmp/a b\""), PathBuf::from("/tmp/a b"));
        assert_eq!(resolve_export_dir("~other/dir"), PathBuf::from("~other/dir"));
    }
}
