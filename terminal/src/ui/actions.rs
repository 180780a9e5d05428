//! # Actions Module
//!
//! Maps typed lines onto the user events of the expense screen: clicking a
//! category, submitting the entry form, clicking delete, switching lists and
//! exporting.

use expense_tracker_backend::domain::ExpenseCategory;
use shared::ExpenseListScope;

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    ShowCategories,
    SelectCategory(ExpenseCategory),
    ClearSelection,
    AddExpense {
        amount_input: String,
        description: String,
    },
    DeleteExpense(i64),
    ShowScope(ExpenseListScope),
    ShowSummary,
    Export(Option<String>),
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  categories              show the category grid
  select <name|number>    highlight a category
  clear                   remove the highlight
  add <amount> [note...]  record an expense in the highlighted category
  delete <id>             delete an expense (asks for confirmation)
  today | all             switch the expense list
  summary                 show totals per category
  export [directory]      write expenses_YYYY-MM-DD.json
  help                    show this text
  quit                    leave";

/// Parse one input line. Returns a user-facing message on failure.
pub fn parse_action(line: &str) -> Result<UserAction, String> {
    let trimmed = line.trim();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "categories" | "cats" => Ok(UserAction::ShowCategories),
        "select" | "s" => parse_category(rest).map(UserAction::SelectCategory),
        "clear" => Ok(UserAction::ClearSelection),
        "add" | "a" => {
            let (amount_input, description) = match rest.split_once(char::is_whitespace) {
                Some((amount, note)) => (amount, note.trim()),
                None => (rest, ""),
            };
            Ok(UserAction::AddExpense {
                amount_input: amount_input.to_string(),
                description: description.to_string(),
            })
        }
        "delete" | "del" | "rm" => rest
            .parse::<i64>()
            .map(UserAction::DeleteExpense)
            .map_err(|_| format!("'{}' is not an expense id", rest)),
        "today" => Ok(UserAction::ShowScope(ExpenseListScope::Today)),
        "all" => Ok(UserAction::ShowScope(ExpenseListScope::All)),
        "summary" => Ok(UserAction::ShowSummary),
        "export" => Ok(UserAction::Export(
            Some(rest.to_string()).filter(|path| !path.is_empty()),
        )),
        "help" | "?" => Ok(UserAction::Help),
        "quit" | "exit" | "q" => Ok(UserAction::Quit),
        "" => Err("Type 'help' to see the commands".to_string()),
        other => Err(format!("Unknown command '{}'. Type 'help' to see the commands", other)),
    }
}

/// A category by name, or by its 1-based position on the grid
fn parse_category(input: &str) -> Result<ExpenseCategory, String> {
    if input.is_empty() {
        return Err("Which category? Type 'categories' to see them".to_string());
    }
    if let Ok(position) = input.parse::<usize>() {
        return ExpenseCategory::from_position(position)
            .ok_or_else(|| format!("There is no category number {}", position));
    }
    input.parse::<ExpenseCategory>().map_err(|e| e.to_string())
}
