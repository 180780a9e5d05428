use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use std::io;
use std::path::PathBuf;

use expense_tracker_backend::storage::AppConfig;
use expense_tracker_backend::Backend;
use expense_tracker_terminal::app::ExpenseTrackerApp;
use expense_tracker_terminal::ui::TerminalPresenter;

#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(about = "Record daily expenses by category and keep running totals", long_about = None)]
struct Args {
    /// Directory holding expenses.json and config.yaml (defaults to Documents/Expense Tracker)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep expenses in memory only; nothing is written to disk
    #[arg(long, conflicts_with = "data_dir")]
    in_memory: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let presenter = TerminalPresenter::new(io::stdout());
    let stdin = io::stdin();

    if args.in_memory {
        info!("Running with in-memory storage");
        let backend = Backend::in_memory(AppConfig::default())?;
        ExpenseTrackerApp::new(backend, presenter).run(stdin.lock())
    } else {
        let backend = Backend::open(args.data_dir.as_deref())?;
        ExpenseTrackerApp::new(backend, presenter).run(stdin.lock())
    }
}
