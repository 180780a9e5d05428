//! Terminal frontend for the expense tracker.

pub mod app;
pub mod ui;
