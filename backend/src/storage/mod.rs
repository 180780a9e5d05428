//! # Storage Module
//!
//! Handles all data persistence for the expense tracker.
//!
//! ## Key Responsibilities
//!
//! - **Record Store**: the in-memory expense list mirrored to storage
//! - **Storage Abstraction**: a key-value trait so the substrate can be swapped
//!   (JSON files on disk, an in-memory map in tests)
//! - **Configuration**: the YAML config file in the data directory
//!
//! ## Design Principles
//!
//! - **Whole-value writes**: every save replaces the full expense list
//! - **Fail soft on load**: unreadable data degrades to an empty list
//! - **Atomic files**: write to a temp file, then rename

pub mod config_repository;
pub mod connection;
pub mod expense_repository;
pub mod key_value;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use config_repository::{AppConfig, ConfigRepository};
pub use connection::FileConnection;
pub use expense_repository::{ExpenseRepository, CORRUPT_EXPENSES_KEY, EXPENSES_KEY};
pub use key_value::{FileStorage, MemoryStorage};
pub use traits::KeyValueStorage;
