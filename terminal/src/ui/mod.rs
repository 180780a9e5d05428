//! # UI Module
//!
//! Terminal presentation for the expense tracker: input parsing, the
//! presenter that renders views, and DTO mappers.

pub mod actions;
pub mod mappers;
pub mod presenter;

pub use actions::*;
pub use mappers::*;
pub use presenter::*;
