pub mod category;
pub mod expense;
