//! Expense records, monthly per-category budgets, and the evaluator that
//! classifies spending against them.

pub mod db;
pub mod evaluator;
pub mod models;
pub mod store;
