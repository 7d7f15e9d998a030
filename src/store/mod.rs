//! The persistence contract the budget evaluator reads through.
//!
//! [`RecordStore`] is the only thing the evaluator knows about storage. The
//! SQLite-backed [`crate::db::Database`] is the production implementation;
//! [`MemoryStore`] keeps everything in process memory.

mod memory;

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{BudgetDeclaration, Expense};

pub use memory::MemoryStore;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of the underlying persistence. Never retried here.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record store unavailable")]
    Unavailable(#[source] BoxError),
}

impl StoreError {
    pub fn unavailable<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Unavailable(err.into())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Add `amount` to a running total, failing instead of overflowing.
pub(crate) fn accumulate(total: &mut Decimal, amount: Decimal) -> StoreResult<()> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| StoreError::unavailable("expense total out of range"))?;
    Ok(())
}

pub trait RecordStore {
    /// Append an expense and return its store-assigned id.
    fn insert_expense(&self, expense: &Expense) -> StoreResult<i64>;

    /// Insert the declaration, or replace the limit of the existing one for
    /// the same (month, category).
    fn upsert_budget(&self, budget: &BudgetDeclaration) -> StoreResult<()>;

    /// Sum of amounts for `category` dated within `month`; zero when none match.
    fn sum_expenses(&self, category: &str, month: &str) -> StoreResult<Decimal>;

    fn find_budget(&self, month: &str, category: &str) -> StoreResult<Option<Decimal>>;

    /// Every category that appears on at least one expense, in any month.
    fn distinct_expense_categories(&self) -> StoreResult<BTreeSet<String>>;

    fn sum_expenses_by_month(&self) -> StoreResult<BTreeMap<String, Decimal>>;
}
