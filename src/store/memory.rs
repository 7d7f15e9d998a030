use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use super::{accumulate, RecordStore, StoreResult};
use crate::models::{BudgetDeclaration, Expense};

/// Process-local store. Ids are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct MemoryStore {
    expenses: RefCell<Vec<Expense>>,
    budgets: RefCell<BTreeMap<(String, String), Decimal>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.borrow().len()
    }

    pub fn budget_count(&self) -> usize {
        self.budgets.borrow().len()
    }
}

impl RecordStore for MemoryStore {
    fn insert_expense(&self, expense: &Expense) -> StoreResult<i64> {
        let mut expenses = self.expenses.borrow_mut();
        let id = expenses.len() as i64 + 1;
        expenses.push(Expense {
            id: Some(id),
            ..expense.clone()
        });
        Ok(id)
    }

    fn upsert_budget(&self, budget: &BudgetDeclaration) -> StoreResult<()> {
        self.budgets.borrow_mut().insert(
            (budget.month.clone(), budget.category.clone()),
            budget.limit_amount,
        );
        Ok(())
    }

    fn sum_expenses(&self, category: &str, month: &str) -> StoreResult<Decimal> {
        let mut total = Decimal::ZERO;
        for e in self
            .expenses
            .borrow()
            .iter()
            .filter(|e| e.category == category && e.month() == month)
        {
            accumulate(&mut total, e.amount)?;
        }
        Ok(total)
    }

    fn find_budget(&self, month: &str, category: &str) -> StoreResult<Option<Decimal>> {
        Ok(self
            .budgets
            .borrow()
            .get(&(month.to_string(), category.to_string()))
            .copied())
    }

    fn distinct_expense_categories(&self) -> StoreResult<BTreeSet<String>> {
        Ok(self
            .expenses
            .borrow()
            .iter()
            .map(|e| e.category.clone())
            .collect())
    }

    fn sum_expenses_by_month(&self) -> StoreResult<BTreeMap<String, Decimal>> {
        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for e in self.expenses.borrow().iter() {
            accumulate(totals.entry(e.month()).or_default(), e.amount)?;
        }
        Ok(totals)
    }
}
