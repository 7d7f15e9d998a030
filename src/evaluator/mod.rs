//! Budget evaluation: aggregate spend per (month, category), compare it with
//! the declared limit and classify the result.
//!
//! The evaluator is stateless. Every call reads the [`RecordStore`] as it is
//! at that moment and any store failure is returned unchanged.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::store::{RecordStore, StoreResult};

/// Fraction of the limit at or below which the remaining amount counts as
/// "near the limit". Fixed policy, 10%.
pub const NEAR_LIMIT_RATIO: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NoBudget,
    WithinBudget,
    NearLimit,
    Exceeded,
}

impl Classification {
    /// First match wins: over the limit, then inside the near-limit band.
    pub fn classify(spent: Decimal, limit: Option<Decimal>) -> Self {
        let Some(limit) = limit else {
            return Self::NoBudget;
        };
        if spent > limit {
            return Self::Exceeded;
        }
        // Out of range only when the gap is wider than any 10% band.
        let Some(remaining) = limit.checked_sub(spent) else {
            return Self::WithinBudget;
        };
        if remaining <= NEAR_LIMIT_RATIO * limit {
            Self::NearLimit
        } else {
            Self::WithinBudget
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoBudget => "NO_BUDGET",
            Self::WithinBudget => "WITHIN_BUDGET",
            Self::NearLimit => "NEAR_LIMIT",
            Self::Exceeded => "EXCEEDED",
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, Self::NearLimit | Self::Exceeded)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertResult {
    pub category: String,
    pub month: String,
    pub spent: Decimal,
    pub limit: Option<Decimal>,
    pub classification: Classification,
}

impl AlertResult {
    /// `limit - spent`, or `None` without a declared budget or when the
    /// difference is out of range.
    pub fn remaining(&self) -> Option<Decimal> {
        self.limit.and_then(|limit| limit.checked_sub(self.spent))
    }
}

/// One row of the spending-vs-budget sweep. `limit` is zero when undeclared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpend {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
}

pub struct BudgetEvaluator<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> BudgetEvaluator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn evaluate(&self, category: &str, month: &str) -> StoreResult<AlertResult> {
        let spent = self.store.sum_expenses(category, month)?;
        let limit = self.store.find_budget(month, category)?;
        let classification = Classification::classify(spent, limit);

        if classification.is_alert() {
            warn!(category, month, %spent, ?limit, %classification, "budget alert");
        } else {
            debug!(category, month, %spent, ?limit, %classification, "budget evaluated");
        }

        Ok(AlertResult {
            category: category.to_string(),
            month: month.to_string(),
            spent,
            limit,
            classification,
        })
    }

    /// Total spend per month, oldest month first. Empty when nothing is recorded.
    pub fn monthly_totals(&self) -> StoreResult<Vec<(String, Decimal)>> {
        Ok(self.store.sum_expenses_by_month()?.into_iter().collect())
    }

    /// One row per category that has ever had an expense, whether or not a
    /// budget is declared for `month`. Budgets for categories with no expenses
    /// at all are not listed.
    pub fn spend_vs_budget(&self, month: &str) -> StoreResult<Vec<CategorySpend>> {
        let categories = self.store.distinct_expense_categories()?;
        let mut rows = Vec::with_capacity(categories.len());
        for category in categories {
            let spent = self.store.sum_expenses(&category, month)?;
            let limit = self
                .store
                .find_budget(month, &category)?
                .unwrap_or(Decimal::ZERO);
            rows.push(CategorySpend {
                category,
                spent,
                limit,
            });
        }
        debug!(month, rows = rows.len(), "spend vs budget");
        Ok(rows)
    }
}
