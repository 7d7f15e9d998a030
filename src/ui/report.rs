use rust_decimal::Decimal;

use super::util::{format_amount, truncate};
use crate::evaluator::{AlertResult, CategorySpend, Classification};

const CATEGORY_WIDTH: usize = 24;

/// The one-line warning printed after logging an expense, if any.
pub(crate) fn alert_message(result: &AlertResult) -> Option<String> {
    match result.classification {
        Classification::Exceeded => Some(format!(
            "Budget exceeded for '{}'!",
            result.category
        )),
        Classification::NearLimit => {
            let remaining = result.remaining().unwrap_or_default();
            Some(format!(
                "Only {} left in your budget for '{}'.",
                format_amount(remaining),
                result.category
            ))
        }
        Classification::NoBudget | Classification::WithinBudget => None,
    }
}

pub(crate) fn alert_summary(result: &AlertResult) -> Vec<String> {
    let mut lines = vec![
        format!("{} — {}", result.category, result.month),
        "─".repeat(40),
        format!("  Spent:      {}", format_amount(result.spent)),
    ];
    match (result.limit, result.remaining()) {
        (Some(limit), Some(remaining)) => {
            lines.push(format!("  Budget:     {}", format_amount(limit)));
            lines.push(format!("  Remaining:  {}", format_amount(remaining)));
        }
        _ => lines.push("  Budget:     (none)".to_string()),
    }
    lines.push(format!("  Status:     {}", result.classification));
    lines
}

pub(crate) fn monthly_totals_lines(rows: &[(String, Decimal)]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["No spending data found.".to_string()];
    }
    rows.iter()
        .map(|(month, total)| format!("{month}: {}", format_amount(*total)))
        .collect()
}

pub(crate) fn spend_vs_budget_lines(rows: &[CategorySpend]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["No expenses recorded yet.".to_string()];
    }
    rows.iter()
        .map(|row| {
            let name = truncate(&row.category, CATEGORY_WIDTH);
            format!(
                "{name:<width$} -> Spent: {}, Budget: {}",
                format_amount(row.spent),
                format_amount(row.limit),
                width = CATEGORY_WIDTH,
            )
        })
        .collect()
}
