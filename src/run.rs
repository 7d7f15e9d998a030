//! The two front ends (one-shot subcommands and the interactive menu) and the
//! actions they share.

mod cli;
mod menu;

pub(crate) use cli::as_cli;
pub(crate) use menu::as_menu;

use std::io::Write;

use anyhow::{Context, Result};

use crate::evaluator::{AlertResult, BudgetEvaluator};
use crate::models::{BudgetDeclaration, Expense};
use crate::store::RecordStore;
use crate::ui::report;

/// Persist the expense, then evaluate its (category, month) and print any alert.
pub(crate) fn log_expense<S>(store: &S, expense: &Expense, out: &mut dyn Write) -> Result<AlertResult>
where
    S: RecordStore + ?Sized,
{
    store
        .insert_expense(expense)
        .context("Failed to save expense")?;
    writeln!(out, "Expense logged!")?;

    let result = BudgetEvaluator::new(store)
        .evaluate(&expense.category, &expense.month())
        .context("Failed to check budget")?;
    if let Some(message) = report::alert_message(&result) {
        writeln!(out, "{message}")?;
    }
    Ok(result)
}

pub(crate) fn set_budget<S>(store: &S, budget: &BudgetDeclaration, out: &mut dyn Write) -> Result<()>
where
    S: RecordStore + ?Sized,
{
    let existed = store
        .find_budget(&budget.month, &budget.category)
        .context("Failed to look up budget")?
        .is_some();
    store
        .upsert_budget(budget)
        .context("Failed to save budget")?;
    writeln!(out, "{}", if existed { "Budget updated." } else { "Budget set." })?;
    Ok(())
}

pub(crate) fn show_monthly_totals<S>(store: &S, out: &mut dyn Write) -> Result<()>
where
    S: RecordStore + ?Sized,
{
    let rows = BudgetEvaluator::new(store)
        .monthly_totals()
        .context("Failed to load monthly totals")?;
    write_lines(out, &report::monthly_totals_lines(&rows))
}

pub(crate) fn show_spend_vs_budget<S>(store: &S, month: &str, out: &mut dyn Write) -> Result<()>
where
    S: RecordStore + ?Sized,
{
    let rows = BudgetEvaluator::new(store)
        .spend_vs_budget(month)
        .with_context(|| format!("Failed to compare spending for {month}"))?;
    write_lines(out, &report::spend_vs_budget_lines(&rows))
}

fn write_lines(out: &mut dyn Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
