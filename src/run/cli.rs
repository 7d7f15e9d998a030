use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::db::Database;
use crate::evaluator::BudgetEvaluator;
use crate::models::{BudgetDeclaration, Category, Expense};
use crate::parse::{parse_amount, parse_category, parse_date, parse_month};
use crate::ui::report;

pub(crate) fn as_cli(args: &[String], db: &Database, out: &mut dyn Write) -> Result<()> {
    match args[1].as_str() {
        "log" | "l" => cli_log(&args[2..], db, out),
        "budget" | "b" => cli_budget(&args[2..], db, out),
        "check" | "c" => cli_check(&args[2..], db, out),
        "totals" | "t" => super::show_monthly_totals(db, out),
        "compare" => cli_compare(&args[2..], db, out),
        "export" => cli_export(&args[2..], db, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "spendguard {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "SpendGuard — expense log with monthly budget alerts")?;
    writeln!(out)?;
    writeln!(out, "Usage: spendguard [--db <path>] [command]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  (none)                          Interactive menu")?;
    writeln!(out, "  log <category> <amount>         Record an expense")?;
    writeln!(out, "    --date <YYYY-MM-DD>           Expense date (default: today)")?;
    writeln!(out, "  budget <YYYY-MM> <cat> <limit>  Set or replace a monthly budget")?;
    writeln!(out, "  check <category> [YYYY-MM]      Show budget status (default: current month)")?;
    writeln!(out, "  totals                          Total spending per month")?;
    writeln!(out, "  compare <YYYY-MM>               Spending vs budget per category")?;
    writeln!(out, "  export [path]                   Export expenses to CSV")?;
    writeln!(out, "    --month <YYYY-MM>             Only this month")?;
    writeln!(out, "  --help, -h                      Show this help")?;
    writeln!(out, "  --version, -V                   Show version")?;
    writeln!(out)?;
    writeln!(out, "The database location can also be set with ${}.", crate::config::DB_ENV_VAR)?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Positional arguments, skipping every `--flag value` pair.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut result = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            result.push(arg.as_str());
        }
    }
    result
}

fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

fn cli_log(args: &[String], db: &Database, out: &mut dyn Write) -> Result<()> {
    let pos = positionals(args);
    let [category, amount] = pos.as_slice() else {
        anyhow::bail!("Usage: spendguard log <category> <amount> [--date YYYY-MM-DD]");
    };

    let category = Category::parse(&parse_category(category)?);
    let amount = parse_amount(amount)?;
    let today = chrono::Local::now().date_naive();
    let date = parse_date(flag_value(args, "--date").unwrap_or(""), today)?;

    let expense = Expense::new(date, category.to_string(), amount);
    super::log_expense(db, &expense, out)?;
    Ok(())
}

fn cli_budget(args: &[String], db: &Database, out: &mut dyn Write) -> Result<()> {
    let [month, category, limit] = args else {
        anyhow::bail!("Usage: spendguard budget <YYYY-MM> <category> <limit>");
    };

    let budget = BudgetDeclaration::new(
        parse_month(month)?,
        Category::parse(&parse_category(category)?).to_string(),
        parse_amount(limit)?,
    );
    super::set_budget(db, &budget, out)
}

fn cli_check(args: &[String], db: &Database, out: &mut dyn Write) -> Result<()> {
    let (category, month) = match args {
        [category] => (category, current_month()),
        [category, month] => (category, parse_month(month)?),
        _ => anyhow::bail!("Usage: spendguard check <category> [YYYY-MM]"),
    };

    let category = Category::parse(&parse_category(category)?);
    let result = BudgetEvaluator::new(db).evaluate(category.as_str(), &month)?;
    for line in report::alert_summary(&result) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn cli_compare(args: &[String], db: &Database, out: &mut dyn Write) -> Result<()> {
    let month = match args.first() {
        Some(m) => parse_month(m)?,
        None => anyhow::bail!("Usage: spendguard compare <YYYY-MM>"),
    };
    super::show_spend_vs_budget(db, &month, out)
}

fn cli_export(args: &[String], db: &Database, out: &mut dyn Write) -> Result<()> {
    let month = flag_value(args, "--month").map(parse_month).transpose()?;

    let output_path = positionals(args)
        .first()
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            let suffix = month.as_deref().unwrap_or("all");
            PathBuf::from(format!("{home}/spendguard-export-{suffix}.csv"))
        });

    let count = db.export_to_csv(&output_path, month.as_deref())?;
    if count == 0 {
        writeln!(out, "No expenses to export")?;
    } else {
        writeln!(
            out,
            "Exported {count} expenses to {}",
            output_path.display()
        )?;
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
