#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::store::RecordStore;

fn run(db: &Database, list: &[&str]) -> Result<String> {
    let mut args = vec!["spendguard".to_string()];
    args.extend(list.iter().map(|s| s.to_string()));
    let mut out = Vec::new();
    as_cli(&args, db, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

// ── log ───────────────────────────────────────────────────────

#[test]
fn test_log_records_expense() {
    let db = Database::open_in_memory().unwrap();
    let output = run(&db, &["log", "food", "12.50", "--date", "2024-06-03"]).unwrap();
    assert_eq!(output, "Expense logged!\n");

    // Predefined labels are matched case-insensitively
    assert_eq!(db.sum_expenses("Food", "2024-06").unwrap(), dec!(12.50));
}

#[test]
fn test_log_prints_near_limit_alert() {
    let db = Database::open_in_memory().unwrap();
    run(&db, &["budget", "2024-06", "Food", "100"]).unwrap();
    run(&db, &["log", "Food", "85", "--date", "2024-06-01"]).unwrap();
    let output = run(&db, &["log", "Food", "10", "--date", "2024-06-02"]).unwrap();
    assert!(output.contains("Only ₹5.00 left in your budget for 'Food'."));
}

#[test]
fn test_log_prints_exceeded_alert() {
    let db = Database::open_in_memory().unwrap();
    run(&db, &["budget", "2024-06", "Fuel", "50"]).unwrap();
    let output = run(&db, &["log", "Fuel", "50.01", "--date", "2024-06-09"]).unwrap();
    assert!(output.contains("Budget exceeded for 'Fuel'!"));
}

#[test]
fn test_log_rejects_bad_input_without_writing() {
    let db = Database::open_in_memory().unwrap();
    assert!(run(&db, &["log", "Food", "abc"]).is_err());
    assert!(run(&db, &["log", "Food", "5", "--date", "June 3"]).is_err());
    assert!(run(&db, &["log", "Food"]).is_err());
    assert!(db.list_expenses(None).unwrap().is_empty());
}

// ── budget ────────────────────────────────────────────────────

#[test]
fn test_budget_set_then_update() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(
        run(&db, &["budget", "2024-06", "Rent", "900"]).unwrap(),
        "Budget set.\n"
    );
    assert_eq!(
        run(&db, &["budget", "2024-6", "rent", "950"]).unwrap(),
        "Budget updated.\n"
    );
    let budgets = db.list_budgets("2024-06").unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].category, "Rent");
    assert_eq!(budgets[0].limit_amount, dec!(950));
}

#[test]
fn test_budget_rejects_bad_month() {
    let db = Database::open_in_memory().unwrap();
    assert!(run(&db, &["budget", "2024-13", "Rent", "900"]).is_err());
    assert!(db.list_budgets("2024-13").unwrap().is_empty());
}

// ── check ─────────────────────────────────────────────────────

#[test]
fn test_check_reports_status() {
    let db = Database::open_in_memory().unwrap();
    run(&db, &["budget", "2024-06", "Bills", "200"]).unwrap();
    run(&db, &["log", "Bills", "50", "--date", "2024-06-01"]).unwrap();
    let output = run(&db, &["check", "Bills", "2024-06"]).unwrap();
    assert!(output.contains("Spent:      ₹50.00"));
    assert!(output.contains("Remaining:  ₹150.00"));
    assert!(output.contains("WITHIN_BUDGET"));
}

#[test]
fn test_check_without_budget() {
    let db = Database::open_in_memory().unwrap();
    let output = run(&db, &["check", "Bills", "2024-06"]).unwrap();
    assert!(output.contains("NO_BUDGET"));
}

// ── reports ───────────────────────────────────────────────────

#[test]
fn test_totals() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(run(&db, &["totals"]).unwrap(), "No spending data found.\n");

    run(&db, &["log", "Food", "10", "--date", "2024-06-01"]).unwrap();
    run(&db, &["log", "Food", "20", "--date", "2024-06-20"]).unwrap();
    run(&db, &["log", "Rent", "5", "--date", "2024-07-01"]).unwrap();
    assert_eq!(
        run(&db, &["totals"]).unwrap(),
        "2024-06: ₹30.00\n2024-07: ₹5.00\n"
    );
}

#[test]
fn test_compare() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(
        run(&db, &["compare", "2024-05"]).unwrap(),
        "No expenses recorded yet.\n"
    );

    run(&db, &["log", "Food", "18", "--date", "2024-05-02"]).unwrap();
    let output = run(&db, &["compare", "2024-05"]).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Food"));
    assert!(lines[0].ends_with("Spent: ₹18.00, Budget: ₹0.00"));

    assert!(run(&db, &["compare"]).is_err());
}

// ── export ────────────────────────────────────────────────────

#[test]
fn test_export_to_path() {
    let db = Database::open_in_memory().unwrap();
    run(&db, &["log", "Food", "18", "--date", "2024-05-02"]).unwrap();
    run(&db, &["log", "Food", "3", "--date", "2024-06-02"]).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("may.csv");
    let path_str = path.to_str().unwrap();
    let output = run(&db, &["export", path_str, "--month", "2024-05"]).unwrap();
    assert!(output.starts_with("Exported 1 expenses"));
    assert!(path.exists());
}

// ── misc ──────────────────────────────────────────────────────

#[test]
fn test_unknown_command() {
    let db = Database::open_in_memory().unwrap();
    let err = run(&db, &["frobnicate"]).unwrap_err();
    assert!(err.to_string().contains("Unknown command: frobnicate"));
}

#[test]
fn test_version_and_help() {
    let db = Database::open_in_memory().unwrap();
    assert!(run(&db, &["--version"]).unwrap().starts_with("spendguard "));
    assert!(run(&db, &["help"]).unwrap().contains("Usage: spendguard"));
}

#[test]
fn test_positionals_skip_flags() {
    let args: Vec<String> = ["Food", "--date", "2024-01-01", "5"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(positionals(&args), vec!["Food", "5"]);
    assert_eq!(flag_value(&args, "--date"), Some("2024-01-01"));
    assert_eq!(flag_value(&args, "--month"), None);
}

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("/tmp/out.csv"), "/tmp/out.csv");
    assert_eq!(shellexpand("out.csv"), "out.csv");
}

#[test]
fn test_log_zero_amount_is_allowed() {
    let db = Database::open_in_memory().unwrap();
    run(&db, &["log", "Transport", "0", "--date", "2024-06-01"]).unwrap();
    assert_eq!(
        db.sum_expenses("Transport", "2024-06").unwrap(),
        Decimal::ZERO
    );
    assert_eq!(db.list_expenses(None).unwrap().len(), 1);
}

#[test]
fn test_log_rejects_amount_beyond_range() {
    let db = Database::open_in_memory().unwrap();
    let huge = "50000000000000000000000000000";
    assert!(run(&db, &["log", "Food", huge, "--date", "2024-06-01"]).is_err());
    assert!(run(&db, &["budget", "2024-06", "Food", huge]).is_err());
    assert!(db.list_expenses(None).unwrap().is_empty());
}

#[test]
fn test_reports_fail_cleanly_on_overflowing_rows() {
    let db = Database::open_in_memory().unwrap();
    let huge: Decimal = "50000000000000000000000000000".parse().unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    for _ in 0..2 {
        db.insert_expense(&Expense::new(date, "Food".into(), huge))
            .unwrap();
    }

    assert!(run(&db, &["totals"]).is_err());
    assert!(run(&db, &["compare", "2024-06"]).is_err());
    assert!(run(&db, &["check", "Food", "2024-06"]).is_err());
}
