//! Validation of user-typed values before they reach the store.

use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ui::util::CURRENCY_SYMBOL;

/// Largest amount or limit accepted from input, in whole currency units.
pub(crate) const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

/// Non-negative decimal. Accepts a leading currency symbol and thousands separators.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal> {
    let cleaned = input
        .trim()
        .trim_start_matches(CURRENCY_SYMBOL)
        .trim_start_matches('$')
        .replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        anyhow::bail!("Amount cannot be empty");
    }
    let amount =
        Decimal::from_str(cleaned).with_context(|| format!("Invalid amount: {input}"))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        anyhow::bail!("Amount cannot be negative: {input}");
    }
    if amount > Decimal::from(MAX_AMOUNT_UNITS) {
        anyhow::bail!("Amount too large: {input}");
    }
    Ok(amount)
}

/// `YYYY-MM-DD`; blank input means `today`.
pub(crate) fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format (expected YYYY-MM-DD): {trimmed}"))
}

/// `YYYY-MM`, normalized to zero-padded form.
pub(crate) fn parse_month(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let (year, month) = trimmed
        .split_once('-')
        .with_context(|| format!("Invalid month (expected YYYY-MM): {trimmed}"))?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        anyhow::bail!("Invalid year in month (expected YYYY-MM): {trimmed}");
    }
    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid year in month: {trimmed}"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month number: {trimmed}"))?;
    if !(1..=12).contains(&month) {
        anyhow::bail!("Month out of range (expected YYYY-MM): {trimmed}");
    }
    Ok(format!("{year:04}-{month:02}"))
}

/// 1-based choice within a menu of `len` entries.
pub(crate) fn parse_menu_choice(input: &str, len: usize) -> Result<usize> {
    let choice: usize = input
        .trim()
        .parse()
        .with_context(|| format!("Not a number: {}", input.trim()))?;
    if choice == 0 || choice > len {
        anyhow::bail!("Choice out of range: {choice} (1-{len})");
    }
    Ok(choice)
}

/// Category text must carry something besides whitespace.
pub(crate) fn parse_category(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        anyhow::bail!("Category cannot be empty");
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
