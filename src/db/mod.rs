mod schema;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::{BudgetDeclaration, Expense};
use crate::store::{accumulate, RecordStore, StoreError, StoreResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::unavailable(err)
    }
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// A private database that disappears with the connection.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            let tx = self.conn.transaction()?;
            tx.execute_batch(schema::SCHEMA_V1)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tx.commit()?;
            info!(version = schema::CURRENT_VERSION, "created fresh schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?;

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            info!(from = current, to = schema::CURRENT_VERSION, "migrated schema");
        }

        Ok(())
    }

    // ── Listings ──────────────────────────────────────────────

    /// All expenses, optionally restricted to one month, oldest first.
    pub fn list_expenses(&self, month: Option<&str>) -> StoreResult<Vec<Expense>> {
        let (sql, args): (&str, Vec<&str>) = match month {
            Some(m) => (
                "SELECT id, date, category, amount FROM expenses
                 WHERE strftime('%Y-%m', date) = ?1
                 ORDER BY date, id",
                vec![m],
            ),
            None => (
                "SELECT id, date, category, amount FROM expenses ORDER BY date, id",
                vec![],
            ),
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(args), |row| {
            Ok(Expense {
                id: Some(row.get(0)?),
                date: date_at(row, 1)?,
                category: row.get(2)?,
                amount: decimal_at(row, 3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn list_budgets(&self, month: &str) -> StoreResult<Vec<BudgetDeclaration>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, month, category, limit_amount FROM budgets
             WHERE month = ?1 ORDER BY category",
        )?;
        let rows = stmt.query_map(params![month], |row| {
            Ok(BudgetDeclaration {
                id: Some(row.get(0)?),
                month: row.get(1)?,
                category: row.get(2)?,
                limit_amount: decimal_at(row, 3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Export ────────────────────────────────────────────────

    /// Write expenses as `id,date,category,amount` rows. Returns the row count.
    pub fn export_to_csv(&self, path: &Path, month: Option<&str>) -> Result<usize> {
        let expenses = self.list_expenses(month)?;
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        wtr.write_record(["id", "date", "category", "amount"])?;
        for e in &expenses {
            wtr.write_record([
                e.id.unwrap_or_default().to_string(),
                e.date.format(DATE_FORMAT).to_string(),
                e.category.clone(),
                e.amount.to_string(),
            ])?;
        }
        wtr.flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(count = expenses.len(), path = %path.display(), "exported expenses");
        Ok(expenses.len())
    }
}

impl RecordStore for Database {
    fn insert_expense(&self, expense: &Expense) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO expenses (date, category, amount) VALUES (?1, ?2, ?3)",
            params![
                expense.date.format(DATE_FORMAT).to_string(),
                expense.category,
                expense.amount.to_string(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, category = %expense.category, amount = %expense.amount, "expense inserted");
        Ok(id)
    }

    fn upsert_budget(&self, budget: &BudgetDeclaration) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO budgets (month, category, limit_amount)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(month, category) DO UPDATE SET limit_amount = excluded.limit_amount",
            params![
                budget.month,
                budget.category,
                budget.limit_amount.to_string(),
            ],
        )?;
        info!(month = %budget.month, category = %budget.category, limit = %budget.limit_amount, "budget upserted");
        Ok(())
    }

    fn sum_expenses(&self, category: &str, month: &str) -> StoreResult<Decimal> {
        let mut stmt = self.conn.prepare(
            "SELECT amount FROM expenses
             WHERE category = ?1 AND strftime('%Y-%m', date) = ?2",
        )?;
        let amounts = stmt.query_map(params![category, month], |row| decimal_at(row, 0))?;
        let mut total = Decimal::ZERO;
        for amount in amounts {
            accumulate(&mut total, amount?)?;
        }
        debug!(category, month, %total, "summed expenses");
        Ok(total)
    }

    fn find_budget(&self, month: &str, category: &str) -> StoreResult<Option<Decimal>> {
        let result = self.conn.query_row(
            "SELECT limit_amount FROM budgets WHERE month = ?1 AND category = ?2",
            params![month, category],
            |row| decimal_at(row, 0),
        );
        match result {
            Ok(limit) => Ok(Some(limit)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn distinct_expense_categories(&self) -> StoreResult<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT category FROM expenses")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<std::result::Result<BTreeSet<_>, _>>()?)
    }

    fn sum_expenses_by_month(&self) -> StoreResult<BTreeMap<String, Decimal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT strftime('%Y-%m', date), amount FROM expenses")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, decimal_at(row, 1)?))
        })?;
        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for row in rows {
            let (month, amount) = row?;
            accumulate(totals.entry(month).or_default(), amount)?;
        }
        Ok(totals)
    }
}

/// Amounts are stored as decimal text; a value that fails to parse is a
/// conversion error, not zero.
fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
