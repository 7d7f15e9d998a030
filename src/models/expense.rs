use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
}

impl Expense {
    pub fn new(date: NaiveDate, category: String, amount: Decimal) -> Self {
        Self {
            id: None,
            date,
            category,
            amount,
        }
    }

    /// The "YYYY-MM" bucket this expense is aggregated under.
    pub fn month(&self) -> String {
        month_key(self.date)
    }
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
