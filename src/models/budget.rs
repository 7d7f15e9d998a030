use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetDeclaration {
    pub id: Option<i64>,
    /// Format: "YYYY-MM"
    pub month: String,
    pub category: String,
    pub limit_amount: Decimal,
}

impl BudgetDeclaration {
    pub fn new(month: String, category: String, limit_amount: Decimal) -> Self {
        Self {
            id: None,
            month,
            category,
            limit_amount,
        }
    }
}
