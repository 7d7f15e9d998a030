mod budget;
mod category;
mod expense;

pub use budget::BudgetDeclaration;
pub use category::{Category, OTHER_CATEGORY, PREDEFINED_CATEGORIES};
pub use expense::{month_key, Expense};
