use chrono::NaiveDate;

/// A persisted expense. `id` is assigned by storage and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

/// A validated record ready for insertion; it has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn new(description: String, amount: f64, category: String, date: NaiveDate) -> Self {
        Self {
            description,
            amount,
            category,
            date,
        }
    }
}

/// Raw values as a caller supplies them, before any validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    pub description: String,
    pub amount: f64,
    pub category: String,
    /// Expected as `YYYY-MM-DD`.
    pub date: String,
}

impl ExpenseInput {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            date: date.into(),
        }
    }
}
