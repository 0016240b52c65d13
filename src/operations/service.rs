use super::add::{validate_date_range, validate_expense};
use crate::db::repository::ExpenseRepository;
use crate::errors::ExpenseResult;
use crate::models::expense::{Expense, ExpenseInput, NewExpense};
use std::collections::BTreeMap;

/// Entry point for callers. Business rules are checked here before anything
/// reaches the repository.
pub struct ExpenseService<'a> {
    repo: ExpenseRepository<'a>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(repo: ExpenseRepository<'a>) -> Self {
        Self { repo }
    }

    /// Validates and stores one expense, returning its new id.
    pub fn add_expense(&self, input: &ExpenseInput) -> ExpenseResult<i64> {
        let expense = validate_expense(input)?;
        self.repo.add_expense(&expense)
    }

    /// Validates every input before writing; then stores them all in one
    /// transaction. Either every expense is stored or none is.
    pub fn add_expenses(&self, inputs: &[ExpenseInput]) -> ExpenseResult<Vec<i64>> {
        let expenses = inputs
            .iter()
            .map(validate_expense)
            .collect::<Result<Vec<NewExpense>, _>>()?;
        self.store_validated(&expenses)
    }

    /// Stores records that already passed `validate_expense`, in one
    /// transaction. No checks are repeated here.
    pub(super) fn store_validated(&self, expenses: &[NewExpense]) -> ExpenseResult<Vec<i64>> {
        self.repo.add_expenses(expenses)
    }

    pub fn list_expenses(&self) -> ExpenseResult<Vec<Expense>> {
        self.repo.list_expenses()
    }

    pub fn delete_expense(&self, id: i64) -> ExpenseResult<()> {
        self.repo.delete_expense(id)
    }

    pub fn filter_by_category(&self, category: &str) -> ExpenseResult<Vec<Expense>> {
        self.repo.filter_by_category(category)
    }

    /// Both bounds must be `YYYY-MM-DD` and `start` must not be after `end`.
    pub fn filter_by_date(&self, start: &str, end: &str) -> ExpenseResult<Vec<Expense>> {
        let (start, end) = validate_date_range(start, end)?;
        self.repo.filter_by_date(start, end)
    }

    pub fn category_totals(&self) -> ExpenseResult<BTreeMap<String, f64>> {
        self.repo.category_totals()
    }
}
