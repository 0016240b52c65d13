use crate::db::connection::Storage;
use crate::errors::{ExpenseError, ExpenseResult};
use crate::models::expense::{Expense, NewExpense};
use chrono::NaiveDate;
use log::debug;
use rusqlite::types::Type;
use rusqlite::{Row, params};
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_EXPENSES: &str = "SELECT id, description, amount, category, date FROM expenses";

/// Persistence mechanics for expenses. Holds no business rules: whatever it
/// is handed gets written, so callers go through the service to validate.
pub struct ExpenseRepository<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseRepository<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Inserts one row and returns the id storage assigned to it.
    pub fn add_expense(&self, expense: &NewExpense) -> ExpenseResult<i64> {
        let conn = self.storage.connection();
        conn.execute(
            "INSERT INTO expenses (description, amount, category, date) VALUES (?1, ?2, ?3, ?4)",
            params![
                &expense.description,
                expense.amount,
                &expense.category,
                expense.date.format(DATE_FORMAT).to_string(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("inserted expense id={id}");
        Ok(id)
    }

    /// Inserts every record inside one transaction. If any insert fails the
    /// transaction is dropped without commit and no row of the batch remains.
    pub fn add_expenses(&self, expenses: &[NewExpense]) -> ExpenseResult<Vec<i64>> {
        let tx = self.storage.connection().unchecked_transaction()?;

        let mut ids = Vec::with_capacity(expenses.len());
        for expense in expenses {
            ids.push(self.add_expense(expense)?);
        }

        tx.commit()?;
        debug!("committed batch of {} expenses", ids.len());
        Ok(ids)
    }

    pub fn list_expenses(&self) -> ExpenseResult<Vec<Expense>> {
        self.query_expenses(&format!("{SELECT_EXPENSES} ORDER BY date ASC, id ASC"), [])
    }

    /// Fails with `NotFound` when no row carries `id`.
    pub fn delete_expense(&self, id: i64) -> ExpenseResult<()> {
        let rows_affected = self
            .storage
            .connection()
            .execute("DELETE FROM expenses WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(ExpenseError::NotFound(id));
        }

        debug!("deleted expense id={id}");
        Ok(())
    }

    /// Exact, case-sensitive match on the category text.
    pub fn filter_by_category(&self, category: &str) -> ExpenseResult<Vec<Expense>> {
        self.query_expenses(
            &format!("{SELECT_EXPENSES} WHERE category = ?1 ORDER BY date ASC, id ASC"),
            [category],
        )
    }

    /// Rows dated within `[start, end]`, both ends inclusive.
    ///
    /// Dates are compared as text. That matches calendar order only because
    /// every stored date is the zero-padded `YYYY-MM-DD` form.
    pub fn filter_by_date(&self, start: NaiveDate, end: NaiveDate) -> ExpenseResult<Vec<Expense>> {
        self.query_expenses(
            &format!("{SELECT_EXPENSES} WHERE date >= ?1 AND date <= ?2 ORDER BY date ASC, id ASC"),
            [
                start.format(DATE_FORMAT).to_string(),
                end.format(DATE_FORMAT).to_string(),
            ],
        )
    }

    /// Sum of `amount` per category over every stored row.
    pub fn category_totals(&self) -> ExpenseResult<BTreeMap<String, f64>> {
        let mut stmt = self.storage.connection().prepare(
            "SELECT category, SUM(amount) FROM expenses GROUP BY category ORDER BY category",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;

        let mut totals = BTreeMap::new();
        for row in rows {
            let (category, total) = row?;
            totals.insert(category, total);
        }

        debug!("computed totals for {} categories", totals.len());
        Ok(totals)
    }

    fn query_expenses<P: rusqlite::Params>(&self, sql: &str, params: P) -> ExpenseResult<Vec<Expense>> {
        let mut stmt = self.storage.connection().prepare(sql)?;
        let expense_iter = stmt.query_map(params, expense_from_row)?;

        let mut expenses = Vec::new();
        for expense in expense_iter {
            expenses.push(expense?);
        }

        debug!("query returned {} expenses", expenses.len());
        Ok(expenses)
    }
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let date_str: String = row.get(4)?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Expense {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        date,
    })
}
