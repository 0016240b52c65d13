use crate::errors::ValidationError;
use crate::models::expense::{ExpenseInput, NewExpense};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

// chrono alone accepts unpadded fields like `2026-1-5`, which would break
// text ordering in storage.
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_SHAPE.is_match(value) {
        return Err(ValidationError::InvalidDate(value.to_string()));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Checks an input against the creation rules, in order: amount, description,
/// category, date. The first violation is returned.
pub fn validate_expense(input: &ExpenseInput) -> Result<NewExpense, ValidationError> {
    if !(input.amount.is_finite() && input.amount > 0.0) {
        return Err(ValidationError::InvalidAmount(input.amount));
    }

    // Whitespace-only text counts as empty.
    if input.description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    if input.category.trim().is_empty() {
        return Err(ValidationError::EmptyCategory);
    }

    let date = parse_date(&input.date)?;

    Ok(NewExpense::new(
        input.description.clone(),
        input.amount,
        input.category.clone(),
        date,
    ))
}

/// Parses both bounds of a date filter and rejects a reversed range.
pub fn validate_date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;

    if start_date > end_date {
        return Err(ValidationError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    Ok((start_date, end_date))
}
