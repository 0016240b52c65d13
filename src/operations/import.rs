use super::add::validate_expense;
use super::service::ExpenseService;
use crate::errors::ImportError;
use crate::models::expense::{ExpenseInput, NewExpense};
use log::info;
use std::fs::File;
use std::path::Path;

/// Imports a header-less CSV file with columns
/// `date, description, amount, category`.
///
/// Every line is checked before anything is written, and the rows are stored
/// in a single batch: the file is imported completely or not at all.
pub fn import_csv(service: &ExpenseService<'_>, path: &Path) -> Result<usize, ImportError> {
    let expenses = read_csv(path)?;
    let ids = service.store_validated(&expenses)?;
    info!("imported {} expenses from {}", ids.len(), path.display());
    Ok(ids.len())
}

/// Line numbers are physical 1-based lines of the file; blank lines the
/// reader skips still count.
fn read_csv(path: &Path) -> Result<Vec<NewExpense>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut expenses = Vec::new();
    let mut last_line = 0;

    for result in reader.records() {
        let record = result.map_err(|source| ImportError::Csv {
            line: source
                .position()
                .map_or(last_line + 1, |pos| pos.line() as usize),
            source,
        })?;
        let line = record
            .position()
            .map_or(last_line + 1, |pos| pos.line() as usize);
        last_line = line;

        if record.len() != 4 {
            return Err(ImportError::ColumnCount {
                line,
                found: record.len(),
            });
        }

        let amount_str = &record[2];
        let amount = amount_str
            .parse::<f64>()
            .map_err(|_| ImportError::InvalidAmount {
                line,
                value: amount_str.to_string(),
            })?;

        let input = ExpenseInput::new(&record[1], amount, &record[3], &record[0]);
        let expense =
            validate_expense(&input).map_err(|source| ImportError::InvalidRow { line, source })?;

        expenses.push(expense);
    }

    Ok(expenses)
}
