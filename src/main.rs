mod config;
mod db;
mod errors;
mod logging;
mod models;
mod operations;

use chrono::Local;
use clap::Parser;
use config::Config;
use db::connection::{Storage, load_schema_script};
use db::repository::ExpenseRepository;
use errors::StorageError;
use models::expense::{Expense, ExpenseInput};
use operations::import::import_csv;
use operations::service::ExpenseService;
use std::io::{self, Write};
use std::path::Path;
use std::process;

pub enum UserCommands {
    Add,
    List,
    FilterCategory,
    FilterDate,
    Delete,
    Totals,
    Import,
    Help,
    Exit,
    Unknown,
}

const COMMANDS: &str = "add | list | filter-category | filter-date | delete | totals | import | help | exit";

fn main() {
    let config = Config::parse();
    logging::init_logging(&config.log_level);

    let storage = match open_storage(&config) {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("startup failed: {}", e);
            eprintln!("Failed to initialize the database: {}", e);
            process::exit(1);
        }
    };
    let service = ExpenseService::new(ExpenseRepository::new(&storage));

    println!("Welcome to the expense tracker!");

    loop {
        let Some(input) = prompt(&format!("\nCommands: {}\n> ", COMMANDS)) else {
            break;
        };

        match check_for_command(&input) {
            UserCommands::Add => add_expense(&service),
            UserCommands::List => match service.list_expenses() {
                Ok(expenses) => print_expenses(&expenses),
                Err(e) => println!("Error listing expenses: {}", e),
            },
            UserCommands::FilterCategory => {
                let Some(category) = prompt("Category: ") else { break };
                match service.filter_by_category(&category) {
                    Ok(expenses) if expenses.is_empty() => {
                        println!("No expenses found for category: {}", category)
                    }
                    Ok(expenses) => print_expenses(&expenses),
                    Err(e) => println!("Error filtering by category: {}", e),
                }
            }
            UserCommands::FilterDate => {
                let Some(start) = prompt("Start date (YYYY-MM-DD): ") else { break };
                let Some(end) = prompt("End date (YYYY-MM-DD): ") else { break };
                match service.filter_by_date(&start, &end) {
                    Ok(expenses) if expenses.is_empty() => {
                        println!("No expenses between {} and {}", start, end)
                    }
                    Ok(expenses) => print_expenses(&expenses),
                    Err(e) => println!("Error filtering by date: {}", e),
                }
            }
            UserCommands::Delete => {
                let Some(id_input) = prompt("ID to delete: ") else { break };
                let id = match id_input.parse::<i64>() {
                    Ok(id) => id,
                    Err(_) => {
                        println!("Invalid ID '{}'. Please provide a whole number.", id_input);
                        continue;
                    }
                };
                match service.delete_expense(id) {
                    Ok(()) => println!("Expense deleted successfully."),
                    Err(e) => println!("Error deleting expense: {}", e),
                }
            }
            UserCommands::Totals => match service.category_totals() {
                Ok(totals) if totals.is_empty() => println!("No expenses recorded yet."),
                Ok(totals) => {
                    println!("\n{:<20} | {:>10}", "Category", "Total");
                    println!("{}", "-".repeat(33));
                    for (category, total) in &totals {
                        println!("{:<20} | {:>10.2}", category, total);
                    }
                }
                Err(e) => println!("Error calculating totals: {}", e),
            },
            UserCommands::Import => {
                let Some(path) = prompt("CSV file (date,description,amount,category): ") else {
                    break;
                };
                match import_csv(&service, Path::new(&path)) {
                    Ok(count) => println!("Successfully imported {} expenses.", count),
                    Err(e) => println!("Error importing expenses: {}", e),
                }
            }
            UserCommands::Help => println!("Available commands: {}", COMMANDS),
            UserCommands::Exit => {
                println!("Exiting the application.");
                break;
            }
            UserCommands::Unknown => println!("Unknown command '{}'. Type 'help' for the list.", input),
        }
    }
}

fn open_storage(config: &Config) -> Result<Storage, StorageError> {
    let schema_script = load_schema_script(config.schema.as_deref())?;
    Storage::initialize(&config.database, &schema_script)
}

fn add_expense(service: &ExpenseService<'_>) {
    let Some(description) = prompt("Description: ") else { return };

    let Some(amount_input) = prompt("Amount: ") else { return };
    let amount = match amount_input.parse::<f64>() {
        Ok(amount) => amount,
        Err(_) => {
            println!("Invalid amount '{}'. Please provide a number.", amount_input);
            return;
        }
    };

    let Some(category) = prompt("Category: ") else { return };

    let Some(date_input) = prompt("Date (YYYY-MM-DD, leave empty for today): ") else { return };
    let date = if date_input.is_empty() {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    } else {
        date_input
    };

    match service.add_expense(&ExpenseInput::new(description, amount, category, date)) {
        Ok(id) => println!("Expense added successfully with ID {}.", id),
        Err(e) => println!("Error adding expense: {}", e),
    }
}

fn print_expenses(expenses: &[Expense]) {
    println!(
        "\n{:>5} | {:<10} | {:<25} | {:>10} | {}",
        "ID", "Date", "Description", "Amount", "Category"
    );
    println!("{}", "-".repeat(70));
    for e in expenses {
        println!(
            "{:>5} | {:<10} | {:<25} | {:>10.2} | {}",
            e.id, e.date, e.description, e.amount, e.category
        );
    }
}

/// Prints `message` and reads one trimmed line. `None` on end of input or a
/// read failure.
fn prompt(message: &str) -> Option<String> {
    write_prompt(&mut io::stdout(), message);
    read_user_input()
}

/// A failed write only loses the prompt text; it is logged and input is
/// still read.
fn write_prompt(out: &mut impl Write, message: &str) -> bool {
    match write!(out, "{}", message).and_then(|()| out.flush()) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("failed to write prompt: {}", e);
            false
        }
    }
}

fn read_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            println!("Error reading input: {}", e);
            None
        }
    }
}

fn check_for_command(input: &str) -> UserCommands {
    match input {
        "add" => UserCommands::Add,
        "list" => UserCommands::List,
        "filter-category" => UserCommands::FilterCategory,
        "filter-date" => UserCommands::FilterDate,
        "delete" => UserCommands::Delete,
        "totals" => UserCommands::Totals,
        "import" => UserCommands::Import,
        "help" => UserCommands::Help,
        "exit" | "quit" => UserCommands::Exit,
        _ => UserCommands::Unknown,
    }
}
